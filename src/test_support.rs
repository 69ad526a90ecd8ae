//! A local stand-in for the LinkedIn API, served by `tiny_http` on an ephemeral port.

use std::sync::{Arc, Mutex};
use std::thread;

use tiny_http::{Header, Response, Server};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path plus query string.
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.clone())
    }
}

pub struct MockResponse {
    status: u16,
    body: String,
    headers: Vec<(String, String)>,
}

impl MockResponse {
    pub fn json(status: u16, body: &str) -> Self {
        MockResponse {
            status,
            body: body.to_string(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        }
    }

    pub fn empty(status: u16) -> Self {
        MockResponse {
            status,
            body: String::new(),
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

pub struct MockLinkedIn {
    base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockLinkedIn {
    /// Serves every request with `route(method, path, base_url)` until the test process exits.
    pub fn start<F>(route: F) -> Self
    where
        F: Fn(&str, &str, &str) -> MockResponse + Send + 'static,
    {
        let server = Server::http("127.0.0.1:0").expect("bind mock server");
        let addr = server.server_addr().to_ip().expect("mock server has an IP address");
        let base_url = format!("http://{}", addr);
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        let base = base_url.clone();
        thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = Vec::new();
                let _ = request.as_reader().read_to_end(&mut body);
                let method = request.method().to_string();
                let path = request.url().to_string();
                let headers = request
                    .headers()
                    .iter()
                    .map(|h| (h.field.as_str().as_str().to_string(), h.value.as_str().to_string()))
                    .collect();
                recorded.lock().expect("request log").push(RecordedRequest {
                    method: method.clone(),
                    path: path.clone(),
                    headers,
                    body,
                });

                let reply = route(&method, &path, &base);
                let mut response = Response::from_string(reply.body).with_status_code(reply.status);
                for (name, value) in reply.headers {
                    if let Ok(header) = Header::from_bytes(name.as_bytes(), value.as_bytes()) {
                        response = response.with_header(header);
                    }
                }
                let _ = request.respond(response);
            }
        });

        MockLinkedIn { base_url, requests }
    }

    /// Routes for a Posts API publish that succeeds with `post_id`.
    pub fn posts_api_ok(post_id: &str) -> impl Fn(&str, &str, &str) -> MockResponse + Send + 'static {
        let post_id = post_id.to_string();
        move |method: &str, path: &str, base: &str| match (method, path) {
            ("POST", "/rest/documents?action=initializeUpload") => MockResponse::json(
                200,
                &format!(
                    r#"{{"value":{{"uploadUrl":"{}/upload/document","document":"urn:li:document:D1"}}}}"#,
                    base
                ),
            ),
            ("PUT", "/upload/document") => MockResponse::empty(201),
            ("POST", "/rest/posts") => MockResponse::empty(201).with_header("x-restli-id", &post_id),
            _ => MockResponse::empty(404),
        }
    }

    pub fn base_url(&self) -> String {
        self.base_url.clone()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("request log").clone()
    }
}
