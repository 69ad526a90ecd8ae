use crate::config::LinkedInConfig;
use crate::errors::{CarouselError, Result};
use log::{debug, info, warn};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use serde_json::json;

const RESTLI_ID_HEADER: &str = "x-restli-id";
const FEED_UPDATE_URL: &str = "https://www.linkedin.com/feed/update";
const DOCUMENT_RECIPE: &str = "urn:li:digitalmediaRecipe:feedshare-document";

/// Outcome of a publish attempt. Failures are reported here rather than as `Err`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PostResult {
    /// A created post. LinkedIn may omit the id, in which case there is no url either.
    fn published(post_id: Option<String>) -> Self {
        PostResult {
            success: true,
            post_url: post_id
                .as_ref()
                .map(|id| format!("{}/{}", FEED_UPDATE_URL, id)),
            post_id,
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        PostResult {
            success: false,
            error: Some(error),
            ..Default::default()
        }
    }
}

/// Helper struct to attempt parsing LinkedIn API error responses.
#[derive(Deserialize, Debug)]
struct LinkedInErrorResponse {
    message: String,
}

#[derive(Deserialize, Debug)]
struct InitializeUploadResponse {
    value: InitializeUploadValue,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct InitializeUploadValue {
    upload_url: String,
    document: String,
}

#[derive(Deserialize, Debug)]
struct RegisterUploadResponse {
    value: RegisterUploadValue,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct RegisterUploadValue {
    asset: String,
    upload_mechanism: UploadMechanism,
}

#[derive(Deserialize, Debug)]
struct UploadMechanism {
    #[serde(rename = "com.linkedin.digitalmedia.uploading.MediaUploadHttpRequest")]
    http_request: UploadHttpRequest,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct UploadHttpRequest {
    upload_url: String,
}

#[derive(Deserialize, Debug)]
struct UgcPostResponse {
    id: Option<String>,
}

/// Publishes PDF documents as LinkedIn document posts.
#[derive(Debug, Clone)]
pub struct LinkedInClient {
    http_client: reqwest::Client,
    config: LinkedInConfig,
}

impl LinkedInClient {
    pub fn new(config: LinkedInConfig) -> Self {
        LinkedInClient::with_http_client(reqwest::Client::new(), config)
    }

    pub fn with_http_client(http_client: reqwest::Client, config: LinkedInConfig) -> Self {
        LinkedInClient {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &LinkedInConfig {
        &self.config
    }

    /// Uploads `document` and publishes it as a document post by `author_urn`.
    ///
    /// Tries the versioned Posts API first. If it fails before a post is created, the
    /// legacy `ugcPosts` flow is tried once. The result carries the error messages of
    /// both attempts when neither succeeds.
    ///
    /// A 2xx post response without an id still counts as published: the post exists,
    /// so `post_id` and `post_url` are `None` and no fallback is attempted.
    pub async fn post_document(
        &self,
        access_token: &str,
        author_urn: &str,
        document: &[u8],
        title: &str,
        caption: &str,
    ) -> PostResult {
        if access_token.trim().is_empty() {
            return PostResult::failed("LinkedIn access token cannot be empty".to_string());
        }
        if document.is_empty() {
            return PostResult::failed("Document cannot be empty".to_string());
        }

        info!(
            "Publishing document '{}' ({} bytes) as {}",
            title,
            document.len(),
            author_urn
        );

        let primary_error = match self
            .post_via_posts_api(access_token, author_urn, document, title, caption)
            .await
        {
            Ok(post_id) => return published(post_id),
            Err(e) => e,
        };
        warn!(
            "Posts API publish failed, falling back to ugcPosts: {}",
            primary_error
        );

        match self
            .post_via_ugc_posts(access_token, author_urn, document, title, caption)
            .await
        {
            Ok(post_id) => published(post_id),
            Err(fallback_error) => {
                warn!("ugcPosts fallback failed: {}", fallback_error);
                PostResult::failed(format!(
                    "Posts API: {}; ugcPosts fallback: {}",
                    primary_error, fallback_error
                ))
            }
        }
    }

    // --- Posts API (versioned REST) ---

    /// `Ok(None)` means the post was created but LinkedIn returned no id for it.
    async fn post_via_posts_api(
        &self,
        access_token: &str,
        author_urn: &str,
        document: &[u8],
        title: &str,
        caption: &str,
    ) -> Result<Option<String>> {
        let init_url = format!(
            "{}/rest/documents?action=initializeUpload",
            self.config.api_base
        );
        let body = json!({ "initializeUploadRequest": { "owner": author_urn } });
        let response = self
            .rest_request(self.http_client.post(&init_url), access_token)
            .json(&body)
            .send()
            .await?;
        let upload: InitializeUploadResponse = parse_json(ensure_success(response).await?).await?;
        debug!("Initialized document upload {}", upload.value.document);

        self.upload_bytes(&upload.value.upload_url, access_token, document)
            .await?;

        let post_url = format!("{}/rest/posts", self.config.api_base);
        let post = json!({
            "author": author_urn,
            "commentary": caption,
            "visibility": "PUBLIC",
            "distribution": {
                "feedDistribution": "MAIN_FEED",
                "targetEntities": [],
                "thirdPartyDistributionChannels": []
            },
            "content": {
                "media": {
                    "title": title,
                    "id": upload.value.document
                }
            },
            "lifecycleState": "PUBLISHED",
            "isReshareDisabledByAuthor": false
        });
        let response = self
            .rest_request(self.http_client.post(&post_url), access_token)
            .json(&post)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        Ok(restli_id(&response))
    }

    // --- Legacy ugcPosts API ---

    async fn post_via_ugc_posts(
        &self,
        access_token: &str,
        author_urn: &str,
        document: &[u8],
        title: &str,
        caption: &str,
    ) -> Result<Option<String>> {
        let register_url = format!("{}/v2/assets?action=registerUpload", self.config.api_base);
        let body = json!({
            "registerUploadRequest": {
                "owner": author_urn,
                "recipes": [DOCUMENT_RECIPE],
                "serviceRelationships": [{
                    "relationshipType": "OWNER",
                    "identifier": "urn:li:userGeneratedContent"
                }]
            }
        });
        let response = self
            .v2_request(self.http_client.post(&register_url), access_token)
            .json(&body)
            .send()
            .await?;
        let registered: RegisterUploadResponse =
            parse_json(ensure_success(response).await?).await?;
        debug!("Registered asset upload {}", registered.value.asset);

        self.upload_bytes(
            &registered.value.upload_mechanism.http_request.upload_url,
            access_token,
            document,
        )
        .await?;

        let post_url = format!("{}/v2/ugcPosts", self.config.api_base);
        let post = json!({
            "author": author_urn,
            "lifecycleState": "PUBLISHED",
            "specificContent": {
                "com.linkedin.ugc.ShareContent": {
                    "shareCommentary": { "text": caption },
                    "shareMediaCategory": "DOCUMENT",
                    "media": [{
                        "status": "READY",
                        "media": registered.value.asset,
                        "title": { "text": title }
                    }]
                }
            },
            "visibility": { "com.linkedin.ugc.MemberNetworkVisibility": "PUBLIC" }
        });
        let response = self
            .v2_request(self.http_client.post(&post_url), access_token)
            .json(&post)
            .send()
            .await?;
        let response = ensure_success(response).await?;

        if let Some(id) = restli_id(&response) {
            return Ok(Some(id));
        }
        // The post exists at this point; an unreadable body only loses the id.
        let bytes = response.bytes().await.unwrap_or_default();
        Ok(serde_json::from_slice::<UgcPostResponse>(&bytes)
            .ok()
            .and_then(|created| created.id))
    }

    // --- Request helpers ---

    async fn upload_bytes(&self, upload_url: &str, access_token: &str, document: &[u8]) -> Result<()> {
        let response = self
            .http_client
            .put(upload_url)
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(document.to_vec())
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }

    fn rest_request(&self, builder: RequestBuilder, access_token: &str) -> RequestBuilder {
        self.v2_request(builder, access_token)
            .header("LinkedIn-Version", &self.config.api_version)
    }

    fn v2_request(&self, builder: RequestBuilder, access_token: &str) -> RequestBuilder {
        builder
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
            .header(ACCEPT, "application/json")
            .header("X-Restli-Protocol-Version", "2.0.0")
    }
}

fn published(post_id: Option<String>) -> PostResult {
    if post_id.is_none() {
        warn!("LinkedIn accepted the post but returned no post id");
    }
    PostResult::published(post_id)
}

fn restli_id(response: &Response) -> Option<String> {
    response
        .headers()
        .get(RESTLI_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Turns non-2xx responses into `CarouselError::ApiError`, preferring LinkedIn's own message.
async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let error_text = response.text().await?;
    let message = match serde_json::from_str::<LinkedInErrorResponse>(&error_text) {
        Ok(linkedin_error) => linkedin_error.message,
        Err(_) => format!("API request failed with status {}: {}", status, error_text),
    };
    Err(CarouselError::ApiError { status, message })
}

async fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        let snippet = String::from_utf8_lossy(&bytes[..bytes.len().min(500)]);
        debug!("Unexpected LinkedIn response body: {}", snippet);
        CarouselError::JsonDeserialization(e)
    })
}
