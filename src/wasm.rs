//! Browser bindings for the in-editor download path.
//!
//! JavaScript passes JSON strings in and gets JSON strings or PDF bytes back, so the
//! editor and the server render from the same code.

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::converters::pdf::{render_carousel_document_with, PagePreset};
use crate::errors::{CarouselError, Result};
use crate::models::branding::BrandingOverride;
use crate::models::slide::Slide;
use crate::templates::{apply_branding_overrides, get_template, list_templates};

/// The editor's current state, as sent to `renderCarouselPdf`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub template_type: String,
    pub slides: Vec<Slide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_branding: Option<BrandingOverride>,
}

impl RenderRequest {
    pub fn render(&self, preset: PagePreset) -> Result<Vec<u8>> {
        let style = apply_branding_overrides(
            get_template(&self.template_type),
            self.custom_branding.as_ref(),
        );
        Ok(render_carousel_document_with(
            &self.slides,
            &style,
            &self.title,
            preset.config(),
        )?)
    }
}

/// Parses `request_json` as a [`RenderRequest`] and renders it with the named preset.
pub fn render_request_json(request_json: &str, preset: &str) -> Result<Vec<u8>> {
    let preset: PagePreset = preset.parse().map_err(CarouselError::InvalidInput)?;
    let request: RenderRequest = serde_json::from_str(request_json)?;
    request.render(preset)
}

fn to_js_error(error: CarouselError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Routes `log` records to the browser console and installs the panic hook.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Already initialised when called twice.
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen(js_name = listTemplates)]
pub fn list_templates_json() -> std::result::Result<String, JsValue> {
    serde_json::to_string(&list_templates()).map_err(|e| to_js_error(e.into()))
}

/// The registry template for `template_id`, or the default template for unknown ids.
#[wasm_bindgen(js_name = getTemplate)]
pub fn get_template_json(template_id: &str) -> std::result::Result<String, JsValue> {
    serde_json::to_string(get_template(template_id)).map_err(|e| to_js_error(e.into()))
}

/// Renders the editor state to PDF bytes (a `Uint8Array` on the JavaScript side).
#[wasm_bindgen(js_name = renderCarouselPdf)]
pub fn render_carousel_pdf(request_json: &str, preset: &str) -> std::result::Result<Vec<u8>, JsValue> {
    render_request_json(request_json, preset).map_err(to_js_error)
}
