use serde::{Deserialize, Serialize};

/// Workspace (or per-carousel) branding laid over a template's defaults.
///
/// Every field is optional; only fields that are present replace the template value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandingOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,

    /// Applied to the title, body and key-point roles alike.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_font_size: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_font_size: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_point_font_size: Option<f32>,
}

impl BrandingOverride {
    /// True when no field is set, i.e. applying it is the identity.
    pub fn is_empty(&self) -> bool {
        self.primary_color.is_none()
            && self.secondary_color.is_none()
            && self.font_family.is_none()
            && self.title_font_size.is_none()
            && self.body_font_size.is_none()
            && self.key_point_font_size.is_none()
    }
}
