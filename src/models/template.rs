use serde::{Deserialize, Serialize};

/// Where the title block sits on a slide in editor previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TitlePosition {
    Top,
    Center,
    Bottom,
}

/// How the key-point callout is decorated in editor previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyPointStyle {
    Badge,
    Highlight,
    Subtle,
    Boxed,
    Underline,
}

/// Decorative background drawn behind slide content in editor previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundPattern {
    None,
    Dots,
    Lines,
    Gradient,
    Shapes,
}

/// The five template colors, each a `#RRGGBB` string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateColors {
    /// Title color.
    pub primary: String,
    /// Slide index label color.
    pub secondary: String,
    /// Full-bleed page fill.
    pub background: String,
    /// Body and key-point text color.
    pub text: String,
    /// Key-point accent bar, and the base of the key-point box tint.
    pub accent: String,
}

/// Font family per text role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateFonts {
    pub title: String,
    pub body: String,
    pub key_point: String,
}

/// Font sizes in points per text role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSizes {
    pub title: f32,
    pub body: f32,
    pub key_point: f32,
    pub slide_number: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateLayout {
    pub title_position: TitlePosition,
    pub key_point_style: KeyPointStyle,
    pub background_pattern: BackgroundPattern,
}

/// A carousel visual template: the style descriptor every slide is rendered with.
///
/// Registry templates are shared; branding produces a modified copy
/// (see [`crate::templates::apply_branding_overrides`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub description: String,
    pub colors: TemplateColors,
    pub fonts: TemplateFonts,
    pub font_sizes: FontSizes,
    pub layout: TemplateLayout,
}
