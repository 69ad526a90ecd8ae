//! The compiled-in carousel template registry and the branding resolver.
//!
//! Templates are built once on first use and never mutated afterwards, so lookups
//! hand out `&'static` references that can be shared freely across threads.

mod branding;

pub use branding::apply_branding_overrides;

use crate::models::template::{
    BackgroundPattern, FontSizes, KeyPointStyle, Template, TemplateColors, TemplateFonts,
    TemplateLayout, TitlePosition,
};
use indexmap::IndexMap;
use log::debug;
use std::sync::OnceLock;

/// Template used for any id the registry does not know.
pub const DEFAULT_TEMPLATE_ID: &str = "minimal";

/// Family every built-in template uses for all three text roles.
pub const DEFAULT_FONT_FAMILY: &str = "Helvetica";

static REGISTRY: OnceLock<IndexMap<String, Template>> = OnceLock::new();

fn registry() -> &'static IndexMap<String, Template> {
    REGISTRY.get_or_init(|| {
        builtin_templates()
            .into_iter()
            .map(|template| (template.id.clone(), template))
            .collect()
    })
}

/// Looks up a template by id. Never fails: unknown ids resolve to [`DEFAULT_TEMPLATE_ID`].
pub fn get_template(template_id: &str) -> &'static Template {
    let templates = registry();
    match templates.get(template_id) {
        Some(template) => template,
        None => {
            debug!(
                "Unknown template '{}', falling back to '{}'",
                template_id, DEFAULT_TEMPLATE_ID
            );
            &templates[DEFAULT_TEMPLATE_ID]
        }
    }
}

/// True if `template_id` names a registry template (no fallback involved).
pub fn is_known_template(template_id: &str) -> bool {
    registry().contains_key(template_id)
}

/// All templates in their declared order, for template pickers.
pub fn list_templates() -> Vec<&'static Template> {
    registry().values().collect()
}

struct Palette {
    primary: &'static str,
    secondary: &'static str,
    background: &'static str,
    text: &'static str,
    accent: &'static str,
}

fn template(
    id: &str,
    name: &str,
    description: &str,
    palette: Palette,
    (title, body, key_point, slide_number): (f32, f32, f32, f32),
    layout: TemplateLayout,
) -> Template {
    Template {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        colors: TemplateColors {
            primary: palette.primary.to_string(),
            secondary: palette.secondary.to_string(),
            background: palette.background.to_string(),
            text: palette.text.to_string(),
            accent: palette.accent.to_string(),
        },
        fonts: TemplateFonts {
            title: DEFAULT_FONT_FAMILY.to_string(),
            body: DEFAULT_FONT_FAMILY.to_string(),
            key_point: DEFAULT_FONT_FAMILY.to_string(),
        },
        font_sizes: FontSizes {
            title,
            body,
            key_point,
            slide_number,
        },
        layout,
    }
}

fn builtin_templates() -> Vec<Template> {
    vec![
        template(
            "minimal",
            "Minimal",
            "Clean white pages with dark type and a single blue accent.",
            Palette {
                primary: "#1A1A1A",
                secondary: "#666666",
                background: "#FFFFFF",
                text: "#333333",
                accent: "#0A66C2",
            },
            (28.0, 16.0, 18.0, 12.0),
            TemplateLayout {
                title_position: TitlePosition::Top,
                key_point_style: KeyPointStyle::Subtle,
                background_pattern: BackgroundPattern::None,
            },
        ),
        template(
            "bold",
            "Bold",
            "High-contrast dark pages with large type and a yellow accent.",
            Palette {
                primary: "#FFFFFF",
                secondary: "#FFD600",
                background: "#1A1A1A",
                text: "#F5F5F5",
                accent: "#FFD600",
            },
            (32.0, 18.0, 20.0, 12.0),
            TemplateLayout {
                title_position: TitlePosition::Center,
                key_point_style: KeyPointStyle::Badge,
                background_pattern: BackgroundPattern::Shapes,
            },
        ),
        template(
            "professional",
            "Professional",
            "Corporate blue on light grey, suited to data and insights.",
            Palette {
                primary: "#0A66C2",
                secondary: "#5E6D7A",
                background: "#F7F9FB",
                text: "#1D2226",
                accent: "#0A66C2",
            },
            (26.0, 15.0, 17.0, 11.0),
            TemplateLayout {
                title_position: TitlePosition::Top,
                key_point_style: KeyPointStyle::Boxed,
                background_pattern: BackgroundPattern::Lines,
            },
        ),
        template(
            "creative",
            "Creative",
            "Warm cream pages with purple and pink highlights.",
            Palette {
                primary: "#7B2FF7",
                secondary: "#F107A3",
                background: "#FFF8F0",
                text: "#2D2A32",
                accent: "#F107A3",
            },
            (30.0, 16.0, 18.0, 12.0),
            TemplateLayout {
                title_position: TitlePosition::Center,
                key_point_style: KeyPointStyle::Highlight,
                background_pattern: BackgroundPattern::Dots,
            },
        ),
        template(
            "story",
            "Story",
            "Soft paper tones for narrative, one-idea-per-slide decks.",
            Palette {
                primary: "#2C3E50",
                secondary: "#95A5A6",
                background: "#FDFBF7",
                text: "#34495E",
                accent: "#E67E22",
            },
            (26.0, 16.0, 17.0, 11.0),
            TemplateLayout {
                title_position: TitlePosition::Bottom,
                key_point_style: KeyPointStyle::Underline,
                background_pattern: BackgroundPattern::Gradient,
            },
        ),
    ]
}
