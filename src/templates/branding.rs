use log::warn;

use crate::models::branding::BrandingOverride;
use crate::models::colors::is_valid_hex;
use crate::models::template::Template;

/// Merges workspace branding over a template, returning a new style descriptor.
///
/// With no branding this is the identity (a clone). Otherwise each branding field that is
/// present replaces the template's value; absent fields pass through. A brand primary
/// color also replaces the accent color. Values that would not render (unparseable hex,
/// non-positive or non-finite sizes, blank font family) are skipped with a warning rather
/// than rejected. The input template is never modified.
pub fn apply_branding_overrides(template: &Template, branding: Option<&BrandingOverride>) -> Template {
    let mut effective = template.clone();
    let Some(branding) = branding else {
        return effective;
    };

    if let Some(primary) = usable_color(branding.primary_color.as_deref(), "primary_color") {
        effective.colors.primary = primary.to_string();
        effective.colors.accent = primary.to_string();
    }
    if let Some(secondary) = usable_color(branding.secondary_color.as_deref(), "secondary_color") {
        effective.colors.secondary = secondary.to_string();
    }

    if let Some(family) = branding.font_family.as_deref() {
        let family = family.trim();
        if family.is_empty() {
            warn!("Ignoring blank branding font_family");
        } else {
            effective.fonts.title = family.to_string();
            effective.fonts.body = family.to_string();
            effective.fonts.key_point = family.to_string();
        }
    }

    if let Some(size) = usable_size(branding.title_font_size, "title_font_size") {
        effective.font_sizes.title = size;
    }
    if let Some(size) = usable_size(branding.body_font_size, "body_font_size") {
        effective.font_sizes.body = size;
    }
    if let Some(size) = usable_size(branding.key_point_font_size, "key_point_font_size") {
        effective.font_sizes.key_point = size;
    }

    effective
}

fn usable_color<'a>(value: Option<&'a str>, field: &str) -> Option<&'a str> {
    let value = value?.trim();
    if is_valid_hex(value) {
        Some(value)
    } else {
        warn!("Ignoring malformed branding {}: {:?}", field, value);
        None
    }
}

fn usable_size(value: Option<f32>, field: &str) -> Option<f32> {
    let value = value?;
    if value.is_finite() && value > 0.0 {
        Some(value)
    } else {
        warn!("Ignoring unusable branding {}: {}", field, value);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::{get_template, list_templates};

    #[test]
    fn test_no_branding_is_identity() {
        for template in list_templates() {
            assert_eq!(&apply_branding_overrides(template, None), template);
            assert_eq!(
                &apply_branding_overrides(template, Some(&BrandingOverride::default())),
                template
            );
        }
    }

    #[test]
    fn test_primary_color_also_sets_accent() {
        let template = get_template("professional");
        let branding = BrandingOverride {
            primary_color: Some("#ABCDEF".to_string()),
            ..Default::default()
        };
        let effective = apply_branding_overrides(template, Some(&branding));
        assert_eq!(effective.colors.primary, "#ABCDEF");
        assert_eq!(effective.colors.accent, "#ABCDEF");
        assert_eq!(effective.colors.secondary, template.colors.secondary);
        assert_eq!(effective.colors.background, template.colors.background);
        assert_eq!(effective.font_sizes, template.font_sizes);
        // The shared registry entry is untouched.
        assert_eq!(get_template("professional").colors.primary, "#0A66C2");
    }

    #[test]
    fn test_full_branding() {
        let template = get_template("minimal");
        let branding = BrandingOverride {
            primary_color: Some("#112233".to_string()),
            secondary_color: Some("#445566".to_string()),
            font_family: Some("Courier".to_string()),
            title_font_size: Some(40.0),
            body_font_size: Some(20.0),
            key_point_font_size: Some(22.0),
        };
        let effective = apply_branding_overrides(template, Some(&branding));
        assert_eq!(effective.colors.secondary, "#445566");
        assert_eq!(effective.fonts.title, "Courier");
        assert_eq!(effective.fonts.body, "Courier");
        assert_eq!(effective.fonts.key_point, "Courier");
        assert_eq!(effective.font_sizes.title, 40.0);
        assert_eq!(effective.font_sizes.body, 20.0);
        assert_eq!(effective.font_sizes.key_point, 22.0);
        assert_eq!(effective.font_sizes.slide_number, template.font_sizes.slide_number);
        assert_eq!(effective.colors.text, template.colors.text);
    }

    #[test]
    fn test_unusable_values_are_skipped() {
        let template = get_template("creative");
        let branding = BrandingOverride {
            primary_color: Some("not-a-color".to_string()),
            secondary_color: Some("#12".to_string()),
            font_family: Some("   ".to_string()),
            title_font_size: Some(0.0),
            body_font_size: Some(f32::NAN),
            key_point_font_size: Some(-3.0),
        };
        assert_eq!(&apply_branding_overrides(template, Some(&branding)), template);
    }
}
