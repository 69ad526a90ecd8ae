//! Page geometry for the two rendering configurations and the fixed layout limits.
//!
//! All `PageConfig` lengths are in the config's own unit, measured from the top-left
//! corner of the page. Font sizes stay in points (times `font_scale`).

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Conversion factors to PDF points (1/72 inch).
pub const PT_PER_MM: f32 = 72.0 / 25.4;
pub const PT_PER_PX: f32 = 72.0 / 96.0;

/// Maximum body lines drawn per slide. Wrapped lines past this are dropped.
pub const BODY_MAX_LINES: usize = 12;

/// Added to each accent channel (clamped at 255) to tint the key-point box.
pub const KEY_POINT_TINT_OFFSET: u8 = 200;

/// Physical unit of a page configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Mm,
    Px,
}

impl Unit {
    pub fn points_per_unit(self) -> f32 {
        match self {
            Unit::Mm => PT_PER_MM,
            Unit::Px => PT_PER_PX,
        }
    }
}

/// One parameterization of the slide layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageConfig {
    pub unit: Unit,
    pub width: f32,
    pub height: f32,
    /// Left and right padding; content width is `width - 2 * padding`.
    pub padding: f32,
    /// Baseline of the slide index label.
    pub slide_number_y: f32,
    /// Baseline of the first title line.
    pub title_top: f32,
    pub title_line_height: f32,
    /// Space between the last title line and the first body baseline.
    pub title_gap: f32,
    pub body_line_height: f32,
    /// Distance from the bottom edge to the top of the key-point box.
    pub key_point_offset: f32,
    pub key_point_box_height: f32,
    pub accent_bar_width: f32,
    /// Horizontal inset of key-point text inside the box.
    pub key_point_inset: f32,
    /// Distance from the box top to the first key-point baseline.
    pub key_point_baseline: f32,
    pub key_point_line_height: f32,
    /// Multiplier applied to template font sizes.
    pub font_scale: f32,
}

impl PageConfig {
    /// Downloadable export: millimetres on a square page.
    pub const EXPORT: PageConfig = PageConfig {
        unit: Unit::Mm,
        width: 210.0,
        height: 210.0,
        padding: 20.0,
        slide_number_y: 20.0,
        title_top: 45.0,
        title_line_height: 12.0,
        title_gap: 10.0,
        body_line_height: 8.0,
        key_point_offset: 60.0,
        key_point_box_height: 35.0,
        accent_bar_width: 3.0,
        key_point_inset: 8.0,
        key_point_baseline: 13.0,
        key_point_line_height: 8.0,
        font_scale: 1.0,
    };

    /// Direct publishing: pixels on LinkedIn's 1080x1350 portrait document page.
    pub const PUBLISH: PageConfig = PageConfig {
        unit: Unit::Px,
        width: 1080.0,
        height: 1350.0,
        padding: 80.0,
        slide_number_y: 100.0,
        title_top: 260.0,
        title_line_height: 100.0,
        title_gap: 50.0,
        body_line_height: 64.0,
        key_point_offset: 340.0,
        key_point_box_height: 240.0,
        accent_bar_width: 12.0,
        key_point_inset: 40.0,
        key_point_baseline: 80.0,
        key_point_line_height: 64.0,
        font_scale: 2.5,
    };

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.padding
    }

    pub fn points_per_unit(&self) -> f32 {
        self.unit.points_per_unit()
    }

    /// Page size in PDF points.
    pub fn size_pt(&self) -> (f32, f32) {
        let k = self.points_per_unit();
        (self.width * k, self.height * k)
    }
}

/// Named rendering configurations, selectable from requests and JSON.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PagePreset {
    #[default]
    Export,
    Publish,
}

impl PagePreset {
    pub fn config(self) -> &'static PageConfig {
        match self {
            PagePreset::Export => &PageConfig::EXPORT,
            PagePreset::Publish => &PageConfig::PUBLISH,
        }
    }
}

impl FromStr for PagePreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "export" | "download" => Ok(PagePreset::Export),
            "publish" | "linkedin" => Ok(PagePreset::Publish),
            other => Err(format!("Unknown page preset '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_point_box_fits_on_page() {
        for config in [PageConfig::EXPORT, PageConfig::PUBLISH] {
            let box_top = config.height - config.key_point_offset;
            assert!(box_top > config.title_top);
            assert!(box_top + config.key_point_box_height < config.height);
            assert!(config.content_width() > 0.0);
        }
    }

    #[test]
    fn test_publish_page_size_in_points() {
        assert_eq!(PageConfig::PUBLISH.size_pt(), (810.0, 1012.5));
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!("Export".parse::<PagePreset>(), Ok(PagePreset::Export));
        assert_eq!(" publish ".parse::<PagePreset>(), Ok(PagePreset::Publish));
        assert!("poster".parse::<PagePreset>().is_err());
        assert_eq!(PagePreset::Publish.config().unit, Unit::Px);
    }
}
