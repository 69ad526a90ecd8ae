//! The slide layout engine: turns one slide plus an effective template into a
//! positioned drawing plan, independent of how the plan is painted.
//!
//! Coordinates are in the page config's unit with the origin at the top-left corner;
//! text `y` values are baselines.

use log::debug;

use super::constants::{PageConfig, BODY_MAX_LINES, KEY_POINT_TINT_OFFSET};
use super::metrics::{resolve_font, split_text_to_size, StandardFont, TextMeasure};
use crate::models::colors::{hex_to_rgb, Rgb};
use crate::models::slide::Slide;
use crate::models::template::Template;

/// A solid axis-aligned rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct FilledRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Rgb,
}

/// Left-aligned lines sharing one font, size and color.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub x: f32,
    /// Baseline of the first line.
    pub y: f32,
    pub line_height: f32,
    pub lines: Vec<String>,
    pub font: StandardFont,
    pub size_pt: f32,
    pub color: Rgb,
}

impl TextBlock {
    /// Baseline of each line, paired with its text. Blank lines are skipped.
    pub fn positioned_lines(&self) -> impl Iterator<Item = (f32, &str)> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.is_empty())
            .map(|(i, line)| (self.y + i as f32 * self.line_height, line.as_str()))
    }
}

/// The key-point box pinned near the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyPointCallout {
    /// Tinted background box spanning the content width.
    pub background: FilledRect,
    /// Accent bar along the box's left edge, drawn over the background.
    pub accent_bar: FilledRect,
    pub text: TextBlock,
}

/// Everything drawn on one page, in paint order.
#[derive(Debug, Clone, PartialEq)]
pub struct SlidePlan {
    pub background: FilledRect,
    pub slide_index: TextBlock,
    pub title: TextBlock,
    pub body: TextBlock,
    pub key_point: Option<KeyPointCallout>,
}

/// The fonts any slide rendered with `style` can use, so resources can be declared once.
pub fn style_fonts(style: &Template) -> Vec<StandardFont> {
    vec![
        resolve_font(&style.fonts.body, false),
        resolve_font(&style.fonts.title, true),
        resolve_font(&style.fonts.key_point, true),
    ]
}

/// Lays out the slide at 1-based `position` of `total`.
///
/// Never fails: empty strings give empty blocks, bad colors render black and body
/// text beyond [`BODY_MAX_LINES`] wrapped lines is dropped.
pub fn layout_slide(
    slide: &Slide,
    position: usize,
    total: usize,
    style: &Template,
    page: &PageConfig,
) -> SlidePlan {
    let k = page.points_per_unit();
    let content_width = page.content_width();
    let sizes = &style.font_sizes;
    let colors = &style.colors;

    let background = FilledRect {
        x: 0.0,
        y: 0.0,
        width: page.width,
        height: page.height,
        color: hex_to_rgb(&colors.background),
    };

    let slide_index = TextBlock {
        x: page.padding,
        y: page.slide_number_y,
        line_height: 0.0,
        lines: vec![format!("{} / {}", position, total)],
        font: resolve_font(&style.fonts.body, false),
        size_pt: sizes.slide_number * page.font_scale,
        color: hex_to_rgb(&colors.secondary),
    };

    // Title
    let title_font = resolve_font(&style.fonts.title, true);
    let title_size = sizes.title * page.font_scale;
    let title_lines = split_text_to_size(
        &slide.title,
        content_width,
        &TextMeasure::new(title_font, title_size, k),
    );
    let mut cursor = page.title_top;
    let title = TextBlock {
        x: page.padding,
        y: cursor,
        line_height: page.title_line_height,
        font: title_font,
        size_pt: title_size,
        color: hex_to_rgb(&colors.primary),
        lines: title_lines,
    };
    cursor += title.lines.len() as f32 * page.title_line_height + page.title_gap;

    // Body
    let body_font = resolve_font(&style.fonts.body, false);
    let body_size = sizes.body * page.font_scale;
    let mut body_lines = split_text_to_size(
        &slide.body,
        content_width,
        &TextMeasure::new(body_font, body_size, k),
    );
    if body_lines.len() > BODY_MAX_LINES {
        debug!(
            "Slide {}: dropping {} body lines past the {} line limit",
            position,
            body_lines.len() - BODY_MAX_LINES,
            BODY_MAX_LINES
        );
        body_lines.truncate(BODY_MAX_LINES);
    }
    let body = TextBlock {
        x: page.padding,
        y: cursor,
        line_height: page.body_line_height,
        lines: body_lines,
        font: body_font,
        size_pt: body_size,
        color: hex_to_rgb(&colors.text),
    };

    let key_point = slide
        .key_point_text()
        .map(|text| layout_key_point(text, style, page));

    SlidePlan {
        background,
        slide_index,
        title,
        body,
        key_point,
    }
}

// Pinned to the bottom edge; does not move with the title/body height.
fn layout_key_point(text: &str, style: &Template, page: &PageConfig) -> KeyPointCallout {
    let accent = hex_to_rgb(&style.colors.accent);
    let box_top = page.height - page.key_point_offset;
    let font = resolve_font(&style.fonts.key_point, true);
    let size_pt = style.font_sizes.key_point * page.font_scale;
    let text_width = page.content_width() - 2.0 * page.key_point_inset;

    KeyPointCallout {
        background: FilledRect {
            x: page.padding,
            y: box_top,
            width: page.content_width(),
            height: page.key_point_box_height,
            color: accent.lighten(KEY_POINT_TINT_OFFSET),
        },
        accent_bar: FilledRect {
            x: page.padding,
            y: box_top,
            width: page.accent_bar_width,
            height: page.key_point_box_height,
            color: accent,
        },
        text: TextBlock {
            x: page.padding + page.key_point_inset,
            y: box_top + page.key_point_baseline,
            line_height: page.key_point_line_height,
            lines: split_text_to_size(
                text,
                text_width,
                &TextMeasure::new(font, size_pt, page.points_per_unit()),
            ),
            font,
            size_pt,
            color: hex_to_rgb(&style.colors.text),
        },
    }
}
