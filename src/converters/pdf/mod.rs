//! Renders carousels to PDF.
//!
//! The pipeline is: registry template + branding -> effective style (see
//! [`crate::templates`]) -> [`layout::layout_slide`] once per slide -> painted onto
//! one page each by the compositor in [`document`].
//!
//! # Current Features & Limitations:
//! *   Two page configurations: millimetre export pages and pixel publish pages.
//! *   Text wraps by measured glyph width of the PDF standard fonts (Helvetica, Courier).
//!     Other font families render as Helvetica.
//! *   Body text is capped at twelve lines per slide; overflow is dropped, not ellipsized.
//! *   Non-Latin-1 characters render as `?` since fonts are referenced, not embedded.
//! *   Template `layout` metadata (title position, key-point style, background pattern)
//!     does not affect the PDF.

mod constants;
mod document;
mod error;
pub mod layout;
pub mod metrics;

pub use constants::{
    PageConfig, PagePreset, Unit, BODY_MAX_LINES, KEY_POINT_TINT_OFFSET, PT_PER_MM, PT_PER_PX,
};
pub use document::render_carousel_document_with;
pub use error::{PdfRenderError, Result};

use crate::models::carousel::Carousel;
use crate::models::slide::Slide;
use crate::models::template::Template;

/// Renders `slides` with `style` on export pages. Fails only if `slides` is empty.
pub fn render_carousel_document(slides: &[Slide], style: &Template, title: &str) -> Result<Vec<u8>> {
    render_carousel_document_with(slides, style, title, &PageConfig::EXPORT)
}

/// Renders a stored carousel with its effective template (registry lookup plus branding).
pub fn render_carousel(carousel: &Carousel, preset: PagePreset) -> Result<Vec<u8>> {
    let style = carousel.effective_template();
    render_carousel_document_with(carousel.slides(), &style, &carousel.title, preset.config())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::branding::BrandingOverride;
    use crate::templates::get_template;

    #[test]
    fn test_default_entry_point_uses_export_pages() {
        let slides = vec![Slide::new("Hello", "World")];
        let template = get_template("minimal");
        assert_eq!(
            render_carousel_document(&slides, template, "t").expect("render"),
            render_carousel_document_with(&slides, template, "t", &PageConfig::EXPORT).expect("render")
        );
    }

    #[test]
    fn test_render_carousel_applies_branding() {
        let carousel = Carousel::new("c", "w", "Branded", "minimal", vec![Slide::new("a", "b")])
            .expect("carousel")
            .with_branding(BrandingOverride {
                primary_color: Some("#ABCDEF".to_string()),
                ..Default::default()
            });
        let plain = Carousel::new("c", "w", "Branded", "minimal", vec![Slide::new("a", "b")])
            .expect("carousel");

        let branded_bytes = render_carousel(&carousel, PagePreset::Publish).expect("render");
        let plain_bytes = render_carousel(&plain, PagePreset::Publish).expect("render");
        assert_ne!(branded_bytes, plain_bytes);

        let unknown_template =
            Carousel::new("c", "w", "Branded", "no-such-template", vec![Slide::new("a", "b")])
                .expect("carousel");
        assert_eq!(
            render_carousel(&unknown_template, PagePreset::Publish).expect("render"),
            plain_bytes
        );
    }
}
