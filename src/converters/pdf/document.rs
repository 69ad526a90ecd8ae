//! The document compositor: one fixed-size page per slide, serialized with `lopdf`.
//!
//! Output is deterministic. The document carries no creation date or file identifier,
//! objects are numbered in creation order and streams are left uncompressed, so the
//! same input always produces the same bytes.

use log::{debug, warn};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, StringFormat, Stream};

use super::constants::PageConfig;
use super::error::{PdfRenderError, Result};
use super::layout::{layout_slide, style_fonts, FilledRect, SlidePlan, TextBlock};
use super::metrics::encode_win_ansi;
use crate::models::slide::Slide;
use crate::models::template::Template;

const PDF_VERSION: &str = "1.5";
const PRODUCER: &str = "carousel-tools";

/// Renders `slides` in order, one page each, using `page` geometry.
///
/// Fails only when `slides` is empty; nothing is serialized in that case.
pub fn render_carousel_document_with(
    slides: &[Slide],
    style: &Template,
    title: &str,
    page: &PageConfig,
) -> Result<Vec<u8>> {
    if slides.is_empty() {
        return Err(PdfRenderError::EmptySlides);
    }

    let mut doc = Document::with_version(PDF_VERSION);
    let pages_id = doc.new_object_id();

    // Fonts are declared once on the page tree and inherited by every page.
    let mut fonts = style_fonts(style);
    fonts.sort();
    fonts.dedup();
    let mut font_resources = Dictionary::new();
    for font in fonts {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        font_resources.set(font.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => font_resources,
    });

    let total = slides.len();
    let mut kids: Vec<Object> = Vec::with_capacity(total);
    for (index, slide) in slides.iter().enumerate() {
        let position = index + 1;
        if slide.slide_number as usize != position {
            warn!(
                "Slide numbered {} is at position {}; rendering by position",
                slide.slide_number, position
            );
        }
        let plan = layout_slide(slide, position, total, style, page);
        let content = Content {
            operations: paint_plan(&plan, page),
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let (width_pt, height_pt) = page.size_pt();
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => total as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(width_pt),
            Object::Real(height_pt),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::String(encode_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    debug!("Rendered {} page(s), {} bytes", total, buffer.len());
    Ok(buffer)
}

/// Converts a plan into content-stream operators, in paint order.
fn paint_plan(plan: &SlidePlan, page: &PageConfig) -> Vec<Operation> {
    let mut ops = Vec::new();
    paint_rect(&mut ops, &plan.background, page);
    paint_text(&mut ops, &plan.slide_index, page);
    paint_text(&mut ops, &plan.title, page);
    paint_text(&mut ops, &plan.body, page);
    if let Some(callout) = &plan.key_point {
        paint_rect(&mut ops, &callout.background, page);
        paint_rect(&mut ops, &callout.accent_bar, page);
        paint_text(&mut ops, &callout.text, page);
    }
    ops
}

fn real(value: f32) -> Object {
    Object::Real(value)
}

fn fill_color(rgb: crate::models::colors::Rgb) -> Operation {
    let [r, g, b] = rgb.to_pdf_components();
    Operation::new("rg", vec![real(r), real(g), real(b)])
}

// Page units, top-left origin -> points, bottom-left origin.
fn paint_rect(ops: &mut Vec<Operation>, rect: &FilledRect, page: &PageConfig) {
    let k = page.points_per_unit();
    ops.push(fill_color(rect.color));
    ops.push(Operation::new(
        "re",
        vec![
            real(rect.x * k),
            real((page.height - rect.y - rect.height) * k),
            real(rect.width * k),
            real(rect.height * k),
        ],
    ));
    ops.push(Operation::new("f", vec![]));
}

fn paint_text(ops: &mut Vec<Operation>, block: &TextBlock, page: &PageConfig) {
    let k = page.points_per_unit();
    for (baseline, line) in block.positioned_lines() {
        ops.push(Operation::new("BT", vec![]));
        ops.push(Operation::new(
            "Tf",
            vec![
                Object::Name(block.font.resource_name().as_bytes().to_vec()),
                real(block.size_pt),
            ],
        ));
        ops.push(fill_color(block.color));
        ops.push(Operation::new(
            "Td",
            vec![real(block.x * k), real((page.height - baseline) * k)],
        ));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(line), StringFormat::Hexadecimal)],
        ));
        ops.push(Operation::new("ET", vec![]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converters::pdf::constants::BODY_MAX_LINES;
    use crate::models::colors::hex_to_rgb;
    use crate::templates::get_template;
    use lopdf::ObjectId;

    fn numbered(slides: Vec<Slide>) -> Vec<Slide> {
        slides
            .into_iter()
            .enumerate()
            .map(|(i, mut slide)| {
                slide.slide_number = i as u32 + 1;
                slide
            })
            .collect()
    }

    fn parse(bytes: &[u8]) -> Document {
        Document::load_mem(bytes).expect("rendered output should be a readable PDF")
    }

    fn page_ids(doc: &Document) -> Vec<ObjectId> {
        doc.get_pages().into_values().collect()
    }

    fn operations(doc: &Document, page_id: ObjectId) -> Vec<Operation> {
        let data = doc.get_page_content(page_id).expect("page content");
        Content::decode(&data).expect("decodable content").operations
    }

    fn shown_text(ops: &[Operation]) -> Vec<String> {
        ops.iter()
            .filter(|op| op.operator == "Tj")
            .filter_map(|op| match op.operands.first() {
                Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
                _ => None,
            })
            .collect()
    }

    fn count(ops: &[Operation], operator: &str) -> usize {
        ops.iter().filter(|op| op.operator == operator).count()
    }

    fn components(op: &Operation) -> Vec<f32> {
        op.operands
            .iter()
            .map(|o| o.as_float().expect("numeric operand"))
            .collect()
    }

    fn render(slides: &[Slide], template_id: &str) -> Vec<u8> {
        render_carousel_document_with(slides, get_template(template_id), "Deck", &PageConfig::EXPORT)
            .expect("render succeeds")
    }

    #[test]
    fn test_empty_slides_rejected() {
        let result = render_carousel_document_with(
            &[],
            get_template("minimal"),
            "title",
            &PageConfig::EXPORT,
        );
        assert!(matches!(result, Err(PdfRenderError::EmptySlides)));
    }

    #[test]
    fn test_single_slide_single_page() {
        let bytes = render(&numbered(vec![Slide::new("Only", "slide")]), "minimal");
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(parse(&bytes).get_pages().len(), 1);
    }

    #[test]
    fn test_one_page_per_slide_in_order() {
        let slides = numbered(
            (1..=7)
                .map(|i| Slide::new(format!("Slide {}", i), format!("Body {}", i)))
                .collect(),
        );
        let doc = parse(&render(&slides, "professional"));
        let pages = page_ids(&doc);
        assert_eq!(pages.len(), 7);
        for (index, page_id) in pages.into_iter().enumerate() {
            let text = shown_text(&operations(&doc, page_id));
            let k = index + 1;
            assert_eq!(text[0], format!("{} / 7", k));
            assert!(text.contains(&format!("Slide {}", k)), "page {} text {:?}", k, text);
            assert!(text.contains(&format!("Body {}", k)));
        }
    }

    #[test]
    fn test_rendering_is_byte_identical() {
        let slides = numbered(vec![
            Slide::new("Hello", "World").with_key_point("Point"),
            Slide::new("Second", "Page"),
        ]);
        let template = get_template("creative");
        let first =
            render_carousel_document_with(&slides, template, "Same", &PageConfig::PUBLISH).expect("render");
        let second =
            render_carousel_document_with(&slides, template, "Same", &PageConfig::PUBLISH).expect("render");
        assert_eq!(first, second);
    }

    #[test]
    fn test_body_capped_in_document() {
        let body: Vec<String> = (1..=30).map(|i| format!("line {}", i)).collect();
        let slides = numbered(vec![Slide::new("Title", body.join("\n"))]);
        let doc = parse(&render(&slides, "minimal"));
        let ops = operations(&doc, page_ids(&doc)[0]);
        let text = shown_text(&ops);
        // index label + one title line + capped body
        assert_eq!(text.len(), 2 + BODY_MAX_LINES);
        assert!(text.contains(&"line 12".to_string()));
        assert!(!text.contains(&"line 13".to_string()));
    }

    #[test]
    fn test_bold_template_end_to_end() {
        let slides = vec![Slide {
            slide_number: 1,
            title: "Hello".to_string(),
            body: "World".to_string(),
            key_point: Some(String::new()),
        }];
        let doc = parse(&render(&slides, "bold"));
        let pages = page_ids(&doc);
        assert_eq!(pages.len(), 1);

        let ops = operations(&doc, pages[0]);
        // Background is the first fill, then nothing else is filled: no key-point box.
        let background = hex_to_rgb(&get_template("bold").colors.background).to_pdf_components();
        let first_fill = components(&ops[0]);
        assert_eq!(ops[0].operator, "rg");
        for (actual, expected) in first_fill.iter().zip(background.iter()) {
            assert!((actual - expected).abs() < 1e-3, "{:?} vs {:?}", first_fill, background);
        }
        assert_eq!(count(&ops, "re"), 1);
        assert_eq!(count(&ops, "f"), 1);

        let full_page = components(&ops[1]);
        let (width_pt, height_pt) = PageConfig::EXPORT.size_pt();
        assert!((full_page[2] - width_pt).abs() < 1e-2);
        assert!((full_page[3] - height_pt).abs() < 1e-2);

        assert_eq!(shown_text(&ops), vec!["1 / 1", "Hello", "World"]);
    }

    #[test]
    fn test_key_point_box_painted_under_text() {
        let slides = numbered(vec![Slide::new("t", "b").with_key_point("Takeaway")]);
        let doc = parse(&render(&slides, "minimal"));
        let ops = operations(&doc, page_ids(&doc)[0]);
        assert_eq!(count(&ops, "re"), 3);
        assert_eq!(shown_text(&ops).last().map(String::as_str), Some("Takeaway"));

        // Fills in order: background, tinted box, accent bar.
        let fills: Vec<Vec<f32>> = ops
            .windows(2)
            .filter(|pair| pair[0].operator == "rg" && pair[1].operator == "re")
            .map(|pair| components(&pair[0]))
            .collect();
        let tint = hex_to_rgb("#0A66C2").lighten(200).to_pdf_components();
        let accent = hex_to_rgb("#0A66C2").to_pdf_components();
        assert!((fills[1][0] - tint[0]).abs() < 1e-3);
        assert!((fills[2][2] - accent[2]).abs() < 1e-3);
    }

    #[test]
    fn test_misnumbered_slides_render_by_position() {
        let mut slides = numbered(vec![Slide::new("A", ""), Slide::new("B", "")]);
        slides[0].slide_number = 9;
        let doc = parse(&render(&slides, "story"));
        let pages = page_ids(&doc);
        assert_eq!(shown_text(&operations(&doc, pages[0]))[..2], ["1 / 2", "A"]);
        assert_eq!(shown_text(&operations(&doc, pages[1]))[..2], ["2 / 2", "B"]);
    }

    #[test]
    fn test_fonts_declared_as_standard_type1() {
        let doc = parse(&render(&numbered(vec![Slide::new("t", "b")]), "minimal"));
        let base_fonts: Vec<Vec<u8>> = doc
            .objects
            .values()
            .filter_map(|object| object.as_dict().ok())
            .filter(|dict| dict.get(b"Type").and_then(Object::as_name).ok() == Some(b"Font".as_slice()))
            .filter_map(|dict| dict.get(b"BaseFont").and_then(Object::as_name).ok().map(<[u8]>::to_vec))
            .collect();
        assert_eq!(base_fonts.len(), 2);
        assert!(base_fonts.contains(&b"Helvetica".to_vec()));
        assert!(base_fonts.contains(&b"Helvetica-Bold".to_vec()));
    }
}
