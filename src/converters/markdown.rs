use crate::models::carousel::Carousel;
use crate::models::slide::Slide;

/// LinkedIn rejects post commentary longer than this many characters.
pub const MAX_CAPTION_CHARS: usize = 3000;

// --- Slide Text Helpers ---

/// Formats one slide as a Markdown section. Blank parts are left out.
fn slide_to_markdown(slide: &Slide, position: usize) -> String {
    let mut section = String::new();

    let title = slide.title.trim();
    if title.is_empty() {
        section.push_str(&format!("## Slide {}\n", position));
    } else {
        section.push_str(&format!("## Slide {}: {}\n", position, title));
    }

    let body = slide.body.trim();
    if !body.is_empty() {
        section.push('\n');
        section.push_str(body);
        section.push('\n');
    }

    if let Some(key_point) = outline_key_point(slide) {
        section.push('\n');
        // Quote every line so multi-line key points stay inside the block quote.
        for line in key_point.lines() {
            section.push_str(&format!("> {}\n", line));
        }
    }

    section
}

// Whitespace-only key points still draw a callout but add nothing to text output.
fn outline_key_point(slide: &Slide) -> Option<&str> {
    slide
        .key_point_text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// Cuts `text` to at most `max_chars` characters, ending with an ellipsis when cut.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated = truncated.trim_end().to_string();
    truncated.push('…');
    truncated
}

// --- Public API Functions ---

/// Formats a carousel as a Markdown outline: the title, then one section per slide
/// in order, separated by horizontal rules. Key points become block quotes.
pub fn carousel_to_markdown(carousel: &Carousel) -> String {
    let mut markdown = format!("# {}\n", carousel.title.trim());

    for (index, slide) in carousel.slides().iter().enumerate() {
        if index > 0 {
            markdown.push_str("\n---\n");
        }
        markdown.push('\n');
        markdown.push_str(&slide_to_markdown(slide, index + 1));
    }

    markdown
}

/// Builds the post commentary used when a carousel is published without a caption:
/// the carousel title followed by the slides' key points as a bullet list, limited to
/// [`MAX_CAPTION_CHARS`] characters.
pub fn default_caption(carousel: &Carousel) -> String {
    let mut caption = carousel.title.trim().to_string();

    let key_points: Vec<&str> = carousel
        .slides()
        .iter()
        .filter_map(outline_key_point)
        .collect();
    if !key_points.is_empty() {
        caption.push_str("\n\n");
        let bullets: Vec<String> = key_points
            .iter()
            .map(|point| format!("• {}", point.replace('\n', " ")))
            .collect();
        caption.push_str(&bullets.join("\n"));
    }

    truncate_chars(&caption, MAX_CAPTION_CHARS)
}
