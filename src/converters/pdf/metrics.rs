//! Text measurement for the PDF standard fonts and the fit-to-width line breaker.
//!
//! Documents reference the standard-14 Type 1 fonts under `WinAnsiEncoding` instead of
//! embedding font programs, so widths come from the fonts' published AFM metrics
//! (units of 1/1000 em). Wrapping measures the actual glyph advances at the requested
//! size, never a character count.

use log::debug;

/// Advance widths for WinAnsi codes 32..=126.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    333, 333, 584, 584, 584, 611, 975, // :..@
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    333, 278, 333, 584, 556, 333, // [..`
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, // a..m
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, // n..z
    389, 280, 389, 584, // {..~
];

const COURIER_WIDTH: u16 = 600;

/// The standard PDF fonts a carousel document can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
    Courier,
    CourierBold,
}

impl StandardFont {
    /// The PDF `BaseFont` name.
    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
        }
    }

    /// Name of the font in page resource dictionaries.
    pub fn resource_name(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helv",
            StandardFont::HelveticaBold => "HelvB",
            StandardFont::Courier => "Cour",
            StandardFont::CourierBold => "CourB",
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, StandardFont::HelveticaBold | StandardFont::CourierBold)
    }

    /// Advance width of one WinAnsi code, in 1/1000 em.
    pub fn glyph_width(self, code: u8) -> u16 {
        let bold = self.is_bold();
        match self {
            StandardFont::Courier | StandardFont::CourierBold => COURIER_WIDTH,
            StandardFont::Helvetica | StandardFont::HelveticaBold => {
                let ascii = if bold {
                    &HELVETICA_BOLD_WIDTHS
                } else {
                    &HELVETICA_WIDTHS
                };
                match code {
                    32..=126 => ascii[usize::from(code - 32)],
                    0x85 | 0x89 | 0x97 => 1000,            // ellipsis, perthousand, emdash
                    0x91 | 0x92 if bold => 278,            // single quotes
                    0x91 | 0x92 => 222,
                    0x93 | 0x94 if bold => 500,            // double quotes
                    0x93 | 0x94 => 333,
                    0x95 => 350,                           // bullet
                    0x99 => 1000,                          // trademark
                    0xA0 => 278,                           // nbsp
                    _ if bold => 611,
                    _ => 556,
                }
            }
        }
    }

    /// Width of `text` in points at `size_pt`.
    pub fn text_width_pt(self, text: &str, size_pt: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|c| u32::from(self.glyph_width(encode_char(c))))
            .sum();
        units as f32 / 1000.0 * size_pt
    }
}

/// Maps a font family name to a standard font. Unknown families render as Helvetica.
pub fn resolve_font(family: &str, bold: bool) -> StandardFont {
    let family = family.trim().to_ascii_lowercase();
    let monospace = family.contains("courier") || family.contains("mono");
    if !monospace && !matches!(family.as_str(), "helvetica" | "arial" | "sans-serif") {
        debug!("Font family '{}' is not a standard font, using Helvetica", family);
    }
    match (monospace, bold) {
        (true, false) => StandardFont::Courier,
        (true, true) => StandardFont::CourierBold,
        (false, false) => StandardFont::Helvetica,
        (false, true) => StandardFont::HelveticaBold,
    }
}

/// Encodes one character as a WinAnsiEncoding byte; unrepresentable characters become `?`.
pub fn encode_char(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\t' => b' ',
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => b'?',
    }
}

/// Encodes a string for a PDF text-showing operator.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(encode_char).collect()
}

/// A font at a size, measuring in the page's own unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMeasure {
    pub font: StandardFont,
    pub size_pt: f32,
    pub points_per_unit: f32,
}

impl TextMeasure {
    pub fn new(font: StandardFont, size_pt: f32, points_per_unit: f32) -> Self {
        TextMeasure {
            font,
            size_pt,
            points_per_unit,
        }
    }

    /// Rendered width of `text` in page units.
    pub fn width(&self, text: &str) -> f32 {
        self.font.text_width_pt(text, self.size_pt) / self.points_per_unit
    }
}

/// Breaks `text` into lines no wider than `max_width` (page units).
///
/// Explicit newlines always break; blank paragraphs produce empty lines. Within a
/// paragraph, words are separated by any whitespace run and packed greedily by measured
/// width. A word wider than the line on its own is split between characters.
/// Empty input yields a single empty line.
pub fn split_text_to_size(text: &str, max_width: f32, measure: &TextMeasure) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };
            if measure.width(&candidate) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if measure.width(word) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = split_word(word, max_width, measure);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        lines.push(current);
    }
    lines
}

/// Splits a single over-long word into chunks that each fit `max_width`.
/// Every chunk holds at least one character, even if that character alone is too wide.
fn split_word(word: &str, max_width: f32, measure: &TextMeasure) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    for c in word.chars() {
        chunk.push(c);
        if measure.width(&chunk) > max_width && chunk.chars().count() > 1 {
            chunk.pop();
            chunks.push(std::mem::take(&mut chunk));
            chunk.push(c);
        }
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}
