use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// The red component, from 0 to 255.
    pub r: u8,
    /// The green component, from 0 to 255.
    pub g: u8,
    /// The blue component, from 0 to 255.
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parses a six digit hex color, with or without the leading `#`.
    /// Case-insensitive. Shorthand (`#FFF`) and alpha forms are not accepted.
    pub fn parse_hex(hex: &str) -> Option<Rgb> {
        let digits = hex.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Moves every channel toward 255 by `offset`, saturating at 255.
    pub fn lighten(self, offset: u8) -> Rgb {
        Rgb {
            r: self.r.saturating_add(offset),
            g: self.g.saturating_add(offset),
            b: self.b.saturating_add(offset),
        }
    }

    /// The color as the `0.0..=1.0` components used by PDF color operators.
    pub fn to_pdf_components(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }

    /// Lowercase `#rrggbb` form.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::BLACK
    }
}

/// Converts a hex color string to RGB.
///
/// Never fails: anything that does not parse as `#RRGGBB` renders as black.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    Rgb::parse_hex(hex).unwrap_or(Rgb::BLACK)
}

/// Returns true when `hex` is a color `hex_to_rgb` would parse rather than default.
pub fn is_valid_hex(hex: &str) -> bool {
    Rgb::parse_hex(hex).is_some()
}
