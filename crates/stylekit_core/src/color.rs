//! Rendered color parsing
//!
//! Computed styles report colors in the CSS color-function form
//! (`rgb(170, 187, 204)` / `rgba(170, 187, 204, 0.5)`). Swatches need the
//! uppercase `#RRGGBB` form of those values.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

fn rgb_function() -> &'static Regex {
    static RGB: OnceLock<Regex> = OnceLock::new();
    RGB.get_or_init(|| {
        Regex::new(r"(?i)rgba?\(\s*(\d{1,3})\s*[,\s]\s*(\d{1,3})\s*[,\s]\s*(\d{1,3})")
            .expect("rgb function pattern is valid")
    })
}

/// An opaque 8-bit-per-channel color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse an `rgb(...)` or `rgba(...)` color function.
    ///
    /// Alpha is ignored. Channels outside `0..=255` are rejected.
    pub fn parse_css(value: &str) -> Option<Self> {
        let caps = rgb_function().captures(value)?;
        let channel = |i: usize| caps.get(i)?.as_str().parse::<u8>().ok();
        Some(Self::new(channel(1)?, channel(2)?, channel(3)?))
    }

    /// Uppercase `#RRGGBB`
    pub fn to_hex(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Convert a rendered color to uppercase hex, `None` when it is not an RGB function
pub fn rgb_to_hex(value: &str) -> Option<String> {
    Rgb8::parse_css(value).map(|c| c.to_hex())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        assert_eq!(
            Rgb8::parse_css("rgb(170, 187, 204)"),
            Some(Rgb8::new(170, 187, 204))
        );
    }

    #[test]
    fn test_parse_rgba_ignores_alpha() {
        assert_eq!(
            Rgb8::parse_css("rgba(0, 128, 255, 0.4)"),
            Some(Rgb8::new(0, 128, 255))
        );
    }

    #[test]
    fn test_parse_space_separated() {
        assert_eq!(Rgb8::parse_css("rgb(1 2 3)"), Some(Rgb8::new(1, 2, 3)));
    }

    #[test]
    fn test_hex_is_uppercase_and_padded() {
        assert_eq!(rgb_to_hex("rgb(170, 187, 204)").as_deref(), Some("#AABBCC"));
        assert_eq!(rgb_to_hex("RGB(1,2,3)").as_deref(), Some("#010203"));
    }

    #[test]
    fn test_unparsable_colors() {
        assert_eq!(rgb_to_hex("transparent"), None);
        assert_eq!(rgb_to_hex("#aabbcc"), None);
        assert_eq!(rgb_to_hex("hsl(10, 20%, 30%)"), None);
        assert_eq!(rgb_to_hex("rgb(300, 0, 0)"), None);
        assert_eq!(rgb_to_hex(""), None);
    }
}
