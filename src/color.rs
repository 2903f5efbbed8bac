//! Colours, including the 'undefined' sentinel which tells a backend to skip painting.

use std::fmt::{Display, Formatter};

use rgb::RGBA8;

use crate::{Error, Result};

/// An sRGB colour with 8-bit alpha.  Any colour with an alpha of zero (including
/// [`Color::UNDEFINED`]) is invisible, and backends will skip whatever aspect (fill or stroke) it
/// was given for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    inner: RGBA8,
}

impl Color {
    /// The 'do not paint' sentinel
    pub const UNDEFINED: Color = Color::rgba(0, 0, 0, 0);
    pub const TRANSPARENT: Color = Color::UNDEFINED;

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GRAY: Color = Color::rgb(128, 128, 128);
    pub const LIGHT_GRAY: Color = Color::rgb(211, 211, 211);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const STEEL_BLUE: Color = Color::rgb(70, 130, 180);

    /// Creates an opaque colour
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            inner: RGBA8 { r, g, b, a },
        }
    }

    /// Parses `#RGB`, `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional)
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s.trim().trim_start_matches('#');
        let invalid = || Error::InvalidColor(s.to_owned());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                // Each nibble is doubled, so `#f80` is `#ff8800`
                let nibble = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .map(|n| n * 17)
                        .map_err(|_| invalid())
                };
                Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(invalid()),
        }
    }

    /// Returns a copy of this colour with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.inner.r, self.inner.g, self.inner.b, a)
    }

    /// `false` if painting with this colour would produce no marks
    pub fn is_visible(&self) -> bool {
        self.inner.a != 0
    }

    pub fn is_undefined(&self) -> bool {
        !self.is_visible()
    }

    /// The alpha channel as a fraction in `[0, 1]`
    pub fn opacity(&self) -> f64 {
        f64::from(self.inner.a) / 255.0
    }

    pub fn rgba8(&self) -> RGBA8 {
        self.inner
    }

    pub fn r(&self) -> u8 {
        self.inner.r
    }

    pub fn g(&self) -> u8 {
        self.inner.g
    }

    pub fn b(&self) -> u8 {
        self.inner.b
    }

    pub fn a(&self) -> u8 {
        self.inner.a
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::UNDEFINED
    }
}

impl From<RGBA8> for Color {
    fn from(inner: RGBA8) -> Self {
        Self { inner }
    }
}

impl From<rgb::RGB8> for Color {
    fn from(c: rgb::RGB8) -> Self {
        Self::rgb(c.r, c.g, c.b)
    }
}

/// Formats as `#rrggbb`, or `#rrggbbaa` for translucent colours
impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let RGBA8 { r, g, b, a } = self.inner;
        if a == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::from_hex("#ff8800").unwrap(), Color::rgb(255, 136, 0));
        assert_eq!(Color::from_hex("f80").unwrap(), Color::rgb(255, 136, 0));
        assert_eq!(
            Color::from_hex("#00000080").unwrap(),
            Color::rgba(0, 0, 0, 128)
        );
    }

    #[test]
    fn rejects_bad_hex() {
        for s in ["", "#12", "#12345", "#gg0000", "#ffééff"] {
            assert!(
                matches!(Color::from_hex(s), Err(Error::InvalidColor(_))),
                "{:?} should not parse",
                s
            );
        }
    }

    #[test]
    fn zero_alpha_is_invisible() {
        assert!(!Color::UNDEFINED.is_visible());
        assert!(!Color::RED.with_alpha(0).is_visible());
        assert!(Color::RED.with_alpha(1).is_visible());
        assert_eq!(Color::default(), Color::UNDEFINED);
    }

    #[test]
    fn display_round_trips_through_hex() {
        let c = Color::rgba(1, 2, 3, 4);
        assert_eq!(c.to_string(), "#01020304");
        assert_eq!(Color::from_hex(&c.to_string()).unwrap(), c);
        assert_eq!(Color::STEEL_BLUE.to_string(), "#4682b4");
    }
}
