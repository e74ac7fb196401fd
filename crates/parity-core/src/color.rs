use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color string is empty")]
    Empty,
    #[error("color '{0}' must start with '#'")]
    MissingHash(String),
    #[error("color '{0}' must have 3, 6 or 8 hex digits")]
    BadLength(String),
    #[error("color '{0}' contains non-hex digits")]
    BadDigit(String),
}

/// RGBA color: 0–255 per channel, alpha in 0–1.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Parses `#RGB`, `#RRGGBB` or `#AARRGGBB`. The 8-digit form puts alpha
    /// first, the way Android reports colors.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(s.to_string()));
        }
        let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ColorParseError::BadDigit(s.to_string()));
        match digits.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&digits[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| ColorParseError::BadDigit(s.to_string()))
                };
                Ok(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => {
                let a = byte(0)?;
                Ok(Self {
                    r: byte(2)?,
                    g: byte(4)?,
                    b: byte(6)?,
                    a: f64::from(a) / 255.0,
                })
            }
            _ => Err(ColorParseError::BadLength(s.to_string())),
        }
    }

    /// `#RRGGBB`, or `#AARRGGBB` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            let a = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
            format!("#{:02X}{:02X}{:02X}{:02X}", a, self.r, self.g, self.b)
        }
    }

    /// Largest per-channel difference, alpha scaled to 0–255.
    pub fn max_channel_delta(&self, other: &Rgba) -> f64 {
        let dr = (f64::from(self.r) - f64::from(other.r)).abs();
        let dg = (f64::from(self.g) - f64::from(other.g)).abs();
        let db = (f64::from(self.b) - f64::from(other.b)).abs();
        let da = ((self.a - other.a) * 255.0).abs();
        dr.max(dg).max(db).max(da)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_long_and_argb_forms() {
        assert_eq!(Rgba::from_hex("#fff").unwrap(), Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::from_hex("#1A2B3C").unwrap(), Rgba::rgb(0x1A, 0x2B, 0x3C));
        let argb = Rgba::from_hex("#801A2B3C").unwrap();
        assert_eq!((argb.r, argb.g, argb.b), (0x1A, 0x2B, 0x3C));
        assert!((argb.a - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_malformed_strings() {
        assert_eq!(Rgba::from_hex(""), Err(ColorParseError::Empty));
        assert!(matches!(Rgba::from_hex("123456"), Err(ColorParseError::MissingHash(_))));
        assert!(matches!(Rgba::from_hex("#12345"), Err(ColorParseError::BadLength(_))));
        assert!(matches!(Rgba::from_hex("#zzzzzz"), Err(ColorParseError::BadDigit(_))));
    }

    #[test]
    fn hex_output_and_channel_delta() {
        let c = Rgba::rgb(0x10, 0x20, 0x30);
        assert_eq!(c.to_hex(), "#102030");
        assert_eq!(c.max_channel_delta(&Rgba::rgb(0x10, 0x28, 0x30)), 8.0);
    }
}
