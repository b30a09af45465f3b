//! RGBA color type used for highlight backgrounds and emphasis colors.
//!
//! This module provides the [`Rgba`] type, which represents colors using
//! floating-point RGBA components. It supports:
//!
//! - **Color creation**: From f32/u8 components, hex strings, or CSS color names
//! - **Parsing**: [`FromStr`] accepts either hex or a named color
//! - **Value identity**: Equality and hashing compare bit patterns, so colors
//!   can be part of a memoization key
//!
//! # Examples
//!
//! ```
//! use spanweave::Rgba;
//!
//! let yellow = Rgba::YELLOW;
//! let custom = Rgba::from_hex("#1a1a2e").unwrap();
//! let named: Rgba = "orange".parse().unwrap();
//! let faded = Rgba::BLUE.with_alpha(0.5);
//!
//! assert_eq!(yellow.to_string(), "#FFFF00");
//! assert_ne!(custom, named);
//! assert!(!faded.is_opaque());
//! ```

use crate::error::Error;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// RGBA color with f32 components in range [0.0, 1.0].
///
/// Two colors are equal when their component bit patterns are equal. This
/// keeps `Eq` and `Hash` consistent with each other, which the value cache
/// relies on. `0.0` and `-0.0` are therefore distinct colors.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    /// Opaque black.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Opaque white.
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Opaque red.
    pub const RED: Self = Self {
        r: 1.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    /// Opaque green.
    pub const GREEN: Self = Self {
        r: 0.0,
        g: 1.0,
        b: 0.0,
        a: 1.0,
    };

    /// Opaque blue.
    pub const BLUE: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 1.0,
        a: 1.0,
    };

    /// Opaque yellow, the default highlight color.
    pub const YELLOW: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 0.0,
        a: 1.0,
    };

    /// Create a new RGBA color from f32 components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from f32 RGB components.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create an opaque color from u8 RGB components.
    #[must_use]
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    /// Create a color from u8 RGBA components.
    #[must_use]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }

    /// Parse a hex color string (e.g., "#FF0000" or "FF0000").
    ///
    /// Supports 3-char (#RGB), 6-char (#RRGGBB), and 8-char (#RRGGBBAA) formats.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();

        match hex.len() {
            3 => {
                // #RGB -> #RRGGBB
                let r = channel(0..1)?;
                let g = channel(1..2)?;
                let b = channel(2..3)?;
                Some(Self::from_rgb_u8(r * 17, g * 17, b * 17))
            }
            6 => Some(Self::from_rgb_u8(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
            )),
            8 => Some(Self::from_rgba_u8(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }

    /// Look up a CSS color keyword (case-insensitive).
    ///
    /// Covers the basic CSS palette plus the handful of extended names hosts
    /// commonly pass for highlight backgrounds.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        #[rustfmt::skip]
        const NAMED: [(&str, (u8, u8, u8)); 22] = [
            ("black", (0, 0, 0)),
            ("silver", (192, 192, 192)),
            ("gray", (128, 128, 128)),
            ("grey", (128, 128, 128)),
            ("white", (255, 255, 255)),
            ("maroon", (128, 0, 0)),
            ("red", (255, 0, 0)),
            ("purple", (128, 0, 128)),
            ("fuchsia", (255, 0, 255)),
            ("magenta", (255, 0, 255)),
            ("green", (0, 128, 0)),
            ("lime", (0, 255, 0)),
            ("olive", (128, 128, 0)),
            ("yellow", (255, 255, 0)),
            ("navy", (0, 0, 128)),
            ("blue", (0, 0, 255)),
            ("teal", (0, 128, 128)),
            ("aqua", (0, 255, 255)),
            ("cyan", (0, 255, 255)),
            ("orange", (255, 165, 0)),
            ("pink", (255, 192, 203)),
            ("lightyellow", (255, 255, 224)),
        ];

        if name.eq_ignore_ascii_case("transparent") {
            return Some(Self::TRANSPARENT);
        }
        NAMED
            .iter()
            .find(|(candidate, _)| name.eq_ignore_ascii_case(candidate))
            .map(|&(_, (r, g, b))| Self::from_rgb_u8(r, g, b))
    }

    /// Return a new color with the specified alpha value.
    #[must_use]
    pub const fn with_alpha(self, alpha: f32) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a: alpha,
        }
    }

    /// Convert to u8 RGB tuple, clamping values to [0, 255].
    #[must_use]
    pub fn to_rgb_u8(self) -> (u8, u8, u8) {
        (to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    /// Convert to u8 RGBA tuple, clamping values to [0, 255].
    #[must_use]
    pub fn to_rgba_u8(self) -> (u8, u8, u8, u8) {
        let (r, g, b) = self.to_rgb_u8();
        (r, g, b, to_u8(self.a))
    }

    /// Check if this color is fully opaque.
    #[must_use]
    pub fn is_opaque(self) -> bool {
        self.a >= 1.0
    }

    /// Pack all four components into a single integer by bit pattern.
    ///
    /// Used for equality and hashing. Not a serialization format.
    #[inline]
    #[must_use]
    pub const fn to_bits(self) -> u128 {
        let r = self.r.to_bits() as u128;
        let g = self.g.to_bits() as u128;
        let b = self.b.to_bits() as u128;
        let a = self.a.to_bits() as u128;
        r | (g << 32) | (b << 64) | (a << 96)
    }

    /// Bitwise equality check.
    #[inline]
    #[must_use]
    pub const fn bits_eq(self, other: Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

fn to_u8(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

impl PartialEq for Rgba {
    fn eq(&self, other: &Self) -> bool {
        self.bits_eq(*other)
    }
}

impl Eq for Rgba {}

impl Hash for Rgba {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_bits().hash(state);
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::from_name(trimmed)
            .or_else(|| Self::from_hex(trimmed))
            .ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b, a) = self.to_rgba_u8();
        if self.is_opaque() {
            write!(f, "#{r:02X}{g:02X}{b:02X}")
        } else {
            write!(f, "#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}
