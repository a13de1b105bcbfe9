//! Colors and the cell paint rule shared by every renderer.
//!
//! [`resolve_paint`] is the single place that decides how a cell is drawn. The SVG,
//! PDF and HTML outputs all go through it so the three formats cannot drift apart.
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::grid::{ItemStyle, ItemType};

/// An opaque sRGB color, parsed from and displayed as `#RRGGBB`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    /// Outline of hexagons that carry an item.
    pub const DARK_GRAY: Color = Color::rgb(0x33, 0x33, 0x33);
    /// Outline of empty hexagons.
    pub const LIGHT_GRAY: Color = Color::rgb(0xCC, 0xCC, 0xCC);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels normalized to `[0, 1]`, as PDF content streams expect them.
    pub fn to_unit_rgb(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| Error::config(format!("color '{s}' must start with '#'")))?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::config(format!(
                "color '{s}' is not a #RRGGBB hex triplet"
            )));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|e| Error::config(format!("color '{s}': {e}")))
        };
        Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// How a single cell is painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellPaint {
    /// Hexagon fill.
    pub fill: Color,
    /// Hexagon outline.
    pub stroke: Color,
    /// Center marker color for `dot` items.
    pub marker: Option<Color>,
}

/// Resolve the paint for a cell holding `item` (or nothing) on a grid with `default_color`.
///
/// - empty: default fill, light gray outline
/// - `fill`: item color fill, dark gray outline
/// - `dot`: default fill, dark gray outline, marker in the item color
pub fn resolve_paint(item: Option<&ItemType>, default_color: Color) -> CellPaint {
    match item {
        None => CellPaint {
            fill: default_color,
            stroke: Color::LIGHT_GRAY,
            marker: None,
        },
        Some(item) => match item.style {
            ItemStyle::Fill => CellPaint {
                fill: item.color,
                stroke: Color::DARK_GRAY,
                marker: None,
            },
            ItemStyle::Dot => CellPaint {
                fill: default_color,
                stroke: Color::DARK_GRAY,
                marker: Some(item.color),
            },
        },
    }
}
