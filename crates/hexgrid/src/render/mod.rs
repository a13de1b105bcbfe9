//! Output formats for a populated [`Grid`](crate::grid::Grid).
//!
//! - [svg]: the vector document with one path per hexagon
//! - [pdf]: a paginated A4 document in millimeter units
//! - [html]: a viewable page that wraps an SVG document and a legend
//!
//! Every renderer paints cells through [`crate::color::resolve_paint`] and lists item
//! types through [`Legend`].
use crate::color::Color;
use crate::grid::{DiceExpr, ItemStyle, ItemType};

pub mod html;
pub mod pdf;
pub mod svg;

/// Legend heading shared by the document and HTML outputs.
pub const LEGEND_TITLE: &str = "Item Legend";

/// One legend row.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendEntry {
    pub name: String,
    pub percentage: f64,
    pub style: ItemStyle,
    pub color: Color,
    pub dice: Option<DiceExpr>,
}

impl LegendEntry {
    /// `"<name> (<pct>%)"`, followed by `" - <dice>"` when the item carries dice.
    pub fn label(&self) -> String {
        let mut label = format!("{} ({:.1}%)", self.name, self.percentage);
        if let Some(dice) = &self.dice {
            label.push_str(&format!(" - {dice}"));
        }
        label
    }
}

/// Legend rows in configuration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Legend {
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    pub fn from_items(items: &[ItemType]) -> Self {
        let entries = items
            .iter()
            .map(|item| LegendEntry {
                name: item.name.clone(),
                percentage: item.percentage,
                style: item.style,
                color: item.color,
                dice: item.dice,
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
