//! Validated grid configuration: the background color and the ordered item types.
//!
//! [`GridConfig::new`] validates programmatically built item lists. With the `ron`
//! feature (on by default) configurations can also be read from RON documents:
//!
//! ```ron
//! (
//!     default: "#F5F0E1",
//!     items: [
//!         (name: "Forest", percentage: 30.0, style: "fill", color: "#2E7D32"),
//!         (name: "Village", percentage: 5.0, style: "dot", color: "#C62828", dice: Some("2d6")),
//!     ],
//! )
//! ```
use crate::color::Color;
use crate::error::{Error, Result};
use crate::grid::ItemType;

/// Slack for floating-point sums such as `33.3 + 33.3 + 33.4`.
const PERCENT_TOLERANCE: f64 = 1e-9;

/// A validated configuration.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
    /// Fill of empty hexagons and of hexagons holding `dot` items.
    pub default_color: Color,
    /// Item types in the order they were declared.
    pub items: Vec<ItemType>,
}

impl GridConfig {
    /// Validate and build a configuration.
    pub fn new(default_color: Color, items: Vec<ItemType>) -> Result<Self> {
        let config = Self {
            default_color,
            items,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the item list: non-empty, named items, percentages in range summing to at most 100.
    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(Error::config("no items defined in configuration"));
        }

        let mut total = 0.0;
        for item in &self.items {
            if item.name.trim().is_empty() {
                return Err(Error::config("item names must not be empty"));
            }
            if !(0.0..=100.0).contains(&item.percentage) {
                return Err(Error::config(format!(
                    "invalid percentage for item {}: {}",
                    item.name, item.percentage
                )));
            }
            total += item.percentage;
        }

        if total > 100.0 + PERCENT_TOLERANCE {
            return Err(Error::config(format!(
                "total percentage exceeds 100%: {total}"
            )));
        }

        Ok(())
    }

    /// Sum of all item percentages.
    pub fn total_percentage(&self) -> f64 {
        self.items.iter().map(|i| i.percentage).sum()
    }
}

#[cfg(feature = "serde")]
pub use raw::{GridConfigDef, ItemTypeDef};

#[cfg(feature = "serde")]
mod raw {
    use serde::{Deserialize, Serialize};

    use super::GridConfig;
    use crate::error::{Error, Result};
    use crate::grid::{DiceExpr, ItemStyle, ItemType};

    /// Serialized form of a [`GridConfig`], before validation.
    #[derive(Clone, Debug, Default, Serialize, Deserialize)]
    pub struct GridConfigDef {
        #[serde(default)]
        pub default: String,
        #[serde(default)]
        pub items: Vec<ItemTypeDef>,
    }

    /// Serialized form of an [`ItemType`].
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct ItemTypeDef {
        pub name: String,
        pub percentage: f64,
        pub style: String,
        pub color: String,
        #[serde(default)]
        pub dice: Option<String>,
    }

    impl TryFrom<&ItemTypeDef> for ItemType {
        type Error = Error;

        fn try_from(def: &ItemTypeDef) -> Result<Self> {
            let style: ItemStyle = def
                .style
                .parse()
                .map_err(|e| Error::config(format!("item {}: {e}", def.name)))?;
            let color = def
                .color
                .parse()
                .map_err(|e| Error::config(format!("item {}: {e}", def.name)))?;
            let mut item = ItemType::new(def.name.clone(), def.percentage, style, color);
            if let Some(dice) = &def.dice {
                let dice: DiceExpr = dice
                    .parse()
                    .map_err(|e| Error::config(format!("item {}: {e}", def.name)))?;
                item = item.with_dice(dice);
            }
            Ok(item)
        }
    }

    impl TryFrom<&GridConfigDef> for GridConfig {
        type Error = Error;

        fn try_from(def: &GridConfigDef) -> Result<Self> {
            if def.default.trim().is_empty() {
                return Err(Error::config("default color is required"));
            }
            let default_color = def
                .default
                .parse()
                .map_err(|e| Error::config(format!("default color: {e}")))?;
            let items = def
                .items
                .iter()
                .map(ItemType::try_from)
                .collect::<Result<Vec<_>>>()?;
            GridConfig::new(default_color, items)
        }
    }

    impl From<&GridConfig> for GridConfigDef {
        fn from(config: &GridConfig) -> Self {
            Self {
                default: config.default_color.to_string(),
                items: config
                    .items
                    .iter()
                    .map(|item| ItemTypeDef {
                        name: item.name.clone(),
                        percentage: item.percentage,
                        style: item.style.as_str().to_owned(),
                        color: item.color.to_string(),
                        dice: item.dice.map(|d| d.to_string()),
                    })
                    .collect(),
            }
        }
    }
}

#[cfg(feature = "ron")]
impl GridConfig {
    /// Parse and validate a RON configuration document.
    pub fn from_ron_str(source: &str) -> Result<Self> {
        let def: GridConfigDef = ron::from_str(source)
            .map_err(|e| Error::config(format!("failed to parse configuration: {e}")))?;
        GridConfig::try_from(&def)
    }

    /// Read, parse and validate a RON configuration file.
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_ron_str(&source)?;
        tracing::debug!(
            "Loaded {} item types from '{}'.",
            config.items.len(),
            path.display()
        );
        Ok(config)
    }
}
