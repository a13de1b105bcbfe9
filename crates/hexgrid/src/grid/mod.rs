//! Grid model: item types, cells and the row-major cell matrix.
//!
//! Cells refer to their item type by [`ItemTypeId`], an index into the grid's ordered
//! item list, so type data is never copied per cell.
use std::fmt;
use std::str::FromStr;

use glam::DVec2;

use crate::color::Color;
use crate::config::GridConfig;
use crate::error::{Error, Result};
use crate::geometry::HexLayout;

pub mod dice;

pub use dice::{DiceExpr, DiceOutcome};

/// How an item is drawn on its hexagon.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemStyle {
    /// A marker at the hexagon center; the hexagon keeps the background color.
    Dot,
    /// The hexagon is tinted with the item color.
    Fill,
}

impl ItemStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemStyle::Dot => "dot",
            ItemStyle::Fill => "fill",
        }
    }
}

impl FromStr for ItemStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "dot" => Ok(ItemStyle::Dot),
            "fill" => Ok(ItemStyle::Fill),
            other => Err(Error::config(format!(
                "invalid style '{other}' (must be 'dot' or 'fill')"
            ))),
        }
    }
}

impl fmt::Display for ItemStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named category placed on the grid at a target percentage.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub struct ItemType {
    pub name: String,
    /// Target share of all cells, in `[0, 100]`.
    pub percentage: f64,
    pub style: ItemStyle,
    pub color: Color,
    /// Optional dice rolled for every cell holding this item.
    pub dice: Option<DiceExpr>,
}

impl ItemType {
    pub fn new(name: impl Into<String>, percentage: f64, style: ItemStyle, color: Color) -> Self {
        Self {
            name: name.into(),
            percentage,
            style,
            color,
            dice: None,
        }
    }

    /// Attach a dice descriptor.
    pub fn with_dice(mut self, dice: DiceExpr) -> Self {
        self.dice = Some(dice);
        self
    }
}

/// Index of an [`ItemType`] within its grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemTypeId(pub usize);

/// One hexagon of the grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
    /// Assigned item type, if any.
    pub item: Option<ItemTypeId>,
    /// Dice outcome for items that carry a dice descriptor.
    pub roll: Option<DiceOutcome>,
    /// Hexagon center in layout units.
    pub center: DVec2,
}

impl Cell {
    fn empty(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            item: None,
            roll: None,
            center: DVec2::ZERO,
        }
    }
}

/// A fixed-size `rows × cols` matrix of cells plus the item types they may hold.
#[derive(Clone, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    item_types: Vec<ItemType>,
    default_color: Color,
    layout: HexLayout,
}

impl Grid {
    /// Create an empty grid laid out with the default [`HexLayout`].
    ///
    /// `config` is validated again since its fields may have changed after construction.
    pub fn try_new(rows: usize, cols: usize, config: &GridConfig) -> Result<Self> {
        config.validate()?;
        if rows == 0 || cols == 0 {
            return Err(Error::config(format!(
                "grid dimensions must be positive, got {rows}x{cols}"
            )));
        }

        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Cell::empty(row, col)))
            .collect();

        let mut grid = Self {
            rows,
            cols,
            cells,
            item_types: config.items.clone(),
            default_color: config.default_color,
            layout: HexLayout::default(),
        };
        grid.apply_layout(HexLayout::default());
        Ok(grid)
    }

    /// Builder form of [`Grid::apply_layout`].
    pub fn with_layout(mut self, layout: HexLayout) -> Self {
        self.apply_layout(layout);
        self
    }

    /// Compute every cell center from `layout`.
    pub fn apply_layout(&mut self, layout: HexLayout) {
        for cell in &mut self.cells {
            cell.center = layout.center(cell.row, cell.col);
        }
        self.layout = layout;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    pub fn default_color(&self) -> Color {
        self.default_color
    }

    /// Item types in configuration order.
    pub fn item_types(&self) -> &[ItemType] {
        &self.item_types
    }

    pub fn item_type(&self, id: ItemTypeId) -> Option<&ItemType> {
        self.item_types.get(id.0)
    }

    /// Ids of all item types in configuration order.
    pub fn item_type_ids(&self) -> impl Iterator<Item = ItemTypeId> + '_ {
        (0..self.item_types.len()).map(ItemTypeId)
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        if row < self.rows && col < self.cols {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Item type assigned to `cell`, if any.
    pub fn item_of(&self, cell: &Cell) -> Option<&ItemType> {
        cell.item.and_then(|id| self.item_type(id))
    }

    /// Number of cells holding an item.
    pub fn assigned_count(&self) -> usize {
        self.cells.iter().filter(|c| c.item.is_some()).count()
    }

    /// Number of cells holding item type `id`.
    pub fn count_of(&self, id: ItemTypeId) -> usize {
        self.cells.iter().filter(|c| c.item == Some(id)).count()
    }

    /// Drop every assignment and dice outcome.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.item = None;
            cell.roll = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GridConfig {
        GridConfig::new(
            Color::WHITE,
            vec![
                ItemType::new("Forest", 40.0, ItemStyle::Fill, Color::rgb(0, 128, 0)),
                ItemType::new("Town", 10.0, ItemStyle::Dot, Color::rgb(200, 0, 0)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn parses_styles() {
        assert_eq!("dot".parse::<ItemStyle>().unwrap(), ItemStyle::Dot);
        assert_eq!("fill".parse::<ItemStyle>().unwrap(), ItemStyle::Fill);
        assert!("Fill".parse::<ItemStyle>().is_err());
        assert!("stripe".parse::<ItemStyle>().is_err());
        assert_eq!(ItemStyle::Dot.to_string(), "dot");
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(Grid::try_new(0, 5, &config()).is_err());
        assert!(Grid::try_new(5, 0, &config()).is_err());
    }

    #[test]
    fn rejects_configs_edited_past_one_hundred_percent() {
        let mut config = config();
        config
            .items
            .push(ItemType::new("Swamp", 60.0, ItemStyle::Fill, Color::rgb(0x55, 0x6B, 0x2F)));
        let err = Grid::try_new(4, 4, &config).unwrap_err();
        assert!(err.to_string().contains("exceeds 100%"), "{err}");

        config.items.clear();
        assert!(Grid::try_new(4, 4, &config).is_err());
    }

    #[test]
    fn cells_are_row_major_and_empty() {
        let grid = Grid::try_new(3, 4, &config()).unwrap();
        assert_eq!(grid.total_cells(), 12);
        assert_eq!(grid.assigned_count(), 0);
        for (i, cell) in grid.cells().iter().enumerate() {
            assert_eq!((cell.row, cell.col), (i / 4, i % 4));
            assert!(cell.item.is_none());
        }
        assert_eq!(grid.cell(2, 3).map(|c| (c.row, c.col)), Some((2, 3)));
        assert!(grid.cell(3, 0).is_none());
        assert!(grid.cell(0, 4).is_none());
    }

    #[test]
    fn centers_follow_the_applied_layout() {
        let grid = Grid::try_new(3, 3, &config()).unwrap();
        let layout = HexLayout::default();
        for cell in grid.cells() {
            assert_eq!(cell.center, layout.center(cell.row, cell.col));
        }

        let small = HexLayout::from_size(5.0, 1.0);
        let grid = grid.with_layout(small);
        assert_eq!(grid.layout(), &small);
        assert_eq!(grid.cell(1, 2).unwrap().center, small.center(1, 2));
    }

    #[test]
    fn item_types_keep_configuration_order() {
        let grid = Grid::try_new(2, 2, &config()).unwrap();
        let names: Vec<_> = grid.item_types().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Forest", "Town"]);
        assert_eq!(grid.item_type(ItemTypeId(1)).unwrap().name, "Town");
        assert!(grid.item_type(ItemTypeId(2)).is_none());
        assert_eq!(
            grid.item_type_ids().collect::<Vec<_>>(),
            [ItemTypeId(0), ItemTypeId(1)]
        );
    }

    #[test]
    fn counts_and_clear() {
        let mut grid = Grid::try_new(2, 2, &config()).unwrap();
        grid.cells_mut()[0].item = Some(ItemTypeId(0));
        grid.cells_mut()[3].item = Some(ItemTypeId(1));
        assert_eq!(grid.assigned_count(), 2);
        assert_eq!(grid.count_of(ItemTypeId(0)), 1);
        assert_eq!(grid.item_of(&grid.cells()[3]).unwrap().name, "Town");

        grid.clear();
        assert_eq!(grid.assigned_count(), 0);
    }
}
