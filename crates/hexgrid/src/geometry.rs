//! Hexagon geometry for the staggered grid layout.
//!
//! Hexagons are flat-topped. Columns advance by `width + column_gap`, odd rows are
//! shifted right by half of that step, and rows advance by half the hexagon height,
//! so consecutive rows interlock instead of stacking full-height apart.
use std::f64::consts::{FRAC_PI_3, PI};

use glam::DVec2;

/// Dimensions of one hexagon and the spacing between columns.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HexLayout {
    /// Circumradius: distance from the center to any corner.
    pub size: f64,
    /// Hexagon width used for column spacing.
    pub width: f64,
    /// Hexagon height used for row spacing.
    pub height: f64,
    /// Extra horizontal space between neighbouring hexagons of one row.
    pub column_gap: f64,
}

impl Default for HexLayout {
    /// The canonical vector layout in SVG user units.
    fn default() -> Self {
        Self {
            size: 25.0,
            width: 43.3,
            height: 50.0,
            column_gap: 40.0,
        }
    }
}

impl HexLayout {
    /// Layout with width and height derived exactly from the circumradius.
    pub fn from_size(size: f64, column_gap: f64) -> Self {
        Self {
            size,
            width: size * 3f64.sqrt(),
            height: 2.0 * size,
            column_gap,
        }
    }

    /// Uniformly scale every dimension.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            size: self.size * factor,
            width: self.width * factor,
            height: self.height * factor,
            column_gap: self.column_gap * factor,
        }
    }

    /// Horizontal distance between neighbouring centers in one row.
    #[inline]
    pub fn column_step(&self) -> f64 {
        self.width + self.column_gap
    }

    /// Vertical distance between consecutive rows.
    #[inline]
    pub fn row_step(&self) -> f64 {
        self.height / 2.0
    }

    /// Horizontal shift applied to odd rows.
    #[inline]
    pub fn row_offset(&self) -> f64 {
        (self.width - self.column_gap) / 2.0 + self.column_gap
    }

    /// Center of the hexagon at `(row, col)`, relative to the center of `(0, 0)`.
    pub fn center(&self, row: usize, col: usize) -> DVec2 {
        let mut x = col as f64 * self.column_step();
        if row % 2 == 1 {
            x += self.row_offset();
        }
        DVec2::new(x, row as f64 * self.row_step())
    }

    /// The six corners around `center`, counter-clockwise from angle 0 in steps of 60°.
    pub fn corners(&self, center: DVec2) -> [DVec2; 6] {
        std::array::from_fn(|i| {
            let angle = i as f64 * PI / 3.0;
            center + self.size * DVec2::new(angle.cos(), angle.sin())
        })
    }

    /// Canvas `(width, height)` for a `rows × cols` grid.
    ///
    /// The width gains the odd-row overflow only when there is more than one row;
    /// the height gains an extra half-height only for an even row count.
    pub fn canvas_size(&self, rows: usize, cols: usize) -> DVec2 {
        let mut width = cols as f64 * self.column_step();
        if rows > 1 {
            width += self.row_offset();
        }
        let mut height = rows as f64 * self.row_step();
        if rows % 2 == 0 {
            height += self.row_step();
        }
        DVec2::new(width, height)
    }

    /// Tight `(min, max)` box around every hexagon drawn for a `rows × cols` grid.
    pub fn bounds(&self, rows: usize, cols: usize) -> (DVec2, DVec2) {
        // Corners sit at ±size on x and ±size·sin(60°) on y.
        let reach = DVec2::new(self.size, self.size * FRAC_PI_3.sin());
        let last_col = cols.saturating_sub(1) as f64 * self.column_step();
        let max_x = if rows > 1 {
            last_col + self.row_offset()
        } else {
            last_col
        };
        let max_y = rows.saturating_sub(1) as f64 * self.row_step();
        (-reach, DVec2::new(max_x, max_y) + reach)
    }
}
