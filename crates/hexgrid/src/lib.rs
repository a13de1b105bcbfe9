#![forbid(unsafe_code)]
//! hexgrid: percentage-driven population of staggered hexagon grids.
//!
//! Modules:
//! - geometry: hexagon centers, corners and canvas bounds for the staggered layout
//! - grid: item types, cells and the cell matrix (incl. dice descriptors)
//! - allocate: quota computation and shuffled assignment of item types to cells
//! - color: `#RRGGBB` colors and the paint rule shared by all renderers
//! - config: validated configuration, optionally loaded from RON
//! - render: SVG, paginated PDF and HTML outputs
pub mod allocate;
pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod render;

/// Convenient re-exports for common types. Import with `use hexgrid::prelude::*;`.
pub mod prelude {
    pub use crate::allocate::{populate, quota, AllocationPlan};
    pub use crate::color::{resolve_paint, CellPaint, Color};
    pub use crate::config::GridConfig;
    pub use crate::error::{Error, Result};
    pub use crate::geometry::HexLayout;
    pub use crate::grid::{
        Cell, DiceExpr, DiceOutcome, Grid, ItemStyle, ItemType, ItemTypeId,
    };
    pub use crate::render::html::HtmlPage;
    pub use crate::render::pdf::{PdfDocument, PdfOptions};
    pub use crate::render::svg::{SvgDocument, SvgOptions};
    pub use crate::render::{Legend, LegendEntry};
}
