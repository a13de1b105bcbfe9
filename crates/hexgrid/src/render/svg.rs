//! SVG output: one closed hexagon path per cell plus a marker for `dot` items.
use std::fmt;

use glam::DVec2;

use crate::color::{resolve_paint, Color};
use crate::grid::Grid;

/// Drawing parameters for [`SvgDocument`].
#[derive(Clone, Debug, PartialEq)]
pub struct SvgOptions {
    /// Translation applied to the whole grid.
    pub origin: DVec2,
    pub stroke_width: f64,
    /// Marker radius; independent of the hexagon size.
    pub dot_radius: f64,
    pub dot_outline: Color,
    pub dot_outline_width: f64,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            origin: DVec2::new(20.0, 20.0),
            stroke_width: 1.0,
            dot_radius: 9.0,
            dot_outline: Color::BLACK,
            dot_outline_width: 2.0,
        }
    }
}

impl SvgOptions {
    pub fn with_origin(mut self, origin: DVec2) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_dot_radius(mut self, radius: f64) -> Self {
        self.dot_radius = radius;
        self
    }
}

/// A populated grid rendered as an SVG document through [`fmt::Display`].
///
/// ```
/// use hexgrid::prelude::*;
///
/// let config = GridConfig::new(
///     "#FFFFFF".parse()?,
///     vec![ItemType::new("Forest", 50.0, ItemStyle::Fill, "#2E7D32".parse()?)],
/// )?;
/// let grid = Grid::try_new(2, 3, &config)?;
/// let svg = SvgDocument::new(&grid).to_string();
/// assert!(svg.starts_with("<?xml"));
/// # Ok::<(), hexgrid::error::Error>(())
/// ```
pub struct SvgDocument<'a> {
    grid: &'a Grid,
    options: SvgOptions,
}

impl<'a> SvgDocument<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            options: SvgOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SvgOptions) -> Self {
        self.options = options;
        self
    }

    /// Document `(width, height)` in user units.
    pub fn size(&self) -> DVec2 {
        self.grid
            .layout()
            .canvas_size(self.grid.rows(), self.grid.cols())
    }
}

impl fmt::Display for SvgDocument<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.grid;
        let opts = &self.options;
        let size = self.size();

        writeln!(f, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            f,
            r#"<svg width="{:.1}" height="{:.1}" xmlns="http://www.w3.org/2000/svg">"#,
            size.x, size.y
        )?;
        writeln!(f, "  <defs>")?;
        writeln!(f, "    <style>")?;
        writeln!(f, "      .hexagon {{ stroke-linejoin: round; }}")?;
        writeln!(f, "    </style>")?;
        writeln!(f, "  </defs>")?;
        writeln!(
            f,
            r#"  <g transform="translate({}, {})">"#,
            opts.origin.x, opts.origin.y
        )?;

        for cell in grid.cells() {
            let paint = resolve_paint(grid.item_of(cell), grid.default_color());
            write!(f, r#"    <path class="hexagon" d=""#)?;
            write_hexagon_path(f, grid.layout().corners(cell.center))?;
            writeln!(
                f,
                r#"" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                paint.fill, paint.stroke, opts.stroke_width
            )?;

            if let Some(marker) = paint.marker {
                writeln!(
                    f,
                    r#"    <circle cx="{:.1}" cy="{:.1}" r="{}" fill="{}" stroke="{}" stroke-width="{}"/>"#,
                    cell.center.x,
                    cell.center.y,
                    opts.dot_radius,
                    marker,
                    opts.dot_outline,
                    opts.dot_outline_width
                )?;
            }
        }

        writeln!(f, "  </g>")?;
        write!(f, "</svg>")
    }
}

/// `M x0 y0 L x1 y1 ... Z`
fn write_hexagon_path(f: &mut impl fmt::Write, corners: [DVec2; 6]) -> fmt::Result {
    for (i, p) in corners.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        write!(f, "{cmd} {:.1} {:.1} ", p.x, p.y)?;
    }
    write!(f, "Z")
}
