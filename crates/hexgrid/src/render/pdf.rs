//! Paginated PDF output in millimeter units.
//!
//! The grid is drawn on the first A4 landscape page, centered in the area left of the
//! legend column and shrunk uniformly if it does not fit. Legend rows that overflow the
//! first page continue on additional pages.
use std::ops::Range;

use glam::DVec2;
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str, TextStr};
use tracing::info;

use crate::color::{resolve_paint, Color};
use crate::grid::{Grid, ItemStyle};
use crate::render::{Legend, LegendEntry, LEGEND_TITLE};

const REGULAR: Name<'static> = Name(b"F1");
const BOLD: Name<'static> = Name(b"F2");

/// Bezier handle length for a quarter circle.
const KAPPA: f64 = 0.552_284_749_8;

const TITLE_PT: f32 = 12.0;
const ENTRY_PT: f32 = 10.0;
const DICE_PT: f32 = 8.0;
/// Distance from the legend title baseline to the first entry baseline.
const LEGEND_HEADER_MM: f64 = 8.0;
const LEGEND_ROW_MM: f64 = 6.0;
const LEGEND_SYMBOL_MM: f64 = 4.0;
const LEGEND_TEXT_INDENT_MM: f64 = 8.0;

/// Page and drawing parameters, in millimeters unless stated otherwise.
#[derive(Clone, Debug, PartialEq)]
pub struct PdfOptions {
    pub page_size: DVec2,
    pub margin: f64,
    pub legend_width: f64,
    pub legend_gap: f64,
    /// Preferred hexagon circumradius.
    pub hex_size: f64,
    /// Marker radius at the preferred hexagon size.
    pub dot_radius: f64,
    pub line_width: f64,
    pub title: String,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            page_size: DVec2::new(297.0, 210.0),
            margin: 20.0,
            legend_width: 60.0,
            legend_gap: 10.0,
            hex_size: 8.0,
            dot_radius: 2.0,
            line_width: 0.2,
            title: "Hex Grid".to_owned(),
        }
    }
}

impl PdfOptions {
    pub fn with_page_size(mut self, page_size: DVec2) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_hex_size(mut self, hex_size: f64) -> Self {
        self.hex_size = hex_size;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Maps layout units onto the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPlacement {
    /// Millimeters per layout unit.
    pub scale: f64,
    /// Page position of the layout origin.
    pub offset: DVec2,
    /// Fraction of the preferred size actually used, in `(0, 1]`.
    pub fit: f64,
}

impl GridPlacement {
    #[inline]
    pub fn map(&self, p: DVec2) -> DVec2 {
        self.offset + p * self.scale
    }
}

/// A populated grid rendered as a PDF document.
pub struct PdfDocument<'a> {
    grid: &'a Grid,
    options: PdfOptions,
    legend: Legend,
}

impl<'a> PdfDocument<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            options: PdfOptions::default(),
            legend: Legend::from_items(grid.item_types()),
        }
    }

    pub fn with_options(mut self, options: PdfOptions) -> Self {
        self.options = options;
        self
    }

    /// Area reserved for the grid: `(top-left, size)`.
    fn grid_area(&self) -> (DVec2, DVec2) {
        let o = &self.options;
        let min = DVec2::splat(o.margin);
        let size = DVec2::new(
            o.page_size.x - 2.0 * o.margin - o.legend_width - o.legend_gap,
            o.page_size.y - 2.0 * o.margin,
        );
        (min, size.max(DVec2::splat(1.0)))
    }

    /// Where the grid lands on the first page.
    pub fn placement(&self) -> GridPlacement {
        let layout = self.grid.layout();
        let (min, max) = layout.bounds(self.grid.rows(), self.grid.cols());
        let extent = (max - min).max(DVec2::splat(f64::EPSILON));
        let (area_min, area_size) = self.grid_area();

        let preferred = self.options.hex_size / layout.size;
        let fit = (area_size / (extent * preferred)).min_element().min(1.0);
        let scale = preferred * fit;

        let offset = area_min + (area_size - extent * scale) / 2.0 - min * scale;
        GridPlacement { scale, offset, fit }
    }

    /// Legend entry ranges, one per page.
    pub fn legend_pages(&self) -> Vec<Range<usize>> {
        let o = &self.options;
        let first_row = o.margin + LEGEND_HEADER_MM;
        let last_row = o.page_size.y - o.margin;
        let per_page = (((last_row - first_row) / LEGEND_ROW_MM).floor() as usize + 1).max(1);

        let n = self.legend.len();
        if n == 0 {
            return vec![0..0];
        }
        (0..n)
            .step_by(per_page)
            .map(|start| start..(start + per_page).min(n))
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.legend_pages().len()
    }

    /// Serialize the document.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut refs = RefAlloc::default();
        let catalog_id = refs.next();
        let tree_id = refs.next();
        let regular_id = refs.next();
        let bold_id = refs.next();
        let info_id = refs.next();

        let pages: Vec<Canvas> = self
            .legend_pages()
            .into_iter()
            .enumerate()
            .map(|(i, entries)| self.draw_page(i, entries))
            .collect();
        let ids: Vec<(Ref, Ref)> = pages.iter().map(|_| (refs.next(), refs.next())).collect();

        let mut pdf = Pdf::new();
        pdf.catalog(catalog_id).pages(tree_id);
        pdf.pages(tree_id)
            .kids(ids.iter().map(|&(page, _)| page))
            .count(ids.len() as i32);

        let media = Rect::new(
            0.0,
            0.0,
            mm_to_pt(self.options.page_size.x),
            mm_to_pt(self.options.page_size.y),
        );
        for (&(page_id, content_id), canvas) in ids.iter().zip(pages) {
            let mut page = pdf.page(page_id);
            page.media_box(media);
            page.parent(tree_id);
            page.contents(content_id);
            page.resources()
                .fonts()
                .pair(REGULAR, regular_id)
                .pair(BOLD, bold_id);
            page.finish();
            pdf.stream(content_id, &canvas.finish());
        }

        pdf.type1_font(regular_id).base_font(Name(b"Helvetica"));
        pdf.type1_font(bold_id).base_font(Name(b"Helvetica-Bold"));
        pdf.document_info(info_id)
            .title(TextStr(&self.options.title));

        let bytes = pdf.finish();
        info!(
            "Rendered PDF: {} page(s), {} bytes.",
            ids.len(),
            bytes.len()
        );
        bytes
    }

    fn draw_page(&self, index: usize, entries: Range<usize>) -> Canvas {
        let mut canvas = Canvas::new(self.options.page_size.y);
        if index == 0 {
            self.draw_grid(&mut canvas);
        }
        self.draw_legend(&mut canvas, index > 0, &self.legend.entries[entries]);
        canvas
    }

    fn draw_grid(&self, canvas: &mut Canvas) {
        let grid = self.grid;
        let layout = grid.layout();
        let placement = self.placement();
        let line_width = self.options.line_width;
        let hex_radius = layout.size * placement.scale;

        for cell in grid.cells() {
            let paint = resolve_paint(grid.item_of(cell), grid.default_color());
            let center = placement.map(cell.center);
            let corners = layout.corners(cell.center).map(|p| placement.map(p));
            canvas.polygon(&corners, paint.fill, paint.stroke, line_width);

            if let Some(marker) = paint.marker {
                canvas.circle(
                    center,
                    self.options.dot_radius * placement.fit,
                    Some(marker),
                    Some((Color::BLACK, line_width)),
                );
            }

            if let Some(roll) = &cell.roll {
                canvas.text(
                    REGULAR,
                    DICE_PT,
                    center + DVec2::new(hex_radius + 2.0, 1.0),
                    &roll.total.to_string(),
                );
            }
        }
    }

    fn draw_legend(&self, canvas: &mut Canvas, continued: bool, entries: &[LegendEntry]) {
        let o = &self.options;
        let x = o.page_size.x - o.margin - o.legend_width;
        let title = if continued {
            format!("{LEGEND_TITLE} (continued)")
        } else {
            LEGEND_TITLE.to_owned()
        };
        canvas.text(BOLD, TITLE_PT, DVec2::new(x, o.margin), &title);

        let mut baseline = o.margin + LEGEND_HEADER_MM;
        for entry in entries {
            let top_left = DVec2::new(x, baseline - 3.0);
            let half = LEGEND_SYMBOL_MM / 2.0;
            match entry.style {
                ItemStyle::Fill => canvas.square(top_left, LEGEND_SYMBOL_MM, entry.color),
                ItemStyle::Dot => {
                    let c = top_left + DVec2::splat(half);
                    canvas.circle(
                        c,
                        half,
                        Some(Color::WHITE),
                        Some((Color::BLACK, o.line_width)),
                    );
                    canvas.circle(c, half / 2.0, Some(entry.color), None);
                }
            }
            canvas.text(
                REGULAR,
                ENTRY_PT,
                DVec2::new(x + LEGEND_TEXT_INDENT_MM, baseline),
                &entry.label(),
            );
            baseline += LEGEND_ROW_MM;
        }
    }
}

#[inline]
fn mm_to_pt(mm: f64) -> f32 {
    (mm * 72.0 / 25.4) as f32
}

/// Text for the standard Type 1 fonts: printable ASCII, everything else becomes `?`.
fn ascii_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            if c == ' ' || c.is_ascii_graphic() {
                c as u8
            } else {
                b'?'
            }
        })
        .collect()
}

#[derive(Default)]
struct RefAlloc(i32);

impl RefAlloc {
    fn next(&mut self) -> Ref {
        self.0 += 1;
        Ref::new(self.0)
    }
}

/// Content stream with a top-left, millimeter coordinate system.
struct Canvas {
    content: Content,
    page_height: f64,
}

impl Canvas {
    fn new(page_height: f64) -> Self {
        Self {
            content: Content::new(),
            page_height,
        }
    }

    fn point(&self, p: DVec2) -> (f32, f32) {
        (mm_to_pt(p.x), mm_to_pt(self.page_height - p.y))
    }

    fn set_fill(&mut self, color: Color) {
        let [r, g, b] = color.to_unit_rgb();
        self.content.set_fill_rgb(r, g, b);
    }

    fn set_stroke(&mut self, color: Color, width: f64) {
        let [r, g, b] = color.to_unit_rgb();
        self.content.set_stroke_rgb(r, g, b);
        self.content.set_line_width(mm_to_pt(width));
    }

    fn polygon(&mut self, points: &[DVec2], fill: Color, stroke: Color, width: f64) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.set_fill(fill);
        self.set_stroke(stroke, width);
        let (x, y) = self.point(*first);
        self.content.move_to(x, y);
        for p in rest {
            let (x, y) = self.point(*p);
            self.content.line_to(x, y);
        }
        self.content.close_path();
        self.content.fill_nonzero_and_stroke();
    }

    fn square(&mut self, top_left: DVec2, side: f64, fill: Color) {
        self.set_fill(fill);
        let (x, y) = self.point(top_left + DVec2::new(0.0, side));
        let side = mm_to_pt(side);
        self.content.rect(x, y, side, side);
        self.content.fill_nonzero();
    }

    fn circle(&mut self, c: DVec2, r: f64, fill: Option<Color>, stroke: Option<(Color, f64)>) {
        if let Some(fill) = fill {
            self.set_fill(fill);
        }
        if let Some((color, width)) = stroke {
            self.set_stroke(color, width);
        }

        let k = r * KAPPA;
        let (x, y) = self.point(c + DVec2::new(r, 0.0));
        self.content.move_to(x, y);
        // Four quarter arcs: right -> bottom -> left -> top -> right (page space).
        let arcs = [
            (DVec2::new(r, k), DVec2::new(k, r), DVec2::new(0.0, r)),
            (DVec2::new(-k, r), DVec2::new(-r, k), DVec2::new(-r, 0.0)),
            (DVec2::new(-r, -k), DVec2::new(-k, -r), DVec2::new(0.0, -r)),
            (DVec2::new(k, -r), DVec2::new(r, -k), DVec2::new(r, 0.0)),
        ];
        for (a, b, end) in arcs {
            let (x1, y1) = self.point(c + a);
            let (x2, y2) = self.point(c + b);
            let (x3, y3) = self.point(c + end);
            self.content.cubic_to(x1, y1, x2, y2, x3, y3);
        }
        self.content.close_path();

        match (fill.is_some(), stroke.is_some()) {
            (true, true) => self.content.fill_nonzero_and_stroke(),
            (true, false) => self.content.fill_nonzero(),
            (false, true) => self.content.stroke(),
            (false, false) => self.content.end_path(),
        };
    }

    fn text(&mut self, font: Name<'_>, size: f32, baseline: DVec2, text: &str) {
        let (x, y) = self.point(baseline);
        let bytes = ascii_text(text);
        self.set_fill(Color::BLACK);
        self.content.begin_text();
        self.content.set_font(font, size);
        self.content.next_line(x, y);
        self.content.show(Str(&bytes));
        self.content.end_text();
    }

    fn finish(self) -> Vec<u8> {
        self.content.finish()
    }
}
