//! Percentage-driven assignment of item types to grid cells.
//!
//! Each item type is entitled to `floor(percentage / 100 × total_cells)` cells. All cells
//! are shuffled once, then each type takes the next run of its quota from the shuffled
//! order. Truncation can leave cells without an item; they render in the default color.
use rand::seq::SliceRandom;
use rand::RngCore;
use tracing::{debug, info, warn};

use crate::grid::{Grid, ItemTypeId};

/// Per-type cell quotas for one population run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocationPlan {
    /// `(item type, quota)` in configuration order.
    pub quotas: Vec<(ItemTypeId, usize)>,
    /// Number of cells the quotas were computed for.
    pub total_cells: usize,
}

impl AllocationPlan {
    /// Compute quotas for every item type of `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        let total_cells = grid.total_cells();
        let quotas = grid
            .item_type_ids()
            .zip(grid.item_types())
            .map(|(id, item)| (id, quota(item.percentage, total_cells)))
            .collect();
        Self {
            quotas,
            total_cells,
        }
    }

    /// Quota of a single item type.
    pub fn quota_of(&self, id: ItemTypeId) -> usize {
        self.quotas
            .iter()
            .find(|(qid, _)| *qid == id)
            .map_or(0, |&(_, q)| q)
    }

    /// Sum of all quotas, capped at the cell count.
    pub fn assigned(&self) -> usize {
        self.quotas
            .iter()
            .map(|&(_, q)| q)
            .sum::<usize>()
            .min(self.total_cells)
    }

    /// Cells left without an item type.
    pub fn unassigned(&self) -> usize {
        self.total_cells - self.assigned()
    }
}

/// `floor(percentage / 100 × total_cells)`.
#[inline]
pub fn quota(percentage: f64, total_cells: usize) -> usize {
    (total_cells as f64 * percentage / 100.0).floor().max(0.0) as usize
}

/// Assign item types to the cells of `grid` and roll dice for the assigned cells.
///
/// Previous assignments are cleared first. Returns the plan that was applied.
pub fn populate<R: RngCore + ?Sized>(grid: &mut Grid, rng: &mut R) -> AllocationPlan {
    grid.clear();
    let plan = AllocationPlan::for_grid(grid);

    let mut order: Vec<usize> = (0..grid.total_cells()).collect();
    order.shuffle(rng);

    let mut next = order.iter().copied();
    for &(id, count) in &plan.quotas {
        debug!("Item type {:?}: quota {} of {} cells.", id, count, plan.total_cells);
        for index in next.by_ref().take(count) {
            grid.cells_mut()[index].item = Some(id);
        }
    }

    roll_dice(grid, rng);

    let unassigned = plan.unassigned();
    if unassigned > 0 {
        warn!(
            "{} of {} cells left without an item type after truncating quotas.",
            unassigned, plan.total_cells
        );
    }
    info!(
        "Populated {}x{} grid: {} cells assigned across {} item types.",
        grid.rows(),
        grid.cols(),
        plan.assigned(),
        plan.quotas.len()
    );

    plan
}

fn roll_dice<R: RngCore + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let dice: Vec<_> = grid.item_types().iter().map(|t| t.dice).collect();
    for cell in grid.cells_mut() {
        cell.roll = cell
            .item
            .and_then(|id| dice.get(id.0).copied().flatten())
            .map(|expr| expr.roll(rng));
    }
}
