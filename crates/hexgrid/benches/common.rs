#![allow(dead_code)]

use std::time::Duration;

use criterion::{Criterion, Throughput};
use hexgrid::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Criterion settings shared by the grid benches.
pub fn grid_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(20)
        .warm_up_time(Duration::from_millis(500))
        .measurement_time(Duration::from_secs(2))
}

/// Throughput in hexagons for a square grid of `side × side` cells.
pub fn cells(side: usize) -> Throughput {
    Throughput::Elements((side * side).max(1) as u64)
}

/// Four item types covering 90% of the cells, two of them with markers.
pub fn mixed_config() -> GridConfig {
    let items = vec![
        ItemType::new("forest", 35.0, ItemStyle::Fill, Color::rgb(0x2E, 0x7D, 0x32)),
        ItemType::new("water", 25.0, ItemStyle::Fill, Color::rgb(0x15, 0x65, 0xC0)),
        ItemType::new("village", 20.0, ItemStyle::Dot, Color::rgb(0xC6, 0x28, 0x28))
            .with_dice(DiceExpr::new(2, 6, 0)),
        ItemType::new("ruin", 10.0, ItemStyle::Dot, Color::rgb(0x6D, 0x4C, 0x41)),
    ];
    GridConfig::new(Color::rgb(0xF5, 0xF0, 0xE1), items).expect("valid bench config")
}

/// A `side × side` grid populated from [`mixed_config`].
pub fn populated_grid(side: usize, seed: u64) -> Grid {
    let mut grid = Grid::try_new(side, side, &mixed_config()).expect("grid");
    populate(&mut grid, &mut StdRng::seed_from_u64(seed));
    grid
}
