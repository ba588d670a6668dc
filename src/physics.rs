//! Gravity and connection upkeep for committed tiles.

use log::{error, trace};

use crate::grid::Grid;
use crate::tile::Connection;

/// Reset every connection whose partner is missing or does not point back.
/// Returns true if anything was reset.
pub fn revalidate_connections(grid: &mut Grid) -> bool {
    let dangling: Vec<usize> = grid
        .iter_filled()
        .filter(|t| t.connection != Connection::None && grid.reciprocal_partner(t.pos).is_none())
        .filter_map(|t| grid.index(t.pos.x, t.pos.y))
        .collect();
    for &idx in &dangling {
        if let Some(tile) = grid.slot_mut(idx) {
            tile.connection = Connection::None;
        }
    }
    !dangling.is_empty()
}

/// One gravity pass: every loose tile with an empty cell below drops one row.
///
/// Rows are visited bottom to top (the bottom row never falls) and right to left.
/// Greyed tiles stay put. A horizontally connected pair drops only when both cells
/// below are empty, and then both halves move together. Returns true if any tile moved.
pub fn apply_gravity(grid: &mut Grid) -> bool {
    revalidate_connections(grid);
    let width = grid.width();
    let mut moved = false;

    for y in (0..grid.height().saturating_sub(1)).rev() {
        for x in (0..width).rev() {
            let idx = y * width + x;
            let Some(tile) = grid.slot(idx).copied() else {
                continue;
            };
            let below = idx + width;
            if tile.greyed || grid.slot(below).is_some() {
                continue;
            }
            if tile.connection.is_horizontal() {
                let Some(partner) = grid.reciprocal_partner(tile.pos) else {
                    continue;
                };
                let Some(partner_idx) = grid.index(partner.x, partner.y) else {
                    continue;
                };
                if grid.slot(partner_idx + width).is_some() {
                    continue;
                }
                grid.relocate(partner_idx, partner_idx + width);
            }
            grid.relocate(idx, below);
            moved = true;
        }
    }

    revalidate_connections(grid);
    let check = grid.check_connections();
    if let Err(e) = &check {
        error!("connection invariant broken after gravity: {e}");
    }
    debug_assert!(check.is_ok());
    trace!("gravity pass moved: {moved}");
    moved
}

/// Run gravity passes until nothing moves. Returns the number of passes that moved.
pub fn settle(grid: &mut Grid) -> usize {
    let mut passes = 0;
    while apply_gravity(grid) {
        passes += 1;
    }
    passes
}

/// Remove every marked tile and drop connections to the removed cells.
/// Returns how many tiles were removed.
pub fn clear_marked(grid: &mut Grid) -> usize {
    let marked: Vec<usize> = grid
        .iter_filled()
        .filter(|t| t.marked)
        .filter_map(|t| grid.index(t.pos.x, t.pos.y))
        .collect();
    for &idx in &marked {
        grid.vacate(idx);
    }
    revalidate_connections(grid);
    marked.len()
}
