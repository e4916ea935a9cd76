//! Match detector - connected same-kind runs
//!
//! A run is the maximal set of tiles reachable from a start tile by stepping
//! up, down, left or right (never diagonally) onto tiles holding the same
//! item kind. Runs of [`MIN_RUN_LEN`] or more tiles are poppable.

use crate::error::GameError;
use crate::grid::Grid;
use crate::types::{Coord, ItemId, MIN_RUN_LEN};

/// A connected component of same-kind tiles.
///
/// `tiles` starts with the tile the search began from, followed by the rest
/// of the component in breadth-first order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub item: ItemId,
    pub tiles: Vec<Coord>,
}

impl Run {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false: a run contains at least its start tile
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn is_poppable(&self) -> bool {
        self.tiles.len() >= MIN_RUN_LEN
    }

    pub fn contains(&self, pos: Coord) -> bool {
        self.tiles.contains(&pos)
    }

    pub fn start(&self) -> Option<Coord> {
        self.tiles.first().copied()
    }
}

/// Flood fill over the 4-neighbourhood from `start`.
///
/// Each tile is visited at most once. Fails only when `start` is out of bounds.
pub fn connected_run(grid: &Grid, start: Coord) -> Result<Run, GameError> {
    let item = grid.item_at(start)?;
    let mut visited = vec![false; grid.len()];
    Ok(flood(grid, start, item, &mut visited))
}

fn flood(grid: &Grid, start: Coord, item: ItemId, visited: &mut [bool]) -> Run {
    let width = grid.width();
    let mark = |pos: Coord, visited: &mut [bool]| -> bool {
        let idx = pos.y as usize * width + pos.x as usize;
        !std::mem::replace(&mut visited[idx], true)
    };

    mark(start, visited);
    let mut tiles = vec![start];
    let mut head = 0;
    while head < tiles.len() {
        let pos = tiles[head];
        head += 1;
        for next in grid.neighbours(pos) {
            if grid.item_at(next).ok() == Some(item) && mark(next, visited) {
                tiles.push(next);
            }
        }
    }

    Run { item, tiles }
}

/// First poppable run in row-major scan order (y outer, x inner).
///
/// Each component is flooded once; tiles already covered by a smaller run
/// are skipped, which does not change which run is found first.
pub fn find_first_poppable(grid: &Grid) -> Option<Run> {
    let mut visited = vec![false; grid.len()];
    for tile in grid.tiles() {
        let idx = tile.pos.y as usize * grid.width() + tile.pos.x as usize;
        if visited[idx] {
            continue;
        }
        let run = flood(grid, tile.pos, tile.item, &mut visited);
        if run.is_poppable() {
            return Some(run);
        }
    }
    None
}

pub fn has_poppable_run(grid: &Grid) -> bool {
    find_first_poppable(grid).is_some()
}
