use arrayvec::ArrayVec;

use crate::catalog::ItemCatalog;
use crate::grid::Grid;
use crate::types::{Coord, ItemId, TurnState, MAX_SELECTION};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    /// Row-major item ids
    pub cells: Vec<ItemId>,
    pub score: u32,
    pub selection: ArrayVec<Coord, MAX_SELECTION>,
    pub turn: TurnState,
}

impl GameSnapshot {
    pub fn capture(
        grid: &Grid,
        score: u32,
        selection: &[Coord],
        turn: TurnState,
    ) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            cells: grid.cells().to_vec(),
            score,
            selection: selection.iter().copied().take(MAX_SELECTION).collect(),
            turn,
        }
    }

    pub fn item_at(&self, pos: Coord) -> Option<ItemId> {
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height {
            return None;
        }
        self.cells
            .get(pos.y as usize * self.width + pos.x as usize)
            .copied()
    }

    /// Rows of catalog symbols, top row first
    pub fn rows(&self, catalog: &ItemCatalog) -> Vec<String> {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().map(|&item| catalog.symbol(item)).collect())
            .collect()
    }

    /// Coordinates whose item differs from `other`; empty when the shapes differ.
    pub fn changed_cells(&self, other: &GameSnapshot) -> Vec<Coord> {
        if self.width != other.width || self.height != other.height {
            return Vec::new();
        }
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(idx, _)| Coord::new((idx % self.width) as i16, (idx / self.width) as i16))
            .collect()
    }

    pub fn accepting_picks(&self) -> bool {
        self.turn != TurnState::Resolving
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_and_diff() {
        let catalog = ItemCatalog::standard();
        let mut grid = Grid::from_rows(&["ab", "cd"], &catalog).unwrap();
        let before = GameSnapshot::capture(&grid, 0, &[], TurnState::WaitingFirstPick);

        grid.swap_items(Coord::new(0, 0), Coord::new(1, 0)).unwrap();
        let after = GameSnapshot::capture(
            &grid,
            0,
            &[Coord::new(1, 1)],
            TurnState::WaitingSecondPick,
        );

        assert_eq!(after.rows(&catalog), vec!["ba".to_string(), "cd".to_string()]);
        assert_eq!(
            before.changed_cells(&after),
            vec![Coord::new(0, 0), Coord::new(1, 0)]
        );
        assert_eq!(after.item_at(Coord::new(0, 0)), catalog.by_symbol('b'));
        assert_eq!(after.item_at(Coord::new(2, 0)), None);
        assert_eq!(after.selection.as_slice(), &[Coord::new(1, 1)]);
        assert!(after.accepting_picks());
    }
}
