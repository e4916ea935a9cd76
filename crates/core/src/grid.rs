//! Grid module - owns tile positions and the items they hold
//!
//! The grid is a fixed width x height rectangle set once at startup. Every
//! coordinate in `[0, width) x [0, height)` has exactly one tile; tiles are
//! never created, destroyed or moved afterwards, only their items change.
//! Uses a flat row-major array (`y * width + x`).

use std::fmt;

use arrayvec::ArrayVec;

use crate::catalog::ItemCatalog;
use crate::error::GameError;
use crate::rng::RandomSource;
use crate::types::{Coord, ItemId, Tile};

/// 4-neighbourhood offsets: up, down, left, right
const NEIGHBOUR_OFFSETS: [(i16, i16); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of items, row-major order (y * width + x)
    cells: Vec<ItemId>,
}

impl Grid {
    /// Build from a row-major item list.
    pub fn from_items(width: usize, height: usize, cells: Vec<ItemId>) -> Result<Self, GameError> {
        Self::check_dimensions(width, height)?;
        if cells.len() != width * height {
            return Err(GameError::CellCount {
                expected: width * height,
                found: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Fill every tile with an independent random item.
    pub fn random<R: RandomSource + ?Sized>(
        width: usize,
        height: usize,
        catalog: &ItemCatalog,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        Self::check_dimensions(width, height)?;
        let mut cells = Vec::with_capacity(width * height);
        for _ in 0..width * height {
            cells.push(catalog.random_item(rng));
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Parse rows of catalog symbols, top row first.
    ///
    /// All rows must have the same length.
    pub fn from_rows<S: AsRef<str>>(rows: &[S], catalog: &ItemCatalog) -> Result<Self, GameError> {
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if width == 0 {
            return Err(GameError::EmptyLayout);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(GameError::RaggedLayout {
                    row: y,
                    expected: width,
                    found,
                });
            }
            for symbol in row.chars() {
                let item = catalog
                    .by_symbol(symbol)
                    .ok_or(GameError::UnknownSymbol { symbol })?;
                cells.push(item);
            }
        }

        Self::from_items(width, rows.len(), cells)
    }

    fn check_dimensions(width: usize, height: usize) -> Result<(), GameError> {
        // Coordinates are i16
        let limit = i16::MAX as usize;
        if width == 0 || height == 0 || width > limit || height > limit {
            return Err(GameError::InvalidDimensions { width, height });
        }
        Ok(())
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, pos: Coord) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        Some(pos.y as usize * self.width + pos.x as usize)
    }

    fn checked_index(&self, pos: Coord) -> Result<usize, GameError> {
        self.index(pos).ok_or(GameError::OutOfBounds {
            x: pos.x,
            y: pos.y,
            width: self.width,
            height: self.height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: a grid has at least one tile
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Coord) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn tile_at(&self, pos: Coord) -> Result<Tile, GameError> {
        let idx = self.checked_index(pos)?;
        Ok(Tile {
            pos,
            item: self.cells[idx],
        })
    }

    pub fn item_at(&self, pos: Coord) -> Result<ItemId, GameError> {
        Ok(self.tile_at(pos)?.item)
    }

    /// Replace the item held by one tile.
    pub fn set_item(&mut self, pos: Coord, item: ItemId) -> Result<(), GameError> {
        let idx = self.checked_index(pos)?;
        self.cells[idx] = item;
        Ok(())
    }

    /// Exchange the items of two tiles. Adjacency is not checked here.
    pub fn swap_items(&mut self, a: Coord, b: Coord) -> Result<(), GameError> {
        let ia = self.checked_index(a)?;
        let ib = self.checked_index(b)?;
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// In-bounds 4-neighbours of `pos` (up, down, left, right).
    pub fn neighbours(&self, pos: Coord) -> ArrayVec<Coord, 4> {
        NEIGHBOUR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| pos.offset(dx, dy))
            .filter(|&n| self.contains(n))
            .collect()
    }

    /// Coordinate of a flat index
    pub(crate) fn coord_of(&self, idx: usize) -> Coord {
        Coord::new((idx % self.width) as i16, (idx / self.width) as i16)
    }

    /// Every tile in row-major order (y outer, x inner)
    pub fn tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.cells.iter().enumerate().map(|(idx, &item)| Tile {
            pos: self.coord_of(idx),
            item,
        })
    }

    /// Row-major item ids
    pub fn cells(&self) -> &[ItemId] {
        &self.cells
    }

    /// Render as rows of catalog symbols, top row first.
    pub fn to_rows(&self, catalog: &ItemCatalog) -> Vec<String> {
        self.cells
            .chunks(self.width)
            .map(|row| row.iter().map(|&item| catalog.symbol(item)).collect())
            .collect()
    }

    /// Borrowing view that formats the grid with catalog symbols.
    pub fn display<'a>(&'a self, catalog: &'a ItemCatalog) -> GridDisplay<'a> {
        GridDisplay {
            grid: self,
            catalog,
        }
    }
}

pub struct GridDisplay<'a> {
    grid: &'a Grid,
    catalog: &'a ItemCatalog,
}

impl fmt::Display for GridDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.grid.to_rows(self.catalog).iter().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;

    fn sample() -> Grid {
        Grid::from_rows(&["abc", "dea"], &ItemCatalog::standard()).unwrap()
    }

    #[test]
    fn test_grid_index_calculation() {
        let grid = sample();
        assert_eq!(grid.index(Coord::new(0, 0)), Some(0));
        assert_eq!(grid.index(Coord::new(2, 0)), Some(2));
        assert_eq!(grid.index(Coord::new(0, 1)), Some(3));
        assert_eq!(grid.index(Coord::new(2, 1)), Some(5));
        assert_eq!(grid.index(Coord::new(-1, 0)), None);
        assert_eq!(grid.index(Coord::new(3, 0)), None);
        assert_eq!(grid.index(Coord::new(0, 2)), None);
    }

    #[test]
    fn test_coord_of_inverts_index() {
        let grid = sample();
        for idx in 0..grid.len() {
            assert_eq!(grid.index(grid.coord_of(idx)), Some(idx));
        }
    }

    #[test]
    fn test_neighbours_at_corner_and_centre() {
        let grid = Grid::from_rows(&["aaa", "aaa", "aaa"], &ItemCatalog::standard()).unwrap();
        let corner = grid.neighbours(Coord::new(0, 0));
        assert_eq!(corner.as_slice(), &[Coord::new(0, 1), Coord::new(1, 0)]);

        let centre = grid.neighbours(Coord::new(1, 1));
        assert_eq!(centre.len(), 4);
        assert!(!centre.contains(&Coord::new(0, 0)), "no diagonals");
    }

    #[test]
    fn test_random_grid_is_deterministic() {
        let catalog = ItemCatalog::standard();
        let a = Grid::random(8, 8, &catalog, &mut SimpleRng::new(5)).unwrap();
        let b = Grid::random(8, 8, &catalog, &mut SimpleRng::new(5)).unwrap();
        assert_eq!(a, b);
        assert!(a.cells().iter().all(|&item| catalog.contains(item)));
    }

    #[test]
    fn test_from_items_reports_cell_count() {
        let items = vec![ItemId(0); 6];
        assert_eq!(
            Grid::from_items(2, 2, items),
            Err(GameError::CellCount {
                expected: 4,
                found: 6
            })
        );
        assert_eq!(
            Grid::from_items(3, 2, vec![ItemId(1); 5]),
            Err(GameError::CellCount {
                expected: 6,
                found: 5
            })
        );
        assert!(Grid::from_items(2, 2, vec![ItemId(0); 4]).is_ok());
    }

    #[test]
    fn test_display_uses_symbols() {
        let catalog = ItemCatalog::standard();
        let grid = sample();
        assert_eq!(grid.display(&catalog).to_string(), "abc\ndea");
    }
}
