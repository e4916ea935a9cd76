//! Grid model and run detection tests

use std::collections::{BTreeSet, VecDeque};

use tile_match::core::{
    connected_run, find_first_poppable, has_poppable_run, GameError, Grid, ItemCatalog, SimpleRng,
};
use tile_match::types::{Coord, ItemDef, ItemId};

/// Reference reachability: plain BFS that ignores the crate's helpers
fn reachable(grid: &Grid, start: Coord) -> BTreeSet<(i16, i16)> {
    let item = grid.item_at(start).unwrap();
    let mut seen = BTreeSet::new();
    let mut queue = VecDeque::from([start]);
    seen.insert((start.x, start.y));
    while let Some(pos) = queue.pop_front() {
        for (dx, dy) in [(0, -1), (0, 1), (-1, 0), (1, 0)] {
            let next = Coord::new(pos.x + dx, pos.y + dy);
            if grid.item_at(next) == Ok(item) && seen.insert((next.x, next.y)) {
                queue.push_back(next);
            }
        }
    }
    seen
}

fn as_set(tiles: &[Coord]) -> BTreeSet<(i16, i16)> {
    tiles.iter().map(|c| (c.x, c.y)).collect()
}

#[test]
fn test_every_coordinate_holds_a_catalog_item() {
    let catalog = ItemCatalog::standard();
    let mut rng = SimpleRng::new(42);
    let grid = Grid::random(8, 8, &catalog, &mut rng).unwrap();

    assert_eq!(grid.len(), 64);
    for y in 0..8 {
        for x in 0..8 {
            let tile = grid.tile_at(Coord::new(x, y)).unwrap();
            assert_eq!(tile.pos, Coord::new(x, y));
            assert!(catalog.contains(tile.item));
        }
    }
    assert_eq!(grid.tiles().count(), 64);
}

#[test]
fn test_out_of_range_lookups_fail() {
    let catalog = ItemCatalog::standard();
    let grid = Grid::from_rows(&["abc", "cab"], &catalog).unwrap();

    for pos in [
        Coord::new(-1, 0),
        Coord::new(0, -1),
        Coord::new(3, 0),
        Coord::new(0, 2),
    ] {
        assert!(matches!(
            grid.tile_at(pos),
            Err(GameError::OutOfBounds { width: 3, height: 2, .. })
        ));
    }
}

#[test]
fn test_neighbours_stay_inside_the_grid() {
    let catalog = ItemCatalog::standard();
    let grid = Grid::from_rows(&["abc", "cab", "bca"], &catalog).unwrap();

    assert_eq!(grid.neighbours(Coord::new(0, 0)).len(), 2);
    assert_eq!(grid.neighbours(Coord::new(1, 0)).len(), 3);
    assert_eq!(grid.neighbours(Coord::new(1, 1)).len(), 4);
    for tile in grid.tiles() {
        for n in grid.neighbours(tile.pos) {
            assert!(grid.contains(n));
            assert!(tile.pos.is_adjacent(n));
        }
    }
}

#[test]
fn test_ragged_layout_is_rejected() {
    let catalog = ItemCatalog::standard();
    assert_eq!(
        Grid::from_rows(&["abc", "ab"], &catalog),
        Err(GameError::RaggedLayout {
            row: 1,
            expected: 3,
            found: 2
        })
    );
    assert_eq!(
        Grid::from_rows(&["az"], &catalog),
        Err(GameError::UnknownSymbol { symbol: 'z' })
    );
}

#[test]
fn test_connected_run_matches_reference_reachability() {
    let catalog = ItemCatalog::standard();
    let mut rng = SimpleRng::new(7);
    let grid = Grid::random(8, 8, &catalog, &mut rng).unwrap();

    for tile in grid.tiles() {
        let run = connected_run(&grid, tile.pos).unwrap();
        assert_eq!(run.item, tile.item);
        assert_eq!(run.start(), Some(tile.pos));
        assert_eq!(as_set(&run.tiles), reachable(&grid, tile.pos));
        assert_eq!(as_set(&run.tiles).len(), run.len(), "no duplicates");
    }
}

#[test]
fn test_run_is_the_same_from_every_member() {
    let catalog = ItemCatalog::standard();
    let mut rng = SimpleRng::new(11);
    let grid = Grid::random(6, 6, &catalog, &mut rng).unwrap();

    for tile in grid.tiles() {
        let run = as_set(&connected_run(&grid, tile.pos).unwrap().tiles);
        for &(x, y) in &run {
            let other = connected_run(&grid, Coord::new(x, y)).unwrap();
            assert_eq!(as_set(&other.tiles), run);
        }
    }
}

#[test]
fn test_u_shaped_run_is_found_whole() {
    let catalog = ItemCatalog::standard();
    let grid = Grid::from_rows(&["aba", "aba", "aaa"], &catalog).unwrap();

    let run = connected_run(&grid, Coord::new(2, 0)).unwrap();
    assert_eq!(run.len(), 7);
    assert!(run.is_poppable());
    assert!(!run.contains(Coord::new(1, 0)));
}

#[test]
fn test_first_poppable_is_row_major() {
    let catalog = ItemCatalog::standard();
    // The c-run starts lower than the b-run but further left
    let grid = Grid::from_rows(&["ddbd", "ecbe", "ccbd"], &catalog).unwrap();

    let run = find_first_poppable(&grid).unwrap();
    assert_eq!(run.item, catalog.by_symbol('b').unwrap());
    assert_eq!(run.start(), Some(Coord::new(2, 0)));
    assert!(has_poppable_run(&grid));
}

#[test]
fn test_pairs_are_not_poppable() {
    let catalog = ItemCatalog::standard();
    let grid = Grid::from_rows(&["aab", "cdd", "eea"], &catalog).unwrap();
    assert_eq!(find_first_poppable(&grid), None);
    assert!(!has_poppable_run(&grid));
}

#[test]
fn test_catalog_validation() {
    assert_eq!(ItemCatalog::new(vec![]), Err(GameError::EmptyCatalog));
    assert_eq!(
        ItemCatalog::new(vec![ItemDef::new("dud", 'x', 0)]),
        Err(GameError::ZeroItemValue { name: "dud".into() })
    );
    assert_eq!(
        ItemCatalog::new(vec![ItemDef::new("one", 'x', 1), ItemDef::new("two", 'x', 2)]),
        Err(GameError::DuplicateSymbol { symbol: 'x' })
    );

    let catalog = ItemCatalog::standard();
    assert_eq!(catalog.len(), 5);
    assert_eq!(catalog.value(ItemId(0)), 2);
    assert_eq!(catalog.value(ItemId(99)), 0);
}

#[test]
fn test_swap_twice_restores_grid() {
    let catalog = ItemCatalog::standard();
    let mut grid = Grid::from_rows(&["abc", "dea"], &catalog).unwrap();
    let before = grid.clone();

    grid.swap_items(Coord::new(0, 0), Coord::new(0, 1)).unwrap();
    assert_eq!(grid.to_rows(&catalog), vec!["dbc", "aea"]);
    grid.swap_items(Coord::new(0, 0), Coord::new(0, 1)).unwrap();
    assert_eq!(grid, before);
}
