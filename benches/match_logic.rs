use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tile_match::core::{connected_run, find_first_poppable, Grid, ItemCatalog, SimpleRng};
use tile_match::engine::{Engine, NullPresenter};
use tile_match::types::Coord;

fn random_grid(seed: u32) -> (Grid, ItemCatalog) {
    let catalog = ItemCatalog::standard();
    let mut rng = SimpleRng::new(seed);
    let grid = Grid::random(8, 8, &catalog, &mut rng).unwrap();
    (grid, catalog)
}

fn bench_connected_run(c: &mut Criterion) {
    let (grid, _) = random_grid(12345);

    c.bench_function("connected_run_center", |b| {
        b.iter(|| connected_run(black_box(&grid), Coord::new(4, 4)))
    });
}

fn bench_find_first_poppable(c: &mut Criterion) {
    // A board with no run forces a full scan
    let catalog = ItemCatalog::standard();
    let rows: Vec<String> = (0..8)
        .map(|y| (0..8).map(|x| ['a', 'b', 'c', 'd', 'e'][(x + 2 * y) % 5]).collect())
        .collect();
    let grid = Grid::from_rows(&rows, &catalog).unwrap();

    c.bench_function("find_first_poppable_full_scan", |b| {
        b.iter(|| find_first_poppable(black_box(&grid)))
    });
}

fn bench_cascade(c: &mut Criterion) {
    let (grid, catalog) = random_grid(2024);

    c.bench_function("resolve_cascade_8x8", |b| {
        b.iter(|| {
            let mut engine =
                Engine::new(grid.clone(), catalog.clone(), SimpleRng::new(7), NullPresenter)
                    .unwrap();
            tokio_test::block_on(engine.resolve_cascade()).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_connected_run,
    bench_find_first_poppable,
    bench_cascade
);
criterion_main!(benches);
