//! Resolution engine
//!
//! Owns the grid, the catalog, the random source and the score. A cycle is
//! `Idle -> Swapping -> {Cascading | Reverting} -> Idle`:
//!
//! 1. [`Engine::attempt_swap`] validates adjacency and swaps two items.
//! 2. If the board now has no poppable run the same swap is applied again,
//!    putting the board back exactly as it was.
//! 3. Otherwise [`Engine::resolve_cascade`] pops the first run found in
//!    row-major order, refills it, and rescans from the top-left until no
//!    poppable run remains.
//!
//! Every animated step is awaited before the next mutation, so a run's
//! shrink-out finishes before any of its tiles is refilled.

use tracing::{debug, info, warn};

use crate::core::{
    connected_run, find_first_poppable, has_poppable_run, run_score, GameError, Grid,
    ItemCatalog, RandomSource, Run, ScoreCounter, SimpleRng,
};
use crate::presenter::Presenter;
use crate::types::{Coord, ItemId, ResolutionPhase, Tile, DEFAULT_MAX_CASCADE_STEPS};

/// One popped run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopRecord {
    pub item: ItemId,
    pub tiles: Vec<Coord>,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CascadeReport {
    pub pops: Vec<PopRecord>,
    pub score_before: u32,
    pub score_after: u32,
    /// The cascade stopped at the step limit with a poppable run left on the board
    pub truncated: bool,
}

impl CascadeReport {
    pub fn total_points(&self) -> u32 {
        self.pops
            .iter()
            .fold(0u32, |acc, pop| acc.saturating_add(pop.points))
    }

    /// Every tile that received a new item, in refill order (may repeat)
    pub fn refilled(&self) -> impl Iterator<Item = Coord> + '_ {
        self.pops.iter().flat_map(|pop| pop.tiles.iter().copied())
    }
}

/// Result of one swap-resolve cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Not adjacent; nothing changed
    Rejected,
    /// Swapped, found no run, swapped back
    Reverted,
    Cascaded(CascadeReport),
}

impl SwapOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapOutcome::Rejected => "rejected",
            SwapOutcome::Reverted => "reverted",
            SwapOutcome::Cascaded(_) => "cascaded",
        }
    }

    pub fn points(&self) -> u32 {
        match self {
            SwapOutcome::Cascaded(report) => report.total_points(),
            _ => 0,
        }
    }
}

pub struct Engine<P, R = SimpleRng> {
    grid: Grid,
    catalog: ItemCatalog,
    rng: R,
    score: ScoreCounter,
    presenter: P,
    phase: ResolutionPhase,
    max_cascade_steps: u32,
}

impl<P: Presenter, R: RandomSource> Engine<P, R> {
    /// Fails with `UnknownItem` if the grid holds an id the catalog lacks.
    pub fn new(grid: Grid, catalog: ItemCatalog, rng: R, presenter: P) -> Result<Self, GameError> {
        if let Some(bad) = grid.cells().iter().find(|&&item| !catalog.contains(item)) {
            return Err(GameError::UnknownItem { id: bad.0 });
        }
        Ok(Self {
            grid,
            catalog,
            rng,
            score: ScoreCounter::new(),
            presenter,
            phase: ResolutionPhase::Idle,
            max_cascade_steps: DEFAULT_MAX_CASCADE_STEPS,
        })
    }

    /// Limit the number of pops a single cascade may perform (minimum 1).
    pub fn with_max_cascade_steps(mut self, steps: u32) -> Self {
        self.max_cascade_steps = steps.max(1);
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn score(&self) -> u32 {
        self.score.total()
    }

    pub fn phase(&self) -> ResolutionPhase {
        self.phase
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn max_cascade_steps(&self) -> u32 {
        self.max_cascade_steps
    }

    pub fn tile_at(&self, pos: Coord) -> Result<Tile, GameError> {
        self.grid.tile_at(pos)
    }

    pub fn connected_run(&self, pos: Coord) -> Result<Run, GameError> {
        connected_run(&self.grid, pos)
    }

    pub fn has_poppable_run(&self) -> bool {
        has_poppable_run(&self.grid)
    }

    /// Swap the items of two axis-adjacent tiles.
    ///
    /// Non-adjacent pairs (including a tile with itself) play the reject
    /// animation and fail with `InvalidSwap` without touching the grid.
    pub async fn attempt_swap(&mut self, a: Coord, b: Coord) -> Result<(), GameError> {
        let tile_a = self.grid.tile_at(a)?;
        let tile_b = self.grid.tile_at(b)?;

        if !a.is_adjacent(b) {
            debug!(%a, %b, "swap rejected");
            self.presenter.animate_reject(tile_a, tile_b).await?;
            return Err(GameError::InvalidSwap { a, b });
        }

        self.presenter.animate_swap(tile_a, tile_b).await?;
        self.grid.swap_items(a, b)?;
        debug!(%a, %b, "swapped");
        Ok(())
    }

    /// Pop, refill and rescan until no poppable run remains.
    pub async fn resolve_cascade(&mut self) -> Result<CascadeReport, GameError> {
        let mut report = CascadeReport {
            score_before: self.score.total(),
            ..CascadeReport::default()
        };

        while let Some(run) = find_first_poppable(&self.grid) {
            if report.pops.len() as u32 >= self.max_cascade_steps {
                warn!(
                    steps = report.pops.len(),
                    "cascade stopped at step limit with runs remaining"
                );
                report.truncated = true;
                break;
            }
            let pop = self.pop_run(run).await?;
            report.pops.push(pop);
        }

        report.score_after = self.score.total();
        Ok(report)
    }

    async fn pop_run(&mut self, run: Run) -> Result<PopRecord, GameError> {
        let popped: Vec<Tile> = run
            .tiles
            .iter()
            .map(|&pos| Tile {
                pos,
                item: run.item,
            })
            .collect();

        self.presenter.play_collect_sound();
        self.presenter.animate_pop(&popped).await?;

        let points = run_score(run.len(), self.catalog.value(run.item));
        if self.score.add(points) {
            self.presenter.report_score(self.score.total());
        }

        let mut refilled = Vec::with_capacity(run.len());
        for &pos in &run.tiles {
            let item = self.catalog.random_item(&mut self.rng);
            self.grid.set_item(pos, item)?;
            refilled.push(Tile { pos, item });
        }
        debug!(
            item = run.item.0,
            tiles = run.len(),
            points,
            total = self.score.total(),
            "popped run"
        );

        self.presenter.animate_refill(&refilled).await?;

        Ok(PopRecord {
            item: run.item,
            tiles: run.tiles,
            points,
        })
    }

    /// One full swap-resolve cycle: swap, then cascade or revert.
    ///
    /// `InvalidSwap` is absorbed into [`SwapOutcome::Rejected`]. Any other
    /// error aborts the cycle; the phase is back to `Idle` either way.
    pub async fn try_resolve_or_revert(
        &mut self,
        a: Coord,
        b: Coord,
    ) -> Result<SwapOutcome, GameError> {
        let result = self.run_cycle(a, b).await;
        self.phase = ResolutionPhase::Idle;
        match &result {
            Ok(outcome) => info!(
                %a,
                %b,
                outcome = outcome.as_str(),
                points = outcome.points(),
                score = self.score.total(),
                "cycle finished"
            ),
            Err(err) => warn!(%a, %b, error = %err, "cycle aborted"),
        }
        result
    }

    async fn run_cycle(&mut self, a: Coord, b: Coord) -> Result<SwapOutcome, GameError> {
        self.phase = ResolutionPhase::Swapping;
        match self.attempt_swap(a, b).await {
            Ok(()) => {}
            Err(GameError::InvalidSwap { .. }) => return Ok(SwapOutcome::Rejected),
            Err(err) => return Err(err),
        }

        if !has_poppable_run(&self.grid) {
            self.phase = ResolutionPhase::Reverting;
            if let Err(err) = self.attempt_swap(a, b).await {
                // A no-run swap must never stick, animated or not
                self.grid.swap_items(a, b)?;
                return Err(err);
            }
            return Ok(SwapOutcome::Reverted);
        }

        self.phase = ResolutionPhase::Cascading;
        let report = self.resolve_cascade().await?;
        Ok(SwapOutcome::Cascaded(report))
    }
}
