//! Game - the object a host builds once and feeds tile picks to
//!
//! Wraps the resolution [`Engine`] with the [`Selection`] state machine.
//! [`Game::initialize`] replaces engine startup hooks and
//! [`Game::on_tile_picked`] is the only input entry point.

use tracing::{debug, warn};

use crate::config::GameConfig;
use crate::core::{GameError, GameSnapshot, Grid, RandomSource, SimpleRng};
use crate::presenter::Presenter;
use crate::resolve::{Engine, SwapOutcome};
use crate::selection::{PickOutcome, Selection};
use crate::types::{Coord, TurnState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickResponse {
    /// Dropped because a cycle is in flight
    Ignored,
    AlreadySelected,
    /// First tile of a pair recorded
    Selected(Coord),
    /// Second tile picked; the whole cycle has completed
    Resolved(SwapOutcome),
}

pub struct Game<P, R = SimpleRng> {
    engine: Engine<P, R>,
    selection: Selection,
}

impl<P: Presenter> Game<P, SimpleRng> {
    /// Build the catalog, seed the RNG and lay out the grid.
    ///
    /// Preset rows are used as-is; otherwise every tile gets a random item.
    /// Runs present in the initial layout are left alone until the first
    /// successful swap.
    pub fn initialize(config: &GameConfig, presenter: P) -> Result<Self, GameError> {
        config.validate()?;
        let catalog = config.build_catalog()?;
        let mut rng = SimpleRng::new(config.seed);
        let grid = match &config.rows {
            Some(rows) => Grid::from_rows(rows, &catalog)?,
            None => Grid::random(config.width, config.height, &catalog, &mut rng)?,
        };
        debug!(
            width = grid.width(),
            height = grid.height(),
            kinds = catalog.len(),
            seed = config.seed,
            "board initialized"
        );

        let engine = Engine::new(grid, catalog, rng, presenter)?
            .with_max_cascade_steps(config.max_cascade_steps);
        Ok(Self::new(engine))
    }
}

impl<P: Presenter, R: RandomSource> Game<P, R> {
    pub fn new(engine: Engine<P, R>) -> Self {
        Self {
            engine,
            selection: Selection::new(),
        }
    }

    pub fn engine(&self) -> &Engine<P, R> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine<P, R> {
        &mut self.engine
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn turn_state(&self) -> TurnState {
        self.selection.state()
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(
            self.engine.grid(),
            self.engine.score(),
            self.selection.picks(),
            self.selection.state(),
        )
    }

    /// Feed one tile pick.
    ///
    /// The second distinct pick runs a full swap-resolve cycle before this
    /// returns. The selection is cleared afterwards even when the cycle
    /// aborts on a presenter error, so the next pick starts a fresh pair.
    pub async fn on_tile_picked(&mut self, pos: Coord) -> Result<PickResponse, GameError> {
        self.engine.tile_at(pos)?;

        match self.selection.pick(pos) {
            PickOutcome::Ignored => {
                warn!(%pos, "pick ignored while resolving");
                Ok(PickResponse::Ignored)
            }
            PickOutcome::Duplicate => Ok(PickResponse::AlreadySelected),
            PickOutcome::Selected => Ok(PickResponse::Selected(pos)),
            PickOutcome::Ready(a, b) => {
                let result = self.engine.try_resolve_or_revert(a, b).await;
                self.selection.finish();
                result.map(PickResponse::Resolved)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::{NullPresenter, RecordingPresenter};

    fn config(rows: &[&str]) -> GameConfig {
        GameConfig {
            rows: Some(rows.iter().map(|r| r.to_string()).collect()),
            ..GameConfig::default()
        }
    }

    #[test]
    fn initialize_random_board_uses_config_size() {
        let config = GameConfig {
            width: 6,
            height: 4,
            ..GameConfig::default()
        };
        let game = Game::initialize(&config, NullPresenter).unwrap();
        assert_eq!(game.engine().grid().width(), 6);
        assert_eq!(game.engine().grid().height(), 4);
        assert_eq!(game.turn_state(), TurnState::WaitingFirstPick);
    }

    #[test]
    fn same_seed_same_board() {
        let a = Game::initialize(&GameConfig::default(), NullPresenter).unwrap();
        let b = Game::initialize(&GameConfig::default(), NullPresenter).unwrap();
        assert_eq!(a.engine().grid(), b.engine().grid());
    }

    #[test]
    fn initialize_rejects_ragged_rows() {
        let result = Game::initialize(&config(&["abc", "ab"]), NullPresenter);
        assert!(matches!(
            result,
            Err(GameError::RaggedLayout {
                row: 1,
                expected: 3,
                found: 2
            })
        ));
    }

    #[test]
    fn out_of_bounds_pick_leaves_selection_alone() {
        let mut game = Game::initialize(&config(&["ab", "cd"]), RecordingPresenter::new()).unwrap();
        tokio_test::block_on(game.on_tile_picked(Coord::new(0, 0))).unwrap();
        let result = tokio_test::block_on(game.on_tile_picked(Coord::new(5, 0)));

        assert!(matches!(result, Err(GameError::OutOfBounds { .. })));
        assert_eq!(game.selection().picks(), &[Coord::new(0, 0)]);
    }

    #[test]
    fn aborted_cycle_clears_selection() {
        let mut game = Game::initialize(&config(&["ab", "cd"]), RecordingPresenter::failing_at(0))
            .unwrap();
        tokio_test::block_on(async {
            game.on_tile_picked(Coord::new(0, 0)).await.unwrap();
            let result = game.on_tile_picked(Coord::new(1, 0)).await;
            assert!(matches!(result, Err(GameError::Animation(_))));
        });

        assert!(game.selection().is_empty());
        assert_eq!(game.turn_state(), TurnState::WaitingFirstPick);
    }
}
