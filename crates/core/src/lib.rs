//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the board model and every rule that does not need to
//! wait on the presentation layer. It has **zero dependencies** on rendering,
//! audio or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical boards and refills
//! - **Testable**: Grids can be built from symbol rows
//! - **Portable**: Runs headless, in a terminal host or behind any renderer
//!
//! # Module Structure
//!
//! - [`grid`]: fixed width x height tile grid holding item ids
//! - [`catalog`]: the read-only set of item kinds and their point values
//! - [`matcher`]: 4-neighbour flood fill for connected same-kind runs
//! - [`rng`]: seedable random sources used for refills
//! - [`scoring`]: run scoring and the monotonic score counter
//! - [`snapshot`]: plain copies of the game state for hosts and tests
//!
//! # Example
//!
//! ```
//! use tile_match_core::{connected_run, Grid, ItemCatalog};
//! use tile_match_core::types::Coord;
//!
//! let catalog = ItemCatalog::standard();
//! let grid = Grid::from_rows(&["aab", "bab", "bba"], &catalog).unwrap();
//!
//! let run = connected_run(&grid, Coord::new(0, 0)).unwrap();
//! assert_eq!(run.len(), 3);
//! assert!(run.is_poppable());
//! ```

pub mod catalog;
pub mod error;
pub mod grid;
pub mod matcher;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tile_match_types as types;

// Re-export commonly used types for convenience
pub use catalog::ItemCatalog;
pub use error::{AnimationError, GameError};
pub use grid::Grid;
pub use matcher::{connected_run, find_first_poppable, has_poppable_run, Run};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use scoring::{run_score, ScoreCounter};
pub use snapshot::GameSnapshot;
