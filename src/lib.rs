//! Tile-match (workspace facade crate).
//!
//! Re-exports the workspace crates under stable names and adds the
//! line-delimited JSON host used by the `tile-match` binary.

pub mod host;
pub mod protocol;

pub use tile_match_core as core;
pub use tile_match_engine as engine;
pub use tile_match_types as types;
