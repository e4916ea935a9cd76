//! Error types shared by the core and engine crates

use thiserror::Error;

use crate::types::Coord;

/// Failure reported by a presentation collaborator while animating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    /// The host dropped the animation request without completing it
    #[error("animation cancelled by host")]
    Cancelled,
    #[error("animation failed: {0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("tile ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i16,
        y: i16,
        width: usize,
        height: usize,
    },

    /// Non-adjacent pair or a tile swapped with itself
    #[error("tiles {a} and {b} are not adjacent")]
    InvalidSwap { a: Coord, b: Coord },

    #[error("item catalog is empty")]
    EmptyCatalog,

    #[error("item catalog has {count} items, more than an item id can address")]
    CatalogTooLarge { count: usize },

    #[error("item '{name}' has value 0")]
    ZeroItemValue { name: String },

    #[error("symbol '{symbol}' is used by more than one item")]
    DuplicateSymbol { symbol: char },

    #[error("layout has no tiles")]
    EmptyLayout,

    #[error("layout row {row} has {found} tiles, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("grid needs {expected} cells, got {found}")]
    CellCount { expected: usize, found: usize },

    #[error("symbol '{symbol}' is not in the item catalog")]
    UnknownSymbol { symbol: char },

    #[error("item id {id} is not in the item catalog")]
    UnknownItem { id: u16 },

    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error(transparent)]
    Animation(#[from] AnimationError),
}

impl GameError {
    /// Errors that abort initialization or indicate a programming mistake.
    ///
    /// `InvalidSwap` is recovered locally and `Animation` aborts only the
    /// current cycle.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, GameError::InvalidSwap { .. } | GameError::Animation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_values() {
        let err = GameError::OutOfBounds {
            x: 9,
            y: -1,
            width: 8,
            height: 8,
        };
        assert_eq!(err.to_string(), "tile (9, -1) is outside the 8x8 grid");

        let err = GameError::InvalidSwap {
            a: Coord::new(0, 0),
            b: Coord::new(2, 0),
        };
        assert_eq!(err.to_string(), "tiles (0, 0) and (2, 0) are not adjacent");
    }

    #[test]
    fn animation_errors_convert_and_are_not_fatal() {
        let err: GameError = AnimationError::Cancelled.into();
        assert_eq!(err, GameError::Animation(AnimationError::Cancelled));
        assert!(!err.is_fatal());
        assert!(GameError::EmptyCatalog.is_fatal());
    }
}
