//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be
//! used by the grid model, the resolution engine and any host protocol alike.
//!
//! # Coordinates
//!
//! Tiles are addressed by `(x, y)` where `x` grows left to right and `y`
//! grows top to bottom. `(0, 0)` is the top-left tile and scans run
//! row-major (y outer, x inner).
//!
//! # Animation Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TWEEN_DURATION_MS` | 200 | Swap move, shrink-out and grow-in |
//! | `REJECT_FLASH_MS` | 100 | Invalid-move flash (two 50ms colour steps) |
//!
//! # Examples
//!
//! ```
//! use tile_match_types::{Coord, TurnState, MIN_RUN_LEN};
//!
//! let a = Coord::new(2, 3);
//! assert!(a.is_adjacent(Coord::new(3, 3)));
//! assert!(!a.is_adjacent(Coord::new(3, 4)));
//! assert!(!a.is_adjacent(a));
//!
//! assert_eq!(TurnState::from_str("waitingSecondPick"), Some(TurnState::WaitingSecondPick));
//! assert_eq!(MIN_RUN_LEN, 3);
//! ```

use std::fmt;

/// Default board width in tiles
pub const DEFAULT_WIDTH: usize = 8;

/// Default board height in tiles
pub const DEFAULT_HEIGHT: usize = 8;

/// Smallest run that can be popped
pub const MIN_RUN_LEN: usize = 3;

/// Maximum number of tiles held in a selection
pub const MAX_SELECTION: usize = 2;

/// Duration of swap, shrink-out and grow-in animations (200ms)
pub const TWEEN_DURATION_MS: u64 = 200;

/// Duration of the reject flash (two quarter-tween colour steps)
pub const REJECT_FLASH_MS: u64 = TWEEN_DURATION_MS / 2;

/// Default upper bound on pops performed by one cascade
pub const DEFAULT_MAX_CASCADE_STEPS: u32 = 1000;

/// A tile position on the grid.
///
/// Coordinates are signed so that neighbour arithmetic can step off the edge
/// and be rejected by a bounds check instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub x: i16,
    pub y: i16,
}

impl Coord {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Offset by `(dx, dy)`; returns `None` on i16 overflow.
    pub fn offset(self, dx: i16, dy: i16) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }

    /// Manhattan distance between two positions
    pub fn manhattan(self, other: Coord) -> u32 {
        let dx = (self.x as i32 - other.x as i32).unsigned_abs();
        let dy = (self.y as i32 - other.y as i32).unsigned_abs();
        dx + dy
    }

    /// True when exactly one of `|dx|`, `|dy|` is 1 and the other is 0.
    ///
    /// Diagonal neighbours, distant tiles and the tile itself are all rejected.
    ///
    /// ```
    /// use tile_match_types::Coord;
    ///
    /// let c = Coord::new(0, 0);
    /// assert!(c.is_adjacent(Coord::new(0, 1)));
    /// assert!(!c.is_adjacent(Coord::new(1, 1)));
    /// assert!(!c.is_adjacent(Coord::new(2, 0)));
    /// ```
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Index of an item kind in the catalog.
///
/// Two tiles hold the same kind exactly when their ids are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u16);

impl ItemId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A collectible item kind with its point value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemDef {
    pub name: String,
    /// Single-character form used in row layouts and text output
    pub symbol: char,
    /// Points per tile when a run of this kind pops (>= 1)
    pub value: u32,
}

impl ItemDef {
    pub fn new(name: impl Into<String>, symbol: char, value: u32) -> Self {
        Self {
            name: name.into(),
            symbol,
            value,
        }
    }
}

/// A tile as seen by the outside world: its fixed position and the item it
/// currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub pos: Coord,
    pub item: ItemId,
}

/// Player-facing turn state
///
/// The cycle is `WaitingFirstPick -> WaitingSecondPick -> Resolving -> WaitingFirstPick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TurnState {
    #[default]
    WaitingFirstPick,
    WaitingSecondPick,
    /// A swap-resolve cycle is in flight; picks are dropped
    Resolving,
}

impl TurnState {
    /// Parse from camelCase (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "waitingfirstpick" => Some(TurnState::WaitingFirstPick),
            "waitingsecondpick" => Some(TurnState::WaitingSecondPick),
            "resolving" => Some(TurnState::Resolving),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TurnState::WaitingFirstPick => "waitingFirstPick",
            TurnState::WaitingSecondPick => "waitingSecondPick",
            TurnState::Resolving => "resolving",
        }
    }
}

/// Resolution engine phase
///
/// `Idle -> Swapping -> {Cascading | Reverting} -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResolutionPhase {
    #[default]
    Idle,
    Swapping,
    Cascading,
    Reverting,
}

impl ResolutionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionPhase::Idle => "idle",
            ResolutionPhase::Swapping => "swapping",
            ResolutionPhase::Cascading => "cascading",
            ResolutionPhase::Reverting => "reverting",
        }
    }
}
