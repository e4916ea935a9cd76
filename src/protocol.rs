//! Protocol module - line-delimited JSON messages for the headless host
//!
//! Every line written to stdout is one JSON object with `type`, `seq`
//! (monotonic per run) and `ts` (milliseconds since the epoch). Input lines
//! are tile picks written as `x y` (or `x,y`); `q` ends the session.

use serde::Serialize;

use crate::core::{GameSnapshot, ItemCatalog};
use crate::engine::{Animation, CatalogEntry, SessionSummary, SwapOutcome};
use crate::types::{Coord, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileView {
    pub x: i16,
    pub y: i16,
    pub symbol: char,
}

impl TileView {
    pub fn new(tile: Tile, catalog: &ItemCatalog) -> Self {
        Self {
            x: tile.pos.x,
            y: tile.pos.y,
            symbol: catalog.symbol(tile.item),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoordView {
    pub x: i16,
    pub y: i16,
}

impl From<Coord> for CoordView {
    fn from(pos: Coord) -> Self {
        Self { x: pos.x, y: pos.y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PopView {
    pub symbol: char,
    pub size: usize,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostMessage {
    Welcome {
        width: usize,
        height: usize,
        catalog: Vec<CatalogEntry>,
        rows: Vec<String>,
    },
    Observation {
        score: u32,
        turn: &'static str,
        selection: Vec<CoordView>,
        rows: Vec<String>,
    },
    Animation {
        kind: &'static str,
        tiles: Vec<TileView>,
    },
    Sound {
        cue: &'static str,
    },
    Score {
        total: u32,
    },
    Outcome {
        outcome: &'static str,
        points: u32,
        pops: Vec<PopView>,
        truncated: bool,
    },
    Error {
        message: String,
    },
    Summary {
        cycles: u32,
        ignored_picks: u32,
        invalid_picks: u32,
        aborted_cycles: u32,
        score: u32,
    },
}

/// A message stamped for the wire
#[derive(Debug, Serialize)]
pub struct Envelope<'a> {
    pub seq: u64,
    pub ts: u64,
    #[serde(flatten)]
    pub message: &'a HostMessage,
}

pub fn create_welcome(snapshot: &GameSnapshot, catalog: &ItemCatalog) -> HostMessage {
    HostMessage::Welcome {
        width: snapshot.width,
        height: snapshot.height,
        catalog: catalog.iter().map(|(_, item)| CatalogEntry::from(item)).collect(),
        rows: snapshot.rows(catalog),
    }
}

pub fn create_observation(snapshot: &GameSnapshot, catalog: &ItemCatalog) -> HostMessage {
    HostMessage::Observation {
        score: snapshot.score,
        turn: snapshot.turn.as_str(),
        selection: snapshot.selection.iter().map(|&pos| pos.into()).collect(),
        rows: snapshot.rows(catalog),
    }
}

pub fn create_animation(animation: &Animation, catalog: &ItemCatalog) -> HostMessage {
    HostMessage::Animation {
        kind: animation.as_str(),
        tiles: animation
            .tiles()
            .into_iter()
            .map(|tile| TileView::new(tile, catalog))
            .collect(),
    }
}

pub fn create_outcome(outcome: &SwapOutcome, catalog: &ItemCatalog) -> HostMessage {
    let (pops, truncated) = match outcome {
        SwapOutcome::Cascaded(report) => (
            report
                .pops
                .iter()
                .map(|pop| PopView {
                    symbol: catalog.symbol(pop.item),
                    size: pop.tiles.len(),
                    points: pop.points,
                })
                .collect(),
            report.truncated,
        ),
        _ => (Vec::new(), false),
    };
    HostMessage::Outcome {
        outcome: outcome.as_str(),
        points: outcome.points(),
        pops,
        truncated,
    }
}

pub fn create_error(message: impl Into<String>) -> HostMessage {
    HostMessage::Error {
        message: message.into(),
    }
}

pub fn create_summary(summary: &SessionSummary) -> HostMessage {
    HostMessage::Summary {
        cycles: summary.cycles,
        ignored_picks: summary.ignored_picks,
        invalid_picks: summary.invalid_picks,
        aborted_cycles: summary.aborted_cycles,
        score: summary.score,
    }
}

/// One line of host input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Pick(Coord),
    Quit,
}

/// Parse an input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<HostCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if line.eq_ignore_ascii_case("q") || line.eq_ignore_ascii_case("quit") {
        return Ok(Some(HostCommand::Quit));
    }

    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected `x y`, got: {}", line));
    };
    let x: i16 = x.parse().map_err(|_| format!("invalid x: {}", x))?;
    let y: i16 = y.parse().map_err(|_| format!("invalid y: {}", y))?;
    Ok(Some(HostCommand::Pick(Coord::new(x, y))))
}

/// Get current timestamp in milliseconds
pub fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
