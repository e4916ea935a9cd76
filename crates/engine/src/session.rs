//! Host session loop
//!
//! Input can arrive at any time, but only one swap-resolve cycle may run.
//! The loop reads picks from a channel and, while a pick's cycle is still
//! suspended on the presenter, drains and drops any picks that arrive.

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::core::{GameError, RandomSource};
use crate::game::{Game, PickResponse};
use crate::presenter::Presenter;
use crate::types::Coord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    /// Completed swap-resolve cycles (including rejected and reverted ones)
    pub cycles: u32,
    /// Picks dropped because a cycle was in flight
    pub ignored_picks: u32,
    /// Picks outside the grid
    pub invalid_picks: u32,
    /// Cycles cut short by a presenter failure
    pub aborted_cycles: u32,
    pub score: u32,
}

/// Run until the pick channel closes.
pub async fn run_session<P, R>(
    game: &mut Game<P, R>,
    picks: &mut mpsc::Receiver<Coord>,
) -> SessionSummary
where
    P: Presenter,
    R: RandomSource,
{
    run_session_with(game, picks, |_, _, _| {}).await
}

/// Like [`run_session`], calling `observe` after every handled pick.
pub async fn run_session_with<P, R, F>(
    game: &mut Game<P, R>,
    picks: &mut mpsc::Receiver<Coord>,
    mut observe: F,
) -> SessionSummary
where
    P: Presenter,
    R: RandomSource,
    F: FnMut(&Game<P, R>, Coord, &Result<PickResponse, GameError>),
{
    let mut summary = SessionSummary::default();

    while let Some(pos) = picks.recv().await {
        let result = {
            let handled = game.on_tile_picked(pos);
            tokio::pin!(handled);
            loop {
                tokio::select! {
                    // The pick's own progress is polled first so queued
                    // picks are never dropped when no cycle is suspended.
                    biased;
                    result = &mut handled => break result,
                    Some(late) = picks.recv() => {
                        warn!(pos = %late, "pick ignored while resolving");
                        summary.ignored_picks += 1;
                    }
                }
            }
        };

        match &result {
            Ok(PickResponse::Resolved(outcome)) => {
                summary.cycles += 1;
                debug!(outcome = outcome.as_str(), "session cycle done");
            }
            Ok(PickResponse::Ignored) => summary.ignored_picks += 1,
            Ok(_) => {}
            Err(GameError::OutOfBounds { .. }) => {
                warn!(%pos, "pick outside the grid");
                summary.invalid_picks += 1;
            }
            Err(err) => {
                warn!(error = %err, "cycle aborted");
                summary.aborted_cycles += 1;
            }
        }
        summary.score = game.score();
        observe(game, pos, &result);
    }

    summary.score = game.score();
    summary
}
