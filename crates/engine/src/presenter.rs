//! Presentation collaborator
//!
//! The engine calls into a [`Presenter`] for every visible step of a cycle.
//! Animation calls are awaited: the engine does not touch the board again
//! until the presenter reports the animation finished. Sound and score
//! notifications are fire-and-forget.

use tokio::sync::{mpsc, oneshot};

use crate::core::AnimationError;
use crate::types::Tile;

/// Host-side rendering and audio hooks.
///
/// Futures returned here are not required to be `Send`; engines are driven
/// on a single logical thread.
#[allow(async_fn_in_trait)]
pub trait Presenter {
    /// Move the two icons into each other's place
    async fn animate_swap(&mut self, a: Tile, b: Tile) -> Result<(), AnimationError>;

    /// Brief invalid-move flash
    async fn animate_reject(&mut self, a: Tile, b: Tile) -> Result<(), AnimationError>;

    /// Shrink a whole run to nothing; `tiles` hold the items being removed
    async fn animate_pop(&mut self, tiles: &[Tile]) -> Result<(), AnimationError>;

    /// Grow refreshed tiles back in; `tiles` hold their new items
    async fn animate_refill(&mut self, tiles: &[Tile]) -> Result<(), AnimationError>;

    fn play_collect_sound(&mut self);

    fn report_score(&mut self, total: u32);
}

/// One animation the engine asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Animation {
    Swap(Tile, Tile),
    Reject(Tile, Tile),
    Pop(Vec<Tile>),
    Refill(Vec<Tile>),
}

impl Animation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Animation::Swap(..) => "swap",
            Animation::Reject(..) => "reject",
            Animation::Pop(_) => "pop",
            Animation::Refill(_) => "refill",
        }
    }

    pub fn tiles(&self) -> Vec<Tile> {
        match self {
            Animation::Swap(a, b) | Animation::Reject(a, b) => vec![*a, *b],
            Animation::Pop(tiles) | Animation::Refill(tiles) => tiles.clone(),
        }
    }
}

/// Completes every animation immediately and ignores notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    async fn animate_swap(&mut self, _a: Tile, _b: Tile) -> Result<(), AnimationError> {
        Ok(())
    }

    async fn animate_reject(&mut self, _a: Tile, _b: Tile) -> Result<(), AnimationError> {
        Ok(())
    }

    async fn animate_pop(&mut self, _tiles: &[Tile]) -> Result<(), AnimationError> {
        Ok(())
    }

    async fn animate_refill(&mut self, _tiles: &[Tile]) -> Result<(), AnimationError> {
        Ok(())
    }

    fn play_collect_sound(&mut self) {}

    fn report_score(&mut self, _total: u32) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterCall {
    Animate(Animation),
    CollectSound,
    Score(u32),
}

/// Records every call in order. Animations complete immediately unless a
/// failure was scheduled with [`RecordingPresenter::failing_at`].
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    calls: Vec<PresenterCall>,
    animations: usize,
    fail_at: Option<usize>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `n`-th animation (0-based) with `AnimationError::Failed`.
    pub fn failing_at(n: usize) -> Self {
        Self {
            fail_at: Some(n),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> &[PresenterCall] {
        &self.calls
    }

    pub fn take_calls(&mut self) -> Vec<PresenterCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn animations(&self) -> impl Iterator<Item = &Animation> {
        self.calls.iter().filter_map(|call| match call {
            PresenterCall::Animate(animation) => Some(animation),
            _ => None,
        })
    }

    pub fn reported_scores(&self) -> Vec<u32> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                PresenterCall::Score(total) => Some(*total),
                _ => None,
            })
            .collect()
    }

    fn animate(&mut self, animation: Animation) -> Result<(), AnimationError> {
        let n = self.animations;
        self.animations += 1;
        self.calls.push(PresenterCall::Animate(animation));
        if self.fail_at == Some(n) {
            return Err(AnimationError::Failed(format!("scheduled failure at animation {}", n)));
        }
        Ok(())
    }
}

impl Presenter for RecordingPresenter {
    async fn animate_swap(&mut self, a: Tile, b: Tile) -> Result<(), AnimationError> {
        self.animate(Animation::Swap(a, b))
    }

    async fn animate_reject(&mut self, a: Tile, b: Tile) -> Result<(), AnimationError> {
        self.animate(Animation::Reject(a, b))
    }

    async fn animate_pop(&mut self, tiles: &[Tile]) -> Result<(), AnimationError> {
        self.animate(Animation::Pop(tiles.to_vec()))
    }

    async fn animate_refill(&mut self, tiles: &[Tile]) -> Result<(), AnimationError> {
        self.animate(Animation::Refill(tiles.to_vec()))
    }

    fn play_collect_sound(&mut self) {
        self.calls.push(PresenterCall::CollectSound);
    }

    fn report_score(&mut self, total: u32) {
        self.calls.push(PresenterCall::Score(total));
    }
}

/// An animation waiting for the host to finish it.
#[derive(Debug)]
pub struct AnimationRequest {
    pub animation: Animation,
    done: oneshot::Sender<()>,
}

impl AnimationRequest {
    /// Resume the engine. Dropping the request instead cancels the cycle.
    pub fn complete(self) {
        let _ = self.done.send(());
    }
}

#[derive(Debug)]
pub enum PresenterEvent {
    Animate(AnimationRequest),
    CollectSound,
    Score(u32),
}

/// Forwards every call to a host over an unbounded channel.
///
/// Animations suspend until the host calls [`AnimationRequest::complete`];
/// there is no timeout.
#[derive(Debug, Clone)]
pub struct ChannelPresenter {
    tx: mpsc::UnboundedSender<PresenterEvent>,
}

impl ChannelPresenter {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PresenterEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    async fn animate(&mut self, animation: Animation) -> Result<(), AnimationError> {
        let (done, finished) = oneshot::channel();
        self.tx
            .send(PresenterEvent::Animate(AnimationRequest { animation, done }))
            .map_err(|_| AnimationError::Cancelled)?;
        finished.await.map_err(|_| AnimationError::Cancelled)
    }
}

impl Presenter for ChannelPresenter {
    async fn animate_swap(&mut self, a: Tile, b: Tile) -> Result<(), AnimationError> {
        self.animate(Animation::Swap(a, b)).await
    }

    async fn animate_reject(&mut self, a: Tile, b: Tile) -> Result<(), AnimationError> {
        self.animate(Animation::Reject(a, b)).await
    }

    async fn animate_pop(&mut self, tiles: &[Tile]) -> Result<(), AnimationError> {
        self.animate(Animation::Pop(tiles.to_vec())).await
    }

    async fn animate_refill(&mut self, tiles: &[Tile]) -> Result<(), AnimationError> {
        self.animate(Animation::Refill(tiles.to_vec())).await
    }

    fn play_collect_sound(&mut self) {
        let _ = self.tx.send(PresenterEvent::CollectSound);
    }

    fn report_score(&mut self, total: u32) {
        let _ = self.tx.send(PresenterEvent::Score(total));
    }
}
