//! Headless host - JSON-line presenter plus stdin/stdout plumbing
//!
//! Bridges the engine's awaitable presenter calls to an outbound message
//! channel. A single writer task stamps and serializes every message so the
//! presenter and the session observer can share one ordered stream.

use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::warn;

use crate::core::{AnimationError, ItemCatalog};
use crate::engine::{Animation, Presenter};
use crate::protocol::{
    create_animation, current_timestamp_ms, parse_command, Envelope, HostCommand, HostMessage,
};
use crate::types::{Coord, Tile, REJECT_FLASH_MS, TWEEN_DURATION_MS};

/// Presenter that reports every call as a [`HostMessage`] and holds each
/// animation for its configured duration.
#[derive(Debug, Clone)]
pub struct JsonLinePresenter {
    out: mpsc::UnboundedSender<HostMessage>,
    catalog: ItemCatalog,
    animation_ms: u64,
}

impl JsonLinePresenter {
    /// `animation_ms` is the tween duration; the reject flash is scaled to
    /// the same proportion of it as the default timings.
    pub fn new(
        out: mpsc::UnboundedSender<HostMessage>,
        catalog: ItemCatalog,
        animation_ms: u64,
    ) -> Self {
        Self {
            out,
            catalog,
            animation_ms,
        }
    }

    fn duration_of(&self, animation: &Animation) -> Duration {
        let ms = match animation {
            Animation::Reject(..) => self.animation_ms * REJECT_FLASH_MS / TWEEN_DURATION_MS,
            _ => self.animation_ms,
        };
        Duration::from_millis(ms)
    }

    async fn play(&mut self, animation: Animation) -> Result<(), AnimationError> {
        self.out
            .send(create_animation(&animation, &self.catalog))
            .map_err(|_| AnimationError::Cancelled)?;
        let duration = self.duration_of(&animation);
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
        Ok(())
    }
}

impl Presenter for JsonLinePresenter {
    async fn animate_swap(&mut self, a: Tile, b: Tile) -> Result<(), AnimationError> {
        self.play(Animation::Swap(a, b)).await
    }

    async fn animate_reject(&mut self, a: Tile, b: Tile) -> Result<(), AnimationError> {
        self.play(Animation::Reject(a, b)).await
    }

    async fn animate_pop(&mut self, tiles: &[Tile]) -> Result<(), AnimationError> {
        self.play(Animation::Pop(tiles.to_vec())).await
    }

    async fn animate_refill(&mut self, tiles: &[Tile]) -> Result<(), AnimationError> {
        self.play(Animation::Refill(tiles.to_vec())).await
    }

    fn play_collect_sound(&mut self) {
        let _ = self.out.send(HostMessage::Sound { cue: "collect" });
    }

    fn report_score(&mut self, total: u32) {
        let _ = self.out.send(HostMessage::Score { total });
    }
}

/// Serialize messages one per line until every sender is dropped.
pub async fn write_lines<W>(
    mut rx: mpsc::UnboundedReceiver<HostMessage>,
    mut writer: W,
) -> anyhow::Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut seq: u64 = 0;
    let mut buf: Vec<u8> = Vec::with_capacity(1024);

    while let Some(message) = rx.recv().await {
        seq += 1;
        buf.clear();
        serde_json::to_writer(
            &mut buf,
            &Envelope {
                seq,
                ts: current_timestamp_ms(),
                message: &message,
            },
        )?;
        buf.push(b'\n');
        writer.write_all(&buf).await?;
        writer.flush().await?;
    }

    Ok(seq)
}

/// Forward picks parsed from `reader` until EOF, `q`, or the session hangs up.
///
/// Lines that do not parse are reported on the outbound stream and skipped.
pub async fn read_picks<Rd>(
    reader: Rd,
    picks: mpsc::Sender<Coord>,
    out: mpsc::UnboundedSender<HostMessage>,
) -> anyhow::Result<()>
where
    Rd: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            Ok(Some(HostCommand::Pick(pos))) => {
                if picks.send(pos).await.is_err() {
                    break;
                }
            }
            Ok(Some(HostCommand::Quit)) => break,
            Ok(None) => {}
            Err(message) => {
                warn!(%message, "unreadable input line");
                let _ = out.send(HostMessage::Error { message });
            }
        }
    }
    Ok(())
}
