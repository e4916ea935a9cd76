//! Headless tile-match runner (default binary).
//!
//! Reads tile picks from stdin (`x y` per line, `q` to quit) and writes the
//! game as line-delimited JSON on stdout. Logs go to stderr; set `RUST_LOG`
//! (e.g. `RUST_LOG=tile_match_engine=debug`) for more detail.
//!
//! Configuration: `--config <path>` or `TILE_MATCH_CONFIG` names a JSON
//! config file; `TILE_MATCH_*` environment variables override it.

use anyhow::{anyhow, Context, Result};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use tile_match::engine::{run_session_with, Game, GameConfig, PickResponse};
use tile_match::host::{read_picks, write_lines, JsonLinePresenter};
use tile_match::protocol::{
    create_error, create_observation, create_outcome, create_summary, create_welcome, HostMessage,
};
use tile_match::types::Coord;

/// Max picks buffered between the stdin reader and the session
const PICK_BUFFER: usize = 64;

fn config_path(mut args: impl Iterator<Item = String>) -> Result<Option<String>> {
    let mut path = std::env::var("TILE_MATCH_CONFIG")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                path = Some(
                    args.next()
                        .ok_or_else(|| anyhow!("missing value for --config"))?,
                );
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
    }
    Ok(path)
}

fn load_config() -> Result<GameConfig> {
    let mut config = match config_path(std::env::args().skip(1))? {
        Some(path) => {
            GameConfig::load(&path).with_context(|| format!("loading config from {}", path))?
        }
        None => GameConfig::default(),
    };
    config.apply_env();
    config.validate().context("invalid configuration")?;
    Ok(config)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config()?;
    let catalog = config.build_catalog()?;

    let (out_tx, out_rx) = mpsc::unbounded_channel::<HostMessage>();
    let writer = tokio::spawn(write_lines(out_rx, tokio::io::stdout()));

    let presenter = JsonLinePresenter::new(out_tx.clone(), catalog.clone(), config.animation_ms);
    let mut game = Game::initialize(&config, presenter)?;
    let _ = out_tx.send(create_welcome(&game.snapshot(), &catalog));

    let (pick_tx, mut pick_rx) = mpsc::channel::<Coord>(PICK_BUFFER);
    let reader = tokio::spawn(read_picks(
        BufReader::new(tokio::io::stdin()),
        pick_tx,
        out_tx.clone(),
    ));

    let summary = run_session_with(&mut game, &mut pick_rx, |game, pos, result| {
        match result {
            Ok(PickResponse::Resolved(outcome)) => {
                let _ = out_tx.send(create_outcome(outcome, &catalog));
            }
            Ok(_) => {}
            Err(err) => {
                let _ = out_tx.send(create_error(format!("pick {}: {}", pos, err)));
            }
        }
        let _ = out_tx.send(create_observation(&game.snapshot(), &catalog));
    })
    .await;

    let _ = out_tx.send(create_summary(&summary));

    // The pick channel only closes once the reader has returned
    reader.await??;

    // Close every sender so the writer drains and exits
    drop(game);
    drop(out_tx);
    writer.await??;
    Ok(())
}
