//! Headless loop driver (default binary).
//!
//! Reads instructions from stdin and drives one engine instance; see
//! [`blockfall::driver`] for the line format. Logs go to stderr, filtered by
//! `BLOCKFALL_LOG` (default `warn`).

use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use blockfall::core::GameState;
use blockfall::driver::{parse_args, run_script};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env("BLOCKFALL_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = parse_args(&args)?;
    let mut game = GameState::new(config.engine_config())
        .context("invalid board configuration")?;
    tracing::info!(
        width = config.width,
        height = config.height,
        seed = config.seed,
        "game started"
    );

    let stdin = io::stdin();
    let mut out = BufWriter::new(io::stdout().lock());
    run_script(&mut game, stdin.lock(), &mut out)?;

    let snap = game.snapshot();
    tracing::info!(
        score = snap.score,
        lines = snap.lines,
        game_over = snap.game_over,
        "driver finished"
    );
    Ok(())
}
