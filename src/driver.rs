//! Script driver - feeds line commands to the engine and prints snapshots
//!
//! One instruction per line:
//!
//! | Line | Effect |
//! |------|--------|
//! | `moveLeft`, `moveRight`, `softDrop`, `rotate` | `apply_command` |
//! | `tick <ms>` | `tick` |
//! | `reset` | `reset` |
//! | `snapshot` | print the snapshot as one JSON line |
//! | `quit` | stop reading |
//!
//! Blank lines and lines starting with `#` are ignored.

use std::io::{BufRead, Write};

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use crate::core::{EngineConfig, GameState, ScoreRule};
use crate::types::{Command, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    pub width: u8,
    pub height: u8,
    pub seed: u64,
    pub score_rule: ScoreRule,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            seed: 1,
            score_rule: ScoreRule::Quadratic,
        }
    }
}

impl DriverConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::with_size(self.width, self.height)
            .with_seed(self.seed)
            .with_score_rule(self.score_rule)
    }
}

pub fn parse_args(args: &[String]) -> Result<DriverConfig> {
    let mut config = DriverConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--width" => {
                i += 1;
                config.width = parse_value(args.get(i), "--width")?;
            }
            "--height" => {
                i += 1;
                config.height = parse_value(args.get(i), "--height")?;
            }
            "--seed" => {
                i += 1;
                config.seed = parse_value(args.get(i), "--seed")?;
            }
            "--linear-score" => {
                config.score_rule = ScoreRule::Linear;
            }
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }
    Ok(config)
}

fn parse_value<T: std::str::FromStr>(value: Option<&String>, flag: &str) -> Result<T> {
    let v = value.ok_or_else(|| anyhow!("missing value for {}", flag))?;
    v.parse::<T>()
        .map_err(|_| anyhow!("invalid {} value: {}", flag, v))
}

/// One parsed script line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Command(Command),
    Tick(u32),
    Reset,
    Snapshot,
    Quit,
}

/// Parse a script line; `None` for blank lines and comments
pub fn parse_line(line: &str) -> Result<Option<Instruction>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or_default();
    let instruction = match head.to_lowercase().as_str() {
        "tick" => {
            let ms = parts
                .next()
                .ok_or_else(|| anyhow!("tick needs a duration in ms"))?;
            Instruction::Tick(
                ms.parse()
                    .map_err(|_| anyhow!("invalid tick duration: {}", ms))?,
            )
        }
        "reset" => Instruction::Reset,
        "snapshot" => Instruction::Snapshot,
        "quit" => Instruction::Quit,
        _ => Instruction::Command(
            Command::from_str(head).ok_or_else(|| anyhow!("unknown instruction: {}", head))?,
        ),
    };

    if let Some(extra) = parts.next() {
        return Err(anyhow!("unexpected argument: {}", extra));
    }
    Ok(Some(instruction))
}

/// Run a script against the game, writing snapshots to `out`
pub fn run_script<R: BufRead, W: Write>(game: &mut GameState, input: R, out: &mut W) -> Result<()> {
    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.with_context(|| format!("reading line {}", line_no))?;
        let Some(instruction) = parse_line(&line).with_context(|| format!("line {}", line_no))?
        else {
            continue;
        };

        match instruction {
            Instruction::Command(command) => {
                let changed = game.apply_command(command);
                debug!(command = command.as_str(), changed, "command");
            }
            Instruction::Tick(ms) => {
                game.tick(ms);
            }
            Instruction::Reset => game.reset(),
            Instruction::Snapshot => {
                serde_json::to_writer(&mut *out, &game.snapshot())?;
                out.write_all(b"\n")?;
                out.flush()?;
            }
            Instruction::Quit => break,
        }
    }
    Ok(())
}
