//! Engine configuration
//!
//! Everything the engine needs to know up front lives in [`EngineConfig`]; there
//! is no global state. Construction validates the config and fails fast with a
//! [`ConfigError`].

use std::fmt;

use crate::scoring::ScoreRule;
use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_FALL_MS, LAYOUT_SIZE, MAX_DIMENSION, MIN_FALL_MS,
    SPEEDUP_PERIOD_MS, SPEEDUP_STEP_MS, TOP_OUT_ROWS,
};

/// Rejected construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Width or height is zero.
    ZeroDimension { width: u8, height: u8 },
    /// Fewer columns than a piece layout box.
    TooNarrow { width: u8, min: u8 },
    /// Fewer rows than a piece layout box.
    TooShort { height: u8, min: u8 },
    /// A dimension is above [`MAX_DIMENSION`].
    TooLarge { width: u8, height: u8, max: u8 },
    /// The top-out zone is empty or covers the whole board.
    InvalidTopOut { rows: u8, height: u8 },
    /// The fall interval floor is zero or above the starting interval.
    InvalidFallInterval { initial_ms: u32, min_ms: u32 },
    /// A supplied board does not have the configured dimensions.
    BoardMismatch { expected: (u8, u8), found: (u8, u8) },
    /// A supplied board already has a full row.
    FullRow { row: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension { width, height } => {
                write!(f, "board dimensions must be positive, got {width}x{height}")
            }
            Self::TooNarrow { width, min } => {
                write!(f, "board width {width} is below the minimum of {min}")
            }
            Self::TooShort { height, min } => {
                write!(f, "board height {height} is below the minimum of {min}")
            }
            Self::TooLarge { width, height, max } => {
                write!(
                    f,
                    "board {width}x{height} exceeds the maximum dimension {max}"
                )
            }
            Self::InvalidTopOut { rows, height } => {
                write!(f, "top-out rows must be in 1..{height}, got {rows}")
            }
            Self::InvalidFallInterval { initial_ms, min_ms } => {
                write!(
                    f,
                    "fall interval floor {min_ms}ms must be positive and at most the initial {initial_ms}ms"
                )
            }
            Self::BoardMismatch { expected, found } => write!(
                f,
                "board is {}x{} but the config expects {}x{}",
                found.0, found.1, expected.0, expected.1
            ),
            Self::FullRow { row } => write!(f, "board row {row} is already full"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Engine construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    pub width: u8,
    pub height: u8,
    /// Seed for piece kind and color generation.
    pub seed: u64,
    /// Fall interval at zero play time.
    pub initial_fall_ms: u32,
    /// Floor the fall interval never goes below.
    pub min_fall_ms: u32,
    /// Reduction applied once per `speedup_period_ms` of play; 0 disables speed-up.
    pub speedup_step_ms: u32,
    pub speedup_period_ms: u32,
    /// A locked cell in any of these top rows ends the game.
    pub top_out_rows: u8,
    pub score_rule: ScoreRule,
}

impl EngineConfig {
    /// Default config with the given board size
    pub fn with_size(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_score_rule(mut self, rule: ScoreRule) -> Self {
        self.score_rule = rule;
        self
    }

    pub fn with_top_out_rows(mut self, rows: u8) -> Self {
        self.top_out_rows = rows;
        self
    }

    pub fn with_fall_schedule(
        mut self,
        initial_ms: u32,
        min_ms: u32,
        step_ms: u32,
        period_ms: u32,
    ) -> Self {
        self.initial_fall_ms = initial_ms;
        self.min_fall_ms = min_ms;
        self.speedup_step_ms = step_ms;
        self.speedup_period_ms = period_ms;
        self
    }

    /// Check every field, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ConfigError::TooLarge {
                width,
                height,
                max: MAX_DIMENSION,
            });
        }
        if width < LAYOUT_SIZE {
            return Err(ConfigError::TooNarrow {
                width,
                min: LAYOUT_SIZE,
            });
        }
        if height < LAYOUT_SIZE {
            return Err(ConfigError::TooShort {
                height,
                min: LAYOUT_SIZE,
            });
        }
        if self.top_out_rows == 0 || self.top_out_rows >= height {
            return Err(ConfigError::InvalidTopOut {
                rows: self.top_out_rows,
                height,
            });
        }
        if self.min_fall_ms == 0 || self.min_fall_ms > self.initial_fall_ms {
            return Err(ConfigError::InvalidFallInterval {
                initial_ms: self.initial_fall_ms,
                min_ms: self.min_fall_ms,
            });
        }
        Ok(())
    }

    /// Anchor x for newly spawned pieces: the layout box centered horizontally
    pub fn spawn_x(&self) -> i16 {
        (self.width as i16 - LAYOUT_SIZE as i16) / 2
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            seed: 1,
            initial_fall_ms: DEFAULT_FALL_MS,
            min_fall_ms: MIN_FALL_MS,
            speedup_step_ms: SPEEDUP_STEP_MS,
            speedup_period_ms: SPEEDUP_PERIOD_MS,
            top_out_rows: TOP_OUT_ROWS,
            score_rule: ScoreRule::default(),
        }
    }
}
