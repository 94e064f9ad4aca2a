//! Shared types - plain data used by the engine and its collaborators
//!
//! Everything here is pure data with no game logic, so render, input and loop
//! adapters can depend on it without pulling in the engine.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! Coordinates are `i16`: cells left of the wall or above the top edge are
//! representable, which the collision rules rely on.
//!
//! # Gravity Timing
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FALL_MS` | 500 | Fall interval at the start of a game |
//! | `MIN_FALL_MS` | 100 | Fall interval floor |
//! | `SPEEDUP_STEP_MS` | 5 | Interval reduction per speed-up period |
//! | `SPEEDUP_PERIOD_MS` | 60000 | Play time between speed-ups |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(PieceKind::S.rotation_states(), 2);
//!
//! let cmd = Command::from_str("moveLeft").unwrap();
//! assert_eq!(cmd, Command::MoveLeft);
//! assert_eq!(cmd.as_str(), "moveLeft");
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells
pub const BOARD_HEIGHT: u8 = 20;

/// Largest accepted board dimension
pub const MAX_DIMENSION: u8 = 64;

/// Side of the square box every piece layout is drawn in
pub const LAYOUT_SIZE: u8 = 4;

/// Fall interval at the start of a game (0.5s per row)
pub const DEFAULT_FALL_MS: u32 = 500;

/// Fall interval never drops below this
pub const MIN_FALL_MS: u32 = 100;

/// Fall interval reduction applied once per speed-up period
pub const SPEEDUP_STEP_MS: u32 = 5;

/// Play time between two speed-ups (one minute)
pub const SPEEDUP_PERIOD_MS: u32 = 60_000;

/// Number of rows from the top that end the game when a locked cell lands in them
pub const TOP_OUT_ROWS: u8 = 1;

/// Points per cleared row under the linear rule
pub const LINEAR_POINTS_PER_ROW: u32 = 10;

/// Points multiplier for the squared clear count under the quadratic rule
pub const QUADRATIC_POINTS_BASE: u32 = 100;

/// The seven tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Number of distinct rotation layouts for this kind
    ///
    /// - **O**: 1 (the square looks the same every way)
    /// - **I, S, Z**: 2 (half-turn symmetric)
    /// - **T, J, L**: 4
    pub fn rotation_states(&self) -> u8 {
        match self {
            PieceKind::O => 1,
            PieceKind::I | PieceKind::S | PieceKind::Z => 2,
            PieceKind::T | PieceKind::J | PieceKind::L => 4,
        }
    }
}

/// Palette a piece color is drawn from
///
/// The engine treats colors as opaque: they are copied into locked cells and
/// reported back in snapshots, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Color {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Purple,
    Red,
}

impl Color {
    pub const ALL: [Color; 7] = [
        Color::Cyan,
        Color::Blue,
        Color::Orange,
        Color::Yellow,
        Color::Green,
        Color::Purple,
        Color::Red,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Cyan => "cyan",
            Color::Blue => "blue",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Purple => "purple",
            Color::Red => "red",
        }
    }

    /// RGB triple, for render adapters that want one
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Color::Cyan => (0, 255, 255),
            Color::Blue => (0, 0, 255),
            Color::Orange => (255, 165, 0),
            Color::Yellow => (255, 255, 0),
            Color::Green => (0, 255, 0),
            Color::Purple => (128, 0, 128),
            Color::Red => (255, 0, 0),
        }
    }
}

/// Player commands accepted by the engine
///
/// Input adapters translate raw key events into these; the loop driver forwards
/// them to the engine before the frame's gravity tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Command {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot descend
    SoftDrop,
    /// Advance to the next rotation state
    Rotate,
}

impl Command {
    /// Parse command from its camelCase name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::Command;
    ///
    /// assert_eq!(Command::from_str("softDrop"), Some(Command::SoftDrop));
    /// assert_eq!(Command::from_str("ROTATE"), Some(Command::Rotate));
    /// assert_eq!(Command::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "rotate" => Some(Command::Rotate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::Rotate => "rotate",
        }
    }
}

/// A cell on the game board
///
/// - `None`: empty
/// - `Some(Color)`: locked, holding the color of the piece that filled it
pub type Cell = Option<Color>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_timing() {
        assert_eq!(DEFAULT_FALL_MS, 500);
        assert_eq!(MIN_FALL_MS, 100);
        assert!(MIN_FALL_MS <= DEFAULT_FALL_MS);
        assert_eq!(SPEEDUP_PERIOD_MS, 60_000);
    }

    #[test]
    fn piece_kind_names_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn command_names_roundtrip() {
        for cmd in [
            Command::MoveLeft,
            Command::MoveRight,
            Command::SoftDrop,
            Command::Rotate,
        ] {
            assert_eq!(Command::from_str(cmd.as_str()), Some(cmd));
        }
    }

    #[test]
    fn rotation_state_counts() {
        let total: u32 = PieceKind::ALL
            .iter()
            .map(|k| k.rotation_states() as u32)
            .sum();
        // 1 (O) + 3 * 2 (I, S, Z) + 3 * 4 (T, J, L)
        assert_eq!(total, 19);
    }
}
