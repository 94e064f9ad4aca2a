//! Game state module - the board engine
//!
//! Ties together the board, piece layouts, piece generation and scoring, and
//! runs the piece lifecycle:
//!
//! ```text
//! Spawning -> Active -> Locking -> Clearing -> Spawning ...
//!                                     \-> GameOver (until reset)
//! ```
//!
//! Every transition triggered by a command or tick runs to completion before
//! the call returns, so between calls the engine is either `Active` or
//! `GameOver`.

use tracing::{debug, info};

use crate::board::Board;
use crate::config::{ConfigError, EngineConfig};
use crate::pieces::{get_shape, rotate_index, PieceShape};
use crate::rng::PieceGenerator;
use crate::scoring::{calculate_line_score, get_fall_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
use crate::types::{Color, Command, PieceKind};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    /// Rotation state, always below `kind.rotation_states()`
    pub rotation: u8,
    /// Anchor: top-left of the layout box
    pub x: i16,
    pub y: i16,
    pub color: Color,
}

impl Tetromino {
    /// Create a piece in rotation state 0 at the given anchor
    pub fn new(kind: PieceKind, color: Color, x: i16, y: i16) -> Self {
        Self {
            kind,
            rotation: 0,
            x,
            y,
            color,
        }
    }

    /// Get the layout for the current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute grid cells the piece occupies
    ///
    /// Coordinates saturate at the `i16` limits, which are always off the board.
    pub fn cells(&self) -> [(i16, i16); 4] {
        self.shape().map(|(dx, dy)| {
            (
                self.x.saturating_add(dx as i16),
                self.y.saturating_add(dy as i16),
            )
        })
    }

    /// Same piece displaced by (dx, dy) and rotated `drotation` steps
    pub fn moved(&self, dx: i16, dy: i16, drotation: i8) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            rotation: rotate_index(self.kind, self.rotation, drotation),
            ..*self
        }
    }

    /// Check if all minos sit on cells the board accepts
    pub fn is_valid(&self, board: &Board) -> bool {
        self.cells().iter().all(|&(x, y)| board.accepts(x, y))
    }
}

/// Check a hypothetical placement without touching any state
///
/// The piece is displaced by (dx, dy) and rotated `drotation` steps; the result
/// is valid when every cell is between the walls, above the floor, and either
/// above the top edge or on an empty board cell.
pub fn is_valid(piece: &Tetromino, board: &Board, dx: i16, dy: i16, drotation: i8) -> bool {
    piece.moved(dx, dy, drotation).is_valid(board)
}

/// Engine lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Phase {
    Spawning,
    Active,
    Locking,
    Clearing,
    GameOver,
}

/// What happened when the last piece locked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    /// Row indices before removal, top to bottom
    pub cleared_rows: Vec<usize>,
    pub score_gained: u32,
    /// The lock ended the game (overflow, top-out or blocked spawn)
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    board: Board,
    active: Option<Tetromino>,
    /// On-deck piece; becomes active at the next spawn
    next: (PieceKind, Color),
    generator: PieceGenerator,
    phase: Phase,
    score: u32,
    lines: u32,
    pieces_locked: u32,
    /// Incremented by every reset
    episode_id: u32,
    fall_timer_ms: u32,
    play_ms: u64,
    last_event: Option<LockEvent>,
}

/// Start a game on an empty `width` x `height` board with default settings
pub fn spawn_game(width: u8, height: u8) -> Result<GameState, ConfigError> {
    GameState::new(EngineConfig::with_size(width, height))
}

impl GameState {
    /// Validate the config and start a game on an empty board
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::empty(config.width, config.height);
        Ok(Self::start(config, board))
    }

    /// Start a game on a pre-filled board
    ///
    /// Spawn checks run against the supplied board, so a board that already
    /// has a locked cell in the top-out rows starts in [`Phase::GameOver`].
    /// A board with a full row is rejected: rows only clear when a lock
    /// completes them.
    pub fn with_board(config: EngineConfig, board: Board) -> Result<Self, ConfigError> {
        config.validate()?;
        if (board.width(), board.height()) != (config.width, config.height) {
            return Err(ConfigError::BoardMismatch {
                expected: (config.width, config.height),
                found: (board.width(), board.height()),
            });
        }
        if let Some(&row) = board.full_rows().first() {
            return Err(ConfigError::FullRow { row });
        }
        Ok(Self::start(config, board))
    }

    /// Config must already be valid and match the board.
    fn start(config: EngineConfig, board: Board) -> Self {
        let mut generator = PieceGenerator::new(config.seed);
        let next = generator.draw();
        let mut state = Self {
            config,
            board,
            active: None,
            next,
            generator,
            phase: Phase::Spawning,
            score: 0,
            lines: 0,
            pieces_locked: 0,
            episode_id: 0,
            fall_timer_ms: 0,
            play_ms: 0,
            last_event: None,
        };
        state.spawn_piece();
        state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn play_ms(&self) -> u64 {
        self.play_ms
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    /// Kind and color of the on-deck piece
    pub fn next_piece(&self) -> (PieceKind, Color) {
        self.next
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current gravity interval
    pub fn fall_interval_ms(&self) -> u32 {
        get_fall_interval_ms(&self.config, self.play_ms)
    }

    /// Take and clear the last lock event
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Promote the on-deck piece and draw a new one
    ///
    /// Ends the game if the top-out rows already hold a locked cell or the new
    /// piece does not fit at the spawn anchor.
    fn spawn_piece(&mut self) -> bool {
        self.phase = Phase::Spawning;

        if self.board.has_locked_in_top(self.config.top_out_rows) {
            self.enter_game_over("stack reached the top-out rows");
            return false;
        }

        let (kind, color) = self.next;
        let piece = Tetromino::new(kind, color, self.config.spawn_x(), 0);
        self.next = self.generator.draw();

        if !piece.is_valid(&self.board) {
            self.enter_game_over("spawn position blocked");
            return false;
        }

        self.active = Some(piece);
        self.fall_timer_ms = 0;
        self.phase = Phase::Active;
        true
    }

    fn enter_game_over(&mut self, reason: &str) {
        self.active = None;
        self.phase = Phase::GameOver;
        info!(
            score = self.score,
            lines = self.lines,
            pieces = self.pieces_locked,
            reason,
            "game over"
        );
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i16, dy: i16) -> bool {
        self.try_transform(dx, dy, 0)
    }

    /// Try to advance the active piece one rotation state
    pub(crate) fn try_rotate(&mut self) -> bool {
        self.try_transform(0, 0, 1)
    }

    fn try_transform(&mut self, dx: i16, dy: i16, drotation: i8) -> bool {
        if self.phase != Phase::Active {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if !is_valid(&active, &self.board, dx, dy, drotation) {
            return false;
        }
        self.active = Some(active.moved(dx, dy, drotation));
        true
    }

    /// Move the active piece down one row, locking it if it cannot descend
    fn step_down(&mut self) -> bool {
        if self.phase != Phase::Active || self.active.is_none() {
            return false;
        }
        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        true
    }

    /// Write the active piece into the board, clear rows, and spawn the next piece
    fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.phase = Phase::Locking;
        let above_top = self.board.lock_cells(&active.cells(), active.color);
        self.pieces_locked = self.pieces_locked.wrapping_add(1);
        debug!(
            kind = active.kind.as_str(),
            x = active.x,
            y = active.y,
            rotation = active.rotation,
            "piece locked"
        );

        if above_top > 0 {
            self.enter_game_over("piece locked above the top edge");
            self.last_event = Some(LockEvent {
                lines_cleared: 0,
                cleared_rows: Vec::new(),
                score_gained: 0,
                game_over: true,
            });
            return;
        }

        self.phase = Phase::Clearing;
        let cleared_rows = self.board.clear_full_rows();
        let lines_cleared = cleared_rows.len() as u32;
        let score_gained = calculate_line_score(self.config.score_rule, cleared_rows.len());
        if lines_cleared > 0 {
            self.lines = self.lines.saturating_add(lines_cleared);
            self.score = self.score.saturating_add(score_gained);
            debug!(
                lines = lines_cleared,
                gained = score_gained,
                score = self.score,
                "rows cleared"
            );
        }

        self.spawn_piece();

        self.last_event = Some(LockEvent {
            lines_cleared,
            cleared_rows,
            score_gained,
            game_over: self.game_over(),
        });
    }

    /// Apply a player command
    ///
    /// Returns whether the state changed. Moves and rotations that would leave
    /// the piece invalid are discarded; a soft drop that cannot descend locks
    /// the piece instead. Nothing is accepted after game over.
    pub fn apply_command(&mut self, command: Command) -> bool {
        match command {
            Command::MoveLeft => self.try_move(-1, 0),
            Command::MoveRight => self.try_move(1, 0),
            Command::SoftDrop => self.step_down(),
            Command::Rotate => self.try_rotate(),
        }
    }

    /// Advance the gravity timer
    ///
    /// When the accumulated time exceeds the fall interval one gravity step is
    /// taken and the accumulator restarts from zero. Returns whether a step was
    /// taken.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::Active || self.active.is_none() {
            return false;
        }

        self.play_ms = self.play_ms.saturating_add(elapsed_ms as u64);
        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);

        if self.fall_timer_ms > self.fall_interval_ms() {
            self.fall_timer_ms = 0;
            return self.step_down();
        }
        false
    }

    /// Run one frame: every queued command in order, then the gravity tick
    pub fn advance<I>(&mut self, commands: I, elapsed_ms: u32) -> bool
    where
        I: IntoIterator<Item = Command>,
    {
        for command in commands {
            self.apply_command(command);
        }
        self.tick(elapsed_ms)
    }

    /// Start over from an empty board, keeping the config and piece generator
    pub fn reset(&mut self) {
        self.episode_id = self.episode_id.wrapping_add(1);
        self.board.clear();
        self.active = None;
        self.next = self.generator.draw();
        self.score = 0;
        self.lines = 0;
        self.pieces_locked = 0;
        self.fall_timer_ms = 0;
        self.play_ms = 0;
        self.last_event = None;
        info!(episode = self.episode_id, "game reset");
        self.spawn_piece();
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.board.width();
        out.height = self.board.height();
        self.board.write_grid(&mut out.grid);
        out.active = self.active.map(ActiveSnapshot::from);
        out.next = NextSnapshot::new(self.next.0, self.next.1);
        out.score = self.score;
        out.lines = self.lines;
        out.pieces_locked = self.pieces_locked;
        out.episode_id = self.episode_id;
        out.phase = self.phase;
        out.game_over = self.game_over();
    }

    /// Read-only view for renderers
    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self::start(config, Board::empty(config.width, config.height))
    }
}
