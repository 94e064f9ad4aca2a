use crate::game_state::{Phase, Tetromino};
use crate::pieces::{get_spawn_shape, PieceShape};
use crate::types::{Cell, Color, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i16,
    pub y: i16,
    /// Absolute cells; some may have negative y while the piece pokes above the top
    pub cells: [(i16, i16); 4],
    pub color: Color,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            x: value.x,
            y: value.y,
            cells: value.cells(),
            color: value.color,
        }
    }
}

/// On-deck piece as a preview shows it: rotation 0 layout, no position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NextSnapshot {
    pub kind: PieceKind,
    pub layout: PieceShape,
    pub color: Color,
}

impl NextSnapshot {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Self {
            kind,
            layout: get_spawn_shape(kind),
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// `height` rows of `width` cells, top row first
    pub grid: Vec<Vec<Cell>>,
    pub active: Option<ActiveSnapshot>,
    pub next: NextSnapshot,
    pub score: u32,
    pub lines: u32,
    pub pieces_locked: u32,
    pub episode_id: u32,
    pub phase: Phase,
    pub game_over: bool,
}

impl GameSnapshot {
    /// Cell at (x, y) including the active piece, as a renderer would draw it
    pub fn cell_at(&self, x: i16, y: i16) -> Cell {
        if let Some(active) = &self.active {
            if active.cells.contains(&(x, y)) {
                return Some(active.color);
            }
        }
        if x < 0 || y < 0 {
            return None;
        }
        self.grid
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
            .flatten()
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            grid: Vec::new(),
            active: None,
            next: NextSnapshot::new(PieceKind::I, Color::Cyan),
            score: 0,
            lines: 0,
            pieces_locked: 0,
            episode_id: 0,
            phase: Phase::Spawning,
            game_over: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::GameState;

    #[test]
    fn test_cell_at_overlays_active_piece() {
        let state = GameState::default();
        let snap = state.snapshot();
        let active = snap.active.unwrap();

        for &(x, y) in &active.cells {
            assert_eq!(snap.cell_at(x, y), Some(active.color));
        }
        assert_eq!(snap.cell_at(0, 19), None);
        assert_eq!(snap.cell_at(-1, 19), None);
    }

    #[test]
    fn test_snapshot_into_reuses_buffers() {
        let state = GameState::default();
        let mut snap = GameSnapshot::default();
        state.snapshot_into(&mut snap);
        let grid_ptr = snap.grid.as_ptr();

        state.snapshot_into(&mut snap);

        assert_eq!(snap.grid.as_ptr(), grid_ptr);
        assert_eq!(snap, state.snapshot());
    }
}
