//! Board module - owns the grid of locked cells
//!
//! The board is a `width` x `height` grid where each cell is empty or holds the
//! color of the piece that locked there. Storage is a flat row-major `Vec`, one
//! per board instance.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom;
//! row 0 is the topmost row.

use crate::config::{ConfigError, EngineConfig};
use crate::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

/// The game board - flat row-major storage of locked cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u8,
    height: u8,
    /// Row-major cells (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create an empty board, validating the dimensions like [`EngineConfig`] does
    pub fn new(width: u8, height: u8) -> Result<Self, ConfigError> {
        EngineConfig::with_size(width, height).validate()?;
        Ok(Self::empty(width, height))
    }

    /// Caller has already validated the dimensions.
    pub(crate) fn empty(width: u8, height: u8) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        }
    }

    /// Build a board from rows of text, top row first
    ///
    /// `.` is an empty cell; any other character locks a cell with `color`.
    /// Handy for setting up puzzles and tests.
    ///
    /// ```
    /// use blockfall_core::Board;
    /// use blockfall_core::types::Color;
    ///
    /// let board = Board::from_rows(
    ///     &[
    ///         "....",
    ///         "....",
    ///         "##..",
    ///         "####",
    ///     ],
    ///     Color::Red,
    /// )
    /// .unwrap();
    /// assert!(board.is_row_full(3));
    /// assert_eq!(board.get(1, 2), Some(Some(Color::Red)));
    /// ```
    pub fn from_rows(rows: &[&str], color: Color) -> Result<Self, ConfigError> {
        let height = u8::try_from(rows.len()).unwrap_or(u8::MAX);
        let width = rows
            .first()
            .map(|row| u8::try_from(row.chars().count()).unwrap_or(u8::MAX))
            .unwrap_or(0);
        let mut board = Self::new(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width as usize {
                return Err(ConfigError::BoardMismatch {
                    expected: (width, height),
                    found: (u8::try_from(found).unwrap_or(u8::MAX), height),
                });
            }
            for (x, ch) in row.chars().enumerate() {
                if ch != '.' {
                    board.set(x as i16, y as i16, Some(color));
                }
            }
        }

        Ok(board)
    }

    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i16, y: i16) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i16, y: i16, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i16, y: i16) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i16, y: i16) -> bool {
        x < 0 || x >= self.width as i16 || y < 0 || y >= self.height as i16
    }

    /// Check if a piece cell may sit at (x, y)
    ///
    /// The cell must be between the walls and above the floor. Above the top
    /// edge (negative y) is open space; inside the grid the cell must be empty.
    pub fn accepts(&self, x: i16, y: i16) -> bool {
        if x < 0 || x >= self.width as i16 || y >= self.height as i16 {
            return false;
        }
        y < 0 || !self.is_occupied(x, y)
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width as usize;
        &self.cells[start..start + self.width as usize]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Rows that are completely filled, top to bottom
    pub fn full_rows(&self) -> Vec<usize> {
        (0..self.height as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Remove every full row, letting the rows above fall into the gaps
    ///
    /// Returns the indices the cleared rows had before removal, top to bottom.
    /// Rows below the lowest cleared row are untouched; each surviving row above
    /// it moves down by the number of cleared rows beneath it, and the top is
    /// refilled with empty rows.
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        let width = self.width as usize;
        let height = self.height as usize;
        let mut cleared = Vec::new();
        let mut write_y = height;

        // Two-pointer compaction, bottom up
        for read_y in (0..height).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        cleared.reverse();
        cleared
    }

    /// Write piece cells into the grid with the given color
    ///
    /// Cells above the top edge cannot be stored; the count of such cells is
    /// returned so the caller can treat it as an overflow. Cells below the
    /// floor or outside the walls are never produced by a valid piece.
    pub fn lock_cells(&mut self, cells: &[(i16, i16)], color: Color) -> usize {
        let mut above_top = 0;
        for &(x, y) in cells {
            if y < 0 {
                above_top += 1;
                continue;
            }
            let stored = self.set(x, y, Some(color));
            debug_assert!(stored, "locked cell ({x}, {y}) out of bounds");
        }
        above_top
    }

    /// True if any locked cell lies in the top `rows` rows
    pub fn has_locked_in_top(&self, rows: u8) -> bool {
        let rows = rows.min(self.height) as usize;
        self.cells[..rows * self.width as usize]
            .iter()
            .any(|cell| cell.is_some())
    }

    /// Number of locked cells on the board
    pub fn locked_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }

    /// Copy the grid into `out` as `height` rows of `width` cells, reusing its allocations
    pub fn write_grid(&self, out: &mut Vec<Vec<Cell>>) {
        out.resize_with(self.height as usize, Vec::new);
        for (dst, src) in out.iter_mut().zip(self.rows()) {
            dst.clear();
            dst.extend_from_slice(src);
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_row(board: &mut Board, y: i16, color: Color) {
        for x in 0..board.width() as i16 {
            board.set(x, y, Some(color));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::default();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_new_validates_dimensions() {
        assert!(Board::new(0, 20).is_err());
        assert!(Board::new(10, 0).is_err());
        let board = Board::new(6, 12).unwrap();
        assert_eq!(board.cells().len(), 72);
    }

    #[test]
    fn test_boards_do_not_share_storage() {
        let mut a = Board::default();
        let b = Board::default();
        a.set(0, 19, Some(Color::Red));
        assert!(a.is_occupied(0, 19));
        assert!(!b.is_occupied(0, 19));
    }

    #[test]
    fn test_accepts_rules() {
        let mut board = Board::default();
        board.set(4, 10, Some(Color::Blue));

        assert!(board.accepts(0, 0));
        assert!(board.accepts(4, -3), "above the top edge is open");
        assert!(!board.accepts(4, 10));
        assert!(!board.accepts(-1, -3), "walls extend above the top");
        assert!(!board.accepts(10, 5));
        assert!(!board.accepts(3, 20), "floor");
    }

    #[test]
    fn test_clear_single_row_shifts_above() {
        let mut board = Board::default();
        filled_row(&mut board, 19, Color::Cyan);
        board.set(2, 18, Some(Color::Red));
        board.set(7, 0, Some(Color::Green));

        let cleared = board.clear_full_rows();

        assert_eq!(cleared, vec![19]);
        assert_eq!(board.get(2, 19), Some(Some(Color::Red)));
        assert_eq!(board.get(7, 1), Some(Some(Color::Green)));
        assert_eq!(board.get(7, 0), Some(None));
        assert_eq!(board.locked_count(), 2);
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut board = Board::default();
        filled_row(&mut board, 2, Color::Cyan);
        filled_row(&mut board, 5, Color::Cyan);
        board.set(0, 1, Some(Color::Red)); // above both
        board.set(1, 4, Some(Color::Blue)); // between
        board.set(2, 6, Some(Color::Green)); // below both

        let cleared = board.clear_full_rows();

        assert_eq!(cleared, vec![2, 5]);
        assert_eq!(board.get(0, 3), Some(Some(Color::Red)));
        assert_eq!(board.get(1, 5), Some(Some(Color::Blue)));
        assert_eq!(board.get(2, 6), Some(Some(Color::Green)));
        assert_eq!(board.locked_count(), 3);
        assert!(!board.has_locked_in_top(2));
    }

    #[test]
    fn test_clear_without_full_rows_is_noop() {
        let mut board = Board::default();
        board.set(3, 19, Some(Color::Red));
        let before = board.clone();

        assert!(board.clear_full_rows().is_empty());
        assert_eq!(board, before);
    }

    #[test]
    fn test_lock_cells_reports_overflow() {
        let mut board = Board::default();
        let above = board.lock_cells(&[(4, -1), (4, 0), (5, 0), (6, 0)], Color::Purple);
        assert_eq!(above, 1);
        assert_eq!(board.locked_count(), 3);
        assert!(board.has_locked_in_top(1));
    }

    #[test]
    fn test_write_grid_reuses_buffer() {
        let mut board = Board::new(4, 5).unwrap();
        board.set(1, 2, Some(Color::Orange));

        let mut grid = vec![vec![Some(Color::Red); 9]; 30];
        board.write_grid(&mut grid);

        assert_eq!(grid.len(), 5);
        assert!(grid.iter().all(|row| row.len() == 4));
        assert_eq!(grid[2][1], Some(Color::Orange));
        assert_eq!(grid.iter().flatten().filter(|c| c.is_some()).count(), 1);
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let result = Board::from_rows(&["....", "...", "....", "...."], Color::Red);
        assert!(matches!(result, Err(ConfigError::BoardMismatch { .. })));
    }
}
