//! Board module - manages the game grid
//!
//! The board is a 10x20 grid stored as flat arrays for cache locality and
//! zero allocation. Coordinates are `(row, col)`: row 0 is the bottom row and
//! rows grow upward, col 0 is the left wall.
//!
//! Occupancy and presentation handles live in two parallel arrays. The rules
//! only ever read occupancy; handles ride along so a renderer can find the
//! visual object that belongs to each cell.

use arrayvec::ArrayVec;

use crate::types::{BlockHandle, Cell, PieceKind, BOARD_CELLS, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Payload written into a cell when a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub kind: PieceKind,
    pub handle: BlockHandle,
}

/// Result of a full-row sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearedRows {
    /// Row indices in the order they were cleared. Because the same index is
    /// re-checked after a collapse, a two-row clear at the bottom reports
    /// `[0, 0]`.
    pub rows: ArrayVec<u8, HEIGHT>,
    /// Handles of every removed block, in clear order.
    pub removed: ArrayVec<BlockHandle, BOARD_CELLS>,
}

impl ClearedRows {
    pub fn count(&self) -> usize {
        self.rows.len()
    }
}

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Occupancy, row-major (row * WIDTH + col), row 0 first
    cells: [Cell; BOARD_CELLS],
    /// Presentation handles, same indexing as `cells`
    handles: [Option<BlockHandle>; BOARD_CELLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_CELLS],
            handles: [None; BOARD_CELLS],
        }
    }

    #[inline(always)]
    fn index(row: i8, col: i8) -> Option<usize> {
        if row < 0 || row >= BOARD_HEIGHT as i8 || col < 0 || col >= BOARD_WIDTH as i8 {
            return None;
        }
        Some((row as usize) * WIDTH + (col as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at `(row, col)`, or `None` if out of bounds
    pub fn get(&self, row: i8, col: i8) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Presentation handle stored at `(row, col)`, if any
    pub fn handle(&self, row: i8, col: i8) -> Option<BlockHandle> {
        Self::index(row, col).and_then(|idx| self.handles[idx])
    }

    /// True when the cell is filled **or** lies outside the board.
    ///
    /// Treating the outside as solid lets movement and rotation checks use a
    /// single query for walls, floor and stacked blocks.
    pub fn is_occupied(&self, row: i8, col: i8) -> bool {
        match Self::index(row, col) {
            Some(idx) => self.cells[idx].is_some(),
            None => true,
        }
    }

    /// Inverse of [`Board::is_occupied`]
    pub fn is_free(&self, row: i8, col: i8) -> bool {
        !self.is_occupied(row, col)
    }

    pub fn is_out_of_bounds(&self, row: i8, col: i8) -> bool {
        Self::index(row, col).is_none()
    }

    /// Store a block at `(row, col)`.
    /// Returns false (and does nothing) if out of bounds.
    pub fn set(&mut self, row: i8, col: i8, block: Block) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = Some(block.kind);
                self.handles[idx] = Some(block.handle);
                true
            }
            None => false,
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= HEIGHT {
            return false;
        }
        let start = row * WIDTH;
        self.cells[start..start + WIDTH].iter().all(|cell| cell.is_some())
    }

    /// Empty every cell in `row` and return the handles that were removed
    pub fn clear_row(&mut self, row: usize) -> ArrayVec<BlockHandle, WIDTH> {
        let mut removed = ArrayVec::new();
        if row >= HEIGHT {
            return removed;
        }

        let start = row * WIDTH;
        for idx in start..start + WIDTH {
            self.cells[idx] = None;
            if let Some(handle) = self.handles[idx].take() {
                removed.push(handle);
            }
        }
        removed
    }

    /// Shift every row above `row` down by one (row r takes row r+1) and
    /// empty the top row. The contents of `row` itself are overwritten.
    pub fn collapse_above(&mut self, row: usize) {
        if row >= HEIGHT {
            return;
        }

        // copy_within handles the overlapping ranges
        let src = (row + 1) * WIDTH;
        let dst = row * WIDTH;
        let end = BOARD_CELLS;
        self.cells.copy_within(src..end, dst);
        self.handles.copy_within(src..end, dst);

        let top = (HEIGHT - 1) * WIDTH;
        self.cells[top..].fill(None);
        self.handles[top..].fill(None);
    }

    /// Clear all full rows, bottom to top.
    ///
    /// After a row is cleared and the stack collapses, the same row index is
    /// examined again since the row that fell into it may also be full.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut out = ClearedRows::default();
        let mut row = 0usize;

        while row < HEIGHT {
            if self.is_row_full(row) {
                out.removed.extend(self.clear_row(row));
                self.collapse_above(row);
                out.rows.push(row as u8);
            } else {
                row += 1;
            }
        }

        out
    }

    /// Number of filled cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the occupancy array (row 0 first)
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Write kind codes into a row-major grid (row 0 = bottom), 0 for empty.
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (row, dst) in out.iter_mut().enumerate() {
            let start = row * WIDTH;
            for (col, cell) in self.cells[start..start + WIDTH].iter().enumerate() {
                dst[col] = cell.map(|kind| kind.code()).unwrap_or(0);
            }
        }
    }

    /// Empty every cell, returning the handles of the blocks that were there
    /// in row-major order from the bottom row.
    pub fn reset(&mut self) -> ArrayVec<BlockHandle, BOARD_CELLS> {
        let removed = self.handles.iter().flatten().copied().collect();
        self.cells.fill(None);
        self.handles.fill(None);
        removed
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(n: u32) -> Block {
        Block {
            kind: PieceKind::I,
            handle: BlockHandle(n),
        }
    }

    fn fill_row(board: &mut Board, row: i8, first_handle: u32) {
        for col in 0..BOARD_WIDTH as i8 {
            board.set(row, col, block(first_handle + col as u32));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(0, 9), Some(9));
        assert_eq!(Board::index(1, 0), Some(10));
        assert_eq!(Board::index(19, 9), Some(199));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(0, 10), None);
        assert_eq!(Board::index(20, 0), None);
    }

    #[test]
    fn out_of_bounds_reads_as_occupied() {
        let board = Board::new();
        for row in -3..(BOARD_HEIGHT as i8 + 3) {
            for col in -3..(BOARD_WIDTH as i8 + 3) {
                let inside = (0..BOARD_HEIGHT as i8).contains(&row)
                    && (0..BOARD_WIDTH as i8).contains(&col);
                assert_eq!(board.is_occupied(row, col), !inside, "({row}, {col})");
            }
        }
    }

    #[test]
    fn set_out_of_bounds_is_noop() {
        let mut board = Board::new();
        assert!(!board.set(-1, 0, block(1)));
        assert!(!board.set(0, 10, block(1)));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn clear_row_returns_handles() {
        let mut board = Board::new();
        board.set(3, 2, block(7));
        board.set(3, 8, block(9));

        let removed = board.clear_row(3);
        assert_eq!(removed.as_slice(), &[BlockHandle(7), BlockHandle(9)]);
        assert!(!board.is_occupied(3, 2));
        assert_eq!(board.handle(3, 2), None);
    }

    #[test]
    fn collapse_moves_handles_with_cells() {
        let mut board = Board::new();
        board.set(1, 4, block(42));
        board.set(19, 0, block(5));

        board.collapse_above(0);

        assert_eq!(board.get(0, 4), Some(Some(PieceKind::I)));
        assert_eq!(board.handle(0, 4), Some(BlockHandle(42)));
        assert_eq!(board.handle(18, 0), Some(BlockHandle(5)));
        assert!(!board.is_occupied(19, 0));
    }

    #[test]
    fn stacked_full_rows_are_rechecked() {
        let mut board = Board::new();
        fill_row(&mut board, 0, 0);
        fill_row(&mut board, 1, 100);
        board.set(2, 3, block(500));

        let cleared = board.clear_full_rows();

        assert_eq!(cleared.rows.as_slice(), &[0, 0]);
        assert_eq!(cleared.removed.len(), 20);
        assert_eq!(board.handle(0, 3), Some(BlockHandle(500)));
        assert_eq!(board.filled_count(), 1);
    }

    #[test]
    fn u8_grid_uses_kind_codes() {
        let mut board = Board::new();
        board.set(
            0,
            1,
            Block {
                kind: PieceKind::T,
                handle: BlockHandle(0),
            },
        );
        let mut grid = [[0u8; WIDTH]; HEIGHT];
        board.write_u8_grid(&mut grid);
        assert_eq!(grid[0][1], PieceKind::T.code());
        assert_eq!(grid[0][0], 0);
    }
}
