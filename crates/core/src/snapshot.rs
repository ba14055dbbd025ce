use crate::pieces::Piece;
use crate::types::{GamePhase, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub col: i8,
    pub row: i8,
    /// Absolute `(row, col)` of each mino
    pub cells: [(i8, i8); 4],
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation,
            col: value.col,
            row: value.row,
            cells: value.positions(),
        }
    }
}

impl ActiveSnapshot {
    /// Mino positions with the anchor moved to `row`
    pub fn cells_at_row(&self, row: i8) -> [(i8, i8); 4] {
        let drow = row - self.row;
        self.cells.map(|(r, c)| (r + drow, c))
    }
}

/// Plain-data view of a session for renderers.
///
/// `board[row][col]` holds a piece code (see `PieceKind::code`) or 0, with
/// row 0 at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_row: Option<i8>,
    pub next: Option<PieceKind>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub phase: GamePhase,
    pub episode_id: u32,
    pub seed: u32,
    pub score: u32,
    pub lines: u32,
    pub last_lines_cleared: u32,
    pub pieces_locked: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_row: None,
            next: None,
            hold: None,
            can_hold: true,
            phase: GamePhase::AwaitingStart,
            episode_id: 0,
            seed: 0,
            score: 0,
            lines: 0,
            last_lines_cleared: 0,
            pieces_locked: 0,
        }
    }
}
