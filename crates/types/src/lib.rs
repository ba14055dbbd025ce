//! Shared types and constants for the puzzle core and its front-ends.
//!
//! Everything in this crate is plain data with no dependencies, so it can be
//! used by the core rules, the terminal view and the input mapping alike.
//!
//! # Board Coordinates
//!
//! - **Width**: 10 columns, column 0 is the left wall
//! - **Height**: 20 rows, row 0 is the *bottom* row
//!
//! Pieces spawn near the top (row 19) and fall toward row 0.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Runner loop interval (~60 FPS) |
//! | `GRAVITY_MS` | 1000 | Default gravity interval (one row per second) |
//!
//! # Examples
//!
//! ```
//! use cube_tetris_types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_code(PieceKind::T.code()).unwrap();
//! assert_eq!(piece.as_str(), "T");
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::from_index(3), Rotation::West);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Total number of cells on the board
pub const BOARD_CELLS: usize = BOARD_WIDTH as usize * BOARD_HEIGHT as usize;

/// Runner loop interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Default gravity interval (1000ms = one row per second)
pub const GRAVITY_MS: u32 = 1000;

/// Line clear scoring table, indexed by rows cleared in a single lock.
///
/// Clears of more than four rows are not in the table and score nothing.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven piece shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds, in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Uppercase letter, as used in log output
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }

    /// Non-zero cell code used in snapshot grids (0 means empty).
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::T),
            7 => Some(PieceKind::Z),
            _ => None,
        }
    }
}

/// Rotation states, indexed 0..=3 in clockwise order.
///
/// - **North**: spawn orientation
/// - **East**: one clockwise quarter turn
/// - **South**: half turn
/// - **West**: one counter-clockwise quarter turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use cube_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate counter-clockwise (-90°), i.e. three clockwise steps
    ///
    /// # Examples
    ///
    /// ```
    /// use cube_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Clockwise index: North=0, East=1, South=2, West=3
    pub fn index(&self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Build from a clockwise index (taken modulo 4)
    pub fn from_index(index: u8) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

}

/// Discrete inputs accepted by the game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// Drop piece one row, locking it if it cannot fall
    SoftDrop,
    /// Drop piece to its lowest legal row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Hold current piece (once per piece)
    Hold,
    /// Start signal (only meaningful while awaiting start)
    Start,
    /// Discard the current game and start a fresh one
    Reset,
}

/// Top-level session state.
///
/// `AwaitingStart → Playing → GameOver`; a reset from any phase returns to
/// `AwaitingStart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GamePhase {
    #[default]
    AwaitingStart,
    Playing,
    GameOver,
}

/// Opaque identifier for one locked block unit.
///
/// The core hands these out when a piece locks so a presentation layer can
/// attach its own visual object to each cell and remove or move it when rows
/// clear. The core never interprets the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockHandle(pub u32);

/// Occupancy of one board cell: `None` when empty, otherwise the kind of
/// piece that locked there.
pub type Cell = Option<PieceKind>;
