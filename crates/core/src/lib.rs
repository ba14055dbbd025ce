//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the game and nothing else. It has no
//! dependencies on terminals, input devices or clocks: callers feed it
//! discrete actions and gravity ticks and read state back out.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid of locked blocks, row clearing and collapse
//! - [`pieces`]: shape catalog, spawn geometry and quarter-turn maths
//! - [`kicks`]: SRS kick tables and the rotate-with-kicks resolver
//! - [`rng`]: 7-bag random piece generation
//! - [`scoring`]: points per line clear
//! - [`game_state`]: a complete session (spawn, gravity, hold, lock, game over)
//! - [`snapshot`]: plain-data view for renderers
//!
//! # Coordinates
//!
//! Row 0 is the bottom of the board and rows grow upward; column 0 is the
//! left edge. Board queries take `(row, col)`.
//!
//! # Example
//!
//! ```
//! use cube_tetris_core::GameState;
//! use cube_tetris_core::types::{GameAction, GamePhase};
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.phase(), GamePhase::AwaitingStart);
//!
//! game.apply_action(GameAction::Start);
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.pieces_locked(), 1);
//! assert_eq!(game.board().filled_count(), 4);
//! ```
//!
//! # Timing
//!
//! Gravity moves the active piece down one row per interval (1000 ms by
//! default). Call [`GameState::tick`](game_state::GameState::tick) with the
//! elapsed time each frame, or drive
//! [`GameState::on_gravity_tick`](game_state::GameState::on_gravity_tick)
//! from an external timer.

pub mod board;
pub mod game_state;
pub mod kicks;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use cube_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Block, Board, ClearedRows};
pub use game_state::{GameConfig, GameState, LockEvent};
pub use kicks::try_rotate;
pub use pieces::{get_shape, piece_def, Piece};
pub use rng::{PieceBag, SimpleRng};
pub use scoring::{apply_line_score, calculate_line_score};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
