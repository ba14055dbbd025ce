//! Terminal front-end.
//!
//! A small, game-oriented rendering layer: [`GameView`] draws a
//! [`core::GameSnapshot`](crate::core::GameSnapshot) into a [`FrameBuffer`] of
//! styled characters, and [`TerminalRenderer`] flushes that buffer to the
//! terminal through crossterm, rewriting only the screen rows that changed.
//!
//! The view only reads snapshots, so it can be tested without a terminal.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use cube_tetris_core as core;
pub use cube_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
