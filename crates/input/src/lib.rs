//! Terminal input.
//!
//! Maps `crossterm` key events to [`crate::types::GameAction`]s. Every press is
//! one discrete action; there is no auto-repeat handling here, the terminal's
//! own key repeat is passed through as further presses.

pub mod map;

pub use cube_tetris_types as types;

pub use map::{handle_key_event, map_key, resolve_for_phase, should_quit};
