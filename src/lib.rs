//! Cube Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `cube_tetris::{core, input, term, types}`
//! and adds the runner's configuration layer.

pub mod config;

pub use cube_tetris_core as core;
pub use cube_tetris_input as input;
pub use cube_tetris_term as term;
pub use cube_tetris_types as types;

pub use config::{ConfigError, RunnerConfig};
