//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into play inputs and menu navigation, and
//! play inputs into [`crate::types::QuizCommand`]s. Independent of any UI
//! framework.

pub mod map;

pub use tui_geoquiz_types as types;

pub use map::{is_interrupt, nav_input, play_input, should_quit, to_command, NavInput, PlayInput};
