//! Terminal front end for the quiz.
//!
//! A small game-oriented rendering layer: screens are drawn into a plain
//! framebuffer which is then diffed and flushed to the terminal. No widget
//! toolkit is involved.
//!
//! - [`fb`]: framebuffer, styles and wide-glyph handling
//! - [`renderer`]: crossterm output with per-run diffing
//! - [`screen`]: menu/learn/settings state and toasts
//! - [`view`]: pure rendering of every screen

pub mod fb;
pub mod renderer;
pub mod screen;
pub mod view;

pub use tui_geoquiz_core as core;
pub use tui_geoquiz_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use renderer::TerminalRenderer;
pub use screen::{AppState, LearnState, MenuItem, MenuState, Screen, SettingsItem, SettingsState, Toasts};
pub use view::{QuizView, ViewContext, Viewport};
