//! Terminal geography quiz (workspace facade crate).
//!
//! Re-exports the `tui_geoquiz::{core,engine,input,term,types}` API while the
//! implementation lives in dedicated crates under `crates/`.

pub use tui_geoquiz_core as core;
pub use tui_geoquiz_engine as engine;
pub use tui_geoquiz_input as input;
pub use tui_geoquiz_term as term;
pub use tui_geoquiz_types as types;
