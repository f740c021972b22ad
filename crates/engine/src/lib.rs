//! Quiz engine: drives the core session for a renderer.
//!
//! Holds everything with side effects that the core leaves out: loading the
//! catalog, reading configuration, persisting player data and logging.

pub mod config;
pub mod data;
pub mod notify;
pub mod quiz;
pub mod store;

pub use tui_geoquiz_core as core;
pub use tui_geoquiz_types as types;

pub use config::QuizConfig;
pub use data::{bundled_catalog, load_catalog};
pub use notify::Notifier;
pub use quiz::Quiz;
pub use store::{JsonStore, MemoryStore, Store, StoreError};
