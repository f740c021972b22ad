//! Core quiz logic - pure, deterministic, and testable
//!
//! This crate holds the quiz rules and session state. It has no dependency on
//! the terminal, the filesystem or the clock: time arrives as elapsed
//! milliseconds and persistence is the engine's job.
//!
//! # Module Structure
//!
//! - [`catalog`]: validated country list and lookups
//! - [`rng`]: seeded RNG and the no-repeat country deck
//! - [`question`]: option generation and per-mode presentation
//! - [`timer`]: per-question countdown
//! - [`scoring`]: XP awards, level thresholds, accuracy
//! - [`progression`]: cumulative stats across sessions
//! - [`badges`]: achievement catalog and unlock evaluation
//! - [`session`]: the quiz state machine
//! - [`snapshot`]: flat render state
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tui_geoquiz_core::catalog::Catalog;
//! use tui_geoquiz_core::QuizSession;
//! use tui_geoquiz_types::{Country, Difficulty, ProgressionData, QuizMode, Region};
//!
//! let countries = ["Japan", "France", "Kenya", "Peru"]
//!     .iter()
//!     .map(|name| Country {
//!         name: name.to_string(),
//!         region: Region::Asia,
//!         capital: String::new(),
//!         code: String::new(),
//!         initial: String::new(),
//!         description: String::new(),
//!         fun_fact: String::new(),
//!         population: None,
//!         language: None,
//!         currency: None,
//!         history: None,
//!         geography: None,
//!         culture: None,
//!     })
//!     .collect();
//! let catalog = Arc::new(Catalog::new(countries).unwrap());
//!
//! let mut progress = ProgressionData::default();
//! let mut quiz = QuizSession::new(catalog, 12345);
//! quiz.start(Difficulty::Easy, QuizMode::Flag, false);
//!
//! let answer = quiz.current_country().unwrap();
//! let outcome = quiz.submit(answer, &mut progress).unwrap();
//! assert!(outcome.is_correct());
//! assert_eq!(progress.xp, 10);
//! ```

pub mod badges;
pub mod catalog;
pub mod progression;
pub mod question;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod snapshot;
pub mod timer;

pub use tui_geoquiz_types as types;

// Re-export commonly used types for convenience
pub use badges::{Badge, SessionStats, BADGES};
pub use catalog::{flag_emoji, Catalog, CatalogError};
pub use question::Question;
pub use rng::{CountryDeck, SimpleRng};
pub use session::QuizSession;
pub use snapshot::QuizSnapshot;
pub use timer::{Countdown, CountdownStatus};
