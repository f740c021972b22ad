//! Runtime configuration.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// Where the quiz keeps its files and how it seeds itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizConfig {
    /// Directory for `progress.json`, `settings.json` and the log file
    pub data_dir: PathBuf,
    pub seed: u32,
    /// Custom catalog file; the bundled catalog is used when unset
    pub catalog_path: Option<PathBuf>,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            seed: clock_seed(),
            catalog_path: None,
        }
    }
}

impl QuizConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let data_dir = env::var("GEOQUIZ_DATA_DIR")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        let seed = env::var("GEOQUIZ_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let catalog_path = env::var("GEOQUIZ_CATALOG")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            data_dir,
            seed,
            catalog_path,
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("geoquiz.log")
    }
}

/// `<platform data dir>/tui-geoquiz`, or `./.tui-geoquiz` when there is none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("tui-geoquiz"))
        .unwrap_or_else(|| PathBuf::from(".tui-geoquiz"))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(0x5EED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_data_dir_is_named() {
        assert!(default_data_dir().ends_with("tui-geoquiz") || default_data_dir().ends_with(".tui-geoquiz"));
    }

    #[test]
    fn test_log_path_lives_in_data_dir() {
        let config = QuizConfig {
            data_dir: PathBuf::from("/tmp/gq"),
            seed: 1,
            catalog_path: None,
        };
        assert_eq!(config.log_path(), PathBuf::from("/tmp/gq/geoquiz.log"));
    }
}
