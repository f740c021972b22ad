//! Persistence of the two player blobs.
//!
//! Progression and settings are stored as independent JSON documents. A
//! missing blob reads as `None`; the caller falls back to defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::types::{ProgressionData, Settings};

pub const PROGRESS_FILE: &str = "progress.json";
pub const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed {what}: {source}")]
    Corrupt {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Key-value persistence for progression and settings.
pub trait Store {
    fn load_progress(&self) -> Result<Option<ProgressionData>, StoreError>;
    fn save_progress(&mut self, data: &ProgressionData) -> Result<(), StoreError>;
    fn load_settings(&self) -> Result<Option<Settings>, StoreError>;
    fn save_settings(&mut self, settings: &Settings) -> Result<(), StoreError>;
}

/// Store backed by JSON files in one directory.
#[derive(Debug, Clone)]
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read<T: DeserializeOwned>(&self, file: &'static str) -> Result<Option<T>, StoreError> {
        let path = self.dir.join(file);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::Corrupt { what: file, source })
    }

    /// Write via a sibling temp file and rename, so a crash never leaves a torn blob.
    fn write<T: Serialize>(&self, file: &'static str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let json = serde_json::to_string_pretty(value)
            .map_err(|source| StoreError::Corrupt { what: file, source })?;
        let path = self.dir.join(file);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, json).map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &path).map_err(|source| StoreError::Io { path, source })
    }
}

impl Store for JsonStore {
    fn load_progress(&self) -> Result<Option<ProgressionData>, StoreError> {
        self.read(PROGRESS_FILE)
    }

    fn save_progress(&mut self, data: &ProgressionData) -> Result<(), StoreError> {
        self.write(PROGRESS_FILE, data)
    }

    fn load_settings(&self) -> Result<Option<Settings>, StoreError> {
        self.read(SETTINGS_FILE)
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), StoreError> {
        self.write(SETTINGS_FILE, settings)
    }
}

/// In-memory store; counts writes so callers can assert on flush behaviour.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub progress: Option<ProgressionData>,
    pub settings: Option<Settings>,
    pub progress_writes: u32,
    pub settings_writes: u32,
}

impl Store for MemoryStore {
    fn load_progress(&self) -> Result<Option<ProgressionData>, StoreError> {
        Ok(self.progress.clone())
    }

    fn save_progress(&mut self, data: &ProgressionData) -> Result<(), StoreError> {
        self.progress = Some(data.clone());
        self.progress_writes += 1;
        Ok(())
    }

    fn load_settings(&self) -> Result<Option<Settings>, StoreError> {
        Ok(self.settings.clone())
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), StoreError> {
        self.settings = Some(settings.clone());
        self.settings_writes += 1;
        Ok(())
    }
}

impl<S: Store + ?Sized> Store for &mut S {
    fn load_progress(&self) -> Result<Option<ProgressionData>, StoreError> {
        (**self).load_progress()
    }

    fn save_progress(&mut self, data: &ProgressionData) -> Result<(), StoreError> {
        (**self).save_progress(data)
    }

    fn load_settings(&self) -> Result<Option<Settings>, StoreError> {
        (**self).load_settings()
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), StoreError> {
        (**self).save_settings(settings)
    }
}
