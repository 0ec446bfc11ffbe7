//! Persistence through an opaque key-value store.
//!
//! The engine only reads and writes JSON blobs under three keys. Where the
//! blobs end up is the host's business: [`MemoryStore`] keeps them in a map,
//! [`FileStore`] writes one file per key.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::warn;

use crate::quiz_engine::{
    error::Result,
    models::{Progress, Statistics},
};

pub const PROGRESS_KEY: &str = "progress";
pub const STATS_KEY: &str = "stats";
pub const TUTORIAL_KEY: &str = "tutorial_shown";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside `dir`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir`, creating it if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(FileStore { dir })
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::write(self.path(key), value)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path(key)) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// Typed access to the quiz records kept in a [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct QuizStore<S> {
    inner: S,
}

impl<S: KeyValueStore> QuizStore<S> {
    pub fn new(inner: S) -> Self {
        QuizStore { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Saved statistics; absent or unreadable records yield zeros.
    pub fn load_statistics(&self) -> Statistics {
        match self.inner.get(STATS_KEY) {
            Ok(Some(text)) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!("discarding unreadable statistics: {e}");
                Statistics::default()
            }),
            Ok(None) => Statistics::default(),
            Err(e) => {
                warn!("could not read statistics: {e}");
                Statistics::default()
            }
        }
    }

    pub fn save_statistics(&mut self, stats: &Statistics) -> Result<()> {
        let text = serde_json::to_string(stats)?;
        self.inner.set(STATS_KEY, &text)
    }

    /// Last saved progress snapshot, if any.
    pub fn load_progress(&self) -> Result<Option<Progress>> {
        match self.inner.get(PROGRESS_KEY)? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    pub fn save_progress(&mut self, progress: &Progress) -> Result<()> {
        let text = serde_json::to_string(progress)?;
        self.inner.set(PROGRESS_KEY, &text)
    }

    pub fn tutorial_shown(&self) -> bool {
        matches!(self.inner.get(TUTORIAL_KEY), Ok(Some(_)))
    }

    pub fn mark_tutorial_shown(&mut self) -> Result<()> {
        self.inner.set(TUTORIAL_KEY, "true")
    }

    /// Remove progress, statistics and the tutorial flag.
    pub fn clear_all(&mut self) -> Result<()> {
        for key in [PROGRESS_KEY, STATS_KEY, TUTORIAL_KEY] {
            self.inner.remove(key)?;
        }
        Ok(())
    }
}
