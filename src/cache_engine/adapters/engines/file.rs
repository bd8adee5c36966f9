//! Filesystem-backed cache engine.

use super::{SharedClock, default_clock, expires_at, merge_settings};
use crate::cache_engine::{
    domain::{EngineConfig, EngineSettings},
    ports::{CacheEngine, CacheEngineError, CacheEngineResult},
};
use camino::Utf8PathBuf;
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io;
use tracing::warn;

/// Option naming the cache directory.
const PATH_KEY: &str = "path";

#[derive(Debug, Serialize, Deserialize)]
struct FileRecord {
    expires_at: i64,
    value: Value,
}

/// Outcome of reading one cache file.
enum StoredRecord {
    Missing,
    /// The file exists but does not hold a record; treated as expired.
    Corrupt,
    Found(FileRecord),
}

/// Cache engine storing one JSON document per key.
///
/// Requires a `path` option. The directory is created on initialisation
/// when missing. File names are the prefixed key with every character
/// outside `[A-Za-z0-9_-]` replaced by `_`.
pub struct FileEngine {
    config: EngineConfig,
    settings: EngineSettings,
    dir: Option<Dir>,
    clock: SharedClock,
}

impl FileEngine {
    /// Implementation name reported in diagnostics.
    pub const KIND: &'static str = "FileEngine";

    /// Creates an uninitialised engine using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(default_clock())
    }

    /// Creates an uninitialised engine using `clock` for expiry decisions.
    #[must_use]
    pub fn with_clock(clock: SharedClock) -> Self {
        Self {
            config: EngineSettings::defaults_config(),
            settings: EngineSettings::default(),
            dir: None,
            clock,
        }
    }

    fn dir(&self) -> CacheEngineResult<&Dir> {
        self.dir
            .as_ref()
            .ok_or_else(|| CacheEngineError::NotInitialised(Self::KIND.to_owned()))
    }

    fn now(&self) -> i64 {
        self.clock.utc().timestamp()
    }

    fn file_name(&self, key: &str) -> String {
        format!("{}{key}", self.settings.prefix)
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    fn read_record(dir: &Dir, file_name: &str) -> CacheEngineResult<StoredRecord> {
        let bytes = match dir.read(file_name) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(StoredRecord::Missing),
            Err(err) => return Err(CacheEngineError::storage(err)),
        };
        match serde_json::from_slice(&bytes) {
            Ok(record) => Ok(StoredRecord::Found(record)),
            Err(err) => {
                warn!(file = file_name, error = %err, "discarding unreadable cache record");
                Ok(StoredRecord::Corrupt)
            }
        }
    }

    fn remove_file(dir: &Dir, file_name: &str) -> CacheEngineResult<bool> {
        match dir.remove_file(file_name) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(CacheEngineError::storage(err)),
        }
    }

    fn cached_file_names(&self, dir: &Dir) -> CacheEngineResult<Vec<String>> {
        let prefix = self.file_name("");
        let mut names = Vec::new();
        for item in dir.entries().map_err(CacheEngineError::storage)? {
            let entry = item.map_err(CacheEngineError::storage)?;
            let is_file = entry
                .file_type()
                .map_err(CacheEngineError::storage)?
                .is_file();
            let name = entry.file_name().map_err(CacheEngineError::storage)?;
            if is_file && name.starts_with(&prefix) {
                names.push(name);
            }
        }
        Ok(names)
    }
}

impl Default for FileEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheEngine for FileEngine {
    fn kind(&self) -> &str {
        Self::KIND
    }

    fn initialize(&mut self, config: &EngineConfig) -> CacheEngineResult<()> {
        let (merged, settings) = merge_settings(config)?;
        let path = merged
            .get(PATH_KEY)
            .and_then(Value::as_str)
            .map(Utf8PathBuf::from)
            .ok_or(CacheEngineError::MissingOption(PATH_KEY))?;

        Dir::create_ambient_dir_all(&path, ambient_authority())
            .map_err(CacheEngineError::storage)?;
        let dir =
            Dir::open_ambient_dir(&path, ambient_authority()).map_err(CacheEngineError::storage)?;

        self.config = merged;
        self.settings = settings;
        self.dir = Some(dir);
        Ok(())
    }

    fn effective_config(&self) -> EngineConfig {
        self.config.clone()
    }

    fn collect_garbage(&mut self) -> CacheEngineResult<()> {
        self.clear(true)
    }

    fn write(&mut self, key: &str, value: Value) -> CacheEngineResult<()> {
        let record = FileRecord {
            expires_at: expires_at(self.now(), self.settings.duration),
            value,
        };
        let bytes = serde_json::to_vec(&record).map_err(CacheEngineError::storage)?;
        self.dir()?
            .write(self.file_name(key), bytes)
            .map_err(CacheEngineError::storage)
    }

    fn read(&mut self, key: &str) -> CacheEngineResult<Option<Value>> {
        let now = self.now();
        let file_name = self.file_name(key);
        let dir = self.dir()?;
        match Self::read_record(dir, &file_name)? {
            StoredRecord::Found(record) if record.expires_at > now => Ok(Some(record.value)),
            StoredRecord::Found(_) | StoredRecord::Corrupt => {
                Self::remove_file(dir, &file_name)?;
                Ok(None)
            }
            StoredRecord::Missing => Ok(None),
        }
    }

    fn delete(&mut self, key: &str) -> CacheEngineResult<bool> {
        Self::remove_file(self.dir()?, &self.file_name(key))
    }

    fn clear(&mut self, check_expiry: bool) -> CacheEngineResult<()> {
        let now = self.now();
        let dir = self.dir()?;
        for name in self.cached_file_names(dir)? {
            let expired = if check_expiry {
                match Self::read_record(dir, &name)? {
                    StoredRecord::Found(record) => record.expires_at <= now,
                    StoredRecord::Missing | StoredRecord::Corrupt => true,
                }
            } else {
                true
            };
            if expired {
                Self::remove_file(dir, &name)?;
            }
        }
        Ok(())
    }
}
