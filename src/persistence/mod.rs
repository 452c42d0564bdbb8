//! Save/load persistence for small JSON documents
//!
//! Features:
//! - One pretty-printed JSON file per key
//! - Atomic replace (write tmp, then rename)
//! - In-memory store for tests and ephemeral runs

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Key/value document storage
pub trait Storage {
    /// Raw document for `key`, `None` if nothing was stored yet
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&mut self, key: &str, contents: &str) -> Result<()>;
}

/// Decode the document stored under `key`
pub fn load_json<T: DeserializeOwned>(storage: &dyn Storage, key: &str) -> Result<Option<T>> {
    let Some(text) = storage.read(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&text).with_context(|| format!("decode `{key}`"))?;
    Ok(Some(value))
}

/// Encode `value` and store it under `key`
pub fn save_json<T: Serialize>(storage: &mut dyn Storage, key: &str, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).with_context(|| format!("encode `{key}`"))?;
    storage.write(key, &text)
}

/// Files named `<key>.json` inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
        }
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create data dir {}", self.dir.display()))?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents).with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &path).with_context(|| format!("replace {}", path.display()))?;
        log::debug!("Saved {}", path.display());
        Ok(())
    }
}

/// Volatile storage (nothing survives the process)
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    docs: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.docs.get(key).cloned())
    }

    fn write(&mut self, key: &str, contents: &str) -> Result<()> {
        self.docs.insert(key.to_string(), contents.to_string());
        Ok(())
    }
}
