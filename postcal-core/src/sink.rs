//! Key-value persistence backends.
//!
//! The post store only needs `get`/`set` on string values under fixed keys,
//! so any backend that can hold a few named blobs will do.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::{PostcalError, PostcalResult};

/// Minimal get/set storage the post store persists into.
pub trait PersistenceSink {
    fn get(&self, key: &str) -> PostcalResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> PostcalResult<()>;
}

/// Stores each key as `<key>.json` inside a directory.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileSink { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl PersistenceSink for FileSink {
    fn get(&self, key: &str) -> PostcalResult<Option<String>> {
        let path = self.path_for(key);

        if !path.exists() {
            return Ok(None);
        }

        std::fs::read_to_string(&path).map(Some).map_err(|e| {
            PostcalError::PersistenceRead(format!("{}: {e}", path.display()))
        })
    }

    fn set(&mut self, key: &str, value: &str) -> PostcalResult<()> {
        let write_err =
            |e: std::io::Error| PostcalError::PersistenceWrite(format!("{}: {e}", self.dir.display()));

        std::fs::create_dir_all(&self.dir).map_err(write_err)?;

        let path = self.path_for(key);
        let temp = self.dir.join(format!("{key}.json.tmp"));

        std::fs::write(&temp, value).map_err(write_err)?;
        std::fs::rename(&temp, &path).map_err(write_err)?;

        log::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

/// In-memory sink. Can be switched into failing reads or writes to exercise
/// the store's degraded paths.
#[derive(Default)]
pub struct MemorySink {
    values: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
    writes: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Number of successful `set` calls.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl PersistenceSink for MemorySink {
    fn get(&self, key: &str) -> PostcalResult<Option<String>> {
        if self.fail_reads {
            return Err(PostcalError::PersistenceRead("storage unavailable".into()));
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PostcalResult<()> {
        if self.fail_writes {
            return Err(PostcalError::PersistenceWrite("storage unavailable".into()));
        }
        self.values.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sink_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path());
        assert!(sink.get("calendar_state").unwrap().is_none());
    }

    #[test]
    fn file_sink_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path().join("nested"));

        sink.set("calendar_state", "{\"posts\":[]}").unwrap();

        assert_eq!(
            sink.get("calendar_state").unwrap().as_deref(),
            Some("{\"posts\":[]}")
        );
        assert!(sink.path_for("calendar_state").exists());
        assert!(!dir.path().join("nested/calendar_state.json.tmp").exists());
    }

    #[test]
    fn file_sink_overwrites_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = FileSink::new(dir.path());

        sink.set("k", "a long first value").unwrap();
        sink.set("k", "short").unwrap();

        assert_eq!(sink.get("k").unwrap().as_deref(), Some("short"));
    }

    #[test]
    fn memory_sink_failure_switches() {
        let mut sink = MemorySink::new();
        sink.set_fail_writes(true);
        assert!(matches!(
            sink.set("k", "v"),
            Err(PostcalError::PersistenceWrite(_))
        ));
        assert_eq!(sink.write_count(), 0);

        let sink = MemorySink::new().with_value("k", "v").failing_reads();
        assert!(matches!(sink.get("k"), Err(PostcalError::PersistenceRead(_))));
    }
}
