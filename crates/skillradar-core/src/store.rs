//! Local test store: the candidate and test collections.
//!
//! Each collection is a JSON array stored under its own key in a
//! [`StorageBackend`]. Every operation reads the whole collection and, for
//! writes, writes the whole collection back. There is no locking across
//! the read and the write; concurrent writers are the caller's problem.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::bank::draw_questions;
use crate::error::StoreError;
use crate::ids::generate_id;
use crate::model::{Candidate, Skill, Test};

/// Key of the candidate collection.
pub const CANDIDATES_KEY: &str = "skillRadar.local.candidates";
/// Key of the test collection.
pub const TESTS_KEY: &str = "skillRadar.local.tests";

/// A string key-value store the collections are persisted in.
pub trait StorageBackend: Send + Sync {
    /// Short backend name for logs (e.g. "memory").
    fn name(&self) -> &str;

    /// Raw value stored under `key`, or `None` if nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process backend, used by tests and short-lived sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn name(&self) -> &str {
        "memory"
    }

    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory backend lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory backend lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Durable backend: one `<key>.json` file per collection in a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn name(&self) -> &str {
        "file"
    }

    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            key: key.to_string(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(io_err)?;

        // Temp file + rename: readers never see a partial collection.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        std::fs::write(&tmp, value).map_err(io_err)?;
        std::fs::rename(&tmp, &path).map_err(io_err)?;
        Ok(())
    }
}

/// Repository over the candidate and test collections.
#[derive(Clone)]
pub struct LocalTestStore {
    backend: Arc<dyn StorageBackend>,
}

impl std::fmt::Debug for LocalTestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalTestStore")
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl LocalTestStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Store backed by a fresh [`MemoryBackend`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Store backed by a [`FileBackend`] rooted at `dir`.
    pub fn open_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FileBackend::new(dir)))
    }

    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>, StoreError> {
        match self.backend.read(key)? {
            None => Ok(Vec::new()),
            Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn write_list<T: Serialize>(&self, key: &str, list: &[T]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(list).map_err(|source| StoreError::Serialize {
            key: key.to_string(),
            source,
        })?;
        self.backend.write(key, &raw)?;
        tracing::debug!(
            backend = self.backend.name(),
            key,
            records = list.len(),
            "collection written"
        );
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Candidates
    // -----------------------------------------------------------------------

    /// All candidates, newest insertion first.
    pub fn get_candidates(&self) -> Result<Vec<Candidate>, StoreError> {
        self.read_list(CANDIDATES_KEY)
    }

    /// Like [`get_candidates`](Self::get_candidates), but any failure is
    /// logged and treated as an empty collection.
    pub fn candidates_or_empty(&self) -> Vec<Candidate> {
        self.get_candidates().unwrap_or_else(|e| {
            tracing::warn!("treating candidate collection as empty: {e}");
            Vec::new()
        })
    }

    pub fn save_candidates(&self, list: &[Candidate]) -> Result<(), StoreError> {
        self.write_list(CANDIDATES_KEY, list)
    }

    pub fn get_candidate(&self, id: &str) -> Result<Option<Candidate>, StoreError> {
        Ok(self.get_candidates()?.into_iter().find(|c| c.id == id))
    }

    /// Replace the candidate with the same id in place, or insert it at
    /// the front.
    pub fn upsert_candidate(&self, candidate: &Candidate) -> Result<(), StoreError> {
        let mut list = self.get_candidates()?;
        match list.iter().position(|c| c.id == candidate.id) {
            Some(idx) => list[idx] = candidate.clone(),
            None => list.insert(0, candidate.clone()),
        }
        self.save_candidates(&list)
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    /// All tests, newest first.
    pub fn get_tests(&self) -> Result<Vec<Test>, StoreError> {
        self.read_list(TESTS_KEY)
    }

    /// Like [`get_tests`](Self::get_tests), falling back to empty on failure.
    pub fn tests_or_empty(&self) -> Vec<Test> {
        self.get_tests().unwrap_or_else(|e| {
            tracing::warn!("treating test collection as empty: {e}");
            Vec::new()
        })
    }

    pub fn save_tests(&self, list: &[Test]) -> Result<(), StoreError> {
        self.write_list(TESTS_KEY, list)
    }

    /// Generate a test for `candidate_id` covering `skills` (in that order),
    /// store it at the front of the collection and return it.
    pub fn create_local_test(
        &self,
        candidate_id: &str,
        skills: &[Skill],
    ) -> Result<Test, StoreError> {
        let test = Test {
            id: generate_id("test"),
            candidate_id: candidate_id.to_string(),
            questions: draw_questions(skills),
            created_at: chrono::Utc::now(),
        };
        let mut all = self.get_tests()?;
        all.insert(0, test.clone());
        self.save_tests(&all)?;
        tracing::debug!(
            test = %test.id,
            candidate = candidate_id,
            questions = test.questions.len(),
            "test created"
        );
        Ok(test)
    }

    /// The test with `test_id`, or `None` if there is none.
    pub fn get_local_test(&self, test_id: &str) -> Result<Option<Test>, StoreError> {
        Ok(self.get_tests()?.into_iter().find(|t| t.id == test_id))
    }
}
