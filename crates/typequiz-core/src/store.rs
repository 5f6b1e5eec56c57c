//! File-backed stores for the canonical corpus and for scored results.
//!
//! Layout of a corpus root:
//!
//! ```text
//! testsList.json      every canonical document, in corpus order
//! testIndex.json      id → summary
//! statistics.json     corpus totals
//! tests/{id}.json     one canonical document per file
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Answer, TestDefinition};
use crate::normalizer::NormalizedCorpus;
use crate::scoring::QuizResult;
use crate::statistics::{CorpusIndex, Statistics};

pub const TESTS_LIST_FILE: &str = "testsList.json";
pub const TEST_INDEX_FILE: &str = "testIndex.json";
pub const STATISTICS_FILE: &str = "statistics.json";
pub const TESTS_DIR: &str = "tests";

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize {}", path.display()))?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Whether `id` can name a file directly under its store directory.
pub fn is_file_safe_id(id: &str) -> bool {
    !id.is_empty() && !id.contains(['/', '\\']) && !id.contains("..")
}

fn check_id(id: &str) -> Result<()> {
    if !is_file_safe_id(id) {
        anyhow::bail!("invalid test id for a file name: {id:?}");
    }
    Ok(())
}

/// Read/write access to a normalized corpus on disk.
#[derive(Debug, Clone)]
pub struct CorpusStore {
    root: PathBuf,
}

impl CorpusStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn test_path(&self, id: &str) -> Result<PathBuf> {
        check_id(id)?;
        Ok(self.root.join(TESTS_DIR).join(format!("{id}.json")))
    }

    /// Write every derived artifact of a normalization pass.
    pub fn write(&self, corpus: &NormalizedCorpus) -> Result<()> {
        let paths = corpus
            .tests
            .iter()
            .map(|t| self.test_path(&t.id))
            .collect::<Result<Vec<_>>>()?;

        std::fs::create_dir_all(&self.root)
            .with_context(|| format!("failed to create output directory {}", self.root.display()))?;

        write_json(&self.root.join(TESTS_LIST_FILE), &corpus.tests)?;
        tracing::info!("wrote {}", TESTS_LIST_FILE);
        write_json(&self.root.join(TEST_INDEX_FILE), &corpus.index)?;
        tracing::info!("wrote {}", TEST_INDEX_FILE);

        for (test, path) in corpus.tests.iter().zip(&paths) {
            write_json(path, test)?;
        }
        tracing::info!("wrote {} per-test document(s) to {}", paths.len(), TESTS_DIR);

        write_json(&self.root.join(STATISTICS_FILE), &corpus.statistics)?;
        tracing::info!("wrote {}", STATISTICS_FILE);
        Ok(())
    }

    /// The full canonical corpus.
    pub fn list(&self) -> Result<Vec<TestDefinition>> {
        read_json(&self.root.join(TESTS_LIST_FILE))
    }

    /// One canonical document, or `None` if no such id was written.
    pub fn get(&self, id: &str) -> Result<Option<TestDefinition>> {
        let path = self.test_path(id)?;
        if !path.exists() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }

    pub fn index(&self) -> Result<CorpusIndex> {
        read_json(&self.root.join(TEST_INDEX_FILE))
    }

    pub fn statistics(&self) -> Result<Statistics> {
        read_json(&self.root.join(STATISTICS_FILE))
    }
}

/// A completed quiz, as persisted for later display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: Uuid,
    pub test_id: String,
    pub answers: Vec<Answer>,
    pub result: QuizResult,
    pub completed_at: DateTime<Utc>,
    /// Seconds spent on the quiz, when the caller tracked it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_spent: Option<u64>,
}

impl TestResult {
    pub fn new(test_id: impl Into<String>, answers: Vec<Answer>, result: QuizResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            test_id: test_id.into(),
            answers,
            result,
            completed_at: Utc::now(),
            time_spent: None,
        }
    }
}

/// Latest result per test id, one file each.
#[derive(Debug, Clone)]
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, test_id: &str) -> Result<PathBuf> {
        check_id(test_id)?;
        Ok(self.dir.join(format!("testResult_{test_id}.json")))
    }

    /// Persist a result, replacing any earlier one for the same test.
    pub fn save(&self, record: &TestResult) -> Result<PathBuf> {
        let path = self.path_for(&record.test_id)?;
        write_json(&path, record)?;
        Ok(path)
    }

    pub fn load(&self, test_id: &str) -> Result<Option<TestResult>> {
        let path = self.path_for(test_id)?;
        if !path.exists() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }
}
