//! Corpus index and aggregate statistics.
//!
//! Both are derived from a canonical corpus in one pass and never updated
//! incrementally; the normalizer rebuilds them on every run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::model::{Difficulty, TestDefinition};

/// Summary of one test, keyed by test id in the [`CorpusIndex`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub estimated_time: u32,
    pub difficulty: Difficulty,
    pub question_count: usize,
}

/// Test id → summary.
pub type CorpusIndex = BTreeMap<String, TestSummary>;

/// Corpus-wide totals and frequency tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_tests: usize,
    pub total_questions: usize,
    /// Mean questions per test, rounded half-up. Zero for an empty corpus.
    pub average_questions: usize,
    pub categories: BTreeMap<String, usize>,
    pub difficulties: BTreeMap<String, usize>,
    pub tags: BTreeMap<String, usize>,
}

pub fn summarize(test: &TestDefinition) -> TestSummary {
    TestSummary {
        title: test.title.clone(),
        description: test.description.clone(),
        tags: test.tags.clone(),
        estimated_time: test.estimated_time,
        difficulty: test.difficulty,
        question_count: test.questions.len(),
    }
}

/// Build the id → summary index. A repeated id keeps the later document.
pub fn build_index(tests: &[TestDefinition]) -> CorpusIndex {
    tests
        .iter()
        .map(|t| (t.id.clone(), summarize(t)))
        .collect()
}

/// Aggregate totals and frequency tables over a corpus.
pub fn compute_statistics(tests: &[TestDefinition]) -> Statistics {
    let total_questions: usize = tests.iter().map(|t| t.questions.len()).sum();
    let average_questions = if tests.is_empty() {
        0
    } else {
        (total_questions as f64 / tests.len() as f64).round() as usize
    };

    let mut stats = Statistics {
        total_tests: tests.len(),
        total_questions,
        average_questions,
        ..Default::default()
    };

    for test in tests {
        let category = if test.category.is_empty() {
            catalog::GENERAL_CATEGORY.to_string()
        } else {
            test.category.clone()
        };
        *stats.categories.entry(category).or_default() += 1;
        *stats
            .difficulties
            .entry(test.difficulty.to_string())
            .or_default() += 1;
        for tag in &test.tags {
            *stats.tags.entry(tag.clone()).or_default() += 1;
        }
    }

    stats
}
