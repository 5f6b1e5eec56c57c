//! Raw quiz document normalizer.
//!
//! Raw documents come from the generator or from hand authoring, and older
//! producers used different field names (`score` for `scores`, `type` for
//! `mbtiType`). This module is the only place those names are understood:
//! it migrates every document to the canonical [`TestDefinition`] schema,
//! reindexes questions and options, fills in defaults, and derives the
//! corpus index and statistics.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::catalog;
use crate::error::NormalizeError;
use crate::model::{
    Compatibility, Difficulty, LetterPercentages, Question, QuestionOption, ResultProfile,
    TestDefinition,
};
use crate::statistics::{build_index, compute_statistics, CorpusIndex, Statistics};
use crate::store::is_file_safe_id;
use crate::typology::{Letter, TypeCode};
use crate::validate::validate_test;

const DEFAULT_ESTIMATED_TIME: u32 = 5;

/// Raw document as found on disk, before any migration.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTest {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    questions: Vec<RawQuestion>,
    #[serde(default)]
    result_types: Option<Vec<RawResultProfile>>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    estimated_time: Option<u32>,
    #[serde(default)]
    difficulty: Option<Difficulty>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    text: String,
    options: Vec<RawOption>,
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    text: String,
    #[serde(default)]
    scores: Option<BTreeMap<String, u32>>,
    /// Legacy name for `scores`.
    #[serde(default)]
    score: Option<BTreeMap<String, u32>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResultProfile {
    #[serde(default)]
    mbti_type: Option<String>,
    /// Legacy name for `mbtiType`.
    #[serde(default, rename = "type")]
    legacy_type: Option<String>,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    characteristics: Vec<String>,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
    #[serde(default)]
    career_suggestions: Vec<String>,
    #[serde(default)]
    compatibility: Option<Compatibility>,
    /// Letter → share; letters left out fall back to the code's default.
    #[serde(default)]
    percentage: Option<BTreeMap<String, u8>>,
}

/// An unparsed document and where it came from.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// File name or other label used in logs.
    pub source: String,
    pub content: String,
}

/// A document left out of the corpus.
#[derive(Debug)]
pub struct DocumentFailure {
    pub source: String,
    pub error: NormalizeError,
}

/// Everything one normalization pass produces.
#[derive(Debug)]
pub struct NormalizedCorpus {
    /// Canonical documents, in input order.
    pub tests: Vec<TestDefinition>,
    pub index: CorpusIndex,
    pub statistics: Statistics,
    pub failures: Vec<DocumentFailure>,
}

/// Normalize one raw JSON document.
///
/// `position` is the 1-based position of the document in its batch and only
/// matters when the document has no id of its own.
pub fn normalize_document(content: &str, position: usize) -> Result<TestDefinition, NormalizeError> {
    let raw: RawTest = serde_json::from_str(content)?;
    migrate(raw, position)
}

/// Normalize an already-parsed JSON value.
pub fn normalize_value(
    value: serde_json::Value,
    position: usize,
) -> Result<TestDefinition, NormalizeError> {
    let raw: RawTest = serde_json::from_value(value)?;
    migrate(raw, position)
}

fn migrate(raw: RawTest, position: usize) -> Result<TestDefinition, NormalizeError> {
    let id = non_empty(raw.id).unwrap_or_else(|| format!("test_{position}"));
    if !is_file_safe_id(&id) {
        return Err(NormalizeError::InvalidId(id));
    }
    let title = raw.title.ok_or(NormalizeError::MissingField { field: "title" })?;
    let description = raw
        .description
        .ok_or(NormalizeError::MissingField { field: "description" })?;
    let tags = raw.tags.unwrap_or_default();
    let category = non_empty(raw.category).unwrap_or_else(|| derive_category(&tags).to_string());

    if raw.questions.is_empty() {
        return Err(NormalizeError::NoQuestions);
    }
    let questions = raw
        .questions
        .into_iter()
        .zip(1..)
        .map(|(q, question_id)| migrate_question(q, question_id))
        .collect::<Result<Vec<_>, _>>()?;

    let result_types = raw
        .result_types
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(index, r)| migrate_profile(r, index))
        .collect::<Result<Vec<_>, _>>()?;

    let created_at = parse_timestamp(raw.created_at, "createdAt", &id);
    let updated_at = parse_timestamp(raw.updated_at, "updatedAt", &id);

    Ok(TestDefinition {
        id,
        title,
        description,
        category,
        questions,
        result_types,
        created_at,
        updated_at,
        tags,
        estimated_time: raw
            .estimated_time
            .filter(|&t| t > 0)
            .unwrap_or(DEFAULT_ESTIMATED_TIME),
        difficulty: raw.difficulty.unwrap_or_default(),
    })
}

fn migrate_question(raw: RawQuestion, id: u32) -> Result<Question, NormalizeError> {
    if raw.options.is_empty() {
        return Err(NormalizeError::NoOptions {
            question: id as usize,
        });
    }
    let options = raw
        .options
        .into_iter()
        .zip(1..)
        .map(|(o, option_id)| QuestionOption {
            id: option_id,
            text: o.text,
            scores: o.scores.or(o.score).unwrap_or_default(),
        })
        .collect();

    Ok(Question {
        id,
        text: raw.text,
        options,
        category: raw.category,
    })
}

fn migrate_profile(raw: RawResultProfile, index: usize) -> Result<ResultProfile, NormalizeError> {
    let code_str = non_empty(raw.mbti_type)
        .or_else(|| non_empty(raw.legacy_type))
        .ok_or(NormalizeError::MissingTypeCode { index })?;
    let code: TypeCode = code_str
        .parse()
        .map_err(|_| NormalizeError::InvalidTypeCode(code_str.clone()))?;

    Ok(ResultProfile {
        mbti_type: code,
        title: raw.title,
        description: raw.description,
        characteristics: raw.characteristics,
        strengths: raw.strengths,
        weaknesses: raw.weaknesses,
        career_suggestions: raw.career_suggestions,
        compatibility: raw.compatibility.unwrap_or_default(),
        percentage: merge_percentage(raw.percentage, code),
    })
}

/// 70 for letters the code belongs to, 30 for the others.
pub fn default_percentage(code: TypeCode) -> LetterPercentages {
    let key = code.to_string();
    LetterPercentages::from_fn(|letter: Letter| if letter.claims(&key) { 70 } else { 30 })
}

/// First tag with a known category, else `general`.
pub fn derive_category(tags: &[String]) -> &'static str {
    tags.iter()
        .find_map(|tag| catalog::category_for_tag(tag))
        .unwrap_or(catalog::GENERAL_CATEGORY)
}

fn merge_percentage(given: Option<BTreeMap<String, u8>>, code: TypeCode) -> LetterPercentages {
    let mut table = default_percentage(code);
    for (key, value) in given.unwrap_or_default() {
        let mut chars = key.chars();
        match (chars.next().and_then(Letter::from_char), chars.next()) {
            (Some(letter), None) => table.set(letter, value),
            _ => tracing::debug!(%code, %key, "ignoring percentage key"),
        }
    }
    table
}

/// RFC 3339 or nothing. Unparseable values are dropped, not fatal.
fn parse_timestamp(value: Option<String>, field: &str, id: &str) -> Option<DateTime<Utc>> {
    let value = non_empty(value)?;
    match DateTime::parse_from_rfc3339(&value) {
        Ok(ts) => Some(ts.with_timezone(&Utc)),
        Err(e) => {
            tracing::warn!(id, field, %value, "dropping unparseable timestamp: {e}");
            None
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Normalize a batch, skipping documents that fail.
pub fn normalize_batch(documents: &[RawDocument]) -> NormalizedCorpus {
    let mut tests = Vec::with_capacity(documents.len());
    let mut failures = Vec::new();

    for (i, doc) in documents.iter().enumerate() {
        match normalize_document(&doc.content, i + 1) {
            Ok(test) => {
                tracing::info!(source = %doc.source, id = %test.id, "normalized");
                for warning in validate_test(&test) {
                    tracing::debug!(id = %test.id, question = ?warning.question_id, "{}", warning.message);
                }
                tests.push(test);
            }
            Err(error) => {
                tracing::warn!(source = %doc.source, "skipping: {error}");
                failures.push(DocumentFailure {
                    source: doc.source.clone(),
                    error,
                });
            }
        }
    }

    let mut seen = HashSet::new();
    for test in &tests {
        if !seen.insert(test.id.as_str()) {
            tracing::warn!(id = %test.id, "duplicate test id, later document wins in the index");
        }
    }

    NormalizedCorpus {
        index: build_index(&tests),
        statistics: compute_statistics(&tests),
        tests,
        failures,
    }
}

/// Read every `*.json` file of a directory, in file-name order.
pub fn load_raw_directory(dir: &Path) -> Result<Vec<RawDocument>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read raw document: {}", path.display()))?;
            let source = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(RawDocument { source, content })
        })
        .collect()
}

/// Load and normalize a whole raw directory.
pub fn normalize_directory(dir: &Path) -> Result<NormalizedCorpus> {
    let documents = load_raw_directory(dir)?;
    tracing::info!("parsing {} test file(s) from {}", documents.len(), dir.display());
    Ok(normalize_batch(&documents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_doc() -> serde_json::Value {
        json!({
            "id": "love",
            "title": "연애 스타일",
            "description": "연애 스타일을 알아보세요",
            "tags": ["MBTI", "운동", "연애"],
            "questions": [
                {
                    "id": 7,
                    "text": "첫 만남",
                    "options": [
                        { "id": 3, "text": "설렌다", "scores": { "E": 2, "I": 0 } },
                        { "id": 9, "text": "관찰한다", "score": { "E": 0, "I": 2 } }
                    ]
                },
                {
                    "id": 42,
                    "text": "데이트 계획",
                    "category": "관계",
                    "options": [
                        { "id": 1, "text": "즉흥", "scores": { "P": 2 } },
                        { "id": 1, "text": "계획", "score": { "J": 2 }, "scores": { "J": 1 } },
                        { "id": 5, "text": "모름" }
                    ]
                }
            ],
            "resultTypes": [
                { "type": "ENFP", "title": "열정적인 영감가", "description": "..." },
                { "mbtiType": "INTJ", "type": "ESTP", "title": "전략가", "description": "...",
                  "percentage": { "E": 10, "I": 90, "N": 80, "S": 20, "T": 70, "F": 30, "J": 60, "P": 40 } }
            ]
        })
    }

    #[test]
    fn reindexes_questions_and_options_densely() {
        let test = normalize_value(raw_doc(), 1).unwrap();
        let qids: Vec<u32> = test.questions.iter().map(|q| q.id).collect();
        assert_eq!(qids, vec![1, 2]);
        let oids: Vec<u32> = test.questions[1].options.iter().map(|o| o.id).collect();
        assert_eq!(oids, vec![1, 2, 3]);
        assert_eq!(test.questions[0].text, "첫 만남");
        assert_eq!(test.questions[1].options[2].text, "모름");
        assert_eq!(test.questions[1].category.as_deref(), Some("관계"));
    }

    #[test]
    fn legacy_score_field_is_migrated() {
        let test = normalize_value(raw_doc(), 1).unwrap();
        let legacy = &test.questions[0].options[1];
        assert_eq!(legacy.scores.get("I"), Some(&2));
        assert_eq!(legacy.scores.get("E"), Some(&0));
        // canonical name wins when both are present
        assert_eq!(test.questions[1].options[1].scores.get("J"), Some(&1));
        // neither present → empty mapping
        assert!(test.questions[1].options[2].scores.is_empty());
    }

    #[test]
    fn legacy_type_field_is_migrated() {
        let test = normalize_value(raw_doc(), 1).unwrap();
        assert_eq!(test.result_types[0].mbti_type.to_string(), "ENFP");
        assert_eq!(test.result_types[1].mbti_type.to_string(), "INTJ");
    }

    #[test]
    fn profile_defaults() {
        let test = normalize_value(raw_doc(), 1).unwrap();
        let enfp = &test.result_types[0];
        assert!(enfp.compatibility.is_empty());
        assert_eq!(enfp.percentage.get(Letter::E), 70);
        assert_eq!(enfp.percentage.get(Letter::I), 30);
        assert_eq!(enfp.percentage.get(Letter::N), 70);
        assert_eq!(enfp.percentage.get(Letter::T), 30);
        assert_eq!(enfp.percentage.get(Letter::P), 70);
        assert_eq!(enfp.percentage.get(Letter::J), 30);
        // explicit percentages pass through
        assert_eq!(test.result_types[1].percentage.get(Letter::I), 90);
    }

    #[test]
    fn document_defaults() {
        let test = normalize_value(raw_doc(), 1).unwrap();
        assert_eq!(test.estimated_time, 5);
        assert_eq!(test.difficulty, Difficulty::Medium);
        assert_eq!(test.category, "health");

        let mut value = raw_doc();
        value["estimatedTime"] = json!(0);
        value["difficulty"] = json!("hard");
        value["category"] = json!("custom");
        let test = normalize_value(value, 1).unwrap();
        assert_eq!(test.estimated_time, 5);
        assert_eq!(test.difficulty, Difficulty::Hard);
        assert_eq!(test.category, "custom");
    }

    #[test]
    fn category_falls_back_to_general() {
        assert_eq!(derive_category(&["MBTI".to_string()]), "general");
        assert_eq!(derive_category(&[]), "general");
        assert_eq!(
            derive_category(&["MBTI".to_string(), "여행".to_string(), "운동".to_string()]),
            "lifestyle"
        );
    }

    #[test]
    fn missing_id_is_synthesized_from_position() {
        let mut value = raw_doc();
        value.as_object_mut().unwrap().remove("id");
        let test = normalize_value(value, 4).unwrap();
        assert_eq!(test.id, "test_4");

        let mut value = raw_doc();
        value["id"] = json!("");
        assert_eq!(normalize_value(value, 2).unwrap().id, "test_2");
    }

    #[test]
    fn missing_title_is_a_data_quality_error() {
        let mut value = raw_doc();
        value.as_object_mut().unwrap().remove("title");
        let err = normalize_value(value, 1).unwrap_err();
        assert!(matches!(err, NormalizeError::MissingField { field: "title" }));
        assert!(err.is_data_quality());
    }

    #[test]
    fn structural_errors() {
        let mut value = raw_doc();
        value["questions"] = json!([]);
        assert!(matches!(
            normalize_value(value, 1),
            Err(NormalizeError::NoQuestions)
        ));

        let mut value = raw_doc();
        value["questions"][1]["options"] = json!([]);
        assert!(matches!(
            normalize_value(value, 1),
            Err(NormalizeError::NoOptions { question: 2 })
        ));

        let mut value = raw_doc();
        value["resultTypes"][0]["type"] = json!("XYZW");
        assert!(matches!(
            normalize_value(value, 1),
            Err(NormalizeError::InvalidTypeCode(_))
        ));

        let mut value = raw_doc();
        value["resultTypes"][0].as_object_mut().unwrap().remove("type");
        assert!(matches!(
            normalize_value(value, 1),
            Err(NormalizeError::MissingTypeCode { index: 0 })
        ));

        assert!(matches!(
            normalize_document("{ not json", 1),
            Err(NormalizeError::Malformed(_))
        ));
    }

    #[test]
    fn normalizing_canonical_output_is_idempotent() {
        let first = normalize_value(raw_doc(), 1).unwrap();
        let json = serde_json::to_string(&first).unwrap();
        let second = normalize_document(&json, 99).unwrap();
        assert_eq!(first, second);
        assert_eq!(serde_json::to_string(&second).unwrap(), json);
    }

    #[test]
    fn batch_skips_malformed_documents() {
        let mut docs: Vec<RawDocument> = (0..9)
            .map(|i| {
                let mut value = raw_doc();
                value["id"] = json!(format!("t{i}"));
                RawDocument {
                    source: format!("t{i}.json"),
                    content: value.to_string(),
                }
            })
            .collect();
        docs.insert(
            4,
            RawDocument {
                source: "broken.json".into(),
                content: "{\"title\": ".into(),
            },
        );

        let corpus = normalize_batch(&docs);
        assert_eq!(corpus.tests.len(), 9);
        assert_eq!(corpus.failures.len(), 1);
        assert_eq!(corpus.failures[0].source, "broken.json");
        assert_eq!(corpus.index.len(), 9);
        assert_eq!(corpus.statistics.total_tests, 9);
    }

    #[test]
    fn path_like_ids_are_skipped_in_batch() {
        let docs: Vec<RawDocument> = ["good1", "nested/bad", "..", "good2"]
            .iter()
            .map(|id| {
                let mut value = raw_doc();
                value["id"] = json!(id);
                RawDocument {
                    source: format!("{}.json", id.replace('/', "_")),
                    content: value.to_string(),
                }
            })
            .collect();

        let corpus = normalize_batch(&docs);
        let ids: Vec<_> = corpus.tests.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["good1", "good2"]);
        assert_eq!(corpus.failures.len(), 2);
        assert!(matches!(
            &corpus.failures[0].error,
            NormalizeError::InvalidId(id) if id == "nested/bad"
        ));
        assert!(!corpus.failures[0].error.is_data_quality());
        assert_eq!(corpus.statistics.total_tests, 2);
    }

    #[test]
    fn partial_percentage_keeps_given_letters() {
        let mut value = raw_doc();
        value["resultTypes"][0]["percentage"] = json!({ "E": 80, "I": 20, "X": 5, "NS": 1 });
        let test = normalize_value(value, 1).unwrap();
        let enfp = &test.result_types[0].percentage;
        assert_eq!(enfp.get(Letter::E), 80);
        assert_eq!(enfp.get(Letter::I), 20);
        // the rest come from the ENFP default
        assert_eq!(enfp.get(Letter::N), 70);
        assert_eq!(enfp.get(Letter::S), 30);
        assert_eq!(enfp.get(Letter::P), 70);
        assert_eq!(enfp.get(Letter::J), 30);
    }

    #[test]
    fn unparseable_timestamps_are_dropped() {
        let mut value = raw_doc();
        value["createdAt"] = json!("2024-01-01");
        value["updatedAt"] = json!("2024-03-05T10:00:00+09:00");
        let test = normalize_value(value, 1).unwrap();
        assert!(test.created_at.is_none());
        assert_eq!(
            test.updated_at.unwrap().to_rfc3339(),
            "2024-03-05T01:00:00+00:00"
        );
    }

    #[test]
    fn load_directory_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.json"), raw_doc().to_string()).unwrap();
        std::fs::write(dir.path().join("a.json"), "garbage").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let docs = load_raw_directory(dir.path()).unwrap();
        let names: Vec<_> = docs.iter().map(|d| d.source.as_str()).collect();
        assert_eq!(names, vec!["a.json", "b.json"]);

        let corpus = normalize_directory(dir.path()).unwrap();
        assert_eq!(corpus.tests.len(), 1);
        assert_eq!(corpus.failures.len(), 1);
    }

    #[test]
    fn missing_directory_is_fatal() {
        assert!(normalize_directory(Path::new("/definitely/not/here")).is_err());
    }
}
