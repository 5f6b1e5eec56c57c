//! Data-quality checks over canonical documents.
//!
//! Nothing here rejects a document; problems come back as warnings for the
//! author to fix.

use std::collections::HashSet;

use crate::generator::{MAX_WEIGHT, MIN_WEIGHT};
use crate::model::TestDefinition;
use crate::typology::{Letter, TypeCode};

/// A warning from document validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<u32>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn document(message: impl Into<String>) -> Self {
        Self {
            question_id: None,
            message: message.into(),
        }
    }

    fn question(question_id: u32, message: impl Into<String>) -> Self {
        Self {
            question_id: Some(question_id),
            message: message.into(),
        }
    }
}

/// Validate a canonical document for common authoring issues.
pub fn validate_test(test: &TestDefinition) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if test.title.trim().is_empty() {
        warnings.push(ValidationWarning::document("title is empty"));
    }
    if test.description.trim().is_empty() {
        warnings.push(ValidationWarning::document("description is empty"));
    }
    if test.estimated_time == 0 {
        warnings.push(ValidationWarning::document("estimatedTime is zero"));
    }
    if test.questions.is_empty() {
        warnings.push(ValidationWarning::document("no questions"));
    }

    // Ids must run 1..N in order
    for (i, question) in test.questions.iter().enumerate() {
        if question.id as usize != i + 1 {
            warnings.push(ValidationWarning::question(
                question.id,
                format!("question id {} at position {}", question.id, i + 1),
            ));
        }
        if question.options.is_empty() {
            warnings.push(ValidationWarning::question(question.id, "question has no options"));
        }
        for (j, option) in question.options.iter().enumerate() {
            if option.id as usize != j + 1 {
                warnings.push(ValidationWarning::question(
                    question.id,
                    format!("option id {} at position {}", option.id, j + 1),
                ));
            }
            if option.scores.is_empty() {
                warnings.push(ValidationWarning::question(
                    question.id,
                    format!("option {} has no scores", option.id),
                ));
            }
            for (key, weight) in &option.scores {
                let is_code = key.parse::<TypeCode>().is_ok();
                if is_code && !(MIN_WEIGHT..=MAX_WEIGHT).contains(weight) {
                    warnings.push(ValidationWarning::question(
                        question.id,
                        format!(
                            "option {} weight {weight} for {key} outside {MIN_WEIGHT}..={MAX_WEIGHT}",
                            option.id
                        ),
                    ));
                }
            }
        }
    }

    let mut seen = HashSet::new();
    for profile in &test.result_types {
        if !seen.insert(profile.mbti_type) {
            warnings.push(ValidationWarning::document(format!(
                "duplicate result profile: {}",
                profile.mbti_type
            )));
        }
        if let Some(letter) = Letter::ALL
            .into_iter()
            .find(|&l| profile.percentage.get(l) > 100)
        {
            warnings.push(ValidationWarning::document(format!(
                "{} percentage for {letter} exceeds 100",
                profile.mbti_type
            )));
        }
    }
    let missing: Vec<String> = TypeCode::ALL
        .iter()
        .filter(|code| !seen.contains(*code))
        .map(|code| code.to_string())
        .collect();
    if !missing.is_empty() {
        warnings.push(ValidationWarning::document(format!(
            "missing result profiles: {}",
            missing.join(", ")
        )));
    }

    warnings
}
