//! Answer scoring.
//!
//! [`ScoringEngine`] turns a set of answers against a canonical
//! [`TestDefinition`] into a type code, a per-letter percentage breakdown,
//! and the matching result profile. It borrows the document immutably and
//! keeps no state between calls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::axis::{resolve_scores, AxisScoreAccumulator};
use crate::catalog::fallback;
use crate::model::{Answer, Compatibility, LetterPercentages, ResultProfile, TestDefinition};
use crate::typology::{Axis, TypeCode};

/// The outcome of scoring one answer set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    /// Matched (or fallback) profile carrying the computed code and percentages.
    #[serde(flatten)]
    pub profile: ResultProfile,
    /// Raw per-letter totals the code was derived from.
    pub tally: AxisScoreAccumulator,
    /// Whether the document had no profile for the computed code.
    pub fallback: bool,
}

impl QuizResult {
    pub fn code(&self) -> TypeCode {
        self.profile.mbti_type
    }

    pub fn percentage(&self) -> &LetterPercentages {
        &self.profile.percentage
    }
}

/// Scores answer sets against one test.
#[derive(Debug, Clone, Copy)]
pub struct ScoringEngine<'a> {
    test: &'a TestDefinition,
}

impl<'a> ScoringEngine<'a> {
    pub fn new(test: &'a TestDefinition) -> Self {
        Self { test }
    }

    /// Sum the score vectors of every resolvable answer.
    ///
    /// Answers are collapsed per question first, keeping the last one.
    /// Answers pointing at unknown questions or options are ignored.
    pub fn tally(&self, answers: &[Answer]) -> AxisScoreAccumulator {
        let latest: BTreeMap<u32, &str> = answers
            .iter()
            .map(|a| (a.question_id, a.selected_option_id.as_str()))
            .collect();

        let mut acc = AxisScoreAccumulator::new();
        for (question_id, selected) in latest {
            let Some(question) = self.test.question(question_id) else {
                tracing::debug!(test = %self.test.id, question_id, "ignoring answer to unknown question");
                continue;
            };
            let Some(option) = question.option(selected) else {
                tracing::debug!(test = %self.test.id, question_id, selected, "ignoring unknown option");
                continue;
            };
            resolve_scores(&option.scores, &mut acc);
        }
        acc
    }

    /// Score an answer set.
    pub fn score(&self, answers: &[Answer]) -> QuizResult {
        let tally = self.tally(answers);
        let code = tally.type_code();
        let percentage = axis_percentages(&tally);

        let (profile, fallback) = match self.test.result_profile(code) {
            Some(profile) => (
                ResultProfile {
                    percentage,
                    ..profile.clone()
                },
                false,
            ),
            None => {
                tracing::debug!(test = %self.test.id, %code, "no profile for code, using fallback");
                (fallback_profile(code, percentage), true)
            }
        };

        QuizResult {
            profile,
            tally,
            fallback,
        }
    }
}

/// Each letter's share of its axis, rounded independently.
///
/// An axis with no weight at all gives 50 to both letters. The two shares of
/// an axis are not adjusted to sum to 100.
pub fn axis_percentages(tally: &AxisScoreAccumulator) -> LetterPercentages {
    let mut table = LetterPercentages::default();
    for axis in Axis::ALL {
        let total = tally.axis_total(axis);
        let (first, second) = axis.letters();
        for letter in [first, second] {
            let value = if total == 0 {
                50
            } else {
                (f64::from(tally.get(letter)) / f64::from(total) * 100.0).round() as u8
            };
            table.set(letter, value);
        }
    }
    table
}

/// Generic profile used when a document lacks the computed code.
pub fn fallback_profile(code: TypeCode, percentage: LetterPercentages) -> ResultProfile {
    ResultProfile {
        mbti_type: code,
        title: fallback::TITLE.to_string(),
        description: fallback::DESCRIPTION.to_string(),
        characteristics: owned(&fallback::CHARACTERISTICS),
        strengths: owned(&fallback::STRENGTHS),
        weaknesses: owned(&fallback::WEAKNESSES),
        career_suggestions: Vec::new(),
        compatibility: Compatibility::default(),
        percentage,
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
