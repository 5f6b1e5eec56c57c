//! Canonical data model types for typequiz.
//!
//! These are the types every downstream reader consumes: the normalizer emits
//! them, the scoring engine reads them, the stores persist them. Legacy field
//! names never appear here; see [`crate::normalizer`] for the raw schema.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::typology::{Letter, TypeCode};

/// A complete quiz document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDefinition {
    /// Globally unique identifier.
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Questions in presentation order.
    pub questions: Vec<Question>,
    /// One profile per type code.
    #[serde(default)]
    pub result_types: Vec<ResultProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Expected completion time in minutes.
    pub estimated_time: u32,
    pub difficulty: Difficulty,
}

impl TestDefinition {
    /// Find a question by id.
    pub fn question(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Find the result profile for a code.
    pub fn result_profile(&self, code: TypeCode) -> Option<&ResultProfile> {
        self.result_types.iter().find(|r| r.mbti_type == code)
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub options: Vec<QuestionOption>,
    /// Free-form label such as "관계" or "직업".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Question {
    /// Find an option by the string form of its id.
    pub fn option(&self, selected_option_id: &str) -> Option<&QuestionOption> {
        self.options
            .iter()
            .find(|o| o.id.to_string() == selected_option_id)
    }
}

/// One selectable answer to a question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: u32,
    pub text: String,
    /// Score key (type code or single letter) → weight. Absent keys count as zero.
    #[serde(default)]
    pub scores: BTreeMap<String, u32>,
}

/// Narrative and statistical content for one type code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultProfile {
    pub mbti_type: TypeCode,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub characteristics: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub career_suggestions: Vec<String>,
    #[serde(default)]
    pub compatibility: Compatibility,
    pub percentage: LetterPercentages,
}

/// Codes that pair well (or badly) with a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compatibility {
    #[serde(default)]
    pub best: Vec<TypeCode>,
    #[serde(default)]
    pub good: Vec<TypeCode>,
    #[serde(default)]
    pub challenging: Vec<TypeCode>,
}

impl Compatibility {
    pub fn is_empty(&self) -> bool {
        self.best.is_empty() && self.good.is_empty() && self.challenging.is_empty()
    }
}

/// Integer percentage for each of the eight letters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterPercentages {
    #[serde(rename = "E")]
    pub e: u8,
    #[serde(rename = "I")]
    pub i: u8,
    #[serde(rename = "N")]
    pub n: u8,
    #[serde(rename = "S")]
    pub s: u8,
    #[serde(rename = "T")]
    pub t: u8,
    #[serde(rename = "F")]
    pub f: u8,
    #[serde(rename = "J")]
    pub j: u8,
    #[serde(rename = "P")]
    pub p: u8,
}

impl LetterPercentages {
    /// Build a table by evaluating `f` once per letter.
    pub fn from_fn(mut f: impl FnMut(Letter) -> u8) -> Self {
        let mut table = Self::default();
        for letter in Letter::ALL {
            table.set(letter, f(letter));
        }
        table
    }

    pub fn get(&self, letter: Letter) -> u8 {
        match letter {
            Letter::E => self.e,
            Letter::I => self.i,
            Letter::N => self.n,
            Letter::S => self.s,
            Letter::T => self.t,
            Letter::F => self.f,
            Letter::J => self.j,
            Letter::P => self.p,
        }
    }

    pub fn set(&mut self, letter: Letter, value: u8) {
        let slot = match letter {
            Letter::E => &mut self.e,
            Letter::I => &mut self.i,
            Letter::N => &mut self.n,
            Letter::S => &mut self.s,
            Letter::T => &mut self.t,
            Letter::F => &mut self.f,
            Letter::J => &mut self.j,
            Letter::P => &mut self.p,
        };
        *slot = value;
    }
}

/// Quiz difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// A respondent's choice for one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: u32,
    /// String form of the chosen option's id.
    pub selected_option_id: String,
}

impl Answer {
    pub fn new(question_id: u32, option_id: u32) -> Self {
        Self {
            question_id,
            selected_option_id: option_id.to_string(),
        }
    }
}
