//! Synthetic quiz generation.
//!
//! Produces one self-contained [`TestDefinition`] per topic: templated
//! questions on a five-step agreement ladder with random sixteen-code score
//! vectors, plus a templated profile for every type code.

use std::collections::BTreeMap;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::catalog;
use crate::model::{
    Compatibility, Difficulty, LetterPercentages, Question, QuestionOption, ResultProfile,
    TestDefinition,
};
use crate::typology::{Letter, TypeCode};

/// Inclusive bounds on the number of generated questions.
pub const MIN_QUESTIONS: u32 = 10;
pub const MAX_QUESTIONS: u32 = 15;

/// Inclusive bounds on a single score weight.
pub const MIN_WEIGHT: u32 = 1;
pub const MAX_WEIGHT: u32 = 5;

const DEFAULT_ESTIMATED_TIME: u32 = 5;

/// Builds synthetic quiz documents from a random source.
pub struct TestGenerator<R: Rng> {
    rng: R,
}

impl TestGenerator<StdRng> {
    /// Generator seeded from the OS.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Reproducible generator (timestamps aside).
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TestGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a complete document for one topic.
    pub fn generate(&mut self, topic: &str, description: &str) -> TestDefinition {
        let now = Utc::now();
        let id = self.next_id();
        tracing::debug!(%id, topic, "generating test");

        TestDefinition {
            id,
            title: format!("{topic} MBTI 테스트"),
            description: description.to_string(),
            category: topic.to_string(),
            questions: self.questions(topic),
            result_types: self.result_profiles(),
            created_at: Some(now),
            updated_at: Some(now),
            tags: vec![topic.to_string(), "MBTI".into(), "성격테스트".into()],
            estimated_time: DEFAULT_ESTIMATED_TIME,
            difficulty: Difficulty::Medium,
        }
    }

    /// `test_` followed by a random v4 UUID drawn from our own RNG.
    fn next_id(&mut self) -> String {
        let bytes: [u8; 16] = self.rng.gen();
        let uuid = uuid::Builder::from_random_bytes(bytes).into_uuid();
        format!("test_{}", uuid.simple())
    }

    fn questions(&mut self, topic: &str) -> Vec<Question> {
        let count = self.rng.gen_range(MIN_QUESTIONS..=MAX_QUESTIONS);
        (1..=count)
            .map(|id| {
                let template = self.rng.gen_range(0..catalog::QUESTION_TEMPLATE_COUNT);
                let category = catalog::QUESTION_CATEGORIES
                    .choose(&mut self.rng)
                    .map(|c| c.to_string());
                Question {
                    id,
                    text: catalog::question_text(template, topic),
                    options: self.options(),
                    category,
                }
            })
            .collect()
    }

    fn options(&mut self) -> Vec<QuestionOption> {
        catalog::OPTION_LADDER
            .iter()
            .zip(1..)
            .map(|(text, id)| QuestionOption {
                id,
                text: text.to_string(),
                scores: self.score_vector(),
            })
            .collect()
    }

    fn score_vector(&mut self) -> BTreeMap<String, u32> {
        TypeCode::ALL
            .iter()
            .map(|code| {
                (
                    code.to_string(),
                    self.rng.gen_range(MIN_WEIGHT..=MAX_WEIGHT),
                )
            })
            .collect()
    }

    fn result_profiles(&mut self) -> Vec<ResultProfile> {
        TypeCode::ALL
            .iter()
            .map(|&code| ResultProfile {
                mbti_type: code,
                title: format!("{code} 성격 유형"),
                description: format!("{code} 유형의 특징적인 성격을 가지고 있습니다."),
                characteristics: take(&catalog::CHARACTERISTICS, catalog::CHARACTERISTIC_COUNT),
                strengths: take(&catalog::STRENGTHS, catalog::STRENGTH_COUNT),
                weaknesses: take(&catalog::WEAKNESSES, catalog::WEAKNESS_COUNT),
                career_suggestions: take(&catalog::CAREERS, catalog::CAREER_COUNT),
                compatibility: self.compatibility(),
                percentage: self.biased_percentage(code),
            })
            .collect()
    }

    /// Shuffle the sixteen codes and split off 2 best, 3 good, 3 challenging.
    fn compatibility(&mut self) -> Compatibility {
        let mut codes = TypeCode::ALL;
        codes.shuffle(&mut self.rng);
        Compatibility {
            best: codes[0..2].to_vec(),
            good: codes[2..5].to_vec(),
            challenging: codes[5..8].to_vec(),
        }
    }

    /// Letters the code belongs to land in 70..=99, the rest in 20..=49.
    fn biased_percentage(&mut self, code: TypeCode) -> LetterPercentages {
        let key = code.to_string();
        LetterPercentages::from_fn(|letter: Letter| {
            if letter.claims(&key) {
                self.rng.gen_range(70..=99)
            } else {
                self.rng.gen_range(20..=49)
            }
        })
    }
}

fn take(pool: &[&str], n: usize) -> Vec<String> {
    pool.iter().take(n).map(|s| s.to_string()).collect()
}

/// Description used by the generator job for a topic.
pub fn topic_description(topic: &str) -> String {
    format!("{topic}에 대한 당신의 성격 유형을 알아보세요!")
}

/// File name the generator job writes a topic's document to. Path
/// separators in the topic become `_`.
pub fn topic_file_name(topic: &str) -> String {
    let stem: String = topic
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{stem}_mbti_test.json")
}
