//! Per-letter score accumulation.
//!
//! A selected option carries a score vector keyed by type code (or single
//! letter). [`resolve_scores`] spreads each weight onto the letters the key
//! claims, one letter per axis for any of the sixteen codes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::typology::{Axis, Letter, TypeCode};

/// Eight non-negative counters, one per letter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisScoreAccumulator {
    counts: [u32; 8],
}

impl AxisScoreAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, letter: Letter) -> u32 {
        self.counts[letter.index()]
    }

    pub fn add(&mut self, letter: Letter, weight: u32) {
        let slot = &mut self.counts[letter.index()];
        *slot = slot.saturating_add(weight);
    }

    /// Combined weight of both letters of an axis.
    pub fn axis_total(&self, axis: Axis) -> u32 {
        let (first, second) = axis.letters();
        self.get(first).saturating_add(self.get(second))
    }

    /// The winning letter of an axis. Ties go to the first-listed letter.
    pub fn dominant(&self, axis: Axis) -> Letter {
        let (first, second) = axis.letters();
        if self.get(second) > self.get(first) {
            second
        } else {
            first
        }
    }

    /// The code formed by the dominant letter of every axis.
    pub fn type_code(&self) -> TypeCode {
        let letters = Axis::ALL.map(|axis| self.dominant(axis));
        TypeCode::from_axis_letters(letters)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }
}

/// Accumulate one score vector into `acc`.
pub fn resolve_scores(scores: &BTreeMap<String, u32>, acc: &mut AxisScoreAccumulator) {
    for (key, &weight) in scores {
        for letter in Letter::ALL {
            if letter.claims(key) {
                acc.add(letter, weight);
            }
        }
    }
}
