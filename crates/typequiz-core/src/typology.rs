//! The typological alphabet: letters, axes, and the sixteen four-letter codes.
//!
//! Every derivation that asks "does this code belong to letter X" goes through
//! [`Letter::claims`], so the generator, the normalizer, and the scoring
//! engine agree on axis membership.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the eight preference letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    E,
    I,
    N,
    S,
    T,
    F,
    J,
    P,
}

impl Letter {
    /// All letters, grouped by axis in code order.
    pub const ALL: [Letter; 8] = [
        Letter::E,
        Letter::I,
        Letter::N,
        Letter::S,
        Letter::T,
        Letter::F,
        Letter::J,
        Letter::P,
    ];

    /// Dense index used by per-letter tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn axis(self) -> Axis {
        match self {
            Letter::E | Letter::I => Axis::Energy,
            Letter::N | Letter::S => Axis::Perception,
            Letter::T | Letter::F => Axis::Judgement,
            Letter::J | Letter::P => Axis::Lifestyle,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Letter::E => 'E',
            Letter::I => 'I',
            Letter::N => 'N',
            Letter::S => 'S',
            Letter::T => 'T',
            Letter::F => 'F',
            Letter::J => 'J',
            Letter::P => 'P',
        }
    }

    pub fn from_char(c: char) -> Option<Letter> {
        match c {
            'E' => Some(Letter::E),
            'I' => Some(Letter::I),
            'N' => Some(Letter::N),
            'S' => Some(Letter::S),
            'T' => Some(Letter::T),
            'F' => Some(Letter::F),
            'J' => Some(Letter::J),
            'P' => Some(Letter::P),
            _ => None,
        }
    }

    /// Membership test of a score key (or code) against this letter.
    ///
    /// E/I look at the first character, N/S and T/F anywhere in the key,
    /// J/P at the last character. Keys may be full codes (`"ENTJ"`) or single
    /// letters (`"E"`).
    pub fn claims(self, key: &str) -> bool {
        let c = self.as_char();
        match self.axis() {
            Axis::Energy => key.starts_with(c),
            Axis::Perception | Axis::Judgement => key.contains(c),
            Axis::Lifestyle => key.ends_with(c),
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One of the four opposing letter pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// E / I
    Energy,
    /// N / S
    Perception,
    /// T / F
    Judgement,
    /// J / P
    Lifestyle,
}

impl Axis {
    /// Axes in the order their letters appear in a code.
    pub const ALL: [Axis; 4] = [Axis::Energy, Axis::Perception, Axis::Judgement, Axis::Lifestyle];

    /// The pair of letters for this axis. The first one wins ties.
    pub const fn letters(self) -> (Letter, Letter) {
        match self {
            Axis::Energy => (Letter::E, Letter::I),
            Axis::Perception => (Letter::N, Letter::S),
            Axis::Judgement => (Letter::T, Letter::F),
            Axis::Lifestyle => (Letter::J, Letter::P),
        }
    }
}

/// A four-letter typological code such as `ENTP`.
///
/// Only the sixteen combinations of one letter per axis are representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeCode([Letter; 4]);

impl TypeCode {
    /// The sixteen codes, in catalog order.
    pub const ALL: [TypeCode; 16] = [
        TypeCode([Letter::I, Letter::N, Letter::T, Letter::J]),
        TypeCode([Letter::I, Letter::N, Letter::T, Letter::P]),
        TypeCode([Letter::E, Letter::N, Letter::T, Letter::J]),
        TypeCode([Letter::E, Letter::N, Letter::T, Letter::P]),
        TypeCode([Letter::I, Letter::N, Letter::F, Letter::J]),
        TypeCode([Letter::I, Letter::N, Letter::F, Letter::P]),
        TypeCode([Letter::E, Letter::N, Letter::F, Letter::J]),
        TypeCode([Letter::E, Letter::N, Letter::F, Letter::P]),
        TypeCode([Letter::I, Letter::S, Letter::T, Letter::J]),
        TypeCode([Letter::I, Letter::S, Letter::F, Letter::J]),
        TypeCode([Letter::E, Letter::S, Letter::T, Letter::J]),
        TypeCode([Letter::E, Letter::S, Letter::F, Letter::J]),
        TypeCode([Letter::I, Letter::S, Letter::T, Letter::P]),
        TypeCode([Letter::I, Letter::S, Letter::F, Letter::P]),
        TypeCode([Letter::E, Letter::S, Letter::T, Letter::P]),
        TypeCode([Letter::E, Letter::S, Letter::F, Letter::P]),
    ];

    /// Build a code from one letter per axis.
    ///
    /// Returns `None` if a letter sits on the wrong axis.
    pub fn from_letters(letters: [Letter; 4]) -> Option<TypeCode> {
        let on_axis = letters
            .iter()
            .zip(Axis::ALL)
            .all(|(letter, axis)| letter.axis() == axis);
        on_axis.then_some(TypeCode(letters))
    }

    /// Caller guarantees one letter per axis, in axis order.
    pub(crate) fn from_axis_letters(letters: [Letter; 4]) -> TypeCode {
        debug_assert!(TypeCode::from_letters(letters).is_some());
        TypeCode(letters)
    }

    pub fn letters(&self) -> [Letter; 4] {
        self.0
    }

    /// Whether this code sits on the given side of its axis.
    pub fn has(&self, letter: Letter) -> bool {
        self.0.contains(&letter)
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.0 {
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

impl FromStr for TypeCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters: Vec<Letter> = s.chars().filter_map(Letter::from_char).collect();
        if letters.len() != 4 || s.chars().count() != 4 {
            return Err(format!("unknown type code: {s}"));
        }
        TypeCode::from_letters([letters[0], letters[1], letters[2], letters[3]])
            .ok_or_else(|| format!("unknown type code: {s}"))
    }
}

impl TryFrom<String> for TypeCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeCode> for String {
    fn from(code: TypeCode) -> Self {
        code.to_string()
    }
}
