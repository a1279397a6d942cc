use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::study_engine::snapshot::WordRecord;

/// Project label used for words that were imported without one.
pub const UNASSIGNED_PROJECT: &str = "Unassigned";

// ---------------------------------------------------------------------------
// Mastery
// ---------------------------------------------------------------------------

/// Proficiency score 0..=5 where 5 = mastered.
///
/// The only way to build one is through [`MasteryLevel::clamped`] (or the
/// serde path, which clamps too), so an out-of-range level cannot exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct MasteryLevel(u8);

impl MasteryLevel {
    pub const MIN: MasteryLevel = MasteryLevel(0);
    pub const MAX: MasteryLevel = MasteryLevel(5);

    pub fn clamped(level: i64) -> Self {
        MasteryLevel(level.clamp(0, Self::MAX.0 as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Move by `delta`, saturating at both ends.
    pub fn shifted(self, delta: i64) -> Self {
        Self::clamped((self.0 as i64).saturating_add(delta))
    }

    pub fn is_mastered(self) -> bool {
        self == Self::MAX
    }
}

impl From<i64> for MasteryLevel {
    fn from(level: i64) -> Self {
        MasteryLevel::clamped(level)
    }
}

/// Accepts any JSON number (rounded, then clamped) and treats `null` as 0.
impl<'de> Deserialize<'de> for MasteryLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
        // `as` saturates, and NaN becomes 0.
        Ok(MasteryLevel::clamped(raw.round() as i64))
    }
}

impl From<MasteryLevel> for u8 {
    fn from(level: MasteryLevel) -> Self {
        level.0
    }
}

impl fmt::Display for MasteryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX.0)
    }
}

// ---------------------------------------------------------------------------
// Word entries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phrase {
    pub text: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_translation: Option<String>,
}

/// A learnable vocabulary entry.
///
/// `is_mastered` is not stored: it is derived from `mastery_level` on every
/// read, see [`Word::is_mastered`]. The snapshot format still carries an
/// `isMastered` field: serde goes through the snapshot record, see
/// `study_engine::snapshot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WordRecord", into = "WordRecord")]
pub struct Word {
    pub id: String,
    pub term: String,
    pub phonetic: Option<String>,
    pub part_of_speech: String,
    /// Native-language meaning. Doubles as the answer key in quizzes.
    pub definition: String,
    pub project: String,
    pub inflections: Option<String>,
    pub phrases: Vec<Phrase>,
    pub notes: Option<String>,
    pub example: Option<String>,
    pub example_translation: Option<String>,
    pub learned_count: u32,
    pub mastery_level: MasteryLevel,
    pub last_reviewed: Option<DateTime<Utc>>,
}

impl Word {
    /// Minimal entry at level 0 in the unassigned project.
    pub fn new(id: impl Into<String>, term: impl Into<String>, definition: impl Into<String>) -> Self {
        Word {
            id: id.into(),
            term: term.into(),
            phonetic: None,
            part_of_speech: String::new(),
            definition: definition.into(),
            project: UNASSIGNED_PROJECT.to_string(),
            inflections: None,
            phrases: Vec::new(),
            notes: None,
            example: None,
            example_translation: None,
            learned_count: 0,
            mastery_level: MasteryLevel::MIN,
            last_reviewed: None,
        }
    }

    pub fn is_mastered(&self) -> bool {
        self.mastery_level.is_mastered()
    }

    /// Project label with the empty string folded into the unassigned bucket.
    pub fn project_name(&self) -> &str {
        if self.project.trim().is_empty() {
            UNASSIGNED_PROJECT
        } else {
            &self.project
        }
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn with_part_of_speech(mut self, pos: impl Into<String>) -> Self {
        self.part_of_speech = pos.into();
        self
    }

    pub fn with_level(mut self, level: i64) -> Self {
        self.mastery_level = MasteryLevel::clamped(level);
        self
    }
}

// ---------------------------------------------------------------------------
// Quiz types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    pub definition: String,
    pub part_of_speech: String,
}

impl QuizOption {
    pub fn of(word: &Word) -> Self {
        QuizOption {
            definition: word.definition.clone(),
            part_of_speech: word.part_of_speech.clone(),
        }
    }
}

/// One multiple-choice question. Generated per session, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub word: Word,
    pub options: Vec<QuizOption>,
    /// Position of the option whose definition equals `word.definition`.
    pub correct_index: usize,
}

impl QuizQuestion {
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }

    pub fn correct_option(&self) -> &QuizOption {
        &self.options[self.correct_index]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizRequest {
    /// `None` draws from OS entropy, so every call (e.g. a retry) is
    /// independently randomised.
    pub rng_seed: Option<u64>,
    pub max_questions: usize,
    pub max_distractors: usize,
}

impl QuizRequest {
    pub const DEFAULT_MAX_QUESTIONS: usize = 10;
    pub const DEFAULT_MAX_DISTRACTORS: usize = 3;

    pub fn new() -> Self {
        QuizRequest {
            rng_seed: None,
            max_questions: Self::DEFAULT_MAX_QUESTIONS,
            max_distractors: Self::DEFAULT_MAX_DISTRACTORS,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        QuizRequest { rng_seed: Some(seed), ..Self::new() }
    }
}

impl Default for QuizRequest {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Study policies
// ---------------------------------------------------------------------------

/// What a wrong quiz answer does to the word's level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncorrectPolicy {
    /// Drop straight to 0.
    #[default]
    Reset,
    /// Step down by one.
    Decrement,
}

impl fmt::Display for IncorrectPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncorrectPolicy::Reset     => write!(f, "reset"),
            IncorrectPolicy::Decrement => write!(f, "decrement"),
        }
    }
}

/// Self-assessment after a flashcard is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Judgment {
    Knew,
    DidNotKnow,
}

impl Judgment {
    pub fn delta(self) -> i64 {
        match self {
            Judgment::Knew       => 1,
            Judgment::DidNotKnow => -1,
        }
    }
}

// ---------------------------------------------------------------------------
// Library statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
    pub word_count: usize,
    /// Mean level divided by the maximum, in [0, 1].
    pub average_mastery: f64,
}
