//! # vocab_drill
//!
//! Vocabulary practice engine: per-word mastery tracking and multiple-choice
//! quiz generation, with the library plumbing a study app needs around them.
//!
//! Words carry a mastery level from 0 (unseen or forgotten) to 5 (mastered).
//! Two study modes move that level: flashcards, where the player judges
//! themselves, and quizzes, where correctness is known.
//!
//! ## How it works
//!
//! 1. Load or import [`Word`]s into a [`WordStore`] (an in-memory
//!    [`MemoryStore`] ships with the crate).
//! 2. Pick a selection with [`study_engine::helpers::select_study_words`].
//! 3. Call [`generate_quiz`] with the selection as the target pool and the
//!    whole library as the distractor pool. Each question has one correct
//!    option and up to three wrong ones, unique by definition, shuffled.
//! 4. Feed answers back through [`apply_quiz_answer`] / [`adjust_mastery`]
//!    (or let a [`QuizSession`] / [`FlashcardSession`] do it) and persist the
//!    returned word.
//!
//! ## Key features
//!
//! - **Deterministic when asked**: `QuizRequest::seeded(u64)` reproduces the
//!   same question set; `rng_seed: None` re-randomises on every call.
//! - **Clamped levels**: [`MasteryLevel`] cannot leave 0..=5 and "mastered" is
//!   always derived from it.
//! - **Wrong-answer policy**: [`IncorrectPolicy::Reset`] (default) drops a
//!   missed word to 0, [`IncorrectPolicy::Decrement`] steps it down by one.
//!
//! ## Quick start
//!
//! ```rust
//! use vocab_drill::{adjust_mastery, generate_quiz, QuizRequest, Word};
//!
//! let library: Vec<Word> = ["cat", "dog", "bird", "fish", "frog"]
//!     .iter()
//!     .enumerate()
//!     .map(|(i, def)| Word::new(format!("w{i}"), format!("term{i}"), *def))
//!     .collect();
//!
//! let quiz = generate_quiz(&QuizRequest::seeded(42), &library, &library);
//! for q in &quiz {
//!     assert_eq!(q.options[q.correct_index].definition, q.word.definition);
//! }
//!
//! let better = adjust_mastery(&quiz[0].word, 1);
//! assert_eq!(better.mastery_level.value(), 1);
//! ```

pub mod study_engine;

// Convenience re-exports so callers can use `vocab_drill::generate_quiz`
// directly without reaching into `study_engine::`.
pub use study_engine::{
    adjust_mastery, adjust_mastery_at, apply_judgment, apply_quiz_answer, generate_quiz,
    generate_quiz_with, AnswerOutcome, ConfigError, FlashcardSession, IncorrectPolicy, Judgment,
    LatestOnly, MasteryLevel, MemoryStore, Phrase, ProjectInfo, QuizOption, QuizQuestion,
    QuizRequest, QuizSession, Silent, Speaker, StoreError, StoreResult, StudyConfig, Utterance,
    Word, WordStore, UNASSIGNED_PROJECT,
};
