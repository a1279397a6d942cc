//! Core study engine: mastery tracking, quiz generation, and the library
//! plumbing around them.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Shared types: words, mastery levels, quiz questions, policies |
//! | `mastery`   | The only place a word's level changes (clamped, timestamped) |
//! | `pool`      | Shuffled draw pile used to sample quiz targets |
//! | `generator` | `generate_quiz()`: questions with unique-by-definition distractors |
//! | `config`    | `StudyConfig` with JSON loading and validation |
//! | `store`     | `WordStore` trait, in-memory store, library operations |
//! | `snapshot`  | JSON backup export/import |
//! | `helpers`   | Study selection and per-project statistics |
//! | `import`    | Bulk text parser for quick word entry |
//! | `speech`    | Text-to-speech seam with cancel-on-new semantics |
//! | `session`   | Flashcard and quiz sessions that persist mastery changes |

pub mod config;
pub mod generator;
pub mod helpers;
pub mod import;
pub mod mastery;
pub mod models;
pub mod pool;
pub mod session;
pub mod snapshot;
pub mod speech;
pub mod store;

// Re-export the public API surface so callers can use
// `study_engine::generate_quiz` without reaching into sub-modules.
pub use config::{ConfigError, StudyConfig};
pub use generator::{generate_quiz, generate_quiz_with};
pub use mastery::{adjust_mastery, adjust_mastery_at, apply_judgment, apply_quiz_answer};
pub use models::{
    IncorrectPolicy, Judgment, MasteryLevel, Phrase, ProjectInfo, QuizOption, QuizQuestion,
    QuizRequest, Word, UNASSIGNED_PROJECT,
};
pub use session::{AnswerOutcome, FlashcardSession, QuizSession};
pub use speech::{LatestOnly, Silent, Speaker, Utterance};
pub use store::{MemoryStore, StoreError, StoreResult, WordStore};
