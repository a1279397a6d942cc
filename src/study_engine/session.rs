//! Study sessions: the hosting flow that wires quiz questions and flashcard
//! judgments into mastery updates and persists them.
//!
//! Each mutating call persists through the store first and only then updates
//! the session, so a failed write leaves the session exactly as it was.
//! Methods take `&mut self`, which serialises updates to the same word.

use chrono::{DateTime, Utc};

use crate::study_engine::{
    config::StudyConfig,
    generator::generate_quiz,
    mastery::{apply_judgment, apply_quiz_answer},
    models::{IncorrectPolicy, Judgment, QuizQuestion, Word},
    speech::{speak, Speaker},
    store::{StoreResult, WordStore},
};

// ---------------------------------------------------------------------------
// Flashcards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FlashcardSession {
    words: Vec<Word>,
    index: usize,
    flipped: bool,
}

impl FlashcardSession {
    pub fn new(words: Vec<Word>) -> Self {
        FlashcardSession { words, index: 0, flipped: false }
    }

    pub fn current(&self) -> Option<&Word> {
        self.words.get(self.index)
    }

    /// 1-based position and deck size, for "3 / 12" style progress.
    pub fn progress(&self) -> (usize, usize) {
        (self.index + 1, self.words.len())
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Read the current term aloud.
    pub fn announce<Sp: Speaker + ?Sized>(&self, speaker: &mut Sp, config: &StudyConfig) {
        if let Some(word) = self.current() {
            speak(speaker, &word.term, config);
        }
    }

    /// Record the user's self-assessment for the current card, persist it,
    /// and move to the next card (wrapping around). Returns the updated word.
    pub fn judge<S: WordStore + ?Sized>(
        &mut self,
        store: &mut S,
        judgment: Judgment,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<Word>> {
        let Some(word) = self.current() else {
            return Ok(None);
        };
        let updated = apply_judgment(word, judgment, now);
        store.put(updated.clone())?;

        self.words[self.index] = updated.clone();
        self.flipped = false;
        self.index = (self.index + 1) % self.words.len();
        Ok(Some(updated))
    }
}

// ---------------------------------------------------------------------------
// Quiz
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_index: usize,
    /// The word after its mastery update.
    pub word: Word,
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    target: Vec<Word>,
    all: Vec<Word>,
    config: StudyConfig,
    questions: Vec<QuizQuestion>,
    index: usize,
    selected: Option<usize>,
    score: usize,
    finished: bool,
}

impl QuizSession {
    /// Generate a question set over `target` with distractors from `all`.
    pub fn start(target: Vec<Word>, all: Vec<Word>, config: StudyConfig, rng_seed: Option<u64>) -> Self {
        let mut session = QuizSession {
            target,
            all,
            config,
            questions: Vec::new(),
            index: 0,
            selected: None,
            score: 0,
            finished: false,
        };
        session.retry(rng_seed);
        session
    }

    /// Throw away progress and draw a fresh question set over the same pools.
    pub fn retry(&mut self, rng_seed: Option<u64>) {
        let request = self.config.quiz_request(rng_seed);
        self.questions = generate_quiz(&request, &self.target, &self.all);
        self.index = 0;
        self.selected = None;
        self.score = 0;
        self.finished = self.questions.is_empty();
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn current(&self) -> Option<&QuizQuestion> {
        if self.finished {
            return None;
        }
        self.questions.get(self.index)
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn policy(&self) -> IncorrectPolicy {
        self.config.on_incorrect
    }

    pub fn announce<Sp: Speaker + ?Sized>(&self, speaker: &mut Sp) {
        if let Some(q) = self.current() {
            speak(speaker, &q.word.term, &self.config);
        }
    }

    /// Answer the current question with option `index`.
    ///
    /// Returns `Ok(None)` when there is nothing to answer: the quiz is over,
    /// the question was already answered, or `index` is not an option.
    pub fn answer<S: WordStore + ?Sized>(
        &mut self,
        store: &mut S,
        index: usize,
        now: DateTime<Utc>,
    ) -> StoreResult<Option<AnswerOutcome>> {
        if self.selected.is_some() {
            return Ok(None);
        }
        let Some(question) = self.current() else {
            return Ok(None);
        };
        if index >= question.options.len() {
            return Ok(None);
        }

        let correct = question.is_correct(index);
        let correct_index = question.correct_index;
        let updated = apply_quiz_answer(&question.word, correct, self.config.on_incorrect, now);
        store.put(updated.clone())?;

        self.selected = Some(index);
        if correct {
            self.score += 1;
        }
        self.refresh(&updated);
        log::debug!("quiz answer for {}: correct={correct} level={}", updated.id, updated.mastery_level);

        Ok(Some(AnswerOutcome { correct, correct_index, word: updated }))
    }

    /// Move on. Returns `false` once the last question has been passed.
    pub fn next_question(&mut self) -> bool {
        if self.finished {
            return false;
        }
        if self.index + 1 < self.questions.len() {
            self.index += 1;
            self.selected = None;
            true
        } else {
            self.finished = true;
            log::info!("quiz finished: {}/{}", self.score, self.questions.len());
            false
        }
    }

    /// Keep every copy of `word` in sync so later questions and retries see
    /// the new level.
    fn refresh(&mut self, word: &Word) {
        let copies = self
            .target
            .iter_mut()
            .chain(self.all.iter_mut())
            .chain(self.questions.iter_mut().map(|q| &mut q.word));
        for slot in copies.filter(|w| w.id == word.id) {
            *slot = word.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::study_engine::{
        speech::tests::RecordingSpeaker,
        store::{MemoryStore, StoreError},
    };

    fn clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()
    }

    fn library(n: usize) -> Vec<Word> {
        (0..n).map(|i| Word::new(format!("w{i}"), format!("term{i}"), format!("def{i}")).with_level(2)).collect()
    }

    /// Store whose writes always fail.
    struct BrokenStore;

    impl WordStore for BrokenStore {
        fn list(&self) -> StoreResult<Vec<Word>> {
            Ok(Vec::new())
        }
        fn put(&mut self, _word: Word) -> StoreResult<()> {
            Err(StoreError::Persistence("disk full".into()))
        }
        fn delete(&mut self, _id: &str) -> StoreResult<()> {
            Err(StoreError::Persistence("disk full".into()))
        }
        fn replace_all(&mut self, _words: Vec<Word>) -> StoreResult<()> {
            Err(StoreError::Persistence("disk full".into()))
        }
    }

    #[test]
    fn flashcard_judgments_persist_and_wrap() {
        let words = library(2);
        let mut store = MemoryStore::with_words(words.clone());
        let mut session = FlashcardSession::new(words);

        session.flip();
        let w = session.judge(&mut store, Judgment::DidNotKnow, clock()).unwrap().unwrap();
        assert_eq!(w.mastery_level.value(), 1);
        assert!(!session.is_flipped());
        assert_eq!(session.progress(), (2, 2));

        session.judge(&mut store, Judgment::Knew, clock()).unwrap();
        assert_eq!(session.progress(), (1, 2));
        let w = session.judge(&mut store, Judgment::Knew, clock()).unwrap().unwrap();
        assert_eq!(w.mastery_level.value(), 2);

        assert_eq!(store.get("w0").unwrap().mastery_level.value(), 2);
        assert_eq!(store.get("w1").unwrap().mastery_level.value(), 3);
        assert_eq!(store.get("w0").unwrap().last_reviewed, Some(clock()));
    }

    #[test]
    fn empty_flashcard_deck_is_a_no_op() {
        let mut store = MemoryStore::new();
        let mut session = FlashcardSession::new(Vec::new());
        assert!(session.current().is_none());
        assert!(session.judge(&mut store, Judgment::Knew, clock()).unwrap().is_none());
    }

    #[test]
    fn failed_write_leaves_flashcards_unchanged() {
        let mut session = FlashcardSession::new(library(3));
        assert!(session.judge(&mut BrokenStore, Judgment::Knew, clock()).is_err());
        assert_eq!(session.progress(), (1, 3));
        assert_eq!(session.current().unwrap().mastery_level.value(), 2);
    }

    #[test]
    fn quiz_runs_to_completion_with_score() {
        let words = library(12);
        let mut store = MemoryStore::with_words(words.clone());
        let mut session = QuizSession::start(words.clone(), words, StudyConfig::default(), Some(11));
        assert_eq!(session.questions().len(), 10);

        let mut answered = 0;
        loop {
            let q = session.current().unwrap();
            // Alternate right and wrong answers.
            let pick = if answered % 2 == 0 { q.correct_index } else { (q.correct_index + 1) % q.options.len() };
            let outcome = session.answer(&mut store, pick, clock()).unwrap().unwrap();
            assert_eq!(outcome.correct, answered % 2 == 0);
            let expected = if outcome.correct { 3 } else { 0 };
            assert_eq!(store.get(&outcome.word.id).unwrap().mastery_level.value(), expected);
            answered += 1;
            if !session.next_question() {
                break;
            }
        }
        assert_eq!(answered, 10);
        assert_eq!(session.score(), 5);
        assert!(session.is_finished());
        assert!(session.current().is_none());
    }

    #[test]
    fn second_answer_to_same_question_is_ignored() {
        let words = library(6);
        let mut store = MemoryStore::with_words(words.clone());
        let mut session = QuizSession::start(words.clone(), words, StudyConfig::default(), Some(5));
        let correct = session.current().unwrap().correct_index;

        assert!(session.answer(&mut store, correct, clock()).unwrap().is_some());
        assert!(session.answer(&mut store, correct, clock()).unwrap().is_none());
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn out_of_range_answer_is_ignored() {
        let words = library(6);
        let mut store = MemoryStore::with_words(words.clone());
        let mut session = QuizSession::start(words.clone(), words, StudyConfig::default(), Some(5));
        assert!(session.answer(&mut store, 99, clock()).unwrap().is_none());
        assert!(session.selected().is_none());
    }

    #[test]
    fn decrement_policy_steps_down() {
        let words = library(6);
        let mut store = MemoryStore::with_words(words.clone());
        let config = StudyConfig { on_incorrect: IncorrectPolicy::Decrement, ..StudyConfig::default() };
        let mut session = QuizSession::start(words.clone(), words, config, Some(8));
        let q = session.current().unwrap();
        let wrong = (q.correct_index + 1) % q.options.len();
        let outcome = session.answer(&mut store, wrong, clock()).unwrap().unwrap();
        assert_eq!(outcome.word.mastery_level.value(), 1);
    }

    #[test]
    fn failed_write_does_not_record_answer() {
        let words = library(6);
        let mut session = QuizSession::start(words.clone(), words, StudyConfig::default(), Some(2));
        let correct = session.current().unwrap().correct_index;
        assert!(session.answer(&mut BrokenStore, correct, clock()).is_err());
        assert_eq!(session.score(), 0);
        assert!(session.selected().is_none());
    }

    #[test]
    fn retry_resets_progress_and_keeps_new_levels() {
        let words = library(4);
        let mut store = MemoryStore::with_words(words.clone());
        let mut session = QuizSession::start(words.clone(), words, StudyConfig::default(), Some(1));
        let q = session.current().unwrap();
        let (id, correct) = (q.word.id.clone(), q.correct_index);
        session.answer(&mut store, correct, clock()).unwrap();
        while session.next_question() {}
        assert!(session.is_finished());

        session.retry(Some(1));
        assert!(!session.is_finished());
        assert_eq!(session.score(), 0);
        assert_eq!(session.questions().len(), 4);
        let again = session.questions().iter().find(|q| q.word.id == id).unwrap();
        assert_eq!(again.word.mastery_level.value(), 3);
    }

    #[test]
    fn empty_target_finishes_immediately() {
        let session = QuizSession::start(Vec::new(), library(5), StudyConfig::default(), None);
        assert!(session.questions().is_empty());
        assert!(session.is_finished());
    }

    #[test]
    fn sessions_announce_current_term() {
        let mut speaker = RecordingSpeaker::default();
        let words = library(4);
        FlashcardSession::new(words.clone()).announce(&mut speaker, &StudyConfig::default());
        let quiz = QuizSession::start(words.clone(), words, StudyConfig::default(), Some(3));
        quiz.announce(&mut speaker);
        assert_eq!(speaker.spoken.len(), 2);
        assert_eq!(speaker.spoken[0], "term0");
        assert_eq!(speaker.spoken[1], quiz.current().unwrap().word.term);
    }
}
