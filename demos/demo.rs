//! End-to-end walk through a study session.
//!
//! Run with: `RUST_LOG=debug cargo run --example demo`
//!
//! 1. **Import**: two projects are parsed from free text into an in-memory
//!    library.
//! 2. **Quiz**: the "Fruit" project is quizzed with distractors drawn from
//!    the whole library, answering every other question wrong so both
//!    mastery paths show up.
//! 3. **Flashcards**: the verbs are reviewed with self-assessment.
//! 4. **Backup**: the library is exported as a JSON snapshot.
//!
//! Seeds are fixed, so the output is reproducible.

use chrono::Utc;
use vocab_drill::study_engine::{
    helpers::{project_summaries, select_study_words},
    import::parse_bulk_text,
    snapshot::export_snapshot,
    store::add_words,
};
use vocab_drill::{
    FlashcardSession, Judgment, LatestOnly, MemoryStore, QuizSession, Speaker, StudyConfig,
    Utterance, WordStore,
};

/// Prints instead of speaking.
struct Console;

impl Speaker for Console {
    fn say(&mut self, utterance: Utterance) {
        println!("  🔊 {} [{} x{}]", utterance.text, utterance.locale, utterance.rate);
    }

    fn cancel(&mut self) {}
}

fn print_progress(store: &MemoryStore) {
    let words = store.list().unwrap_or_default();
    for p in project_summaries(&words) {
        println!("  {:<8} {:>2} words  {:>5.1}% mastered", p.name, p.word_count, p.average_mastery * 100.0);
    }
}

fn main() {
    env_logger::init();

    let config = StudyConfig::default();
    let mut store = MemoryStore::new();
    let mut speaker = LatestOnly::new(Console);

    let fruit = parse_bulk_text("apple 蘋果\nbanana 香蕉\ncherry 櫻桃\ngrape 葡萄\nlemon 檸檬\nmango 芒果", "Fruit", Utc::now());
    let verbs = parse_bulk_text("run 跑\njump 跳\nswim 游泳\nclimb 攀爬", "Verbs", Utc::now());
    add_words(&mut store, fruit).expect("in-memory store");
    add_words(&mut store, verbs).expect("in-memory store");

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Quiz: Fruit (policy: {})", config.on_incorrect);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let library = store.list().expect("in-memory store");
    let selection = select_study_words(&library, &["Fruit"], true);
    let mut quiz = QuizSession::start(selection, library, config.clone(), Some(42));

    let mut turn = 0;
    while let Some(q) = quiz.current() {
        println!();
        println!("  Q{}: {}", turn + 1, q.word.term);
        for (i, opt) in q.options.iter().enumerate() {
            println!("    {}) {} {}", i + 1, opt.part_of_speech, opt.definition);
        }
        let pick = if turn % 2 == 0 { q.correct_index } else { (q.correct_index + 1) % q.options.len() };
        quiz.announce(&mut speaker);
        if let Some(outcome) = quiz.answer(&mut store, pick, Utc::now()).expect("in-memory store") {
            let mark = if outcome.correct { "✓" } else { "✗" };
            println!("  {mark} picked {} -> level {}", pick + 1, outcome.word.mastery_level);
        }
        turn += 1;
        quiz.next_question();
    }
    println!();
    println!("  Score: {} / {}", quiz.score(), quiz.questions().len());

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Flashcards: Verbs");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let library = store.list().expect("in-memory store");
    let mut cards = FlashcardSession::new(select_study_words(&library, &["Verbs"], false));
    for judgment in [Judgment::Knew, Judgment::Knew, Judgment::DidNotKnow, Judgment::Knew] {
        cards.announce(&mut speaker, &config);
        cards.flip();
        if let Some(word) = cards.judge(&mut store, judgment, Utc::now()).expect("in-memory store") {
            println!("  {:?}: {} = {} -> level {}", judgment, word.term, word.definition, word.mastery_level);
        }
    }

    println!();
    println!("  Progress:");
    print_progress(&store);

    let backup = export_snapshot(&store).expect("serializable library");
    println!();
    println!("  Snapshot: {} bytes of JSON", backup.len());
}
