use std::collections::HashSet;
use rand::{rngs::StdRng, SeedableRng};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::study_engine::{
    models::{QuizOption, QuizQuestion, QuizRequest, Word},
    pool::WordPool,
};

/// Entry point: seeds the RNG from the request and builds a question set.
///
/// `target` supplies the questions, `all` supplies the wrong answers. The two
/// are independent, so distractors may come from any project.
pub fn generate_quiz(request: &QuizRequest, target: &[Word], all: &[Word]) -> Vec<QuizQuestion> {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    generate_quiz_with(&mut rng, target, all, request.max_questions, request.max_distractors)
}

/// Build up to `max_questions` questions with up to `max_distractors` wrong
/// options each, drawing all randomness from `rng`.
pub fn generate_quiz_with<R: Rng>(
    rng: &mut R,
    target: &[Word],
    all: &[Word],
    max_questions: usize,
    max_distractors: usize,
) -> Vec<QuizQuestion> {
    let mut pool = WordPool::new_shuffled(rng, target);
    let sampled = pool.draw_n(max_questions);

    let questions: Vec<QuizQuestion> = sampled
        .into_iter()
        .map(|word| build_question(rng, word, all, max_distractors))
        .collect();

    log::info!(
        "generated {} quiz questions from {} targets / {} candidates",
        questions.len(), target.len(), all.len()
    );
    questions
}

/// Distinct-definition wrong answers for `word`, first occurrence wins.
///
/// Any entry sharing `word`'s definition is excluded: two words with the
/// same gloss cannot be told apart by the player.
pub fn distractor_candidates(word: &Word, all: &[Word]) -> Vec<QuizOption> {
    let mut seen: HashSet<&str> = HashSet::new();
    all.iter()
        .filter(|w| w.definition != word.definition)
        .filter(|w| seen.insert(w.definition.as_str()))
        .map(QuizOption::of)
        .collect()
}

fn build_question<R: Rng>(rng: &mut R, word: &Word, all: &[Word], max_distractors: usize) -> QuizQuestion {
    let mut candidates = distractor_candidates(word, all);
    candidates.shuffle(rng);
    candidates.truncate(max_distractors);

    if candidates.len() < max_distractors {
        log::debug!(
            "only {} distractors available for {} ({})",
            candidates.len(), word.id, word.term
        );
    }

    let mut options = candidates;
    options.push(QuizOption::of(word));
    options.shuffle(rng);

    // Distractors never share the word's definition, so exactly one match.
    let correct_index = options
        .iter()
        .position(|o| o.definition == word.definition)
        .unwrap_or(0);

    QuizQuestion { word: word.clone(), options, correct_index }
}
