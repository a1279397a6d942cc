//! Mastery tracking: the single place a word's level changes.
//!
//! Every function here is a pure transformation of a [`Word`] plus a clock
//! read. Persisting the result is the caller's job (see `store` and
//! `session`).

use chrono::{DateTime, Utc};
use crate::study_engine::models::{IncorrectPolicy, Judgment, Word};

/// Apply `delta` to the word's level, clamped to 0..=5, stamping `now()`.
pub fn adjust_mastery(word: &Word, delta: i64) -> Word {
    adjust_mastery_at(word, delta, Utc::now())
}

/// [`adjust_mastery`] with an explicit clock.
pub fn adjust_mastery_at(word: &Word, delta: i64, now: DateTime<Utc>) -> Word {
    let level = word.mastery_level.shifted(delta);
    log::debug!("mastery {} {} -> {} (delta {delta})", word.id, word.mastery_level, level);
    Word {
        mastery_level: level,
        last_reviewed: Some(now),
        ..word.clone()
    }
}

/// Flashcard policy: +1 when the user knew it, -1 otherwise.
pub fn apply_judgment(word: &Word, judgment: Judgment, now: DateTime<Utc>) -> Word {
    adjust_mastery_at(word, judgment.delta(), now)
}

/// Quiz policy: +1 on a correct answer; a wrong one resets or decrements
/// depending on `policy`.
pub fn apply_quiz_answer(word: &Word, correct: bool, policy: IncorrectPolicy, now: DateTime<Utc>) -> Word {
    let delta = match (correct, policy) {
        (true, _)                          => 1,
        (false, IncorrectPolicy::Decrement) => -1,
        // A delta of -level lands exactly on 0 through the same clamp path.
        (false, IncorrectPolicy::Reset)     => -(word.mastery_level.value() as i64),
    };
    adjust_mastery_at(word, delta, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use crate::study_engine::models::MasteryLevel;

    fn at(level: i64) -> Word {
        Word::new("id-1", "apple", "a fruit").with_level(level)
    }

    fn clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn level_is_clamped_for_every_start_and_delta() {
        for start in 0..=5i64 {
            for delta in -8..=8i64 {
                let out = adjust_mastery_at(&at(start), delta, clock());
                let expected = (start + delta).clamp(0, 5) as u8;
                assert_eq!(out.mastery_level.value(), expected, "start={start} delta={delta}");
                assert_eq!(out.is_mastered(), expected == 5);
            }
        }
    }

    #[test]
    fn extreme_deltas_saturate() {
        assert_eq!(adjust_mastery(&at(3), i64::MAX).mastery_level, MasteryLevel::MAX);
        assert_eq!(adjust_mastery(&at(3), i64::MIN).mastery_level, MasteryLevel::MIN);
    }

    #[test]
    fn zero_delta_only_refreshes_timestamp() {
        let word = at(4);
        let out = adjust_mastery_at(&word, 0, clock());
        assert_eq!(out.mastery_level, word.mastery_level);
        assert_eq!(out.is_mastered(), word.is_mastered());
        assert_eq!(out.last_reviewed, Some(clock()));
    }

    #[test]
    fn other_fields_are_untouched() {
        let word = at(1).with_project("Unit 3").with_part_of_speech("n.");
        let out = adjust_mastery_at(&word, 1, clock());
        assert_eq!(out.id, word.id);
        assert_eq!(out.term, word.term);
        assert_eq!(out.definition, word.definition);
        assert_eq!(out.project, word.project);
        assert_eq!(out.part_of_speech, word.part_of_speech);
    }

    #[test]
    fn flashcard_down_then_up() {
        let w = apply_judgment(&at(2), Judgment::DidNotKnow, clock());
        assert_eq!(w.mastery_level.value(), 1);
        let w = apply_judgment(&w, Judgment::Knew, clock());
        assert_eq!(w.mastery_level.value(), 2);
        let w = apply_judgment(&w, Judgment::Knew, clock());
        assert_eq!(w.mastery_level.value(), 3);
        assert!(!w.is_mastered());
    }

    #[test]
    fn quiz_reset_then_climb_back() {
        let w = apply_quiz_answer(&at(4), false, IncorrectPolicy::Reset, clock());
        assert_eq!(w.mastery_level.value(), 0);
        assert!(!w.is_mastered());

        let w = apply_quiz_answer(&at(4), true, IncorrectPolicy::Reset, clock());
        assert_eq!(w.mastery_level.value(), 5);
        assert!(w.is_mastered());
    }

    #[test]
    fn quiz_decrement_steps_down_once() {
        let w = apply_quiz_answer(&at(4), false, IncorrectPolicy::Decrement, clock());
        assert_eq!(w.mastery_level.value(), 3);
        let w = apply_quiz_answer(&at(0), false, IncorrectPolicy::Decrement, clock());
        assert_eq!(w.mastery_level.value(), 0);
    }

    #[test]
    fn mastered_is_not_absorbing() {
        let w = apply_judgment(&at(5), Judgment::DidNotKnow, clock());
        assert_eq!(w.mastery_level.value(), 4);
        assert!(!w.is_mastered());
    }
}
