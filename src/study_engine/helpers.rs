//! Shared functions the hosting flow uses before a session starts: picking
//! which words to study and summarising progress per project.

use crate::study_engine::{
    config::StudyConfig,
    models::{MasteryLevel, ProjectInfo, Word},
};

/// Words whose project is in `projects`, optionally without mastered ones.
pub fn select_study_words(words: &[Word], projects: &[&str], exclude_mastered: bool) -> Vec<Word> {
    words
        .iter()
        .filter(|w| projects.contains(&w.project_name()))
        .filter(|w| !(exclude_mastered && w.is_mastered()))
        .cloned()
        .collect()
}

pub fn can_start_flashcards(selection: &[Word]) -> bool {
    !selection.is_empty()
}

/// A quiz needs enough words to fill its options with real distractors.
pub fn can_start_quiz(selection: &[Word], config: &StudyConfig) -> bool {
    selection.len() >= config.min_quiz_pool
}

/// Mean level as a fraction of the maximum; 0 for no words.
pub fn average_mastery(words: &[Word]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let total: u64 = words.iter().map(|w| w.mastery_level.value() as u64).sum();
    total as f64 / (words.len() as f64 * MasteryLevel::MAX.value() as f64)
}

/// One entry per project, in the order projects first appear.
pub fn project_summaries(words: &[Word]) -> Vec<ProjectInfo> {
    let mut names: Vec<&str> = Vec::new();
    for w in words {
        if !names.contains(&w.project_name()) {
            names.push(w.project_name());
        }
    }
    names
        .into_iter()
        .map(|name| {
            let members: Vec<Word> = words.iter().filter(|w| w.project_name() == name).cloned().collect();
            ProjectInfo {
                name: name.to_string(),
                word_count: members.len(),
                average_mastery: average_mastery(&members),
            }
        })
        .collect()
}
