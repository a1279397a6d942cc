//! Word library persistence.
//!
//! The engine never touches storage directly. Everything goes through a
//! [`WordStore`], which hosts can back with whatever they like; the crate
//! ships [`MemoryStore`] for tests and embedded use.
//!
//! The free functions below are the library-management operations built on
//! top of the four store primitives.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::study_engine::models::{Word, UNASSIGNED_PROJECT};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("word {0} not found")]
    NotFound(String),

    #[error("failed to persist words: {0}")]
    Persistence(String),

    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("snapshot must be a JSON array of words")]
    NotAnArray,
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait WordStore {
    /// Every word, in storage order.
    fn list(&self) -> StoreResult<Vec<Word>>;
    /// Insert or replace by `id`.
    fn put(&mut self, word: Word) -> StoreResult<()>;
    fn delete(&mut self, id: &str) -> StoreResult<()>;
    /// Swap the whole library for `words`.
    fn replace_all(&mut self, words: Vec<Word>) -> StoreResult<()>;
}

/// Insertion-ordered in-memory library.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    words: Vec<Word>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_words(words: Vec<Word>) -> Self {
        MemoryStore { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Word> {
        self.words.iter().find(|w| w.id == id)
    }
}

impl WordStore for MemoryStore {
    fn list(&self) -> StoreResult<Vec<Word>> {
        Ok(self.words.clone())
    }

    fn put(&mut self, word: Word) -> StoreResult<()> {
        match self.words.iter_mut().find(|w| w.id == word.id) {
            Some(slot) => *slot = word,
            None => self.words.push(word),
        }
        Ok(())
    }

    fn delete(&mut self, id: &str) -> StoreResult<()> {
        self.words.retain(|w| w.id != id);
        Ok(())
    }

    fn replace_all(&mut self, words: Vec<Word>) -> StoreResult<()> {
        self.words = words;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Library operations
// ---------------------------------------------------------------------------

/// Append freshly imported words. Returns how many were added.
pub fn add_words<S: WordStore + ?Sized>(store: &mut S, words: Vec<Word>) -> StoreResult<usize> {
    let count = words.len();
    for word in words {
        store.put(word)?;
    }
    log::info!("added {count} words");
    Ok(count)
}

/// Replace an existing word, stamping it as reviewed at `now`.
///
/// Unlike [`WordStore::put`], an unknown id is an error: editing a word that
/// was deleted meanwhile must not resurrect it.
pub fn update_word<S: WordStore + ?Sized>(store: &mut S, word: Word, now: DateTime<Utc>) -> StoreResult<()> {
    if !store.list()?.iter().any(|w| w.id == word.id) {
        return Err(StoreError::NotFound(word.id));
    }
    store.put(Word { last_reviewed: Some(now), ..word })
}

pub fn delete_word<S: WordStore + ?Sized>(store: &mut S, id: &str) -> StoreResult<()> {
    store.delete(id)
}

/// Drop every word in `project`. Returns how many were removed.
pub fn delete_project<S: WordStore + ?Sized>(store: &mut S, project: &str) -> StoreResult<usize> {
    let words = store.list()?;
    let before = words.len();
    let kept: Vec<Word> = words.into_iter().filter(|w| w.project_name() != project).collect();
    let removed = before - kept.len();
    store.replace_all(kept)?;
    log::info!("deleted project {project:?} ({removed} words)");
    Ok(removed)
}

/// Move every word of `from` into `to`. Returns how many were moved.
pub fn rename_project<S: WordStore + ?Sized>(store: &mut S, from: &str, to: &str) -> StoreResult<usize> {
    let target = if to.trim().is_empty() { UNASSIGNED_PROJECT } else { to.trim() };
    let mut moved = 0;
    let words: Vec<Word> = store
        .list()?
        .into_iter()
        .map(|w| {
            if w.project_name() == from {
                moved += 1;
                w.with_project(target)
            } else {
                w
            }
        })
        .collect();
    store.replace_all(words)?;
    log::info!("renamed project {from:?} -> {target:?} ({moved} words)");
    Ok(moved)
}

pub fn words_in_project<S: WordStore + ?Sized>(store: &S, project: &str) -> StoreResult<Vec<Word>> {
    Ok(store.list()?.into_iter().filter(|w| w.project_name() == project).collect())
}

/// Case-insensitive substring match on term or definition within a project.
pub fn search<S: WordStore + ?Sized>(store: &S, project: &str, query: &str) -> StoreResult<Vec<Word>> {
    let needle = query.to_lowercase();
    Ok(words_in_project(store, project)?
        .into_iter()
        .filter(|w| {
            w.term.to_lowercase().contains(&needle) || w.definition.to_lowercase().contains(&needle)
        })
        .collect())
}
