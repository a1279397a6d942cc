//! JSON backup format for the whole library.
//!
//! A snapshot is a JSON array of word records with camelCase fields.
//! Missing or `null` fields default to empty/zero, unknown fields are
//! ignored, and ids are kept verbatim so mastery history survives a round
//! trip. [`Word`]'s own serde impls go through `WordRecord`, so any word
//! serialized by a host has the same shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::study_engine::{
    models::{MasteryLevel, Phrase, Word, UNASSIGNED_PROJECT},
    store::{StoreError, StoreResult, WordStore},
};

/// Read a field whose `null` means the same as absent.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// On-disk shape of a [`Word`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct WordRecord {
    #[serde(deserialize_with = "null_as_default")]
    id: String,
    #[serde(deserialize_with = "null_as_default")]
    term: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    phonetic: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    part_of_speech: String,
    #[serde(deserialize_with = "null_as_default")]
    definition: String,
    #[serde(deserialize_with = "null_as_default")]
    project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    inflections: Option<String>,
    #[serde(deserialize_with = "null_as_default", skip_serializing_if = "Vec::is_empty")]
    phrases: Vec<Phrase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    example: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    example_translation: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    learned_count: u32,
    #[serde(with = "chrono::serde::ts_milliseconds_option", skip_serializing_if = "Option::is_none")]
    last_reviewed: Option<DateTime<Utc>>,
    /// Written for readers of the backup; ignored on import.
    #[serde(deserialize_with = "null_as_default")]
    is_mastered: bool,
    mastery_level: MasteryLevel,
}

impl From<Word> for WordRecord {
    fn from(word: Word) -> Self {
        let is_mastered = word.is_mastered();
        WordRecord {
            id: word.id,
            term: word.term,
            phonetic: word.phonetic,
            part_of_speech: word.part_of_speech,
            definition: word.definition,
            project: word.project,
            inflections: word.inflections,
            phrases: word.phrases,
            notes: word.notes,
            example: word.example,
            example_translation: word.example_translation,
            learned_count: word.learned_count,
            last_reviewed: word.last_reviewed,
            is_mastered,
            mastery_level: word.mastery_level,
        }
    }
}

impl From<WordRecord> for Word {
    fn from(record: WordRecord) -> Self {
        let id = if record.id.is_empty() {
            let fresh = Uuid::new_v4().to_string();
            log::warn!("snapshot entry {:?} has no id, assigning {fresh}", record.term);
            fresh
        } else {
            record.id
        };
        let project = if record.project.trim().is_empty() {
            UNASSIGNED_PROJECT.to_string()
        } else {
            record.project
        };
        Word {
            id,
            term: record.term,
            phonetic: record.phonetic,
            part_of_speech: record.part_of_speech,
            definition: record.definition,
            project,
            inflections: record.inflections,
            phrases: record.phrases,
            notes: record.notes,
            example: record.example,
            example_translation: record.example_translation,
            learned_count: record.learned_count,
            mastery_level: record.mastery_level,
            last_reviewed: record.last_reviewed,
        }
    }
}

/// Serialize `words` as a pretty-printed snapshot.
pub fn to_snapshot(words: &[Word]) -> StoreResult<String> {
    Ok(serde_json::to_string_pretty(words)?)
}

/// Parse a snapshot. Anything but a JSON array is rejected.
pub fn from_snapshot(json: &str) -> StoreResult<Vec<Word>> {
    let value: Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(StoreError::NotAnArray);
    }
    Ok(serde_json::from_value(value)?)
}

pub fn export_snapshot<S: WordStore + ?Sized>(store: &S) -> StoreResult<String> {
    to_snapshot(&store.list()?)
}

/// Replace the whole library with the snapshot's words.
///
/// The store is only touched once the document has parsed completely.
pub fn import_snapshot<S: WordStore + ?Sized>(store: &mut S, json: &str) -> StoreResult<usize> {
    let words = from_snapshot(json)?;
    let count = words.len();
    store.replace_all(words)?;
    log::info!("restored {count} words from snapshot");
    Ok(count)
}

/// Seed an empty library from a bundled word list.
///
/// Returns how many words were loaded; 0 when the library already has
/// words, which are never touched.
pub fn load_default<S: WordStore + ?Sized>(store: &mut S, bundled: &str) -> StoreResult<usize> {
    if !store.list()?.is_empty() {
        return Ok(0);
    }
    let count = import_snapshot(store, bundled)?;
    log::info!("seeded empty library with {count} bundled words");
    Ok(count)
}

/// Throw away every edit and go back to the bundled word list.
pub fn reset_to_default<S: WordStore + ?Sized>(store: &mut S, bundled: &str) -> StoreResult<usize> {
    log::warn!("resetting library to bundled words");
    import_snapshot(store, bundled)
}
