use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::study_engine::models::{Word, UNASSIGNED_PROJECT};

const DEFAULT_TERM: &str = "Unknown";
const DEFAULT_DEFINITION: &str = "(undefined)";
const DEFAULT_PART_OF_SPEECH: &str = "n.";

/// Turn free text into new words, one per non-blank line.
///
/// Each line is `term definition...`: the first whitespace-separated token
/// is the term and the rest (re-joined with single spaces) the definition.
/// e.g. `"apple 蘋果"` or `"look up 查閱"` -> term `look`, definition `up 查閱`.
/// New words count as reviewed at `now`.
pub fn parse_bulk_text(text: &str, project: &str, now: DateTime<Utc>) -> Vec<Word> {
    let project = if project.trim().is_empty() { UNASSIGNED_PROJECT } else { project.trim() };
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_line(line, project, now))
        .collect()
}

fn parse_line(line: &str, project: &str, now: DateTime<Utc>) -> Word {
    let mut tokens = line.split_whitespace();
    let term = tokens.next().unwrap_or(DEFAULT_TERM);
    let definition = tokens.collect::<Vec<_>>().join(" ");
    let definition = if definition.is_empty() { DEFAULT_DEFINITION.to_string() } else { definition };

    let mut word = Word::new(Uuid::new_v4().to_string(), term, definition)
        .with_project(project)
        .with_part_of_speech(DEFAULT_PART_OF_SPEECH);
    word.last_reviewed = Some(now);
    word
}
