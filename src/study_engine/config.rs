use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::study_engine::models::{IncorrectPolicy, QuizRequest};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid study config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} must be at least {min} (got {value})")]
    TooSmall { field: &'static str, min: usize, value: usize },

    #[error("speech rate must be a positive number (got {0})")]
    SpeechRate(f32),
}

/// Knobs for the hosting study flow.
///
/// Missing fields take their defaults; unknown fields are rejected so a typo
/// in a config file does not silently fall back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StudyConfig {
    pub max_questions: usize,
    pub max_distractors: usize,
    /// Smallest selection that may start a quiz.
    pub min_quiz_pool: usize,
    pub on_incorrect: IncorrectPolicy,
    pub speech_locale: String,
    pub speech_rate: f32,
}

impl Default for StudyConfig {
    fn default() -> Self {
        StudyConfig {
            max_questions: QuizRequest::DEFAULT_MAX_QUESTIONS,
            max_distractors: QuizRequest::DEFAULT_MAX_DISTRACTORS,
            min_quiz_pool: 4,
            on_incorrect: IncorrectPolicy::Reset,
            speech_locale: "en-US".to_string(),
            speech_rate: 0.85,
        }
    }
}

impl StudyConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: StudyConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_questions < 1 {
            return Err(ConfigError::TooSmall { field: "max_questions", min: 1, value: self.max_questions });
        }
        if !(self.speech_rate > 0.0) {
            return Err(ConfigError::SpeechRate(self.speech_rate));
        }
        Ok(())
    }

    /// Quiz request carrying this config's limits.
    pub fn quiz_request(&self, rng_seed: Option<u64>) -> QuizRequest {
        QuizRequest {
            rng_seed,
            max_questions: self.max_questions,
            max_distractors: self.max_distractors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = StudyConfig::from_json("{}").unwrap();
        assert_eq!(config, StudyConfig::default());
        assert_eq!(config.on_incorrect, IncorrectPolicy::Reset);
        assert_eq!(config.max_questions, 10);
    }

    #[test]
    fn policy_is_read_by_name() {
        let config = StudyConfig::from_json(r#"{ "on_incorrect": "decrement", "min_quiz_pool": 6 }"#).unwrap();
        assert_eq!(config.on_incorrect, IncorrectPolicy::Decrement);
        assert_eq!(config.min_quiz_pool, 6);
        assert_eq!(config.max_distractors, 3);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(StudyConfig::from_json(r#"{ "max_question": 5 }"#), Err(ConfigError::Json(_))));
    }

    #[test]
    fn zero_questions_is_rejected() {
        let err = StudyConfig::from_json(r#"{ "max_questions": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::TooSmall { field: "max_questions", .. }));
    }

    #[test]
    fn quiz_request_uses_limits() {
        let config = StudyConfig { max_questions: 5, max_distractors: 2, ..StudyConfig::default() };
        let req = config.quiz_request(Some(9));
        assert_eq!(req.rng_seed, Some(9));
        assert_eq!(req.max_questions, 5);
        assert_eq!(req.max_distractors, 2);
    }
}
