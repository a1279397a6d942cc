//! Text-to-speech playback seam.
//!
//! Playback is fire-and-forget: nothing in the engine waits on it or reads a
//! result back. A new request always cancels whatever is still pending.

use serde::{Deserialize, Serialize};
use crate::study_engine::config::StudyConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    /// BCP 47 tag, e.g. `en-US`.
    pub locale: String,
    /// 1.0 = normal speed.
    pub rate: f32,
}

pub trait Speaker {
    fn say(&mut self, utterance: Utterance);
    /// Stop any pending or playing utterance.
    fn cancel(&mut self);
}

/// Wraps a speaker so each request cancels the previous one first.
pub struct LatestOnly<S> {
    inner: S,
}

impl<S: Speaker> LatestOnly<S> {
    pub fn new(inner: S) -> Self {
        LatestOnly { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: Speaker> Speaker for LatestOnly<S> {
    fn say(&mut self, utterance: Utterance) {
        self.inner.cancel();
        self.inner.say(utterance);
    }

    fn cancel(&mut self) {
        self.inner.cancel();
    }
}

/// Speak `text` with the configured locale and rate. Blank text is ignored.
pub fn speak<S: Speaker + ?Sized>(speaker: &mut S, text: &str, config: &StudyConfig) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    speaker.say(Utterance {
        text: text.to_string(),
        locale: config.speech_locale.clone(),
        rate: config.speech_rate,
    });
}

/// Speaker that drops every request. Useful for headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Speaker for Silent {
    fn say(&mut self, utterance: Utterance) {
        log::trace!("speech disabled, dropping {:?}", utterance.text);
    }

    fn cancel(&mut self) {}
}
