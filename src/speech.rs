//! Text-to-speech
//!
//! Speaking is fire-and-forget: callers get no result and no error. The only
//! bundled speaker logs what it would say.

use crate::language::LanguageCode;
use tracing::info;

/// Best-effort audio rendering of a translation
pub trait Speaker: Send + Sync {
    fn speak(&self, text: &str, language: LanguageCode);
}

/// Speaker that records the utterance in the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSpeaker;

impl Speaker for LogSpeaker {
    fn speak(&self, text: &str, language: LanguageCode) {
        info!(voice = language.speech_tag(), "Speaking in {}: {}", language, text);
    }
}
