//! Simulated online translator
//!
//! Stands in for a real translation service. It waits for a configurable
//! latency so the "translating" state is observable, then answers from the
//! common-phrase table. Any other input comes back prefixed with a tag naming
//! the target language, e.g. `"[ID] Xyz123"`.
//!
//! # Example
//!
//! ```ignore
//! use terjemah::translate::{SimulatedTranslator, Translator};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let translator = SimulatedTranslator::with_latency(0);
//!     let direction = TranslationDirection::new(LanguageCode::ChineseSimplified, LanguageCode::Indonesian);
//!     let result = translator.translate("Xyz123", direction).await.unwrap();
//!     assert_eq!(result, "[ID] Xyz123");
//! }
//! ```

use crate::language::{LanguageCode, TranslationDirection};
use crate::translate::error::TranslateResult;
use crate::translate::phrasebook::common_phrase;
use crate::translate::translator::Translator;
use async_trait::async_trait;
use std::time::Duration;

/// Latency applied by [`SimulatedTranslator::new`], in milliseconds
pub const DEFAULT_LATENCY_MS: u64 = 500;

/// Tag prefixed to untranslated text, one per target language
pub fn fallback_tag(target: LanguageCode) -> &'static str {
    match target {
        LanguageCode::Indonesian => "[ID] ",
        LanguageCode::ChineseSimplified => "[简体中文] ",
        LanguageCode::ChineseTraditional => "[繁體中文] ",
    }
}

/// Mock "online" translator with simulated network delay
#[derive(Debug, Clone)]
pub struct SimulatedTranslator {
    delay_ms: u64,
}

impl SimulatedTranslator {
    /// Create a translator with the default 500ms latency
    pub fn new() -> Self {
        Self {
            delay_ms: DEFAULT_LATENCY_MS,
        }
    }

    /// Create a translator with a custom latency
    ///
    /// # Arguments
    ///
    /// * `delay_ms` - Simulated delay in milliseconds, `0` disables it
    pub fn with_latency(delay_ms: u64) -> Self {
        Self { delay_ms }
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(self.latency()).await;
        }
    }

    fn apply_translation(&self, text: &str, direction: TranslationDirection) -> String {
        match common_phrase(text, direction.to) {
            Some(translation) => translation.to_string(),
            None => format!("{}{}", fallback_tag(direction.to), text),
        }
    }
}

impl Default for SimulatedTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Translator for SimulatedTranslator {
    async fn translate(
        &self,
        text: &str,
        direction: TranslationDirection,
    ) -> TranslateResult<String> {
        self.apply_delay().await;
        Ok(self.apply_translation(text, direction))
    }

    async fn translate_batch(
        &self,
        texts: &[String],
        direction: TranslationDirection,
    ) -> TranslateResult<Vec<String>> {
        // One delay per batch, not per string
        self.apply_delay().await;
        Ok(texts
            .iter()
            .map(|text| self.apply_translation(text, direction))
            .collect())
    }

    fn provider_name(&self) -> &str {
        "Simulated Online Translator"
    }
}
