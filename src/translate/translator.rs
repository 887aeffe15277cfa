//! Translator trait
//!
//! This module defines the `Translator` trait for backend abstraction, so the
//! resolver can switch between the offline phrasebook and the simulated online
//! backend, and tests can plug in failing or recording backends.
//!
//! # Example
//!
//! ```ignore
//! use terjemah::translate::{OfflineTranslator, Translator};
//! use terjemah::{LanguageCode, TranslationDirection};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = OfflineTranslator::new();
//!     let direction = TranslationDirection::new(LanguageCode::Indonesian, LanguageCode::ChineseSimplified);
//!
//!     let result = backend.translate("Terima kasih", direction).await?;
//!     println!("{}", result); // "谢谢"
//!
//!     Ok(())
//! }
//! ```

use crate::language::TranslationDirection;
use crate::translate::error::TranslateResult;
use async_trait::async_trait;

/// Generic trait for translation backends
///
/// All methods are async so a backend may suspend (the simulated online
/// backend sleeps to mimic network latency).
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate a single text in the given direction
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate, matched exactly by table backends
    /// * `direction` - Source and target language
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The translated text
    /// * `Err(TranslateError)` - If the backend failed
    async fn translate(&self, text: &str, direction: TranslationDirection)
    -> TranslateResult<String>;

    /// Translate multiple texts in one call
    ///
    /// Output order and length match the input. The default implementation
    /// translates each text in turn.
    async fn translate_batch(
        &self,
        texts: &[String],
        direction: TranslationDirection,
    ) -> TranslateResult<Vec<String>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.translate(text, direction).await?);
        }
        Ok(results)
    }

    /// Name of this backend, used in logs
    fn provider_name(&self) -> &str;
}
