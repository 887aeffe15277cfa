//! Mode-aware translation resolver
//!
//! The resolver picks the backend for a request: the offline phrasebook when
//! offline mode is on, the simulated online translator otherwise. Both
//! built-in backends always succeed; the `Result` exists for custom backends.

use crate::language::TranslationDirection;
use crate::translate::error::TranslateResult;
use crate::translate::offline::OfflineTranslator;
use crate::translate::simulated::SimulatedTranslator;
use crate::translate::translator::Translator;
use std::sync::Arc;
use tracing::debug;

/// Dispatches translation requests between an offline and an online backend
#[derive(Clone)]
pub struct Resolver {
    offline: Arc<dyn Translator>,
    online: Arc<dyn Translator>,
}

impl Resolver {
    /// Built-in backends, with the online backend waiting `latency_ms`
    pub fn new(latency_ms: u64) -> Self {
        Self {
            offline: Arc::new(OfflineTranslator::new()),
            online: Arc::new(SimulatedTranslator::with_latency(latency_ms)),
        }
    }

    /// Use custom backends
    pub fn with_translators(offline: Arc<dyn Translator>, online: Arc<dyn Translator>) -> Self {
        Self { offline, online }
    }

    /// The backend serving requests in the given mode
    pub fn backend(&self, offline_mode: bool) -> &dyn Translator {
        if offline_mode {
            self.offline.as_ref()
        } else {
            self.online.as_ref()
        }
    }

    /// Translate `text` in `direction`
    ///
    /// # Arguments
    ///
    /// * `text` - Source text; emptiness is the caller's concern
    /// * `direction` - Source and target language
    /// * `offline_mode` - Restrict resolution to the offline phrasebook
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The translation, the offline sentinel, or a tagged fallback
    /// * `Err(TranslateError)` - Only if a custom backend fails
    pub async fn resolve(
        &self,
        text: &str,
        direction: TranslationDirection,
        offline_mode: bool,
    ) -> TranslateResult<String> {
        let backend = self.backend(offline_mode);
        debug!(
            "Resolving '{}' ({}) with {}",
            text,
            direction.key(),
            backend.provider_name()
        );
        backend.translate(text, direction).await
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(crate::translate::simulated::DEFAULT_LATENCY_MS)
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("offline", &self.offline.provider_name())
            .field("online", &self.online.provider_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageCode;
    use crate::translate::offline::OFFLINE_UNAVAILABLE;

    fn direction(from: LanguageCode, to: LanguageCode) -> TranslationDirection {
        TranslationDirection::new(from, to)
    }

    #[tokio::test]
    async fn test_offline_hit() {
        let resolver = Resolver::new(0);
        let result = resolver
            .resolve(
                "Terima kasih",
                direction(LanguageCode::Indonesian, LanguageCode::ChineseSimplified),
                true,
            )
            .await
            .unwrap();
        assert_eq!(result, "谢谢");
    }

    #[tokio::test]
    async fn test_offline_miss() {
        let resolver = Resolver::new(0);
        let result = resolver
            .resolve(
                "Good morning",
                direction(LanguageCode::Indonesian, LanguageCode::ChineseSimplified),
                true,
            )
            .await
            .unwrap();
        assert_eq!(result, OFFLINE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_online_common_phrase() {
        let resolver = Resolver::new(0);
        let result = resolver
            .resolve(
                "Thank you",
                direction(LanguageCode::Indonesian, LanguageCode::ChineseTraditional),
                false,
            )
            .await
            .unwrap();
        assert_eq!(result, "謝謝");
    }

    #[tokio::test]
    async fn test_online_fallback() {
        let resolver = Resolver::new(0);
        let result = resolver
            .resolve(
                "Xyz123",
                direction(LanguageCode::ChineseSimplified, LanguageCode::Indonesian),
                false,
            )
            .await
            .unwrap();
        assert_eq!(result, "[ID] Xyz123");
    }

    #[tokio::test]
    async fn test_offline_mode_skips_latency() {
        let resolver = Resolver::new(200);
        let start = std::time::Instant::now();
        let _ = resolver
            .resolve("Halo", TranslationDirection::default(), true)
            .await
            .unwrap();
        assert!(start.elapsed().as_millis() < 200);
    }

    #[test]
    fn test_backend_selection() {
        let resolver = Resolver::new(0);
        assert_eq!(resolver.backend(true).provider_name(), "Offline Phrasebook");
        assert_eq!(
            resolver.backend(false).provider_name(),
            "Simulated Online Translator"
        );
    }
}
