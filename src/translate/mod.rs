/// Translation Module
///
/// Turns a piece of text plus a direction into displayable translated text.
/// Nothing here talks to a network: "online" translation is simulated.
///
/// # Overview
///
/// 1. **Phrasebook** - Static offline table and common-phrase table
/// 2. **Translator Trait & Backends** - Offline phrasebook and simulated online backend
/// 3. **Resolver** - Chooses the backend from the offline-mode flag
///
/// # Example
///
/// ```ignore
/// use terjemah::translate::Resolver;
/// use terjemah::{LanguageCode, TranslationDirection};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let resolver = Resolver::default();
///     let direction = TranslationDirection::new(LanguageCode::Indonesian, LanguageCode::ChineseSimplified);
///
///     let offline = resolver.resolve("Terima kasih", direction, true).await?;
///     let online = resolver.resolve("Good morning", direction, false).await?;
///
///     println!("{} / {}", offline, online); // 谢谢 / 早上好
///     Ok(())
/// }
/// ```
pub mod error;
pub mod offline;
pub mod phrasebook;
pub mod resolver;
pub mod simulated;
pub mod translator;

pub use error::{TranslateError, TranslateResult};
pub use offline::{OFFLINE_UNAVAILABLE, OfflineTranslator};
pub use phrasebook::{OfflineTable, common_phrase};
pub use resolver::Resolver;
pub use simulated::{DEFAULT_LATENCY_MS, SimulatedTranslator, fallback_tag};
pub use translator::Translator;
