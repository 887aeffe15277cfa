//! Indonesian ⇄ Chinese phrase translator
//!
//! Translates between Indonesian, Simplified Chinese and Traditional Chinese
//! using built-in phrase tables, and keeps a persisted history of past
//! translations that can be starred as favorites.
//!
//! # Workflow Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use terjemah::session::TranslationSession;
//! use terjemah::storage::JsonFileStore;
//! use terjemah::translate::Resolver;
//! use terjemah::{Config, LanguageCode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let storage = Arc::new(JsonFileStore::open(&config.store_path)?);
//!     let mut session = TranslationSession::new(storage, Resolver::new(config.latency_ms));
//!
//!     session.set_target_language(LanguageCode::ChineseTraditional);
//!     session.translate("Thank you").await;
//!     println!("{}", session.translated_text()); // 謝謝
//!
//!     for entry in session.displayed_history() {
//!         println!("{} → {}", entry.source_text(), entry.translated_text());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod history;
pub mod input;
pub mod language;
pub mod preferences;
pub mod session;
pub mod speech;
pub mod storage;
pub mod translate;


// Re-export main types for convenient access
pub use config::{Config, ConfigError};
pub use history::{HistoryStore, NewTranslation, TranslationEntry};
pub use input::{CapturedInput, InputMethod, Recognizer};
pub use language::{LanguageCode, LanguageError, TranslationDirection};
pub use preferences::{FontSize, Preferences, ThemeMode};
pub use session::{TRANSLATION_FAILED, TranslationSession};
pub use speech::Speaker;
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use translate::{OFFLINE_UNAVAILABLE, Resolver, TranslateError, Translator};
