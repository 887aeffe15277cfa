//! Translation session
//!
//! The session is the application's top-level context. It owns the history
//! store, the preferences and the resolver, and carries the state of the
//! translation screen: current direction, input method, source text and
//! latest result.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use terjemah::session::TranslationSession;
//! use terjemah::storage::MemoryStore;
//! use terjemah::translate::Resolver;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut session = TranslationSession::new(Arc::new(MemoryStore::new()), Resolver::new(0));
//!     session.set_offline_mode(true);
//!
//!     let entry = session.translate("Terima kasih").await;
//!     assert_eq!(session.translated_text(), "谢谢");
//!     assert!(entry.is_some());
//! }
//! ```

use crate::history::{HistoryStore, NewTranslation, TranslationEntry};
use crate::input::{
    CapturedInput, InputMethod, PlaceholderRecognizer, RecognitionResult, Recognizer,
};
use crate::language::{LanguageCode, TranslationDirection};
use crate::preferences::{FontSize, Preferences, ThemeMode};
use crate::speech::{LogSpeaker, Speaker};
use crate::storage::KeyValueStore;
use crate::translate::Resolver;
use std::sync::Arc;
use tracing::{error, info};

/// Shown in place of a translation when resolution fails
pub const TRANSLATION_FAILED: &str = "Error: Could not translate text";

/// Application state shared by every front end
pub struct TranslationSession {
    history: HistoryStore,
    preferences: Preferences,
    resolver: Resolver,
    recognizer: Box<dyn Recognizer>,
    speaker: Box<dyn Speaker>,
    direction: TranslationDirection,
    input_method: InputMethod,
    source_text: String,
    translated_text: String,
    show_favorites_only: bool,
}

impl TranslationSession {
    /// Open a session over `storage`, loading history and preferences
    pub fn new(storage: Arc<dyn KeyValueStore>, resolver: Resolver) -> Self {
        Self {
            history: HistoryStore::load(storage.clone()),
            preferences: Preferences::load(storage),
            resolver,
            recognizer: Box::new(PlaceholderRecognizer),
            speaker: Box::new(LogSpeaker),
            direction: TranslationDirection::default(),
            input_method: InputMethod::default(),
            source_text: String::new(),
            translated_text: String::new(),
            show_favorites_only: false,
        }
    }

    pub fn with_recognizer(mut self, recognizer: Box<dyn Recognizer>) -> Self {
        self.recognizer = recognizer;
        self
    }

    pub fn with_speaker(mut self, speaker: Box<dyn Speaker>) -> Self {
        self.speaker = speaker;
        self
    }

    // ========== Translation ==========

    /// Translate the current source text and record the result
    ///
    /// Whitespace-only input is ignored and returns `None`. On success the
    /// translation becomes the current result and is added to the history.
    /// On failure the current result becomes [`TRANSLATION_FAILED`] and the
    /// history is left untouched.
    pub async fn submit(&mut self) -> Option<TranslationEntry> {
        if self.source_text.trim().is_empty() {
            return None;
        }

        let offline_mode = self.preferences.offline_mode();
        let result = self
            .resolver
            .resolve(&self.source_text, self.direction, offline_mode)
            .await;

        match result {
            Ok(translation) => {
                self.translated_text = translation.clone();
                let entry = self.history.add(NewTranslation::new(
                    self.source_text.clone(),
                    translation,
                    self.direction,
                ));
                info!(
                    "Translated '{}' ({}) as entry {}",
                    entry.source_text(),
                    self.direction.key(),
                    entry.id()
                );
                Some(entry)
            }
            Err(e) => {
                error!("Translation error: {}", e);
                self.translated_text = TRANSLATION_FAILED.to_string();
                None
            }
        }
    }

    /// Replace the source text with `text` and submit it
    pub async fn translate(&mut self, text: &str) -> Option<TranslationEntry> {
        self.set_source_text(text);
        self.submit().await
    }

    /// Read a captured signal into the source text
    ///
    /// The input method follows the kind of signal captured. On error the
    /// source text is left unchanged.
    pub fn capture(&mut self, input: &CapturedInput) -> RecognitionResult<&str> {
        let recognized = self.recognizer.recognize(input, self.direction.from)?;
        self.input_method = input.method();
        self.source_text = recognized;
        Ok(&self.source_text)
    }

    /// Speak the current result in the target language
    ///
    /// Does nothing when there is no result yet.
    pub fn speak_result(&self) {
        if !self.translated_text.is_empty() {
            self.speaker.speak(&self.translated_text, self.direction.to);
        }
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn set_source_text(&mut self, text: &str) {
        self.source_text = text.to_string();
    }

    pub fn clear_input(&mut self) {
        self.source_text.clear();
    }

    /// The latest result, empty before the first translation
    pub fn translated_text(&self) -> &str {
        &self.translated_text
    }

    pub fn input_method(&self) -> InputMethod {
        self.input_method
    }

    pub fn set_input_method(&mut self, method: InputMethod) {
        self.input_method = method;
    }

    // ========== Direction ==========

    pub fn direction(&self) -> TranslationDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: TranslationDirection) {
        self.direction = direction;
    }

    pub fn set_source_language(&mut self, from: LanguageCode) {
        self.direction = self.direction.with_from(from);
    }

    pub fn set_target_language(&mut self, to: LanguageCode) {
        self.direction = self.direction.with_to(to);
    }

    pub fn swap_languages(&mut self) {
        self.direction = self.direction.swapped();
    }

    // ========== History ==========

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Entries as currently listed: all of them, or favorites only
    pub fn displayed_history(&self) -> Vec<&TranslationEntry> {
        if self.show_favorites_only {
            self.history.favorites()
        } else {
            self.history.entries().iter().collect()
        }
    }

    pub fn show_favorites_only(&self) -> bool {
        self.show_favorites_only
    }

    pub fn set_show_favorites_only(&mut self, favorites_only: bool) {
        self.show_favorites_only = favorites_only;
    }

    pub fn toggle_show_favorites(&mut self) {
        self.show_favorites_only = !self.show_favorites_only;
    }

    /// Load a past entry back onto the translation screen
    ///
    /// Returns `false` when no entry has that id.
    pub fn select_entry(&mut self, id: &str) -> bool {
        let Some(entry) = self.history.get(id) else {
            return false;
        };
        self.source_text = entry.source_text().to_string();
        self.translated_text = entry.translated_text().to_string();
        self.direction = entry.direction();
        true
    }

    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        self.history.toggle_favorite(id)
    }

    /// Toggle the favorite flag of the most recent entry
    pub fn toggle_latest_favorite(&mut self) -> Option<bool> {
        let id = self.history.latest()?.id().to_string();
        self.history.toggle_favorite(&id)
    }

    /// Whether the most recent entry is a favorite
    pub fn latest_is_favorite(&self) -> bool {
        self.history.latest().is_some_and(|entry| entry.is_favorite())
    }

    /// Clear what the history list shows
    ///
    /// In the favorites-only view this un-favorites every favorite and keeps
    /// the entries; otherwise the whole history is removed.
    pub fn clear_history(&mut self) {
        if self.show_favorites_only {
            let count = self.history.clear_favorites();
            info!("Removed {} entries from favorites", count);
        } else {
            self.history.clear();
            info!("Cleared translation history");
        }
    }

    // ========== Preferences ==========

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn offline_mode(&self) -> bool {
        self.preferences.offline_mode()
    }

    pub fn set_offline_mode(&mut self, offline_mode: bool) {
        self.preferences.set_offline_mode(offline_mode);
    }

    pub fn set_font_size(&mut self, font_size: FontSize) {
        self.preferences.set_font_size(font_size);
    }

    pub fn set_theme_mode(&mut self, theme_mode: ThemeMode) {
        self.preferences.set_theme_mode(theme_mode);
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.preferences.toggle_theme()
    }
}

impl std::fmt::Debug for TranslationSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationSession")
            .field("direction", &self.direction)
            .field("input_method", &self.input_method)
            .field("source_text", &self.source_text)
            .field("translated_text", &self.translated_text)
            .field("show_favorites_only", &self.show_favorites_only)
            .field("history_len", &self.history.len())
            .field("preferences", &self.preferences)
            .field("resolver", &self.resolver)
            .field("recognizer", &self.recognizer.name())
            .finish()
    }
}
