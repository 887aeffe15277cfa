//! Translation history
//!
//! The history is an ordered list of past translations, newest first. It is
//! loaded in full from the key-value store when opened and written back in
//! full after every change.
//!
//! # Identifiers
//!
//! Entry ids are decimal millisecond timestamps, as produced by a wall clock.
//! Two entries created within the same millisecond would collide, so ids come
//! from a monotonic generator that never hands out a value at or below the
//! last one it issued (including ids already present in loaded history). The
//! entry timestamp is the same value, which keeps timestamps non-decreasing.
//!
//! History written by older clients may still hold colliding ids. Those
//! entries are kept on load; every repeat after the first is given a fresh
//! id and the repaired history is written back.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use terjemah::history::{HistoryStore, NewTranslation};
//! use terjemah::storage::MemoryStore;
//! use terjemah::TranslationDirection;
//!
//! let mut history = HistoryStore::load(Arc::new(MemoryStore::new()));
//! let entry = history.add(NewTranslation::new("Halo", "你好", TranslationDirection::default()));
//!
//! history.toggle_favorite(entry.id());
//! assert_eq!(history.favorites().len(), 1);
//! ```

use crate::language::TranslationDirection;
use crate::storage::{HISTORY_KEY, KeyValueStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// One recorded translation
///
/// Only the favorite flag can change after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationEntry {
    id: String,
    source_text: String,
    #[serde(default)]
    translated_text: String,
    direction: TranslationDirection,
    #[serde(default)]
    timestamp: u64,
    #[serde(default)]
    is_favorite: bool,
}

impl TranslationEntry {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn translated_text(&self) -> &str {
        &self.translated_text
    }

    pub fn direction(&self) -> TranslationDirection {
        self.direction
    }

    /// Creation time in milliseconds since the Unix epoch
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }
}

/// A successful translation about to be recorded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTranslation {
    pub source_text: String,
    pub translated_text: String,
    pub direction: TranslationDirection,
}

impl NewTranslation {
    pub fn new(
        source_text: impl Into<String>,
        translated_text: impl Into<String>,
        direction: TranslationDirection,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            translated_text: translated_text.into(),
            direction,
        }
    }
}

/// Monotonic millisecond id source
#[derive(Debug, Default, Clone)]
struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    /// Start above every id and timestamp already in `entries`
    fn seeded(entries: &[TranslationEntry]) -> Self {
        let last = entries
            .iter()
            .flat_map(|entry| [entry.id.parse::<u64>().unwrap_or(0), entry.timestamp])
            .max()
            .unwrap_or(0);
        Self { last }
    }

    fn next(&mut self, now_ms: u64) -> u64 {
        let next = now_ms.max(self.last.saturating_add(1));
        self.last = next;
        next
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}

/// Serialize history entries to the persisted JSON array
pub fn encode_history(entries: &[TranslationEntry]) -> serde_json::Result<String> {
    serde_json::to_string(entries)
}

/// Parse a persisted JSON array of history entries
///
/// Never fails. Data that is not a JSON array yields an empty history.
/// Individual entries that cannot be read are skipped. Repeated ids are
/// kept as-is; [`HistoryStore::load`] renumbers them. Unknown fields are ignored;
/// missing `translatedText`, `timestamp` and `isFavorite` take defaults.
pub fn decode_history(json: &str) -> Vec<TranslationEntry> {
    let values: Vec<Value> = match serde_json::from_str(json) {
        Ok(values) => values,
        Err(e) => {
            warn!("Failed to parse translation history, starting empty: {}", e);
            return Vec::new();
        }
    };

    let mut entries = Vec::with_capacity(values.len());
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<TranslationEntry>(value) {
            Ok(entry) => entries.push(entry),
            Err(e) => warn!("Skipping unreadable history entry #{}: {}", index, e),
        }
    }
    entries
}

/// Give every repeat of an already-seen id a fresh one from `ids`
///
/// The first (newest) occurrence keeps its id. Returns how many entries
/// were renumbered.
fn renumber_duplicate_ids(entries: &mut [TranslationEntry], ids: &mut IdGenerator) -> usize {
    let mut seen = HashSet::new();
    let mut renumbered = 0;
    for entry in entries.iter_mut() {
        if seen.insert(entry.id.clone()) {
            continue;
        }
        let fresh = ids.next(0).to_string();
        warn!("Renumbering duplicate history entry '{}' as '{}'", entry.id, fresh);
        entry.id = fresh.clone();
        seen.insert(fresh);
        renumbered += 1;
    }
    renumbered
}

/// Ordered, persisted collection of past translations
pub struct HistoryStore {
    entries: Vec<TranslationEntry>,
    ids: IdGenerator,
    storage: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    /// Load the history from `storage`
    ///
    /// Missing, unreadable or corrupt data results in an empty history; the
    /// problem is logged and never surfaced. Entries sharing an id are all
    /// kept under distinct ids, and the repaired history is persisted.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let mut entries = match storage.get_item(HISTORY_KEY) {
            Ok(Some(json)) => decode_history(&json),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read translation history: {}", e);
                Vec::new()
            }
        };
        debug!("Loaded {} history entries", entries.len());

        let mut ids = IdGenerator::seeded(&entries);
        let renumbered = renumber_duplicate_ids(&mut entries, &mut ids);
        let history = Self {
            ids,
            entries,
            storage,
        };
        if renumbered > 0 {
            history.persist();
        }
        history
    }

    /// All entries, newest first
    pub fn entries(&self) -> &[TranslationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TranslationEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// The most recently added entry
    pub fn latest(&self) -> Option<&TranslationEntry> {
        self.entries.first()
    }

    /// Record a translation at the front of the history
    ///
    /// The new entry gets a fresh id, the current timestamp and is not a
    /// favorite. The history is persisted before returning.
    pub fn add(&mut self, candidate: NewTranslation) -> TranslationEntry {
        let issued = self.ids.next(now_millis());
        let entry = TranslationEntry {
            id: issued.to_string(),
            source_text: candidate.source_text,
            translated_text: candidate.translated_text,
            direction: candidate.direction,
            timestamp: issued,
            is_favorite: false,
        };

        self.entries.insert(0, entry.clone());
        self.persist();
        entry
    }

    /// Flip the favorite flag of the entry with `id`
    ///
    /// Returns the new flag, or `None` when no entry has that id (nothing
    /// changes in that case).
    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        let entry = self.entries.iter_mut().find(|entry| entry.id == id)?;
        entry.is_favorite = !entry.is_favorite;
        let is_favorite = entry.is_favorite;
        self.persist();
        Some(is_favorite)
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    /// Favorited entries, newest first
    pub fn favorites(&self) -> Vec<&TranslationEntry> {
        self.entries.iter().filter(|entry| entry.is_favorite).collect()
    }

    /// Un-favorite every favorited entry
    ///
    /// Entries stay in the history; only their favorite flag is reset, one
    /// toggle per entry. Returns how many entries were toggled.
    pub fn clear_favorites(&mut self) -> usize {
        let favorite_ids: Vec<String> = self
            .favorites()
            .into_iter()
            .map(|entry| entry.id.clone())
            .collect();

        for id in &favorite_ids {
            self.toggle_favorite(id);
        }
        favorite_ids.len()
    }

    /// Write the full history to storage
    ///
    /// Failures are logged and otherwise ignored: in-memory state has already
    /// changed and stays authoritative.
    fn persist(&self) {
        let json = match encode_history(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize translation history: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set_item(HISTORY_KEY, &json) {
            warn!("Failed to persist translation history: {}", e);
        }
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("entries", &self.entries)
            .field("last_id", &self.ids.last)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::LanguageCode;
    use crate::storage::{MemoryStore, StorageError, StorageResult};

    fn memory() -> Arc<dyn KeyValueStore> {
        Arc::new(MemoryStore::new())
    }

    fn candidate(source: &str) -> NewTranslation {
        NewTranslation::new(
            source,
            format!("[简体中文] {}", source),
            TranslationDirection::default(),
        )
    }

    /// Store whose writes always fail
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }

        fn remove_item(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    // ========== Add Tests ==========

    #[test]
    fn test_add_prepends() {
        let mut history = HistoryStore::load(memory());
        for source in ["satu", "dua", "tiga"] {
            history.add(candidate(source));
        }

        assert_eq!(history.len(), 3);
        let sources: Vec<&str> = history.entries().iter().map(|e| e.source_text()).collect();
        assert_eq!(sources, vec!["tiga", "dua", "satu"]);
        assert_eq!(history.latest().unwrap().source_text(), "tiga");
    }

    #[test]
    fn test_add_sets_defaults() {
        let mut history = HistoryStore::load(memory());
        let entry = history.add(candidate("Halo"));

        assert!(!entry.is_favorite());
        assert_eq!(entry.id(), entry.timestamp().to_string());
        assert_eq!(entry.translated_text(), "[简体中文] Halo");
        assert_eq!(history.get(entry.id()), Some(&entry));
    }

    #[test]
    fn test_rapid_adds_get_unique_increasing_ids() {
        let mut history = HistoryStore::load(memory());
        for i in 0..50 {
            history.add(candidate(&format!("kata {}", i)));
        }

        let ids: HashSet<&str> = history.entries().iter().map(|e| e.id()).collect();
        assert_eq!(ids.len(), 50);

        // Newest first, so timestamps decrease strictly along the list
        for pair in history.entries().windows(2) {
            assert!(pair[0].timestamp() > pair[1].timestamp());
        }
    }

    #[test]
    fn test_id_generator_never_goes_backwards() {
        let mut ids = IdGenerator { last: 1_000 };
        assert_eq!(ids.next(500), 1_001);
        assert_eq!(ids.next(1_001), 1_002);
        assert_eq!(ids.next(5_000), 5_000);
    }

    // ========== Favorite Tests ==========

    #[test]
    fn test_toggle_favorite_is_involution() {
        let mut history = HistoryStore::load(memory());
        let entry = history.add(candidate("Maaf"));

        assert_eq!(history.toggle_favorite(entry.id()), Some(true));
        assert!(history.get(entry.id()).unwrap().is_favorite());
        assert_eq!(history.toggle_favorite(entry.id()), Some(false));
        assert!(!history.get(entry.id()).unwrap().is_favorite());
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut history = HistoryStore::load(memory());
        history.add(candidate("Ya"));
        let before = history.entries().to_vec();

        assert_eq!(history.toggle_favorite("does-not-exist"), None);
        assert_eq!(history.entries(), before.as_slice());
    }

    #[test]
    fn test_favorites_preserve_order() {
        let mut history = HistoryStore::load(memory());
        let first = history.add(candidate("a"));
        history.add(candidate("b"));
        let third = history.add(candidate("c"));

        history.toggle_favorite(first.id());
        history.toggle_favorite(third.id());

        let favorites: Vec<&str> = history.favorites().iter().map(|e| e.source_text()).collect();
        assert_eq!(favorites, vec!["c", "a"]);
    }

    #[test]
    fn test_clear_favorites_only_unfavorites() {
        let mut history = HistoryStore::load(memory());
        let first = history.add(candidate("a"));
        let second = history.add(candidate("b"));
        history.toggle_favorite(first.id());
        history.toggle_favorite(second.id());

        assert_eq!(history.clear_favorites(), 2);
        assert!(history.favorites().is_empty());
        assert_eq!(history.len(), 2);
    }

    // ========== Clear Tests ==========

    #[test]
    fn test_clear_empties_history() {
        let mut history = HistoryStore::load(memory());
        let entry = history.add(candidate("a"));
        history.toggle_favorite(entry.id());
        history.add(candidate("b"));

        history.clear();
        assert!(history.is_empty());
        assert!(history.favorites().is_empty());
    }

    // ========== Persistence Tests ==========

    #[test]
    fn test_mutations_persist_and_reload() {
        let storage = memory();
        let mut history = HistoryStore::load(storage.clone());
        let first = history.add(candidate("satu"));
        history.add(candidate("dua"));
        history.toggle_favorite(first.id());

        let reloaded = HistoryStore::load(storage.clone());
        assert_eq!(reloaded.entries(), history.entries());

        history.clear();
        let reloaded = HistoryStore::load(storage);
        assert!(reloaded.is_empty());
    }

    #[test]
    fn test_reloaded_history_continues_id_sequence() {
        let storage = memory();
        let future = now_millis() + 60_000;
        let seeded = format!(
            r#"[{{"id":"{future}","sourceText":"x","translatedText":"y","direction":{{"from":"id","to":"zh-CN"}},"timestamp":{future},"isFavorite":false}}]"#
        );
        storage.set_item(HISTORY_KEY, &seeded).unwrap();

        let mut history = HistoryStore::load(storage);
        let entry = history.add(candidate("baru"));
        assert_eq!(entry.timestamp(), future + 1);
    }

    #[test]
    fn test_add_after_maximal_timestamp_does_not_overflow() {
        let storage = memory();
        let seeded = format!(
            r#"[{{"id":"1","sourceText":"x","translatedText":"y","direction":{{"from":"id","to":"zh-CN"}},"timestamp":{},"isFavorite":false}}]"#,
            u64::MAX
        );
        storage.set_item(HISTORY_KEY, &seeded).unwrap();

        let mut history = HistoryStore::load(storage);
        let entry = history.add(candidate("baru"));
        assert_eq!(entry.timestamp(), u64::MAX);
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().source_text(), "baru");
    }

    #[test]
    fn test_colliding_ids_are_renumbered_on_load() {
        let storage = memory();
        let seeded = r#"[
            {"id":"1700000000001","sourceText":"Halo","translatedText":"你好","direction":{"from":"id","to":"zh-CN"},"timestamp":1700000000001,"isFavorite":false},
            {"id":"1700000000001","sourceText":"Maaf","translatedText":"对不起","direction":{"from":"id","to":"zh-CN"},"timestamp":1700000000001,"isFavorite":true}
        ]"#;
        storage.set_item(HISTORY_KEY, seeded).unwrap();

        let mut history = HistoryStore::load(storage.clone());
        assert_eq!(history.len(), 2);
        let first = history.entries()[0].clone();
        let second = history.entries()[1].clone();
        assert_eq!(first.id(), "1700000000001");
        assert_eq!(first.source_text(), "Halo");
        assert_eq!(second.id(), "1700000000002");
        assert_eq!(second.source_text(), "Maaf");
        assert!(second.is_favorite());
        assert_eq!(second.timestamp(), 1700000000001);

        // Toggling addresses each entry separately
        assert_eq!(history.toggle_favorite(first.id()), Some(true));
        assert_eq!(history.favorites().len(), 2);

        // The repair was written back
        let reloaded = HistoryStore::load(storage);
        let ids: Vec<&str> = reloaded.entries().iter().map(|e| e.id()).collect();
        assert_eq!(ids, vec!["1700000000001", "1700000000002"]);

        let next = history.add(candidate("baru"));
        assert!(next.timestamp() > 1700000000002);
    }

    #[test]
    fn test_corrupt_history_loads_empty() {
        let storage = memory();
        storage.set_item(HISTORY_KEY, "[{not json").unwrap();
        let history = HistoryStore::load(storage);
        assert!(history.is_empty());
    }

    #[test]
    fn test_write_failure_does_not_block_mutation() {
        let mut history = HistoryStore::load(Arc::new(ReadOnlyStore));
        let entry = history.add(candidate("a"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.toggle_favorite(entry.id()), Some(true));
    }

    // ========== Encoding Tests ==========

    #[test]
    fn test_encode_uses_camel_case_fields() {
        let mut history = HistoryStore::load(memory());
        history.add(NewTranslation::new(
            "Terima kasih",
            "謝謝",
            TranslationDirection::new(LanguageCode::Indonesian, LanguageCode::ChineseTraditional),
        ));

        let json = encode_history(history.entries()).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let entry = &value[0];
        assert_eq!(entry["sourceText"], "Terima kasih");
        assert_eq!(entry["translatedText"], "謝謝");
        assert_eq!(entry["direction"]["to"], "zh-TW");
        assert_eq!(entry["isFavorite"], false);
        assert!(entry["timestamp"].is_u64());
    }

    #[test]
    fn test_encode_decode_reproduces_entries() {
        let mut history = HistoryStore::load(memory());
        let first = history.add(candidate("a"));
        history.add(candidate("b"));
        history.toggle_favorite(first.id());

        let json = encode_history(history.entries()).unwrap();
        assert_eq!(decode_history(&json), history.entries());
    }

    #[test]
    fn test_decode_malformed_is_empty() {
        assert!(decode_history("").is_empty());
        assert!(decode_history("{\"id\": 1}").is_empty());
        assert!(decode_history("null").is_empty());
    }

    #[test]
    fn test_decode_tolerates_missing_and_unknown_fields() {
        let json = r#"[
            {"id": "2", "sourceText": "Halo", "direction": {"from": "id", "to": "zh-CN"}, "extra": 42},
            {"id": "1", "direction": {"from": "id", "to": "zh-CN"}},
            {"id": "0", "sourceText": "x", "direction": {"from": "fr", "to": "id"}}
        ]"#;
        let entries = decode_history(json);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id(), "2");
        assert_eq!(entries[0].translated_text(), "");
        assert_eq!(entries[0].timestamp(), 0);
        assert!(!entries[0].is_favorite());
    }

    #[test]
    fn test_decode_keeps_duplicate_ids() {
        let json = r#"[
            {"id": "7", "sourceText": "new", "direction": {"from": "id", "to": "zh-TW"}},
            {"id": "7", "sourceText": "old", "direction": {"from": "id", "to": "zh-TW"}}
        ]"#;
        let entries = decode_history(json);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].source_text(), "new");
        assert_eq!(entries[1].source_text(), "old");
    }
}
