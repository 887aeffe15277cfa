//! Built-in phrase tables
//!
//! Two independent tables back the translators:
//!
//! - the **offline table**: essential travel phrases, keyed by direction key
//!   (`"id-to-zh-CN"`, ...) and then by exact source text
//! - the **common phrases**: a handful of English greetings with one
//!   rendering per target language, used by the simulated online backend
//!
//! Lookups are exact: no case folding, trimming or punctuation handling.

use crate::language::{LanguageCode, TranslationDirection};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Essential phrases: (Indonesian, Simplified, Traditional)
const ESSENTIAL_PHRASES: &[(&str, &str, &str)] = &[
    ("Halo", "你好", "你好"),
    ("Selamat pagi", "早上好", "早上好"),
    ("Selamat siang", "中午好", "中午好"),
    ("Selamat malam", "晚上好", "晚上好"),
    ("Terima kasih", "谢谢", "謝謝"),
    ("Sama-sama", "不客气", "不客氣"),
    ("Maaf", "对不起", "對不起"),
    ("Ya", "是的", "是的"),
    ("Tidak", "不是", "不是"),
    ("Tolong", "请", "請"),
    ("Berapa harganya?", "多少钱？", "多少錢？"),
    ("Di mana toilet?", "洗手间在哪里？", "洗手間在哪裡？"),
    ("Saya tidak mengerti", "我不明白", "我不明白"),
    (
        "Bisakah Anda berbicara lebih pelan?",
        "您能说慢一点吗？",
        "您能說慢一點嗎？",
    ),
    ("Saya perlu bantuan", "我需要帮助", "我需要幫助"),
];

/// Common greetings: (source, Indonesian, Simplified, Traditional)
const COMMON_PHRASES: &[(&str, &str, &str, &str)] = &[
    ("Hello", "Halo", "你好", "你好"),
    ("Good morning", "Selamat pagi", "早上好", "早上好"),
    ("Thank you", "Terima kasih", "谢谢", "謝謝"),
    ("How are you?", "Apa kabar?", "你好吗？", "你好嗎？"),
    ("Goodbye", "Selamat tinggal", "再见", "再見"),
    ("Welcome", "Selamat datang", "欢迎", "歡迎"),
    ("Please", "Tolong", "请", "請"),
    ("Sorry", "Maaf", "对不起", "對不起"),
    ("Yes", "Ya", "是的", "是的"),
    ("No", "Tidak", "不是", "不是"),
];

/// Direction-keyed exact-match table used in offline mode
#[derive(Debug, Clone, Default)]
pub struct OfflineTable {
    // direction key -> source text -> target text
    entries: HashMap<String, HashMap<String, String>>,
}

impl OfflineTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table shipped with the application
    ///
    /// Covers `id → zh-CN`, `id → zh-TW`, `zh-CN → id` and `zh-TW → id`.
    /// There is no table between the two Chinese variants.
    pub fn builtin() -> &'static OfflineTable {
        static BUILTIN: OnceLock<OfflineTable> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            let mut table = OfflineTable::new();
            for &(indonesian, simplified, traditional) in ESSENTIAL_PHRASES {
                table.insert("id-to-zh-CN", indonesian, simplified);
                table.insert("id-to-zh-TW", indonesian, traditional);
                table.insert("zh-CN-to-id", simplified, indonesian);
                table.insert("zh-TW-to-id", traditional, indonesian);
            }
            table
        })
    }

    /// Add one mapping under a direction key
    pub fn insert(&mut self, direction_key: &str, source: &str, target: &str) -> &mut Self {
        self.entries
            .entry(direction_key.to_string())
            .or_default()
            .insert(source.to_string(), target.to_string());
        self
    }

    /// Whether any phrase exists for this direction
    pub fn has_direction(&self, direction: TranslationDirection) -> bool {
        self.entries.contains_key(&direction.key())
    }

    /// Exact-match lookup
    pub fn lookup(&self, text: &str, direction: TranslationDirection) -> Option<&str> {
        self.entries
            .get(&direction.key())
            .and_then(|phrases| phrases.get(text))
            .map(String::as_str)
    }

    /// Number of phrases stored for a direction
    pub fn phrase_count(&self, direction: TranslationDirection) -> usize {
        self.entries
            .get(&direction.key())
            .map_or(0, |phrases| phrases.len())
    }
}

/// Look up a common greeting, rendered in `target`
pub fn common_phrase(text: &str, target: LanguageCode) -> Option<&'static str> {
    COMMON_PHRASES
        .iter()
        .find(|(source, ..)| *source == text)
        .map(|&(_, indonesian, simplified, traditional)| match target {
            LanguageCode::Indonesian => indonesian,
            LanguageCode::ChineseSimplified => simplified,
            LanguageCode::ChineseTraditional => traditional,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir(from: LanguageCode, to: LanguageCode) -> TranslationDirection {
        TranslationDirection::new(from, to)
    }

    #[test]
    fn test_builtin_covers_four_directions() {
        let table = OfflineTable::builtin();
        use LanguageCode::*;
        for direction in [
            dir(Indonesian, ChineseSimplified),
            dir(Indonesian, ChineseTraditional),
            dir(ChineseSimplified, Indonesian),
            dir(ChineseTraditional, Indonesian),
        ] {
            assert!(table.has_direction(direction));
            assert_eq!(table.phrase_count(direction), 15);
        }
        assert!(!table.has_direction(dir(ChineseSimplified, ChineseTraditional)));
        assert!(!table.has_direction(dir(Indonesian, Indonesian)));
    }

    #[test]
    fn test_lookup_is_exact() {
        let table = OfflineTable::builtin();
        let direction = dir(LanguageCode::Indonesian, LanguageCode::ChineseTraditional);
        assert_eq!(table.lookup("Terima kasih", direction), Some("謝謝"));
        assert_eq!(table.lookup("terima kasih", direction), None);
        assert_eq!(table.lookup("Terima kasih ", direction), None);
    }

    #[test]
    fn test_reverse_tables() {
        let table = OfflineTable::builtin();
        assert_eq!(
            table.lookup(
                "洗手間在哪裡？",
                dir(LanguageCode::ChineseTraditional, LanguageCode::Indonesian)
            ),
            Some("Di mana toilet?")
        );
        assert_eq!(
            table.lookup(
                "不客气",
                dir(LanguageCode::ChineseSimplified, LanguageCode::Indonesian)
            ),
            Some("Sama-sama")
        );
    }

    #[test]
    fn test_custom_table() {
        let mut table = OfflineTable::new();
        table.insert("id-to-id", "Halo", "Halo");
        let identity = dir(LanguageCode::Indonesian, LanguageCode::Indonesian);
        assert_eq!(table.lookup("Halo", identity), Some("Halo"));
    }

    #[test]
    fn test_common_phrase_per_target() {
        assert_eq!(common_phrase("Thank you", LanguageCode::ChineseTraditional), Some("謝謝"));
        assert_eq!(common_phrase("Thank you", LanguageCode::ChineseSimplified), Some("谢谢"));
        assert_eq!(common_phrase("Thank you", LanguageCode::Indonesian), Some("Terima kasih"));
        assert_eq!(common_phrase("How are you?", LanguageCode::ChineseTraditional), Some("你好嗎？"));
        assert_eq!(common_phrase("thank you", LanguageCode::Indonesian), None);
    }
}
