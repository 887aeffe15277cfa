//! Terminal rendering of translations, history and settings

use chrono::{DateTime, Local};
use terjemah::{LanguageCode, Preferences, Speaker, TranslationEntry, TranslationSession};

/// Local date and time for an entry timestamp
pub fn format_timestamp(timestamp_ms: u64) -> String {
    i64::try_from(timestamp_ms)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
        .unwrap_or_else(|| "unknown time".to_string())
}

pub fn print_entry(entry: &TranslationEntry) {
    let star = if entry.is_favorite() { "★" } else { "☆" };
    println!(
        "{} [{}] {}",
        star,
        entry.id(),
        format_timestamp(entry.timestamp())
    );
    println!("    {}", entry.source_text());
    println!("    {}", entry.translated_text());
    println!("    {}", entry.direction());
}

pub fn print_history(session: &TranslationSession) {
    let favorites_only = session.show_favorites_only();
    let entries = session.displayed_history();

    println!("{}", if favorites_only { "Favorites" } else { "History" });
    if entries.is_empty() {
        if favorites_only {
            println!("  No favorite translations yet");
            println!("  Star translations to add them to favorites");
        } else {
            println!("  No translation history yet");
            println!("  Translations will appear here");
        }
        return;
    }

    for entry in entries {
        print_entry(entry);
    }
}

pub fn print_result(session: &TranslationSession) {
    let direction = session.direction();
    println!("🌍 {}", direction);
    println!("📝 {}", session.source_text());
    println!("{}", session.translated_text());
}

pub fn print_preferences(preferences: &Preferences) {
    println!("Font size:    {}", preferences.font_size());
    println!(
        "Offline mode: {}",
        if preferences.offline_mode() {
            "on - limited translations available"
        } else {
            "off - full translation capabilities"
        }
    );
    println!("Theme:        {}", preferences.theme_mode());
}

/// Speaker for interactive use: announces the utterance on stderr
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSpeaker;

impl Speaker for ConsoleSpeaker {
    fn speak(&self, text: &str, language: LanguageCode) {
        eprintln!("🔊 ({}) {}", language.speech_tag(), text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_is_local_datetime() {
        let formatted = format_timestamp(1_700_000_000_000);
        assert_eq!(formatted.len(), "2023-11-14 22:13:20".len());
        assert!(formatted.starts_with("2023-11-1"));
    }

    #[test]
    fn test_format_timestamp_out_of_range() {
        assert_eq!(format_timestamp(u64::MAX), "unknown time");
    }
}
