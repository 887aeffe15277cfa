//! Supported languages and translation directions
//!
//! The translator works on a closed set of three languages. Codes are
//! serialized exactly as `id`, `zh-CN` and `zh-TW`, which is also the shape
//! persisted inside history entries.
//!
//! # Example
//!
//! ```ignore
//! use terjemah::{LanguageCode, TranslationDirection};
//!
//! let direction = TranslationDirection::new(LanguageCode::Indonesian, LanguageCode::ChineseSimplified);
//! assert_eq!(direction.key(), "id-to-zh-CN");
//!
//! let tw: LanguageCode = "zh-Hant".parse()?;
//! assert_eq!(tw, LanguageCode::ChineseTraditional);
//! ```

use icu_locale::Locale;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error raised when a language code is outside the supported set
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageError {
    /// The code is a well-formed locale but not one we translate
    Unsupported(String),
    /// The code could not be parsed as a locale at all
    InvalidCode(String),
}

impl fmt::Display for LanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageError::Unsupported(code) => write!(f, "Unsupported language: {}", code),
            LanguageError::InvalidCode(msg) => write!(f, "Invalid language code: {}", msg),
        }
    }
}

impl std::error::Error for LanguageError {}

/// One of the three languages the translator understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LanguageCode {
    #[serde(rename = "id")]
    Indonesian,
    #[serde(rename = "zh-CN")]
    ChineseSimplified,
    #[serde(rename = "zh-TW")]
    ChineseTraditional,
}

impl LanguageCode {
    /// All supported languages, in selector order
    pub const ALL: [LanguageCode; 3] = [
        LanguageCode::Indonesian,
        LanguageCode::ChineseSimplified,
        LanguageCode::ChineseTraditional,
    ];

    /// The short code used in table keys and persisted data
    pub fn code(&self) -> &'static str {
        match self {
            LanguageCode::Indonesian => "id",
            LanguageCode::ChineseSimplified => "zh-CN",
            LanguageCode::ChineseTraditional => "zh-TW",
        }
    }

    /// Human readable name, e.g. "Chinese (Traditional)"
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageCode::Indonesian => "Indonesian",
            LanguageCode::ChineseSimplified => "Chinese (Simplified)",
            LanguageCode::ChineseTraditional => "Chinese (Traditional)",
        }
    }

    /// Language family without the script variant ("Indonesian" or "Chinese")
    pub fn family_name(&self) -> &'static str {
        match self {
            LanguageCode::Indonesian => "Indonesian",
            LanguageCode::ChineseSimplified | LanguageCode::ChineseTraditional => "Chinese",
        }
    }

    /// BCP-47 tag handed to speech synthesis
    pub fn speech_tag(&self) -> &'static str {
        match self {
            LanguageCode::Indonesian => "id-ID",
            LanguageCode::ChineseSimplified => "zh-CN",
            LanguageCode::ChineseTraditional => "zh-TW",
        }
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LanguageCode {
    type Err = LanguageError;

    /// Parse a language code
    ///
    /// Exact codes (`id`, `zh-CN`, `zh-TW`) are matched first. Anything else is
    /// parsed as a BCP-47 locale and mapped onto the closed set:
    ///
    /// - `id`, `in` (legacy) → Indonesian
    /// - `zh` with script `Hant`, or region `TW`/`HK`/`MO` → Traditional
    /// - any other `zh` → Simplified
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(exact) = LanguageCode::ALL.iter().find(|lang| lang.code() == s) {
            return Ok(*exact);
        }

        let locale: Locale = s
            .parse()
            .map_err(|e| LanguageError::InvalidCode(format!("'{}': {}", s, e)))?;

        let language = locale.id.language.as_str();
        match language {
            "id" | "in" => Ok(LanguageCode::Indonesian),
            "zh" => {
                let script = locale.id.script.map(|script| script.as_str().to_string());
                let region = locale.id.region.map(|region| region.as_str().to_string());
                let traditional = match script.as_deref() {
                    Some("Hant") => true,
                    Some(_) => false,
                    None => matches!(region.as_deref(), Some("TW" | "HK" | "MO")),
                };
                if traditional {
                    Ok(LanguageCode::ChineseTraditional)
                } else {
                    Ok(LanguageCode::ChineseSimplified)
                }
            }
            _ => Err(LanguageError::Unsupported(s.to_string())),
        }
    }
}

/// Source and target language of a translation request
///
/// `from == to` is allowed; no table carries identity entries, so such
/// requests take the same miss/fallback paths as any other unknown text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TranslationDirection {
    pub from: LanguageCode,
    pub to: LanguageCode,
}

impl TranslationDirection {
    pub fn new(from: LanguageCode, to: LanguageCode) -> Self {
        Self { from, to }
    }

    /// Table key in the form `"{from}-to-{to}"`, e.g. `"zh-TW-to-id"`
    pub fn key(&self) -> String {
        format!("{}-to-{}", self.from.code(), self.to.code())
    }

    /// The reverse direction
    pub fn swapped(&self) -> Self {
        Self {
            from: self.to,
            to: self.from,
        }
    }

    pub fn with_from(&self, from: LanguageCode) -> Self {
        Self { from, to: self.to }
    }

    pub fn with_to(&self, to: LanguageCode) -> Self {
        Self { from: self.from, to }
    }
}

impl Default for TranslationDirection {
    fn default() -> Self {
        Self::new(LanguageCode::Indonesian, LanguageCode::ChineseSimplified)
    }
}

impl fmt::Display for TranslationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} → {}",
            self.from.display_name(),
            self.to.display_name()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exact_codes() {
        assert_eq!("id".parse::<LanguageCode>(), Ok(LanguageCode::Indonesian));
        assert_eq!(
            "zh-CN".parse::<LanguageCode>(),
            Ok(LanguageCode::ChineseSimplified)
        );
        assert_eq!(
            "zh-TW".parse::<LanguageCode>(),
            Ok(LanguageCode::ChineseTraditional)
        );
    }

    #[test]
    fn test_parse_bcp47_variants() {
        assert_eq!(
            "zh-Hant".parse::<LanguageCode>(),
            Ok(LanguageCode::ChineseTraditional)
        );
        assert_eq!(
            "zh-HK".parse::<LanguageCode>(),
            Ok(LanguageCode::ChineseTraditional)
        );
        assert_eq!(
            "zh-Hans".parse::<LanguageCode>(),
            Ok(LanguageCode::ChineseSimplified)
        );
        assert_eq!("zh".parse::<LanguageCode>(), Ok(LanguageCode::ChineseSimplified));
        assert_eq!("id-ID".parse::<LanguageCode>(), Ok(LanguageCode::Indonesian));
        assert_eq!("in".parse::<LanguageCode>(), Ok(LanguageCode::Indonesian));
    }

    #[test]
    fn test_parse_rejects_other_languages() {
        assert!(matches!(
            "fr".parse::<LanguageCode>(),
            Err(LanguageError::Unsupported(_))
        ));
        assert!(matches!(
            "not a locale!".parse::<LanguageCode>(),
            Err(LanguageError::InvalidCode(_))
        ));
    }

    #[test]
    fn test_direction_key() {
        let direction = TranslationDirection::default();
        assert_eq!(direction.key(), "id-to-zh-CN");
        assert_eq!(direction.swapped().key(), "zh-CN-to-id");
    }

    #[test]
    fn test_direction_serializes_as_codes() {
        let direction = TranslationDirection::new(
            LanguageCode::ChineseTraditional,
            LanguageCode::Indonesian,
        );
        let json = serde_json::to_string(&direction).unwrap();
        assert_eq!(json, r#"{"from":"zh-TW","to":"id"}"#);
    }

    #[test]
    fn test_names() {
        assert_eq!(LanguageCode::Indonesian.family_name(), "Indonesian");
        assert_eq!(LanguageCode::ChineseTraditional.family_name(), "Chinese");
        assert_eq!(
            LanguageCode::ChineseSimplified.display_name(),
            "Chinese (Simplified)"
        );
        assert_eq!(LanguageCode::Indonesian.speech_tag(), "id-ID");
    }
}
