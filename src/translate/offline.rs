//! Offline phrasebook translator
//!
//! Resolves text against an [`OfflineTable`] without any delay. A miss is not
//! an error: the translator answers with [`OFFLINE_UNAVAILABLE`] so the caller
//! always has something to display.

use crate::language::TranslationDirection;
use crate::translate::error::TranslateResult;
use crate::translate::phrasebook::OfflineTable;
use crate::translate::translator::Translator;
use async_trait::async_trait;
use tracing::debug;

/// Returned whenever the offline table has no exact match
pub const OFFLINE_UNAVAILABLE: &str = "[Offline translation not available]";

/// Exact-match translator over a static phrase table
#[derive(Debug, Clone)]
pub struct OfflineTranslator {
    table: &'static OfflineTable,
}

impl OfflineTranslator {
    /// Create a translator over the built-in phrasebook
    pub fn new() -> Self {
        Self {
            table: OfflineTable::builtin(),
        }
    }

    /// Create a translator over a caller supplied table
    ///
    /// The table must outlive the translator; leak or store it in a static.
    pub fn with_table(table: &'static OfflineTable) -> Self {
        Self { table }
    }

    fn lookup(&self, text: &str, direction: TranslationDirection) -> String {
        match self.table.lookup(text, direction) {
            Some(translation) => translation.to_string(),
            None => {
                debug!(
                    "Offline miss for '{}' ({})",
                    text,
                    direction.key()
                );
                OFFLINE_UNAVAILABLE.to_string()
            }
        }
    }
}

impl Default for OfflineTranslator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Translator for OfflineTranslator {
    async fn translate(
        &self,
        text: &str,
        direction: TranslationDirection,
    ) -> TranslateResult<String> {
        Ok(self.lookup(text, direction))
    }

    fn provider_name(&self) -> &str {
        "Offline Phrasebook"
    }
}
