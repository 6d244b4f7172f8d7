//! English display names from the language metadata table.
//!
//! The metadata table is keyed by language code, which is a different key
//! space from content codes. Duplicate entries for one code keep the first.

use std::collections::HashMap;

use crate::raw::LanguageMetadata;
use crate::types::{Direction, Language};

/// Name given to a language added by a supplement when the table has no
/// native name for it.
pub const UNKNOWN_LANGUAGE_NAME: &str = "Unknown";

/// Code-indexed view over the language metadata table.
#[derive(Debug, Default)]
pub struct LanguageDirectory<'a> {
    by_code: HashMap<&'a str, &'a LanguageMetadata>,
}

impl<'a> LanguageDirectory<'a> {
    pub fn new(entries: &'a [LanguageMetadata]) -> Self {
        let mut by_code = HashMap::with_capacity(entries.len());
        for entry in entries {
            by_code.entry(entry.language_code.as_str()).or_insert(entry);
        }
        Self { by_code }
    }

    pub fn get(&self, code: &str) -> Option<&'a LanguageMetadata> {
        self.by_code.get(code).copied()
    }

    /// English name for `code`, or `""`.
    pub fn english_name(&self, code: &str) -> &'a str {
        self.get(code)
            .and_then(|m| m.english_name.as_deref())
            .unwrap_or("")
    }

    /// Native name for `code`, or [`UNKNOWN_LANGUAGE_NAME`].
    pub fn native_name(&self, code: &str) -> &'a str {
        self.get(code)
            .and_then(|m| m.native_name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or(UNKNOWN_LANGUAGE_NAME)
    }

    /// Text direction for `code`, left-to-right when unknown.
    pub fn direction(&self, code: &str) -> Direction {
        self.get(code)
            .and_then(|m| m.text_direction.as_deref())
            .map(Direction::from_str_lossy)
            .unwrap_or_default()
    }
}

/// Set every language's `english_name` from the directory.
pub fn add_english_names<C>(
    languages: Vec<Language<C>>,
    directory: &LanguageDirectory,
) -> Vec<Language<C>> {
    languages
        .into_iter()
        .map(|lang| Language {
            english_name: directory.english_name(&lang.code).to_string(),
            ..lang
        })
        .collect()
}
