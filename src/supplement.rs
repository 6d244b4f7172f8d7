//! Supplemental sources: hand-maintained or alternate-source additions to the
//! upstream catalog, already in output shape.
//!
//! A supplement is a JSON array of languages exactly as the catalog serves
//! them. It is parsed and validated once here; the merge stage trusts it.
//!
//! Validation rejects empty codes at every level and duplicate codes within
//! one parent, since the merge keys on codes and an ambiguous key would make
//! which entry survives depend on position.

use crate::types::Language;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SupplementError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid supplement JSON in {origin}: {source}")]
    Json {
        origin: String,
        source: serde_json::Error,
    },
    #[error("Invalid supplement {origin}: {message}")]
    Invalid { origin: String, message: String },
}

/// One validated supplemental source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplement {
    /// Where the data came from (file path or URL), for logs and errors.
    pub origin: String,
    pub languages: Vec<Language>,
}

impl Supplement {
    /// Validate already-parsed languages.
    pub fn new(origin: impl Into<String>, languages: Vec<Language>) -> Result<Self, SupplementError> {
        let supplement = Self {
            origin: origin.into(),
            languages,
        };
        supplement.validate()?;
        Ok(supplement)
    }

    /// Parse and validate a JSON array of languages.
    pub fn from_json(origin: impl Into<String>, json: &str) -> Result<Self, SupplementError> {
        let origin = origin.into();
        let languages: Vec<Language> = serde_json::from_str(json).map_err(|source| {
            SupplementError::Json {
                origin: origin.clone(),
                source,
            }
        })?;
        Self::new(origin, languages)
    }

    pub fn from_file(path: &Path) -> Result<Self, SupplementError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(path.display().to_string(), &json)
    }

    pub fn validate(&self) -> Result<(), SupplementError> {
        let invalid = |message: String| SupplementError::Invalid {
            origin: self.origin.clone(),
            message,
        };

        let mut languages = HashSet::new();
        for lang in &self.languages {
            if lang.code.trim().is_empty() {
                return Err(invalid("language with empty code".into()));
            }
            if !languages.insert(lang.code.as_str()) {
                return Err(invalid(format!("duplicate language '{}'", lang.code)));
            }

            let mut contents = HashSet::new();
            for content in &lang.contents {
                if content.code.trim().is_empty() {
                    return Err(invalid(format!("content with empty code in '{}'", lang.code)));
                }
                if !contents.insert(content.code.as_str()) {
                    return Err(invalid(format!(
                        "duplicate content '{}' in '{}'",
                        content.code, lang.code
                    )));
                }

                let mut subcontents = HashSet::new();
                for sub in &content.subcontents {
                    if sub.code.trim().is_empty() {
                        return Err(invalid(format!(
                            "subcontent with empty code in '{} {}'",
                            lang.code, content.code
                        )));
                    }
                    if !subcontents.insert(sub.code.as_str()) {
                        return Err(invalid(format!(
                            "duplicate subcontent '{}' in '{} {}'",
                            sub.code, lang.code, content.code
                        )));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Load every `*.json` file directly inside `dir`, in sorted path order.
pub fn load_dir(dir: &Path) -> Result<Vec<Supplement>, SupplementError> {
    let mut paths: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && p.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();
    paths.sort();

    paths.iter().map(|p| Supplement::from_file(p)).collect()
}
