//! Upstream input documents as they arrive over the wire.
//!
//! Only the fields the pipeline reads are modelled; everything else is
//! ignored. Optional collections are `Option<Vec<_>>` because upstream sends
//! both absent keys and explicit `null`s, and the mappers default both to
//! empty vectors.

use serde::{Deserialize, Deserializer, Serialize};

/// The v3 catalog document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCatalog {
    #[serde(default)]
    pub languages: Vec<RawLanguage>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLanguage {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub resources: Option<Vec<RawResource>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResource {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub checking: Option<RawChecking>,
    #[serde(default)]
    pub formats: Option<Vec<RawFormat>>,
    #[serde(default)]
    pub projects: Option<Vec<RawProject>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChecking {
    #[serde(default, deserialize_with = "lenient_int")]
    pub checking_level: Option<i64>,
}

/// A downloadable file as described by upstream.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFormat {
    #[serde(default)]
    pub url: String,
    /// Compound MIME string, e.g. `application/zip; content=text/usfm`.
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub quality: Option<String>,
    #[serde(default)]
    pub chapters: Option<Vec<RawChapter>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChapter {
    #[serde(default)]
    pub identifier: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub format: String,
}

/// A book or unit within a resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProject {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub identifier: String,
    #[serde(default, deserialize_with = "lenient_int")]
    pub sort: Option<i64>,
    #[serde(default)]
    pub formats: Option<Vec<RawFormat>>,
}

/// One row of the language names export.
///
/// Upstream uses terse keys (`lc`, `ln`, `ang`, `ld`); the long names are
/// accepted too so hand-written tables stay readable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageMetadata {
    #[serde(rename = "lc", alias = "languageCode")]
    pub language_code: String,
    #[serde(rename = "ln", alias = "nativeName", default)]
    pub native_name: Option<String>,
    #[serde(rename = "ang", alias = "englishName", default)]
    pub english_name: Option<String>,
    #[serde(rename = "ld", alias = "textDirection", default)]
    pub text_direction: Option<String>,
}

/// Accept integers, floats, and numeric strings; anything else is `None`.
///
/// Upstream has sent `checking_level` both as `3` and as `"3"`.
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64)),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
