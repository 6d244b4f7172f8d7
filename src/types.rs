//! Output schema shared by every pipeline stage.
//!
//! The tree is `Language → Content → Subcontent → Link`. Each level is generic
//! over its not-yet-normalized children so the shape mappers in
//! [`mapping`](crate::mapping) can rewrite one level at a time while the type
//! system tracks which levels are already normalized:
//!
//! ```text
//! Language<RawResource>                          after map_languages
//! Language<Content<RawFormat, RawProject>>       after map_contents
//! Language<Content<Link, RawProject>>            after map_content_links
//! Language<Content<Link, Subcontent<RawFormat>>> after map_subcontents
//! Language                                       after map_subcontent_links
//! ```
//!
//! The defaults of the type parameters are the fully normalized types, so
//! `Language` on its own names the final output shape. The same types
//! deserialize supplemental sources, which are already in output form.

use serde::{Deserialize, Serialize};

/// Writing direction of a language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

impl Direction {
    /// Parse a direction string, treating anything other than `rtl` as `ltr`.
    pub fn from_str_lossy(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("rtl") {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// A language and the resources translated into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "C: Deserialize<'de>")
)]
pub struct Language<C = Content> {
    #[serde(default)]
    pub name: String,
    /// Display name from the language metadata table, `""` when unknown.
    #[serde(default)]
    pub english_name: String,
    pub code: String,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub contents: Vec<C>,
}

/// A translated resource (a Bible translation, a set of notes, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "L: Deserialize<'de>, S: Deserialize<'de>")
)]
pub struct Content<L = Link, S = Subcontent> {
    #[serde(default)]
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub checking_level: u32,
    #[serde(default)]
    pub links: Vec<L>,
    #[serde(default)]
    pub subcontents: Vec<S>,
}

/// A unit within a content: one book, one chapter, one article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "L: Deserialize<'de>")
)]
pub struct Subcontent<L = Link> {
    #[serde(default)]
    pub name: String,
    pub code: String,
    /// Explicit ordering hint from upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<i64>,
    /// `bible-ot`, `bible-nt`, `obs`, or `""` when unrecognized.
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub links: Vec<L>,
}

/// A downloadable artifact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub url: String,
    /// File extension taken from the URL.
    #[serde(default)]
    pub format: String,
    /// MIME subtype inside a zip archive, `""` for anything that isn't a zip.
    #[serde(default)]
    pub zip_content: String,
    /// Bitrate or resolution tier for audio and video.
    #[serde(default)]
    pub quality: Option<String>,
    /// Per-chapter files. Only the chaptered story collection carries these,
    /// and only until the unnesting stage.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chapters: Vec<Chapter>,
}

/// One chapter file nested inside a link of the chaptered story collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub identifier: String,
    pub url: String,
    /// Raw MIME type, e.g. `audio/mp3`.
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub quality: Option<String>,
}

impl Link {
    /// A copy of this link without its transient chapter list.
    pub fn without_chapters(&self) -> Link {
        Link {
            chapters: Vec::new(),
            ..self.clone()
        }
    }
}
