//! Converter from the legacy v2 catalog into a supplemental source.
//!
//! The v2 catalog groups languages under categories, and a language may show
//! up in several of them:
//!
//! ```text
//! { "cat": [ { "langs": [ { "lc": "en",
//!                           "vers": [ { "name", "slug",
//!                                       "toc": [ { "title", "desc", "slug", "pdf", "src" } ] } ] } ] } ] }
//! ```
//!
//! Languages are merged by `lc`, each version becomes a content and each
//! table-of-contents entry a subcontent whose links come from its `pdf` and
//! `src` keys. Entries without any link are dropped.

use serde::Deserialize;

use crate::normalize::{category, file_format};
use crate::supplement::{Supplement, SupplementError};
use crate::types::{Content, Direction, Language, Link, Subcontent};

#[derive(Debug, Default, Deserialize)]
pub struct LegacyCatalog {
    #[serde(default)]
    pub cat: Vec<LegacyCategory>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LegacyCategory {
    #[serde(default)]
    pub langs: Vec<LegacyLanguage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LegacyLanguage {
    #[serde(default)]
    pub lc: String,
    #[serde(default)]
    pub vers: Vec<LegacyVersion>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LegacyVersion {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub toc: Vec<LegacyEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LegacyEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub pdf: Option<String>,
    #[serde(default)]
    pub src: Option<String>,
}

/// Parse a v2 catalog document and convert it.
pub fn supplement_from_json(origin: &str, json: &str) -> Result<Supplement, SupplementError> {
    let catalog: LegacyCatalog =
        serde_json::from_str(json).map_err(|source| SupplementError::Json {
            origin: origin.to_string(),
            source,
        })?;
    Supplement::new(origin, convert(catalog))
}

/// Convert a parsed v2 catalog into output-shaped languages.
pub fn convert(catalog: LegacyCatalog) -> Vec<Language> {
    let mut languages: Vec<Language> = Vec::new();

    for lang in catalog.cat.into_iter().flat_map(|c| c.langs) {
        if lang.lc.trim().is_empty() {
            continue;
        }
        let index = match languages.iter().position(|l| l.code == lang.lc) {
            Some(i) => i,
            None => {
                languages.push(Language {
                    name: String::new(),
                    english_name: String::new(),
                    code: lang.lc.clone(),
                    direction: Direction::Ltr,
                    contents: Vec::new(),
                });
                languages.len() - 1
            }
        };
        for ver in lang.vers {
            add_version(&mut languages[index].contents, ver);
        }
    }

    languages
}

fn add_version(contents: &mut Vec<Content>, ver: LegacyVersion) {
    if ver.slug.trim().is_empty() {
        return;
    }
    let index = match contents.iter().position(|c| c.code == ver.slug) {
        Some(i) => i,
        None => {
            contents.push(Content {
                name: ver.name.clone(),
                code: ver.slug.clone(),
                subject: String::new(),
                description: String::new(),
                checking_level: 0,
                links: Vec::new(),
                subcontents: Vec::new(),
            });
            contents.len() - 1
        }
    };

    for entry in ver.toc {
        let links = entry_links(&entry);
        if links.is_empty() {
            continue;
        }
        let code = if entry.slug.is_empty() { &ver.slug } else { &entry.slug };
        let name = if entry.title.is_empty() { &ver.name } else { &entry.title };

        let subcontents = &mut contents[index].subcontents;
        match subcontents.iter_mut().find(|s| &s.code == code) {
            Some(existing) => {
                for link in links {
                    if !existing.links.iter().any(|l| l.format == link.format) {
                        existing.links.push(link);
                    }
                }
            }
            None => subcontents.push(Subcontent {
                name: name.clone(),
                code: code.clone(),
                sort: None,
                category: category(code).to_string(),
                links,
            }),
        }
    }
}

fn entry_links(entry: &LegacyEntry) -> Vec<Link> {
    [&entry.pdf, &entry.src]
        .into_iter()
        .flatten()
        .filter(|url| !url.is_empty())
        .map(|url| Link {
            url: url.clone(),
            format: file_format(url).to_string(),
            ..Link::default()
        })
        .collect()
}
