//! Structural diff of two served catalogs.
//!
//! Used to check a new build against a previous one. Entities are paired by
//! code ignoring case; links by format, and by quality as well whenever
//! either side has one, since audio and video ship one link per tier.
//!
//! Each difference carries a space-separated path from the language down,
//! e.g. `en ulb gen pdf 64kbps`.

use crate::types::{Content, Language, Link, Subcontent};
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("{path} is not a catalog: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// One way in which two catalogs disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Difference {
    OnlyInFirst { path: String },
    OnlyInSecond { path: String },
    Changed {
        path: String,
        field: &'static str,
        first: String,
        second: String,
    },
}

impl Difference {
    pub fn path(&self) -> &str {
        match self {
            Difference::OnlyInFirst { path }
            | Difference::OnlyInSecond { path }
            | Difference::Changed { path, .. } => path,
        }
    }
}

/// Read a served catalog from disk.
pub fn load_catalog(path: &Path) -> Result<Vec<Language>, CompareError> {
    let display = path.display().to_string();
    let json = fs::read_to_string(path).map_err(|source| CompareError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| CompareError::Json {
        path: display,
        source,
    })
}

/// Every difference between `first` and `second`, in first-catalog order,
/// followed by whatever only the second one has.
pub fn compare(first: &[Language], second: &[Language]) -> Vec<Difference> {
    let mut diffs = Vec::new();
    for pair in pair_up(first, second, |a, b| same_code(&a.code, &b.code)) {
        match pair {
            Pairing::Both(a, b) => compare_languages(a, b, &mut diffs),
            Pairing::First(a) => diffs.push(Difference::OnlyInFirst { path: a.code.clone() }),
            Pairing::Second(b) => diffs.push(Difference::OnlyInSecond { path: b.code.clone() }),
        }
    }
    diffs
}

fn compare_languages(a: &Language, b: &Language, diffs: &mut Vec<Difference>) {
    let path = a.code.as_str();
    changed(diffs, path, "name", &a.name, &b.name);
    changed(diffs, path, "englishName", &a.english_name, &b.english_name);
    changed(diffs, path, "direction", a.direction.as_str(), b.direction.as_str());

    for pair in pair_up(&a.contents, &b.contents, |x, y| same_code(&x.code, &y.code)) {
        match pair {
            Pairing::Both(x, y) => compare_contents(&format!("{path} {}", x.code), x, y, diffs),
            Pairing::First(x) => diffs.push(Difference::OnlyInFirst {
                path: format!("{path} {}", x.code),
            }),
            Pairing::Second(y) => diffs.push(Difference::OnlyInSecond {
                path: format!("{path} {}", y.code),
            }),
        }
    }
}

fn compare_contents(path: &str, a: &Content, b: &Content, diffs: &mut Vec<Difference>) {
    changed(diffs, path, "name", &a.name, &b.name);
    changed(diffs, path, "subject", &a.subject, &b.subject);
    changed(diffs, path, "description", &a.description, &b.description);
    changed(
        diffs,
        path,
        "checkingLevel",
        &a.checking_level.to_string(),
        &b.checking_level.to_string(),
    );
    compare_links(path, &a.links, &b.links, diffs);

    for pair in pair_up(&a.subcontents, &b.subcontents, |x, y| {
        same_code(&x.code, &y.code)
    }) {
        match pair {
            Pairing::Both(x, y) => {
                compare_subcontents(&format!("{path} {}", x.code), x, y, diffs)
            }
            Pairing::First(x) => diffs.push(Difference::OnlyInFirst {
                path: format!("{path} {}", x.code),
            }),
            Pairing::Second(y) => diffs.push(Difference::OnlyInSecond {
                path: format!("{path} {}", y.code),
            }),
        }
    }
}

fn compare_subcontents(path: &str, a: &Subcontent, b: &Subcontent, diffs: &mut Vec<Difference>) {
    changed(diffs, path, "name", &a.name, &b.name);
    changed(diffs, path, "category", &a.category, &b.category);
    changed(diffs, path, "sort", &optional(a.sort), &optional(b.sort));
    compare_links(path, &a.links, &b.links, diffs);
}

fn compare_links(path: &str, a: &[Link], b: &[Link], diffs: &mut Vec<Difference>) {
    for pair in pair_up(a, b, same_link) {
        match pair {
            Pairing::Both(x, y) => {
                let path = link_path(path, x);
                changed(diffs, &path, "url", &x.url, &y.url);
                changed(diffs, &path, "zipContent", &x.zip_content, &y.zip_content);
                changed(
                    diffs,
                    &path,
                    "quality",
                    &optional(x.quality.as_deref()),
                    &optional(y.quality.as_deref()),
                );
            }
            Pairing::First(x) => diffs.push(Difference::OnlyInFirst {
                path: link_path(path, x),
            }),
            Pairing::Second(y) => diffs.push(Difference::OnlyInSecond {
                path: link_path(path, y),
            }),
        }
    }
}

fn link_path(parent: &str, link: &Link) -> String {
    match &link.quality {
        Some(quality) => format!("{parent} {} {quality}", link.format),
        None => format!("{parent} {}", link.format),
    }
}

fn same_code(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

fn same_link(a: &Link, b: &Link) -> bool {
    if !a.format.eq_ignore_ascii_case(&b.format) {
        return false;
    }
    match (&a.quality, &b.quality) {
        (None, None) => true,
        (Some(x), Some(y)) => x.eq_ignore_ascii_case(y),
        _ => false,
    }
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "(none)".to_string())
}

fn changed(diffs: &mut Vec<Difference>, path: &str, field: &'static str, first: &str, second: &str) {
    if first != second {
        diffs.push(Difference::Changed {
            path: path.to_string(),
            field,
            first: first.to_string(),
            second: second.to_string(),
        });
    }
}

enum Pairing<'a, T> {
    Both(&'a T, &'a T),
    First(&'a T),
    Second(&'a T),
}

/// Match each item of `first` with the first unclaimed equal item of
/// `second`. Unclaimed items of `second` come last, in their own order.
fn pair_up<'a, T>(
    first: &'a [T],
    second: &'a [T],
    same: impl Fn(&T, &T) -> bool,
) -> Vec<Pairing<'a, T>> {
    let mut claimed = vec![false; second.len()];
    let mut pairs = Vec::with_capacity(first.len().max(second.len()));

    for a in first {
        let found = second
            .iter()
            .enumerate()
            .find(|(i, b)| !claimed[*i] && same(a, *b));
        match found {
            Some((i, b)) => {
                claimed[i] = true;
                pairs.push(Pairing::Both(a, b));
            }
            None => pairs.push(Pairing::First(a)),
        }
    }
    pairs.extend(
        second
            .iter()
            .zip(claimed)
            .filter(|(_, taken)| !taken)
            .map(|(b, _)| Pairing::Second(b)),
    );
    pairs
}
