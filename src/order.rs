//! Deterministic ordering of languages, contents and subcontents.
//!
//! Every sort here is stable: entries with equal keys keep their input order.

use std::cmp::Ordering;

use crate::config::CatalogConfig;
use crate::mapping::map_children;
use crate::normalize::canonical_sort_order;
use crate::types::{Content, Language, Subcontent};

/// Sort languages by English name, or native name when there is none.
pub fn sort_languages<C>(mut languages: Vec<Language<C>>) -> Vec<Language<C>> {
    languages.sort_by(|a, b| display_name(a).cmp(display_name(b)));
    languages
}

fn display_name<C>(lang: &Language<C>) -> &str {
    if lang.english_name.is_empty() {
        &lang.name
    } else {
        &lang.english_name
    }
}

/// Sort each language's contents by the configured priority table. Codes
/// missing from the table sink to the end.
pub fn sort_contents<L, S>(
    languages: Vec<Language<Content<L, S>>>,
    catalog: &CatalogConfig,
) -> Vec<Language<Content<L, S>>> {
    languages
        .into_iter()
        .map(|mut lang| {
            lang.contents
                .sort_by_key(|c| catalog.content_priority(&c.code));
            lang
        })
        .collect()
}

/// Sort each content's subcontents by explicit `sort`, then canonical book
/// order.
pub fn sort_subcontents<L, SL>(
    languages: Vec<Language<Content<L, Subcontent<SL>>>>,
) -> Vec<Language<Content<L, Subcontent<SL>>>> {
    languages
        .into_iter()
        .map(|lang| {
            map_children(lang, |mut content| {
                insertion_sort_by(&mut content.subcontents, compare_subcontents);
                content
            })
        })
        .collect()
}

/// Explicit sort hints decide when both sides carry different ones;
/// otherwise the canonical book order does.
///
/// Not a total order when hints are present on only some entries, which is
/// why callers use [`insertion_sort_by`] rather than `slice::sort_by`.
pub fn compare_subcontents<L>(a: &Subcontent<L>, b: &Subcontent<L>) -> Ordering {
    match (a.sort, b.sort) {
        (Some(x), Some(y)) if x != y => x.cmp(&y),
        _ => canonical_sort_order(&a.code).cmp(&canonical_sort_order(&b.code)),
    }
}

/// Stable insertion sort that tolerates an inconsistent comparator: it never
/// panics, and equal elements keep their relative order.
pub fn insertion_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
