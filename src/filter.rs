//! Drops subcontents that shouldn't be listed.
//!
//! Two rules:
//! - a subcontent without any link has nothing to download and is removed;
//! - the translationAcademy manuals `intro`, `process` and `checking` are
//!   removed even when they have links. They are process documentation, not
//!   book-like units.

use crate::mapping::map_children;
use crate::types::{Content, Language, Subcontent};

/// Content code of translationAcademy.
pub const ACADEMY_CONTENT: &str = "ta";

/// translationAcademy subcontents that never appear in the listing.
pub const EXCLUDED_ACADEMY_SUBCONTENTS: &[&str] = &["intro", "process", "checking"];

/// Remove link-less subcontents and the excluded academy manuals.
pub fn filter_subcontents<L, SL>(
    languages: Vec<Language<Content<L, Subcontent<SL>>>>,
) -> Vec<Language<Content<L, Subcontent<SL>>>> {
    languages
        .into_iter()
        .map(|lang| {
            map_children(lang, |mut content| {
                let is_academy = content.code == ACADEMY_CONTENT;
                content
                    .subcontents
                    .retain(|sub| keep_subcontent(is_academy, sub));
                content
            })
        })
        .collect()
}

fn keep_subcontent<L>(is_academy: bool, sub: &Subcontent<L>) -> bool {
    if sub.links.is_empty() {
        return false;
    }
    !(is_academy && EXCLUDED_ACADEMY_SUBCONTENTS.contains(&sub.code.as_str()))
}
