//! Additive merge of supplemental sources into the normalized catalog.
//!
//! Entities are matched by `code` at the language, content and subcontent
//! levels, and links by `format`. A supplement only ever fills gaps:
//!
//! | Supplement has                         | Primary has            | Result            |
//! |----------------------------------------|------------------------|-------------------|
//! | language                               | no such code           | language appended |
//! | content                                | no such code           | content appended  |
//! | subcontent                             | no such code           | subcontent appended |
//! | link on a content or subcontent        | no link of that format | link appended     |
//! | anything                               | same code / format     | untouched         |
//!
//! Sources are applied one at a time in order, so when two supplements both
//! introduce the same new entity the first one wins and the second can only
//! fill gaps beneath it.

use crate::enrich::LanguageDirectory;
use crate::supplement::Supplement;
use crate::types::{Content, Language, Link, Subcontent};

/// Merge every supplement in order.
pub fn merge_all(
    primary: Vec<Language>,
    supplements: &[Supplement],
    directory: &LanguageDirectory,
) -> Vec<Language> {
    supplements
        .iter()
        .fold(primary, |tree, supplement| {
            merge_supplement(tree, supplement, directory)
        })
}

/// Merge one supplement into `primary`.
pub fn merge_supplement(
    mut primary: Vec<Language>,
    supplement: &Supplement,
    directory: &LanguageDirectory,
) -> Vec<Language> {
    for lang in &supplement.languages {
        match primary.iter_mut().find(|l| l.code == lang.code) {
            Some(existing) => merge_contents(&mut existing.contents, &lang.contents),
            None => primary.push(new_language(lang, directory)),
        }
    }
    primary
}

/// A language the primary tree doesn't have yet. Name and direction always
/// come from the metadata table, whatever the supplement says.
fn new_language(lang: &Language, directory: &LanguageDirectory) -> Language {
    Language {
        name: directory.native_name(&lang.code).to_string(),
        direction: directory.direction(&lang.code),
        ..lang.clone()
    }
}

fn merge_contents(existing: &mut Vec<Content>, incoming: &[Content]) {
    for content in incoming {
        match existing.iter_mut().find(|c| c.code == content.code) {
            Some(current) => {
                merge_links(&mut current.links, &content.links);
                merge_subcontents(&mut current.subcontents, &content.subcontents);
            }
            None => existing.push(content.clone()),
        }
    }
}

fn merge_subcontents(existing: &mut Vec<Subcontent>, incoming: &[Subcontent]) {
    for sub in incoming {
        match existing.iter_mut().find(|s| s.code == sub.code) {
            Some(current) => merge_links(&mut current.links, &sub.links),
            None => existing.push(sub.clone()),
        }
    }
}

fn merge_links(existing: &mut Vec<Link>, incoming: &[Link]) {
    for link in incoming {
        if !existing.iter().any(|l| l.format == link.format) {
            existing.push(link.clone());
        }
    }
}
