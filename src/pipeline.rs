//! The normalization pipeline: upstream catalog in, served catalog out.
//!
//! ```text
//! map languages → map contents → map content links → map subcontents
//!   → filter subcontents → map subcontent links → merge supplements
//!   → English names → sort languages → sort contents → sort subcontents
//!   → unnest chapters
//! ```
//!
//! The order is fixed. Filtering runs before subcontent links are mapped but
//! after the subcontents exist; unnesting runs last because it relies on
//! normalized links and already-filtered subcontents, and its chapter order
//! must not be disturbed by the subcontent sort.
//!
//! [`run`] is a pure function of its inputs. Fetching, caching and serving
//! live elsewhere.

use serde::Serialize;
use tracing::debug;

use crate::config::CatalogConfig;
use crate::enrich::{LanguageDirectory, add_english_names};
use crate::filter::filter_subcontents;
use crate::mapping::{
    map_content_links, map_contents, map_languages, map_subcontent_links, map_subcontents,
};
use crate::merge::merge_all;
use crate::order::{sort_contents, sort_languages, sort_subcontents};
use crate::raw::{LanguageMetadata, RawCatalog};
use crate::supplement::Supplement;
use crate::types::{Content, Language};
use crate::unnest::unnest_subcontents;

/// Run every stage over a snapshot of the inputs.
pub fn run(
    raw: &RawCatalog,
    supplements: &[Supplement],
    metadata: &[LanguageMetadata],
    catalog: &CatalogConfig,
) -> Vec<Language> {
    let directory = LanguageDirectory::new(metadata);

    let tree = map_languages(raw.languages.clone());
    debug!(languages = tree.len(), "mapped languages");
    let tree = map_contents(tree, catalog);
    debug!(contents = count_contents(&tree), "mapped contents");
    let tree = map_content_links(tree);
    let tree = map_subcontents(tree);
    let tree = filter_subcontents(tree);
    let tree = map_subcontent_links(tree);
    debug!(subcontents = CatalogStats::of(&tree).subcontents, "normalized links and subcontents");

    let tree = merge_all(tree, supplements, &directory);
    debug!(
        supplements = supplements.len(),
        languages = tree.len(),
        "merged supplemental sources"
    );
    let tree = add_english_names(tree, &directory);

    let tree = sort_languages(tree);
    let tree = sort_contents(tree, catalog);
    let tree = sort_subcontents(tree);
    let tree = unnest_subcontents(tree);
    debug!(stats = ?CatalogStats::of(&tree), "catalog ready");

    tree
}

fn count_contents<L, S>(tree: &[Language<Content<L, S>>]) -> usize {
    tree.iter().map(|l| l.contents.len()).sum()
}

/// Entity counts of a finished catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub languages: usize,
    pub contents: usize,
    pub subcontents: usize,
    pub links: usize,
}

impl CatalogStats {
    pub fn of(tree: &[Language]) -> Self {
        let mut stats = Self {
            languages: tree.len(),
            ..Self::default()
        };
        for content in tree.iter().flat_map(|l| &l.contents) {
            stats.contents += 1;
            stats.links += content.links.len();
            stats.subcontents += content.subcontents.len();
            stats.links += content
                .subcontents
                .iter()
                .map(|s| s.links.len())
                .sum::<usize>();
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{RawChapter, RawFormat, RawLanguage, RawProject, RawResource};
    use crate::test_helpers::*;

    fn raw_format(url: &str, format: &str) -> RawFormat {
        RawFormat {
            url: url.to_string(),
            format: format.to_string(),
            ..RawFormat::default()
        }
    }

    fn raw_language(code: &str, title: &str, resources: Vec<RawResource>) -> RawLanguage {
        RawLanguage {
            title: title.to_string(),
            identifier: code.to_string(),
            direction: "ltr".to_string(),
            resources: Some(resources),
        }
    }

    fn raw_resource(code: &str, projects: Vec<RawProject>) -> RawResource {
        RawResource {
            title: code.to_string(),
            identifier: code.to_string(),
            projects: Some(projects),
            ..RawResource::default()
        }
    }

    fn raw_project(code: &str, formats: Vec<RawFormat>) -> RawProject {
        RawProject {
            title: code.to_string(),
            identifier: code.to_string(),
            sort: None,
            formats: Some(formats),
        }
    }

    fn run_defaults(raw: &RawCatalog) -> Vec<Language> {
        run(raw, &[], &[], &CatalogConfig::default())
    }

    #[test]
    fn linkless_subcontent_filtered_to_empty() {
        let raw = RawCatalog {
            languages: vec![raw_language(
                "xx",
                "Xx",
                vec![raw_resource("udb", vec![raw_project("gen", vec![])])],
            )],
        };
        let out = run_defaults(&raw);
        let udb = find_content(find_language(&out, "xx"), "udb");
        assert!(udb.subcontents.is_empty());
        assert!(udb.links.is_empty());
    }

    #[test]
    fn unranked_content_sinks_last() {
        let raw = RawCatalog {
            languages: vec![raw_language(
                "xx",
                "Xx",
                vec![
                    raw_resource("wat", vec![]),
                    raw_resource("udb", vec![]),
                    raw_resource("reg", vec![]),
                ],
            )],
        };
        let out = run_defaults(&raw);
        assert_eq!(content_codes(&out[0]), vec!["reg", "udb", "wat"]);
    }

    #[test]
    fn subcontents_sorted_then_chapters_unnested() {
        let chaptered = RawFormat {
            quality: Some("64kbps".into()),
            chapters: Some(vec![
                RawChapter {
                    identifier: "02".into(),
                    url: "http://example.org/02.mp3".into(),
                    format: "audio/mp3".into(),
                },
                RawChapter {
                    identifier: "01".into(),
                    url: "http://example.org/01.mp3".into(),
                    format: "audio/mp3".into(),
                },
            ]),
            ..raw_format("http://example.org/obs.zip", "application/zip; content=audio/mp3")
        };
        let raw = RawCatalog {
            languages: vec![raw_language(
                "en",
                "English",
                vec![
                    raw_resource("obs", vec![raw_project("obs", vec![chaptered])]),
                    raw_resource(
                        "ulb",
                        vec![
                            raw_project("rev", vec![raw_format("http://example.org/rev.pdf", "pdf")]),
                            raw_project("gen", vec![raw_format("http://example.org/gen.pdf", "pdf")]),
                        ],
                    ),
                ],
            )],
        };
        let out = run_defaults(&raw);
        let en = find_language(&out, "en");
        assert_eq!(content_codes(en), vec!["ulb", "obs"]);
        assert_eq!(subcontent_codes(find_content(en, "ulb")), vec!["gen", "rev"]);

        let obs = find_content(en, "obs");
        assert_eq!(subcontent_codes(obs), vec!["01", "02"]);
        assert_eq!(obs.links.len(), 1);
        assert_eq!(obs.links[0].zip_content, "mp3");
        assert!(obs.links[0].chapters.is_empty());
    }

    #[test]
    fn supplement_merged_then_named_and_sorted() {
        let raw = RawCatalog {
            languages: vec![raw_language("fr", "français", vec![])],
        };
        let supplement = Supplement::new(
            "test",
            vec![language("de", vec![content("ulb", vec![pdf_link("de-ulb")], vec![])])],
        )
        .unwrap();
        let metadata = vec![
            LanguageMetadata {
                language_code: "fr".into(),
                native_name: Some("français".into()),
                english_name: Some("French".into()),
                text_direction: Some("ltr".into()),
            },
            LanguageMetadata {
                language_code: "de".into(),
                native_name: Some("Deutsch".into()),
                english_name: Some("German".into()),
                text_direction: Some("ltr".into()),
            },
        ];
        let out = run(&raw, &[supplement], &metadata, &CatalogConfig::default());
        assert_eq!(language_codes(&out), vec!["fr", "de"]);
        assert_eq!(find_language(&out, "de").name, "Deutsch");
        assert_eq!(find_language(&out, "de").english_name, "German");
    }

    #[test]
    fn input_is_not_consumed() {
        let raw = RawCatalog {
            languages: vec![raw_language("xx", "Xx", vec![])],
        };
        let first = run_defaults(&raw);
        let second = run_defaults(&raw);
        assert_eq!(first, second);
    }

    #[test]
    fn stats_count_every_level() {
        let tree = vec![language(
            "en",
            vec![content(
                "ulb",
                vec![pdf_link("ulb")],
                vec![
                    subcontent("gen", vec![pdf_link("gen"), media_link("zip", None)]),
                    subcontent("exo", vec![pdf_link("exo")]),
                ],
            )],
        )];
        assert_eq!(
            CatalogStats::of(&tree),
            CatalogStats {
                languages: 1,
                contents: 1,
                subcontents: 2,
                links: 4,
            }
        );
    }
}
