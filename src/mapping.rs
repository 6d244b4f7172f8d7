//! Shape mappers: rename and reshape one level of the tree at a time.
//!
//! Each mapper consumes the whole tree and returns a new one, rewriting
//! exactly one nesting level and moving every other level across untouched.
//! Absent upstream collections become empty vectors here, so nothing
//! downstream has to deal with a missing `links` or `subcontents`.

use crate::config::CatalogConfig;
use crate::normalize::{category, file_format, zip_inner_type};
use crate::raw::{RawChapter, RawFormat, RawLanguage, RawProject, RawResource};
use crate::types::{Chapter, Content, Direction, Language, Link, Subcontent};

/// `{title, identifier, direction, resources}` → `{name, code, direction, contents}`.
pub fn map_languages(languages: Vec<RawLanguage>) -> Vec<Language<RawResource>> {
    languages
        .into_iter()
        .map(|lang| Language {
            name: lang.title,
            english_name: String::new(),
            code: lang.identifier,
            direction: Direction::from_str_lossy(&lang.direction),
            contents: lang.resources.unwrap_or_default(),
        })
        .collect()
}

/// Resources → contents, applying the title override and subject alias tables.
///
/// Links and subcontents are carried over raw.
pub fn map_contents(
    languages: Vec<Language<RawResource>>,
    tables: &CatalogConfig,
) -> Vec<Language<Content<RawFormat, RawProject>>> {
    languages
        .into_iter()
        .map(|lang| map_children(lang, |res| map_content(res, tables)))
        .collect()
}

fn map_content(res: RawResource, tables: &CatalogConfig) -> Content<RawFormat, RawProject> {
    Content {
        name: tables.content_title(&res.title).to_string(),
        subject: tables.subject(&res.subject).to_string(),
        code: res.identifier,
        description: res.description,
        checking_level: res
            .checking
            .and_then(|c| c.checking_level)
            .and_then(|level| u32::try_from(level).ok())
            .unwrap_or(0),
        links: res.formats.unwrap_or_default(),
        subcontents: res.projects.unwrap_or_default(),
    }
}

/// Normalize the links attached directly to each content.
pub fn map_content_links<S>(
    languages: Vec<Language<Content<RawFormat, S>>>,
) -> Vec<Language<Content<Link, S>>> {
    languages
        .into_iter()
        .map(|lang| {
            map_children(lang, |content| Content {
                name: content.name,
                code: content.code,
                subject: content.subject,
                description: content.description,
                checking_level: content.checking_level,
                links: map_links(content.links),
                subcontents: content.subcontents,
            })
        })
        .collect()
}

/// Projects → subcontents. Links are carried over raw.
pub fn map_subcontents<L>(
    languages: Vec<Language<Content<L, RawProject>>>,
) -> Vec<Language<Content<L, Subcontent<RawFormat>>>> {
    languages
        .into_iter()
        .map(|lang| {
            map_children(lang, |content| {
                map_grandchildren(content, |project| Subcontent {
                    category: category(&project.identifier).to_string(),
                    name: project.title,
                    code: project.identifier,
                    sort: project.sort,
                    links: project.formats.unwrap_or_default(),
                })
            })
        })
        .collect()
}

/// Normalize the links attached to each subcontent.
pub fn map_subcontent_links<L>(
    languages: Vec<Language<Content<L, Subcontent<RawFormat>>>>,
) -> Vec<Language<Content<L, Subcontent<Link>>>> {
    languages
        .into_iter()
        .map(|lang| {
            map_children(lang, |content| {
                map_grandchildren(content, |sub| Subcontent {
                    name: sub.name,
                    code: sub.code,
                    sort: sub.sort,
                    category: sub.category,
                    links: map_links(sub.links),
                })
            })
        })
        .collect()
}

/// Normalize one raw format into a link.
pub fn map_link(raw: RawFormat) -> Link {
    Link {
        format: file_format(&raw.url).to_string(),
        zip_content: zip_inner_type(&raw.format).to_string(),
        url: raw.url,
        quality: raw.quality.filter(|q| !q.is_empty()),
        chapters: raw
            .chapters
            .unwrap_or_default()
            .into_iter()
            .map(map_chapter)
            .collect(),
    }
}

fn map_links(raw: Vec<RawFormat>) -> Vec<Link> {
    raw.into_iter().map(map_link).collect()
}

fn map_chapter(raw: RawChapter) -> Chapter {
    Chapter {
        identifier: raw.identifier,
        url: raw.url,
        format: raw.format,
        quality: None,
    }
}

/// Rebuild a language with each of its contents passed through `f`.
pub(crate) fn map_children<A, B>(lang: Language<A>, f: impl FnMut(A) -> B) -> Language<B> {
    Language {
        name: lang.name,
        english_name: lang.english_name,
        code: lang.code,
        direction: lang.direction,
        contents: lang.contents.into_iter().map(f).collect(),
    }
}

/// Rebuild a content with each of its subcontents passed through `f`.
pub(crate) fn map_grandchildren<L, A, B>(
    content: Content<L, A>,
    f: impl FnMut(A) -> B,
) -> Content<L, B> {
    Content {
        name: content.name,
        code: content.code,
        subject: content.subject,
        description: content.description,
        checking_level: content.checking_level,
        links: content.links,
        subcontents: content.subcontents.into_iter().map(f).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::RawChecking;

    fn raw_format(url: &str, format: &str, quality: Option<&str>) -> RawFormat {
        RawFormat {
            url: url.into(),
            format: format.into(),
            quality: quality.map(String::from),
            chapters: None,
        }
    }

    fn raw_project(title: &str, identifier: &str, sort: Option<i64>) -> RawProject {
        RawProject {
            title: title.into(),
            identifier: identifier.into(),
            sort,
            formats: Some(vec![raw_format("http://x/a.pdf", "application/pdf", None)]),
        }
    }

    fn one_content<L, S>(langs: &[Language<Content<L, S>>]) -> &Content<L, S> {
        &langs[0].contents[0]
    }

    #[test]
    fn map_languages_renames_fields() {
        let input = vec![RawLanguage {
            title: "Test Language".into(),
            identifier: "xx".into(),
            direction: "rtl".into(),
            resources: Some(vec![]),
        }];
        let out = map_languages(input);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Test Language");
        assert_eq!(out[0].code, "xx");
        assert_eq!(out[0].direction, Direction::Rtl);
        assert_eq!(out[0].english_name, "");
        assert!(out[0].contents.is_empty());
    }

    #[test]
    fn map_languages_defaults_missing_resources() {
        let input = vec![RawLanguage {
            identifier: "xx".into(),
            resources: None,
            ..Default::default()
        }];
        let out = map_languages(input);
        assert!(out[0].contents.is_empty());
        assert_eq!(out[0].direction, Direction::Ltr);
    }

    #[test]
    fn map_contents_renames_fields() {
        let langs = map_languages(vec![RawLanguage {
            title: "Some Language".into(),
            identifier: "sl".into(),
            resources: Some(vec![RawResource {
                title: "Some Resource".into(),
                identifier: "sr".into(),
                subject: "Bible".into(),
                description: "Resource to test mapContents".into(),
                checking: Some(RawChecking {
                    checking_level: Some(3),
                }),
                formats: Some(vec![raw_format("http://x/a.pdf", "application/pdf", None)]),
                projects: Some(vec![raw_project("Genesis", "gen", Some(1))]),
            }]),
            ..Default::default()
        }]);
        let out = map_contents(langs, &CatalogConfig::default());
        let content = one_content(&out);
        assert_eq!(content.name, "Some Resource");
        assert_eq!(content.code, "sr");
        assert_eq!(content.subject, "Bible");
        assert_eq!(content.description, "Resource to test mapContents");
        assert_eq!(content.checking_level, 3);
        assert_eq!(content.links.len(), 1);
        assert_eq!(content.subcontents.len(), 1);
        assert_eq!(out[0].name, "Some Language");
    }

    #[test]
    fn map_contents_applies_tables() {
        let langs = map_languages(vec![RawLanguage {
            identifier: "en".into(),
            resources: Some(vec![RawResource {
                title: "Open Bible Stories Translation Notes".into(),
                identifier: "obs-tn".into(),
                subject: "Aligned Bible".into(),
                ..Default::default()
            }]),
            ..Default::default()
        }]);
        let out = map_contents(langs, &CatalogConfig::default());
        let content = one_content(&out);
        assert_eq!(content.name, "OBS Translation Notes");
        assert_eq!(content.subject, "Bible");
    }

    #[test]
    fn map_contents_defaults_missing_checking_and_collections() {
        let langs = map_languages(vec![RawLanguage {
            identifier: "en".into(),
            resources: Some(vec![RawResource {
                identifier: "ulb".into(),
                ..Default::default()
            }]),
            ..Default::default()
        }]);
        let out = map_contents(langs, &CatalogConfig::default());
        let content = one_content(&out);
        assert_eq!(content.checking_level, 0);
        assert!(content.links.is_empty());
        assert!(content.subcontents.is_empty());
    }

    #[test]
    fn map_link_derives_format_and_zip_content() {
        let link = map_link(raw_format(
            "http://fakeurl.com/file.zip",
            "application/zip; content=text/usfm",
            Some("1080"),
        ));
        assert_eq!(link.url, "http://fakeurl.com/file.zip");
        assert_eq!(link.format, "zip");
        assert_eq!(link.zip_content, "usfm");
        assert_eq!(link.quality.as_deref(), Some("1080"));
        assert!(link.chapters.is_empty());
    }

    #[test]
    fn map_link_empty_quality_is_none() {
        let link = map_link(raw_format("http://x/a.mp3", "audio/mp3", Some("")));
        assert_eq!(link.quality, None);
        assert_eq!(link.zip_content, "");
    }

    #[test]
    fn map_link_keeps_chapters() {
        let mut raw = raw_format("http://x/obs.zip", "application/zip; content=audio/mp3", None);
        raw.chapters = Some(vec![RawChapter {
            identifier: "01".into(),
            url: "http://x/01.mp3".into(),
            format: "audio/mp3".into(),
        }]);
        let link = map_link(raw);
        assert_eq!(link.chapters.len(), 1);
        assert_eq!(link.chapters[0].identifier, "01");
        assert_eq!(link.chapters[0].quality, None);
    }

    #[test]
    fn map_subcontents_derives_category() {
        let langs = map_languages(vec![RawLanguage {
            identifier: "en".into(),
            resources: Some(vec![RawResource {
                identifier: "ulb".into(),
                projects: Some(vec![
                    raw_project("Genesis", "gen", Some(0)),
                    raw_project("Revelation", "rev", Some(1)),
                    raw_project("Open Bible Stories", "obs", Some(2)),
                ]),
                ..Default::default()
            }]),
            ..Default::default()
        }]);
        let out = map_subcontents(map_content_links(map_contents(
            langs,
            &CatalogConfig::default(),
        )));
        let subs = &one_content(&out).subcontents;
        let summary: Vec<(&str, &str, Option<i64>, &str)> = subs
            .iter()
            .map(|s| (s.name.as_str(), s.code.as_str(), s.sort, s.category.as_str()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("Genesis", "gen", Some(0), "bible-ot"),
                ("Revelation", "rev", Some(1), "bible-nt"),
                ("Open Bible Stories", "obs", Some(2), ""),
            ]
        );
        assert!(subs.iter().all(|s| s.links.len() == 1));
    }

    #[test]
    fn map_subcontent_links_defaults_missing_formats() {
        let langs = map_languages(vec![RawLanguage {
            identifier: "en".into(),
            resources: Some(vec![RawResource {
                identifier: "ulb".into(),
                projects: Some(vec![RawProject {
                    title: "Book (a)".into(),
                    identifier: "gen".into(),
                    sort: None,
                    formats: None,
                }]),
                ..Default::default()
            }]),
            ..Default::default()
        }]);
        let out = map_subcontent_links(map_subcontents(map_content_links(map_contents(
            langs,
            &CatalogConfig::default(),
        ))));
        let sub = &one_content(&out).subcontents[0];
        assert!(sub.links.is_empty());
    }

    #[test]
    fn map_subcontent_links_normalizes_each_link() {
        let mut with_chapters = raw_format(
            "http://fakeurl.com/file.zip",
            "application/zip; content=text/usfm",
            Some("1080"),
        );
        with_chapters.chapters = Some(vec![RawChapter::default()]);
        let langs = map_languages(vec![RawLanguage {
            identifier: "en".into(),
            resources: Some(vec![RawResource {
                identifier: "ulb".into(),
                projects: Some(vec![RawProject {
                    title: "Book (a)".into(),
                    identifier: "gen".into(),
                    sort: None,
                    formats: Some(vec![
                        raw_format(
                            "http://fakeurl.com/file.zip",
                            "application/zip; content=text/usfm",
                            None,
                        ),
                        with_chapters,
                    ]),
                }]),
                ..Default::default()
            }]),
            ..Default::default()
        }]);
        let out = map_subcontent_links(map_subcontents(map_content_links(map_contents(
            langs,
            &CatalogConfig::default(),
        ))));
        let links = &one_content(&out).subcontents[0].links;
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].format, "zip");
        assert_eq!(links[0].zip_content, "usfm");
        assert_eq!(links[0].quality, None);
        assert!(links[0].chapters.is_empty());
        assert_eq!(links[1].quality.as_deref(), Some("1080"));
        assert_eq!(links[1].chapters.len(), 1);
    }

    #[test]
    fn map_content_links_leaves_other_levels_alone() {
        let langs = map_languages(vec![RawLanguage {
            title: "English".into(),
            identifier: "en".into(),
            resources: Some(vec![RawResource {
                title: "ULB".into(),
                identifier: "ulb".into(),
                formats: None,
                projects: Some(vec![raw_project("Genesis", "gen", None)]),
                ..Default::default()
            }]),
            ..Default::default()
        }]);
        let out = map_content_links(map_contents(langs, &CatalogConfig::default()));
        assert_eq!(out[0].name, "English");
        let content = one_content(&out);
        assert!(content.links.is_empty());
        assert_eq!(content.subcontents[0].identifier, "gen");
    }
}
