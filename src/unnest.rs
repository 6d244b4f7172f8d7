//! Collapses single-project resources into their content, and reshapes the
//! chaptered story collection into one subcontent per chapter.
//!
//! Upstream models Open Bible Stories, its notes and questions, and
//! translationWords as resources with a single project. For these the first
//! subcontent is promoted: its links become the content's own links and its
//! name fills in an empty content name.
//!
//! OBS additionally nests per-chapter files inside each link. Those chapters
//! are flattened across every subcontent, merged by chapter identifier (the
//! same chapter shows up once per format or quality split), and emitted as
//! ordinary subcontents:
//!
//! ```text
//! obs
//! ├── links: [zip (mp3 64kbps) { chapters: [01, 02] },
//! │           zip (mp3 32kbps) { chapters: [01, 02] }]
//!
//! becomes
//!
//! obs
//! ├── 01  links: [mp3 64kbps, mp3 32kbps]
//! └── 02  links: [mp3 64kbps, mp3 32kbps]
//! ```
//!
//! Chapters are ordered by identifier as strings, so `"10"` sorts before
//! `"2"`. Upstream identifiers are zero-padded, which keeps this in step with
//! numeric order in practice.

use crate::mapping::map_children;
use crate::normalize::last_segment;
use crate::types::{Chapter, Content, Language, Link, Subcontent};

/// Content codes whose first subcontent is promoted into the content.
pub const PROMOTED_CONTENTS: &[&str] = &["obs", "obs-tn", "obs-tq", "tw"];

/// Content code of the chaptered story collection.
pub const CHAPTERED_CONTENT: &str = "obs";

/// Category given to every subcontent produced from a chapter.
pub const CHAPTER_CATEGORY: &str = "obs";

/// Promote single-project contents and turn OBS chapters into subcontents.
pub fn unnest_subcontents(languages: Vec<Language>) -> Vec<Language> {
    languages
        .into_iter()
        .map(|lang| map_children(lang, unnest_content))
        .collect()
}

fn unnest_content(content: Content) -> Content {
    if !PROMOTED_CONTENTS.contains(&content.code.as_str()) {
        return content;
    }
    let Some(first) = content.subcontents.first() else {
        return content;
    };

    let name = if content.name.is_empty() {
        first.name.clone()
    } else {
        content.name.clone()
    };
    let links: Vec<Link> = content
        .links
        .iter()
        .chain(first.links.iter())
        .map(Link::without_chapters)
        .collect();

    let subcontents = if content.code == CHAPTERED_CONTENT {
        chapters_to_subcontents(&content.subcontents)
    } else {
        content.subcontents[1..].to_vec()
    };

    Content {
        name,
        links,
        subcontents,
        ..content
    }
}

/// Flatten every link's chapters, merge them by identifier, and sort by name.
pub fn chapters_to_subcontents(stories: &[Subcontent]) -> Vec<Subcontent> {
    let mut merged: Vec<Subcontent> = Vec::new();

    for chapter in flatten_chapters(stories) {
        let link = Link {
            url: chapter.url,
            format: last_segment(&chapter.format).to_string(),
            zip_content: String::new(),
            quality: chapter.quality,
            chapters: Vec::new(),
        };
        match merged.iter_mut().find(|s| s.name == chapter.identifier) {
            Some(existing) => existing.links.push(link),
            None => merged.push(Subcontent {
                name: chapter.identifier.clone(),
                code: chapter.identifier,
                sort: None,
                category: CHAPTER_CATEGORY.to_string(),
                links: vec![link],
            }),
        }
    }

    merged.sort_by(|a, b| a.name.cmp(&b.name));
    merged
}

/// Every chapter of every link, annotated with the quality of its link.
fn flatten_chapters(stories: &[Subcontent]) -> Vec<Chapter> {
    stories
        .iter()
        .flat_map(|story| story.links.iter())
        .flat_map(|link| {
            link.chapters.iter().map(move |chapter| Chapter {
                quality: link.quality.clone(),
                ..chapter.clone()
            })
        })
        .collect()
}
