//! Shared test utilities for the biel-catalog test suite.
//!
//! Provides terse builders for tree entities plus lookup helpers and bulk
//! extractors that panic with a clear message on miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tree = vec![language("en", vec![
//!     content("ulb", vec![], vec![subcontent("gen", vec![pdf_link("gen")])]),
//! ])];
//!
//! let ulb = find_content(find_language(&tree, "en"), "ulb");
//! assert_eq!(subcontent_codes(ulb), vec!["gen"]);
//! ```

use crate::types::{Chapter, Content, Direction, Language, Link, Subcontent};

// =========================================================================
// Builders
// =========================================================================

/// A language with `name` equal to its code and no English name.
pub fn language(code: &str, contents: Vec<Content>) -> Language {
    Language {
        name: code.to_string(),
        english_name: String::new(),
        code: code.to_string(),
        direction: Direction::Ltr,
        contents,
    }
}

/// A content with `name` equal to its code.
pub fn content(code: &str, links: Vec<Link>, subcontents: Vec<Subcontent>) -> Content {
    Content {
        name: code.to_string(),
        code: code.to_string(),
        subject: String::new(),
        description: String::new(),
        checking_level: 0,
        links,
        subcontents,
    }
}

/// A subcontent with `name` equal to its code and no explicit sort.
pub fn subcontent(code: &str, links: Vec<Link>) -> Subcontent {
    Subcontent {
        name: code.to_string(),
        code: code.to_string(),
        sort: None,
        category: crate::normalize::category(code).to_string(),
        links,
    }
}

/// A subcontent with an explicit sort hint.
pub fn sorted_subcontent(code: &str, sort: i64) -> Subcontent {
    Subcontent {
        sort: Some(sort),
        ..subcontent(code, vec![pdf_link(code)])
    }
}

/// A PDF link at `http://example.org/<stem>.pdf`.
pub fn pdf_link(stem: &str) -> Link {
    Link {
        url: format!("http://example.org/{stem}.pdf"),
        format: "pdf".to_string(),
        zip_content: String::new(),
        quality: None,
        chapters: Vec::new(),
    }
}

/// A link with a given format and quality, and a URL derived from both.
pub fn media_link(format: &str, quality: Option<&str>) -> Link {
    Link {
        url: format!(
            "http://example.org/media-{}.{format}",
            quality.unwrap_or("default")
        ),
        format: format.to_string(),
        zip_content: String::new(),
        quality: quality.map(String::from),
        chapters: Vec::new(),
    }
}

/// A chapter file with a raw MIME format.
pub fn chapter(identifier: &str, mime: &str) -> Chapter {
    Chapter {
        identifier: identifier.to_string(),
        url: format!("http://example.org/obs/{identifier}.{}", crate::normalize::last_segment(mime)),
        format: mime.to_string(),
        quality: None,
    }
}

// =========================================================================
// Tree lookups: panic with a clear message on miss
// =========================================================================

/// Find a language by code. Panics if not found.
pub fn find_language<'a, C>(tree: &'a [Language<C>], code: &str) -> &'a Language<C> {
    tree.iter().find(|l| l.code == code).unwrap_or_else(|| {
        let codes: Vec<&str> = tree.iter().map(|l| l.code.as_str()).collect();
        panic!("language '{code}' not found. Available: {codes:?}")
    })
}

/// Find a content by code within a language. Panics if not found.
pub fn find_content<'a, L, S>(lang: &'a Language<Content<L, S>>, code: &str) -> &'a Content<L, S> {
    lang.contents
        .iter()
        .find(|c| c.code == code)
        .unwrap_or_else(|| {
            let codes = content_codes(lang);
            panic!(
                "content '{code}' not found in language '{}'. Available: {codes:?}",
                lang.code
            )
        })
}

/// Find a subcontent by code within a content. Panics if not found.
pub fn find_subcontent<'a, L, SL>(
    content: &'a Content<L, Subcontent<SL>>,
    code: &str,
) -> &'a Subcontent<SL> {
    content
        .subcontents
        .iter()
        .find(|s| s.code == code)
        .unwrap_or_else(|| {
            let codes = subcontent_codes(content);
            panic!(
                "subcontent '{code}' not found in content '{}'. Available: {codes:?}",
                content.code
            )
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// All language codes in tree order.
pub fn language_codes<C>(tree: &[Language<C>]) -> Vec<&str> {
    tree.iter().map(|l| l.code.as_str()).collect()
}

/// All content codes of a language in order.
pub fn content_codes<L, S>(lang: &Language<Content<L, S>>) -> Vec<&str> {
    lang.contents.iter().map(|c| c.code.as_str()).collect()
}

/// All subcontent codes of a content in order.
pub fn subcontent_codes<L, SL>(content: &Content<L, Subcontent<SL>>) -> Vec<&str> {
    content
        .subcontents
        .iter()
        .map(|s| s.code.as_str())
        .collect()
}

/// All link URLs in order.
pub fn link_urls(links: &[Link]) -> Vec<&str> {
    links.iter().map(|l| l.url.as_str()).collect()
}
