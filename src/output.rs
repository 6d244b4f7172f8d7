//! CLI output formatting for every command.
//!
//! Output is an inventory of the catalog, not a log: entities lead with their
//! positional index and display name, with codes and counts as detail, so the
//! same catalog always prints the same text. Logging goes through `tracing`
//! and never ends up here.
//!
//! # Output Format
//!
//! ## Fetch
//!
//! ```text
//! Sources
//!     Catalog: 412 languages
//!     Language names: 8321 entries
//! Supplements
//! 001 supplemental/extra.json (2 languages)
//! ```
//!
//! ## Build
//!
//! ```text
//! 001 English [en]
//!     001 Unlocked Literal Bible [ulb] (66 subcontents, 3 links)
//!     002 Open Bible Stories [obs] (50 subcontents, 2 links)
//! 002 Français [fr] rtl
//!     001 Bible [ulb] (1 subcontent, 0 links)
//!
//! Built 2 languages, 3 contents, 117 subcontents, 5 links
//!     Output: catalog.json
//! ```
//!
//! ## Compare
//!
//! ```text
//! - en ulb gen
//! + fr
//! ~ en ulb name
//!       first:  Unlocked Literal Bible
//!       second: ULB
//!
//! 3 differences
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::compare::Difference;
use crate::fetch::Sources;
use crate::pipeline::CatalogStats;
use crate::types::{Direction, Language};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Positional index, display name and code, with optional trailing detail.
///
/// ```text
/// 001 English [en]
/// 001 Unlocked Literal Bible [ulb] (66 subcontents, 3 links)
/// ```
fn entity_header(index: usize, name: &str, code: &str, detail: Option<&str>) -> String {
    let name = if name.is_empty() { code } else { name };
    match detail {
        Some(d) => format!("{} {} [{}] {}", format_index(index), name, code, d),
        None => format!("{} {} [{}]", format_index(index), name, code),
    }
}

/// `1 subcontent`, `2 subcontents`.
fn plural(count: usize, noun: &str) -> String {
    counted(count, noun, &format!("{noun}s"))
}

fn counted(count: usize, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}

// ============================================================================
// Fetch
// ============================================================================

/// Format a summary of fetched sources.
pub fn format_fetch_output(sources: &Sources, raw_languages: usize) -> Vec<String> {
    let mut lines = vec![
        "Sources".to_string(),
        format!("{}Catalog: {}", indent(1), plural(raw_languages, "language")),
        format!(
            "{}Language names: {}",
            indent(1),
            counted(sources.language_metadata.len(), "entry", "entries")
        ),
    ];

    if !sources.supplements.is_empty() {
        lines.push("Supplements".to_string());
        for (i, supplement) in sources.supplements.iter().enumerate() {
            lines.push(format!(
                "{} {} ({})",
                format_index(i + 1),
                supplement.origin,
                plural(supplement.languages.len(), "language")
            ));
        }
    }

    lines
}

pub fn print_fetch_output(sources: &Sources, raw_languages: usize) {
    for line in format_fetch_output(sources, raw_languages) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format the built catalog as an indented language/content tree with totals.
pub fn format_build_output(catalog: &[Language], output_path: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    for (i, lang) in catalog.iter().enumerate() {
        let display = if lang.english_name.is_empty() {
            lang.name.as_str()
        } else {
            lang.english_name.as_str()
        };
        let direction = (lang.direction == Direction::Rtl).then_some("rtl");
        lines.push(entity_header(i + 1, display, &lang.code, direction));

        for (j, content) in lang.contents.iter().enumerate() {
            let links = content.links.len()
                + content.subcontents.iter().map(|s| s.links.len()).sum::<usize>();
            let detail = format!(
                "({}, {})",
                plural(content.subcontents.len(), "subcontent"),
                plural(links, "link")
            );
            lines.push(format!(
                "{}{}",
                indent(1),
                entity_header(j + 1, &content.name, &content.code, Some(&detail))
            ));
        }
    }

    let stats = CatalogStats::of(catalog);
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(
        "Built {}, {}, {}, {}",
        plural(stats.languages, "language"),
        plural(stats.contents, "content"),
        plural(stats.subcontents, "subcontent"),
        plural(stats.links, "link")
    ));
    lines.push(format!("{}Output: {}", indent(1), output_path.display()));

    lines
}

pub fn print_build_output(catalog: &[Language], output_path: &Path) {
    for line in format_build_output(catalog, output_path) {
        println!("{}", line);
    }
}

// ============================================================================
// Compare
// ============================================================================

/// Format catalog differences: `-` only in first, `+` only in second,
/// `~` changed field with both values underneath.
pub fn format_differences(diffs: &[Difference]) -> Vec<String> {
    let mut lines = Vec::new();

    for diff in diffs {
        match diff {
            Difference::OnlyInFirst { path } => lines.push(format!("- {path}")),
            Difference::OnlyInSecond { path } => lines.push(format!("+ {path}")),
            Difference::Changed {
                path,
                field,
                first,
                second,
            } => {
                lines.push(format!("~ {path} {field}"));
                lines.push(format!("{}  first:  {first}", indent(1)));
                lines.push(format!("{}  second: {second}", indent(1)));
            }
        }
    }

    if diffs.is_empty() {
        lines.push("Catalogs are identical".to_string());
    } else {
        lines.push(String::new());
        lines.push(plural(diffs.len(), "difference"));
    }
    lines
}

pub fn print_differences(diffs: &[Difference]) {
    for line in format_differences(diffs) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
