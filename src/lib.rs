//! # BIEL Catalog
//!
//! Normalizes the Door43 resource catalog into one language → content →
//! subcontent → link tree and serves it read-only over HTTP.
//!
//! The upstream catalog is inconsistently shaped: optional collections go
//! missing, formats carry compound MIME strings, and the chaptered story
//! collection nests per-chapter files inside its download links. This crate
//! reshapes all of that into a single schema, fills gaps from hand-maintained
//! supplemental sources, and orders everything deterministically.
//!
//! # Architecture: Fetch, Build, Serve
//!
//! ```text
//! 1. Fetch   upstream URLs / files  →  <temp-dir>/sources.json
//! 2. Build   sources.json           →  catalog.json    (pure pipeline)
//! 3. Serve   catalog snapshot       →  HTTP endpoints
//! ```
//!
//! Only fetching touches the network. The build stage is
//! [`pipeline::run`], a pure function of the fetched inputs and the catalog
//! tables from [`config`], so every transform is unit-testable over in-memory
//! trees.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Output schema (`Language`, `Content`, `Subcontent`, `Link`) |
//! | [`raw`] | Upstream catalog and language-names schemas |
//! | [`normalize`] | Field normalizers: file format, zip content, book category and order |
//! | [`mapping`] | Shape mappers, one tree level at a time |
//! | [`filter`] | Drops link-less and excluded subcontents |
//! | [`unnest`] | Promotes single-project contents; turns story chapters into subcontents |
//! | [`supplement`] | Typed, validated supplemental sources |
//! | [`legacy`] | Converts the v2 catalog into a supplemental source |
//! | [`merge`] | Additive merge of supplemental sources |
//! | [`enrich`] | English names from the language metadata table |
//! | [`order`] | Language, content and subcontent ordering |
//! | [`pipeline`] | Runs every stage in its fixed order |
//! | [`config`] | `catalog.toml` loading, validation and defaults |
//! | [`fetch`] | Upstream retrieval and the saved `Sources` bundle |
//! | [`server`] | axum routes over an immutable catalog snapshot |
//! | [`compare`] | Structural diff of two built catalogs |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Type Per Stage
//!
//! The tree types are generic over their not-yet-normalized children, so
//! `Language<RawResource>` and `Language<Content<Link, RawProject>>` are
//! different types. Running the mappers out of order is a compile error, not
//! a malformed catalog.
//!
//! ## Supplements Only Fill Gaps
//!
//! Supplemental data never overwrites upstream data. Upstream is the source of
//! truth; supplements exist to cover what upstream lacks. When two supplements
//! add the same new entity, the first configured one wins.
//!
//! ## Total Pipeline
//!
//! No stage returns an error. Missing fields become empty collections, lookup
//! misses become documented defaults, and a malformed zip format string yields
//! an empty zip content. Errors exist only at the edges: config, fetch, serve.

pub mod compare;
pub mod config;
pub mod enrich;
pub mod fetch;
pub mod filter;
pub mod legacy;
pub mod mapping;
pub mod merge;
pub mod normalize;
pub mod order;
pub mod output;
pub mod pipeline;
pub mod raw;
pub mod server;
pub mod supplement;
pub mod types;
pub mod unnest;

#[cfg(test)]
pub(crate) mod test_helpers;
