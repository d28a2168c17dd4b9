// src/specs/mod.rs
//! # Scraping “specs”
//!
//! Page-specific knowledge of *where the data lives in the HTML* and *how to
//! read it tolerantly*. Specs only extract; they do not enrich, cache, filter
//! or publish.
//!
//! ## Typical call chain
//! ```text
//! runner::scrape → specs::notices::fetch() → Vec<RawDocument>
//!               ↘ store::save_snapshot (outside of specs)
//! ```
//!
//! ## Conventions
//! - Case-insensitive tag detection via `core::html`; no full-document regexes.
//! - Scan locally inside known blocks (`<table>…</table>`, then `<tr>`, `<td>`).
//! - Skip what does not fit the expected shape instead of failing the page.
//! - Testable offline: every spec exposes a pure `parse_*` over an HTML string.
pub mod notices;
