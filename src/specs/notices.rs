// src/specs/notices.rs
//! Scraping spec for the association's public notice list.
//!
//! The page carries one data table:
//!
//! ```text
//! <tr> header row </tr>
//! <tr><td>date</td><td><a href=…>subject</a></td><td>deadline</td><td><a>att</a>…</td></tr>
//! ```
//!
//! `</td>` and `</tr>` may be omitted, and commented-out markup is ignored.
//! Rows with fewer than four `<td>` cells are decoration (legends, spacers)
//! and are skipped. A legend row that happens to have four cells would be
//! read as a document; the cell count is the only signal the page offers.

use url::Url;

use crate::config::consts::{ATTACHMENT_PLACEHOLDER, MIN_ROW_CELLS};
use crate::core::html::{inner_after_open_tag, links, slice_between_ci, strip_comments, tag_blocks, visible_text};
use crate::core::net;
use crate::error::Result;
use crate::model::{Attachment, RawDocument};

/// Fetch the page at `url` and extract its documents.
pub fn fetch(url: &str) -> Result<Vec<RawDocument>> {
    let base = Url::parse(url)?;
    let html_doc = net::http_get(url)?;
    Ok(parse_documents(&html_doc, &base))
}

/// Extract documents from page HTML, in source row order. Relative links are
/// resolved against `base`. No table means no documents, not an error.
pub fn parse_documents(html_doc: &str, base: &Url) -> Vec<RawDocument> {
    let html_doc = strip_comments(html_doc);
    let Some(table) = slice_between_ci(&html_doc, "<table", "</table>") else {
        logf!("Notices: no <table> found; page yields 0 documents");
        return Vec::new();
    };

    let rows = tag_blocks(table, "<tr", "</tr>");
    let mut out = Vec::with_capacity(rows.len().saturating_sub(1));

    // first row is the header
    for (i, tr) in rows.iter().enumerate().skip(1) {
        match parse_row(tr, base) {
            Some(doc) => out.push(doc),
            None => logd!("Notices: row {i} skipped (fewer than {MIN_ROW_CELLS} cells)"),
        }
    }

    logf!("Notices: {} documents from {} rows", out.len(), rows.len());
    out
}

fn parse_row(tr: &str, base: &Url) -> Option<RawDocument> {
    // cells scan the row's inside so an omitted `</td>` stops short of `</tr>`
    let cells: Vec<&str> = tag_blocks(inner_after_open_tag(tr), "<td", "</td>")
        .into_iter()
        .map(inner_after_open_tag)
        .collect();
    if cells.len() < MIN_ROW_CELLS {
        return None;
    }

    let subject_link = links(cells[1]).into_iter().next();
    let subject = subject_link
        .as_ref()
        .map(|l| l.text.clone())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| visible_text(cells[1]));
    let subject_url = subject_link
        .and_then(|l| l.href)
        .and_then(|href| resolve(base, &href));

    let attachments = links(cells[3])
        .into_iter()
        .filter_map(|l| {
            let url = resolve(base, l.href.as_deref()?)?;
            let label = if l.text.is_empty() { s!(ATTACHMENT_PLACEHOLDER) } else { l.text };
            Some(Attachment { label, url })
        })
        .collect();

    Some(RawDocument {
        date: visible_text(cells[0]),
        subject,
        subject_url,
        deadline: visible_text(cells[2]),
        attachments,
    })
}

fn resolve(base: &Url, href: &str) -> Option<String> {
    match base.join(href) {
        Ok(u) => Some(u.into()),
        Err(e) => {
            logd!("Notices: unresolvable link {href:?}: {e}");
            None
        }
    }
}
