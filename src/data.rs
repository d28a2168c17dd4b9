// src/data.rs
//
// Canonical and view-layer document data.
//
// - DocumentCollection: one loaded snapshot, enriched against one reference
//                       date. Replaced wholesale on reload, never patched.
// - DocumentView: filtered + ordered projection of a collection for display.
//                 Holds indices only; the collection is borrowed, not copied.

use chrono::{DateTime, NaiveDate};

use crate::config::consts::REFERENCE_TZ;
use crate::enrich::Enricher;
use crate::model::{EnrichedDocument, Snapshot};
use crate::query::{self, FilterState, StatusMessage};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentCollection {
    documents: Vec<EnrichedDocument>,
    updated_at: Option<String>,
    today: Option<NaiveDate>,
}

impl DocumentCollection {
    /// Enrich every document of `snapshot` against the enricher's reference date.
    pub fn from_snapshot(snapshot: &Snapshot, enricher: &Enricher) -> Self {
        Self {
            documents: enricher.enrich_all(&snapshot.documents),
            updated_at: snapshot.updated_at.clone(),
            today: Some(enricher.today()),
        }
    }

    pub fn documents(&self) -> &[EnrichedDocument] { &self.documents }
    pub fn len(&self) -> usize { self.documents.len() }
    pub fn is_empty(&self) -> bool { self.documents.is_empty() }
    pub fn updated_at(&self) -> Option<&str> { self.updated_at.as_deref() }

    /// Reference date the documents were categorized against.
    pub fn today(&self) -> Option<NaiveDate> { self.today }

    /// `資料更新：…` footer text, in the reference timezone.
    pub fn updated_at_label(&self) -> String {
        const PREFIX: &str = "資料更新：";
        match self.updated_at.as_deref().map(str::trim) {
            None | Some("") => join!(PREFIX, "尚未更新"),
            Some(raw) => match DateTime::parse_from_rfc3339(raw) {
                Ok(dt) => join!(PREFIX, &dt.with_timezone(&REFERENCE_TZ).format("%Y/%m/%d %H:%M").to_string()),
                Err(_) => join!(PREFIX, raw),
            },
        }
    }
}

/// Filtered, ordered view over a collection.
#[derive(Clone, Debug)]
pub struct DocumentView<'a> {
    /// Positions of kept documents in the collection, in display order
    row_ix: Vec<usize>,
    raw: &'a DocumentCollection,
}

impl<'a> DocumentView<'a> {
    pub fn len(&self) -> usize { self.row_ix.len() }
    pub fn is_empty(&self) -> bool { self.row_ix.is_empty() }

    pub fn filtered_count(&self) -> usize { self.row_ix.len() }
    pub fn total_count(&self) -> usize { self.raw.len() }

    pub fn collection(&self) -> &'a DocumentCollection { self.raw }

    /// Collection positions of the shown documents, in display order.
    pub fn row_ix(&self) -> &[usize] { &self.row_ix }

    pub fn iter(&self) -> impl Iterator<Item = &'a EnrichedDocument> + '_ {
        let raw = self.raw;
        self.row_ix.iter().map(move |&ix| &raw.documents[ix])
    }

    pub fn status_message(&self) -> StatusMessage {
        StatusMessage::for_counts(self.filtered_count(), self.total_count())
    }
}

/// The one entry point a presentation layer needs: filters + collection in,
/// ordered display sequence and counts out.
pub fn compute_view<'a>(collection: &'a DocumentCollection, filters: &FilterState) -> DocumentView<'a> {
    let row_ix = query::select(&collection.documents, filters);
    logd!(
        "View: {} of {} documents (search={:?} sort={} statuses={:?})",
        row_ix.len(),
        collection.len(),
        filters.search(),
        filters.sort,
        filters.statuses()
    );
    DocumentView { row_ix, raw: collection }
}
