// src/config/state.rs
use crate::data::{DocumentCollection, DocumentView};
use crate::query::FilterState;

/// The one long-lived value a host keeps between interactions.
///
/// Every interaction edits `filters` (or swaps `collection` wholesale after a
/// reload) and then calls [`AppState::render`] to get a fresh view.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub collection: DocumentCollection,
    pub filters: FilterState,
}

impl AppState {
    pub fn new(collection: DocumentCollection, filters: FilterState) -> Self {
        Self { collection, filters }
    }

    /// Replace the resident snapshot. Filters survive a reload.
    pub fn replace_collection(&mut self, collection: DocumentCollection) {
        self.collection = collection;
    }

    pub fn render(&self) -> DocumentView<'_> {
        crate::data::compute_view(&self.collection, &self.filters)
    }
}
