// src/runner.rs
//! Orchestration of the two pipelines:
//!
//! - scrape: page HTML → raw documents → published snapshot
//! - view:   snapshot → enriched collection → `AppState` ready to render

use std::path::PathBuf;

use crate::config::options::{ScrapeOptions, ViewOptions};
use crate::config::state::AppState;
use crate::data::DocumentCollection;
use crate::enrich::Enricher;
use crate::error::Result;
use crate::model::Snapshot;
use crate::progress::Progress;
use crate::{specs, store};

/// Summary of what was produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub documents: usize,
    pub path: PathBuf,
}

/// Fetch the notice page, extract it and publish the snapshot.
/// Nothing is written when the fetch fails.
pub fn scrape(opts: &ScrapeOptions, mut progress: Option<&mut dyn Progress>) -> Result<ScrapeSummary> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(2);
        p.log(&format!("Fetching {}…", opts.url));
    }

    let result = specs::notices::fetch(&opts.url).and_then(|documents| {
        if let Some(p) = progress.as_deref_mut() {
            p.stage_done("extract");
        }
        let count = documents.len();
        let path = store::save_snapshot(&opts.out_path, &Snapshot::now(documents))?;
        if let Some(p) = progress.as_deref_mut() {
            p.stage_done("publish");
        }
        Ok(ScrapeSummary { documents: count, path })
    });

    if let Err(e) = &result {
        loge!("Scrape: {e}");
    }
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    result
}

/// Load the snapshot named by `opts.source` and enrich it against today
/// (or `opts.today`, when replaying).
pub fn load_state(opts: &ViewOptions) -> Result<AppState> {
    let snapshot = store::fetch_snapshot(&opts.source)?;
    let enricher = opts.today.map(Enricher::new).unwrap_or_else(Enricher::for_now);
    logf!("View: reference date {}", enricher.today());

    let collection = DocumentCollection::from_snapshot(&snapshot, &enricher);
    Ok(AppState::new(collection, opts.filters.clone()))
}
