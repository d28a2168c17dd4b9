// src/store.rs
//! The published snapshot: one flat JSON file, rewritten whole on every scrape.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

use crate::core::net;
use crate::error::Result;
use crate::model::{RawDocument, Snapshot};

impl Snapshot {
    /// Snapshot stamped with the current time.
    pub fn now(documents: Vec<RawDocument>) -> Self {
        Self {
            documents,
            updated_at: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        }
    }
}

/// A missing `documents` key reads as an empty list.
pub fn parse_snapshot(text: &str) -> Result<Snapshot> {
    Ok(serde_json::from_str(text)?)
}

pub fn to_json(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Write `snapshot` to `path`, creating parent directories.
pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<PathBuf> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, to_json(snapshot)?)?;
    logf!("Store: saved {} documents → {}", snapshot.documents.len(), path.display());
    Ok(path.to_path_buf())
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let text = fs::read_to_string(path)?;
    let snapshot = parse_snapshot(&text)?;
    logf!("Store: loaded {} documents ← {}", snapshot.documents.len(), path.display());
    Ok(snapshot)
}

/// Load from an `http(s)` URL or a local path.
pub fn fetch_snapshot(source: &str) -> Result<Snapshot> {
    let lc = source.trim_start().to_ascii_lowercase();
    if lc.starts_with("http://") || lc.starts_with("https://") {
        let snapshot = parse_snapshot(&net::http_get(source.trim())?)?;
        logf!("Store: loaded {} documents ← {}", snapshot.documents.len(), source);
        Ok(snapshot)
    } else {
        load_snapshot(Path::new(source))
    }
}
