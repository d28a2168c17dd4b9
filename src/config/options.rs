// src/config/options.rs
use std::path::PathBuf;

use super::consts::*;
use crate::query::FilterState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Page holding the notice table; also the base for relative links.
    pub url: String,
    /// Where the snapshot JSON is written.
    pub out_path: PathBuf,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            url: s!(TARGET_URL),
            out_path: PathBuf::from(DEFAULT_OUT_DIR).join(SNAPSHOT_FILE),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Human-readable listing.
    #[default]
    Text,
    Csv,
    Tsv,
    Json,
}

impl ExportFormat {
    /// Field separator for the delimited formats.
    pub fn delim(&self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            ExportFormat::Text | ExportFormat::Json => None,
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(ExportFormat::Text),
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("unknown format: {other} (expected text, csv, tsv or json)")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewOptions {
    /// Local path or http(s) URL of a published snapshot.
    pub source: String,
    pub filters: FilterState,
    pub format: ExportFormat,
    /// Replaces the clock-derived reference date, for replayable runs.
    pub today: Option<chrono::NaiveDate>,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_OUT_DIR)
                .join(SNAPSHOT_FILE)
                .to_string_lossy()
                .into_owned(),
            filters: FilterState::default(),
            format: ExportFormat::default(),
            today: None,
        }
    }
}
