// src/model.rs
//! Records shared by the scrape pipeline and the view pipeline.
//!
//! `RawDocument` is what one table row looks like after extraction and what
//! the published snapshot stores. `EnrichedDocument` adds the fields derived
//! against a reference date; those are never persisted because they go stale
//! the next day.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::consts::ATTACHMENT_PLACEHOLDER;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub label: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
}

impl Attachment {
    /// Label for display; blank labels become `附件 NN` by 1-based position.
    pub fn display_label(&self, index: usize) -> String {
        let label = self.label.trim();
        if label.is_empty() {
            format!("{ATTACHMENT_PLACEHOLDER} {:02}", index + 1)
        } else {
            s!(label)
        }
    }
}

/// One scraped table row. Date tokens are kept verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subject: String,
    #[serde(default)]
    pub subject_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub deadline: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// How close a document's deadline is, relative to the reference date.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeadlineCategory {
    DueSoon,
    Active,
    Expired,
    NoDeadline,
}

impl DeadlineCategory {
    pub const ALL: [DeadlineCategory; 4] = [
        DeadlineCategory::DueSoon,
        DeadlineCategory::Active,
        DeadlineCategory::Expired,
        DeadlineCategory::NoDeadline,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DeadlineCategory::DueSoon => "due-soon",
            DeadlineCategory::Active => "active",
            DeadlineCategory::Expired => "expired",
            DeadlineCategory::NoDeadline => "no-deadline",
        }
    }

    pub fn badge_text(self) -> &'static str {
        match self {
            DeadlineCategory::DueSoon => "即將截止",
            DeadlineCategory::Active => "截止未到",
            DeadlineCategory::Expired => "已截止",
            DeadlineCategory::NoDeadline => "無截止日",
        }
    }
}

impl fmt::Display for DeadlineCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeadlineCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown deadline status: {s} (expected due-soon, active, expired or no-deadline)"))
    }
}

/// A raw document plus everything derived from it against one reference date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedDocument {
    #[serde(flatten)]
    pub raw: RawDocument,
    pub issued_date: Option<NaiveDate>,
    pub deadline_date: Option<NaiveDate>,
    pub deadline_category: DeadlineCategory,
    /// `None` exactly when the category is `no-deadline`.
    pub days_until_deadline: Option<i64>,
}

/// The published JSON file: `{ "documents": [...], "updatedAt": "..." }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default, deserialize_with = "null_as_empty_vec")]
    pub documents: Vec<RawDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}

fn null_as_empty_vec<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<RawDocument>, D::Error> {
    Ok(Option::<Vec<RawDocument>>::deserialize(d)?.unwrap_or_default())
}
