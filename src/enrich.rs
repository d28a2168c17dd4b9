// src/enrich.rs
use chrono::{NaiveDate, Utc};

use crate::config::consts::{DUE_SOON_DAYS, REFERENCE_TZ};
use crate::dates::{days_between, parse_date, today_in};
use crate::model::{DeadlineCategory, EnrichedDocument, RawDocument};

/// Category for a signed day count until the deadline.
pub fn categorize(days_until_deadline: Option<i64>) -> DeadlineCategory {
    match days_until_deadline {
        None => DeadlineCategory::NoDeadline,
        Some(d) if d < 0 => DeadlineCategory::Expired,
        Some(d) if d <= DUE_SOON_DAYS => DeadlineCategory::DueSoon,
        Some(_) => DeadlineCategory::Active,
    }
}

/// Derives dates and deadline urgency against one fixed reference date.
///
/// The reference date is an input, not a clock read, so the same raw
/// documents always enrich the same way for the same `today`. Date tokens
/// are read in the same zone `today` belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Enricher {
    today: NaiveDate,
}

impl Enricher {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Reference date taken from the system clock, once, in the reference zone.
    pub fn for_now() -> Self {
        Self::new(today_in(REFERENCE_TZ, Utc::now()))
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn enrich(&self, raw: &RawDocument) -> EnrichedDocument {
        let issued_date = parse_date(&raw.date, REFERENCE_TZ);
        let deadline_date = parse_date(&raw.deadline, REFERENCE_TZ);
        let days_until_deadline = deadline_date.map(|d| days_between(self.today, d));

        EnrichedDocument {
            raw: raw.clone(),
            issued_date,
            deadline_date,
            deadline_category: categorize(days_until_deadline),
            days_until_deadline,
        }
    }

    pub fn enrich_all(&self, raws: &[RawDocument]) -> Vec<EnrichedDocument> {
        raws.iter().map(|r| self.enrich(r)).collect()
    }
}
