// src/dates.rs
//! Date tokens as they appear on the notice page.
//!
//! Accepted shapes, with `/` or `-` between fields:
//! - `2024-05-01`, `2024/5/1`
//! - `113/05/01` (Minguo year, offset by 1911)
//! - any of the above followed by a time (`2024-05-01 17:30`, `2024-05-01T17:30:00`)
//! - RFC 3339 with an explicit offset (`2024-05-01T09:00:00Z`)
//!
//! A date without an offset is a wall-clock date in the reference timezone, so
//! its calendar date is taken as written. Anything else yields `None`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;

use crate::config::consts::{ROC_YEAR_LIMIT, ROC_YEAR_OFFSET};

/// Parse a date token into a calendar date in `tz`. Blank or malformed tokens
/// are `None`, never an error.
pub fn parse_date(token: &str, tz: Tz) -> Option<NaiveDate> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    let normalized = token.replace('/', "-");

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.with_timezone(&tz).date_naive());
    }

    let (date_part, time_part) = match normalized.find(['T', ' ']) {
        Some(i) => (&normalized[..i], Some(normalized[i + 1..].trim())),
        None => (normalized.as_str(), None),
    };

    if let Some(time) = time_part.filter(|t| !t.is_empty()) {
        // validate only; a wall-clock time never moves the calendar date
        parse_time(time)?;
    }
    parse_ymd(date_part)
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    ["%H:%M:%S%.f", "%H:%M:%S", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
}

fn parse_ymd(s: &str) -> Option<NaiveDate> {
    let mut fields = s.split('-');
    let (y, m, d) = (fields.next()?, fields.next()?, fields.next()?);
    if fields.next().is_some() {
        return None;
    }
    let all_digits = |f: &str| !f.is_empty() && f.len() <= 4 && f.bytes().all(|b| b.is_ascii_digit());
    if !(all_digits(y) && all_digits(m) && all_digits(d)) {
        return None;
    }

    let mut year: i32 = y.parse().ok()?;
    if y.len() < 4 {
        if year == 0 || year >= ROC_YEAR_LIMIT {
            return None;
        }
        year += ROC_YEAR_OFFSET;
    }
    NaiveDate::from_ymd_opt(year, m.parse().ok()?, d.parse().ok()?)
}

/// The calendar date at instant `now` as seen in `tz`.
pub fn today_in(tz: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Whole days from `from` to `to`; negative when `to` is earlier.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}
