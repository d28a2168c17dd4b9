// src/query.rs
//! Filtering and ordering of enriched documents.
//!
//! Everything here is a pure function of `(documents, FilterState)`; nothing
//! is reordered in place. `data::compute_view` wraps these into an index view.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::config::consts::{DEFAULT_SORT, DEFAULT_STATUSES};
use crate::model::{DeadlineCategory, EnrichedDocument};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortMode {
    /// Nearest deadline first.
    #[default]
    DeadlineAsc,
    /// Latest deadline first.
    DeadlineDesc,
    /// Oldest notice first.
    DateAsc,
    /// Newest notice first.
    DateDesc,
}

impl SortMode {
    pub const ALL: [SortMode; 4] =
        [SortMode::DeadlineAsc, SortMode::DeadlineDesc, SortMode::DateAsc, SortMode::DateDesc];

    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::DeadlineAsc => "deadline-asc",
            SortMode::DeadlineDesc => "deadline-desc",
            SortMode::DateAsc => "date-asc",
            SortMode::DateDesc => "date-desc",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown sort: {s} (expected deadline-asc, deadline-desc, date-asc or date-desc)"))
    }
}

/// Search text, sort mode and the set of visible deadline categories.
///
/// `statuses` is never empty: removing the last member is refused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    search: String,
    pub sort: SortMode,
    statuses: BTreeSet<DeadlineCategory>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: s!(),
            sort: DEFAULT_SORT,
            statuses: DEFAULT_STATUSES.into_iter().collect(),
        }
    }
}

impl FilterState {
    /// An empty `statuses` falls back to the default set.
    pub fn new(search: &str, sort: SortMode, statuses: impl IntoIterator<Item = DeadlineCategory>) -> Self {
        let mut state = Self { sort, ..Self::default() };
        state.set_search(search);
        let statuses: BTreeSet<_> = statuses.into_iter().collect();
        if !statuses.is_empty() {
            state.statuses = statuses;
        }
        state
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Stores the term trimmed; an all-blank term turns the text filter off.
    pub fn set_search(&mut self, term: &str) {
        self.search = s!(term.trim());
    }

    /// Returns whether there was anything to clear.
    pub fn clear_search(&mut self) -> bool {
        let had = !self.search.is_empty();
        self.search.clear();
        had
    }

    pub fn statuses(&self) -> &BTreeSet<DeadlineCategory> {
        &self.statuses
    }

    pub fn shows(&self, category: DeadlineCategory) -> bool {
        self.statuses.contains(&category)
    }

    /// Check or uncheck one category. Returns `false` when the change was
    /// rejected because it would leave no category visible; the set is then
    /// unchanged.
    pub fn set_status(&mut self, category: DeadlineCategory, on: bool) -> bool {
        if on {
            self.statuses.insert(category);
            return true;
        }
        if self.statuses.len() == 1 && self.statuses.contains(&category) {
            logd!("Filter: refusing to hide last visible status {category}");
            return false;
        }
        self.statuses.remove(&category);
        true
    }

    pub fn toggle_status(&mut self, category: DeadlineCategory) -> bool {
        let on = !self.shows(category);
        self.set_status(category, on)
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Back to defaults. Returns `false` (and does nothing) when already default.
    pub fn reset(&mut self) -> bool {
        if self.is_default() {
            return false;
        }
        *self = Self::default();
        true
    }
}

/// Case-insensitive substring match over subject, subject link, attachments
/// (`label url` each), and the raw date tokens. An empty query matches all.
pub fn matches_search(doc: &EnrichedDocument, query_lc: &str) -> bool {
    if query_lc.is_empty() {
        return true;
    }
    let raw = &doc.raw;
    let attachments = raw
        .attachments
        .iter()
        .map(|a| join!(&a.label, " ", &a.url))
        .collect::<Vec<_>>()
        .join(" ");

    [
        raw.subject.as_str(),
        raw.subject_url.as_deref().unwrap_or(""),
        attachments.as_str(),
        raw.date.as_str(),
        raw.deadline.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(query_lc))
}

#[derive(Clone, Copy)]
enum Dir { Asc, Desc }

/// Present values ordered by `dir`; absent values after every present one.
fn missing_last<T: Ord>(a: Option<T>, b: Option<T>, dir: Dir) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(x), Some(y)) => match dir {
            Dir::Asc => x.cmp(&y),
            Dir::Desc => y.cmp(&x),
        },
    }
}

/// Ordering used by every sort mode. Deadline modes break ties newest-first.
pub fn compare(a: &EnrichedDocument, b: &EnrichedDocument, mode: SortMode) -> Ordering {
    let newest_first = || missing_last(a.issued_date, b.issued_date, Dir::Desc);
    match mode {
        SortMode::DeadlineAsc => missing_last(a.deadline_date, b.deadline_date, Dir::Asc).then_with(newest_first),
        SortMode::DeadlineDesc => missing_last(a.deadline_date, b.deadline_date, Dir::Desc).then_with(newest_first),
        SortMode::DateAsc => missing_last(a.issued_date, b.issued_date, Dir::Asc),
        SortMode::DateDesc => newest_first(),
    }
}

/// Indices of `docs` that pass `filters`, in display order.
pub fn select(docs: &[EnrichedDocument], filters: &FilterState) -> Vec<usize> {
    let query_lc = filters.search().to_lowercase();
    let mut ix: Vec<usize> = (0..docs.len())
        .filter(|&i| matches_search(&docs[i], &query_lc))
        .filter(|&i| filters.shows(docs[i].deadline_category))
        .collect();
    // stable: equal keys keep source order
    ix.sort_by(|&a, &b| compare(&docs[a], &docs[b], filters.sort));
    ix
}

/// Sorted copy of `docs`; the input is untouched.
pub fn sorted(docs: &[EnrichedDocument], mode: SortMode) -> Vec<EnrichedDocument> {
    let mut out = docs.to_vec();
    out.sort_by(|a, b| compare(a, b, mode));
    out
}

/// Summary line shown above the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusMessage {
    /// The snapshot holds no documents at all.
    NoDocuments,
    /// Documents exist but none pass the current filters.
    NoMatches,
    Showing(usize),
    LoadFailed,
}

impl StatusMessage {
    pub fn for_counts(filtered: usize, total: usize) -> Self {
        if total == 0 {
            StatusMessage::NoDocuments
        } else if filtered == 0 {
            StatusMessage::NoMatches
        } else {
            StatusMessage::Showing(filtered)
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StatusMessage::LoadFailed)
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::NoDocuments => f.write_str("目前尚未取得公告，請稍候重試。"),
            StatusMessage::NoMatches => f.write_str("沒有符合篩選條件的公告。"),
            StatusMessage::Showing(n) => write!(f, "共 {n} 筆公告"),
            StatusMessage::LoadFailed => f.write_str("資料載入失敗，請檢查網路或稍後再試。"),
        }
    }
}

/// Short remaining-time note for one document.
pub fn deadline_note(days_until_deadline: Option<i64>) -> String {
    match days_until_deadline {
        None => s!("無截止日"),
        Some(d) if d < 0 => format!("逾期 {} 天", d.unsigned_abs()),
        Some(0) => s!("今天截止"),
        Some(d) => format!("剩餘 {d} 天"),
    }
}
