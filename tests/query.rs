// tests/query.rs
//
// Filtering, ordering and the non-empty status set.
//
use chrono::NaiveDate;
use kaa_notices::data::{compute_view, DocumentCollection};
use kaa_notices::enrich::Enricher;
use kaa_notices::model::{Attachment, DeadlineCategory::*, EnrichedDocument, RawDocument, Snapshot};
use kaa_notices::query::{compare, select, sorted, FilterState, SortMode};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

fn raw(date: &str, subject: &str, deadline: &str) -> RawDocument {
    RawDocument {
        date: date.into(),
        subject: subject.into(),
        deadline: deadline.into(),
        ..Default::default()
    }
}

fn enrich(raws: &[RawDocument]) -> Vec<EnrichedDocument> {
    Enricher::new(today()).enrich_all(raws)
}

fn collection(raws: Vec<RawDocument>) -> DocumentCollection {
    let snapshot = Snapshot { documents: raws, updated_at: None };
    DocumentCollection::from_snapshot(&snapshot, &Enricher::new(today()))
}

fn all_statuses(sort: SortMode) -> FilterState {
    FilterState::new("", sort, [DueSoon, Active, Expired, NoDeadline])
}

fn subjects<'a>(docs: impl IntoIterator<Item = &'a EnrichedDocument>) -> Vec<&'a str> {
    docs.into_iter().map(|d| d.raw.subject.as_str()).collect()
}

fn mixed() -> Vec<RawDocument> {
    vec![
        raw("2024-04-01", "a", "2024-05-20"),
        raw("", "b", ""),
        raw("2024-04-03", "c", "2024-05-03"),
        raw("2024-04-02", "d", ""),
        raw("", "e", "2024-04-20"),
        raw("2024-04-05", "f", "2024-05-03"),
        raw("2024-04-04", "g", "bogus"),
    ]
}

#[test]
fn deadline_asc_scenario() {
    let docs = collection(vec![
        raw("", "far", "2099-01-01"),
        raw("", "none", ""),
        raw("", "past", "2000-01-01"),
    ]);
    let view = compute_view(&docs, &all_statuses(SortMode::DeadlineAsc));
    assert_eq!(subjects(view.iter()), ["past", "far", "none"]);
}

#[test]
fn deadline_modes_tie_break_newest_issued_first() {
    let docs = enrich(&mixed());
    // c and f share a deadline; f was issued later
    assert_eq!(subjects(&sorted(&docs, SortMode::DeadlineAsc)), ["e", "f", "c", "a", "g", "d", "b"]);
    assert_eq!(subjects(&sorted(&docs, SortMode::DeadlineDesc)), ["a", "f", "c", "e", "g", "d", "b"]);
}

#[test]
fn date_modes_put_undated_last() {
    let docs = enrich(&mixed());
    assert_eq!(subjects(&sorted(&docs, SortMode::DateAsc)), ["a", "d", "c", "g", "f", "b", "e"]);
    assert_eq!(subjects(&sorted(&docs, SortMode::DateDesc)), ["f", "g", "c", "d", "a", "b", "e"]);
}

#[test]
fn missing_key_sorts_after_present_key_in_every_mode() {
    let docs = enrich(&mixed());
    for mode in SortMode::ALL {
        let out = sorted(&docs, mode);
        let key = |d: &EnrichedDocument| match mode {
            SortMode::DeadlineAsc | SortMode::DeadlineDesc => d.deadline_date.is_some(),
            SortMode::DateAsc | SortMode::DateDesc => d.issued_date.is_some(),
        };
        let first_missing = out.iter().position(|d| !key(d)).unwrap_or(out.len());
        assert!(out[first_missing..].iter().all(|d| !key(d)), "{mode}");
    }
}

#[test]
fn sorting_is_idempotent_and_leaves_input_alone() {
    let docs = enrich(&mixed());
    let before = docs.clone();
    for mode in SortMode::ALL {
        let once = sorted(&docs, mode);
        let twice = sorted(&once, mode);
        assert_eq!(once, twice, "{mode}");
    }
    assert_eq!(docs, before);
}

#[test]
fn compare_is_consistent_both_ways() {
    let docs = enrich(&mixed());
    for mode in SortMode::ALL {
        for a in &docs {
            for b in &docs {
                assert_eq!(compare(a, b, mode), compare(b, a, mode).reverse());
            }
        }
    }
}

#[test]
fn search_matches_attachment_label_only() {
    let mut with_att = raw("2024-04-01", "研習通知", "");
    with_att.attachments.push(Attachment {
        label: "報名附件.PDF".into(),
        url: "https://www.kaa.org.tw/upload/1.pdf".into(),
    });
    let docs = collection(vec![with_att, raw("2024-04-02", "會員大會", "")]);

    let view = compute_view(&docs, &FilterState::new("附件", SortMode::DateDesc, [NoDeadline]));
    assert_eq!(subjects(view.iter()), ["研習通知"]);

    // case-insensitive over the ASCII part of the label
    let view = compute_view(&docs, &FilterState::new("附件.pdf", SortMode::DateDesc, [NoDeadline]));
    assert_eq!(view.filtered_count(), 1);
}

#[test]
fn search_covers_links_and_raw_date_tokens() {
    let mut linked = raw("113/04/01", "公告", "113/05/20");
    linked.subject_url = Some("https://www.kaa.org.tw/View.php?ID=77".into());
    let docs = collection(vec![linked, raw("2024-04-02", "其他", "")]);
    let filters = |q: &str| FilterState::new(q, SortMode::DateDesc, [DueSoon, Active, Expired, NoDeadline]);

    assert_eq!(compute_view(&docs, &filters("id=77")).filtered_count(), 1);
    assert_eq!(compute_view(&docs, &filters("113/05")).filtered_count(), 1);
    assert_eq!(compute_view(&docs, &filters("04/01")).filtered_count(), 1);
    assert_eq!(compute_view(&docs, &filters("")).filtered_count(), 2);
    assert_eq!(compute_view(&docs, &filters("   ")).filtered_count(), 2);
    assert_eq!(compute_view(&docs, &filters("不存在")).filtered_count(), 0);
}

#[test]
fn status_filter_applies_after_search() {
    let docs = collection(mixed());
    let view = compute_view(&docs, &FilterState::new("", SortMode::DeadlineAsc, [Expired]));
    assert_eq!(subjects(view.iter()), ["e"]);
    assert_eq!(view.total_count(), 7);

    // default view: due-soon + active only
    let view = compute_view(&docs, &FilterState::default());
    assert_eq!(subjects(view.iter()), ["f", "c", "a"]);
}

#[test]
fn last_status_cannot_be_removed() {
    let mut f = FilterState::default();
    assert!(f.set_status(DueSoon, false));
    assert!(!f.set_status(Active, false), "removing the last status is rejected");
    assert!(f.shows(Active));
    assert_eq!(f.statuses().len(), 1);

    assert!(!f.toggle_status(Active));
    assert!(f.shows(Active));

    assert!(f.toggle_status(Expired));
    assert!(f.toggle_status(Active));
    assert_eq!(f.statuses().iter().copied().collect::<Vec<_>>(), [Expired]);
}

#[test]
fn statuses_never_empty_under_any_toggle_sequence() {
    let cats = [DueSoon, Active, Expired, NoDeadline];
    let mut f = FilterState::default();
    // deterministic pseudo-random walk
    let mut x: u32 = 12345;
    for _ in 0..500 {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let cat = cats[(x >> 16) as usize % cats.len()];
        if (x >> 8) & 1 == 0 { f.toggle_status(cat); } else { f.set_status(cat, false); }
        assert!(!f.statuses().is_empty());
    }
}

#[test]
fn empty_status_list_falls_back_to_defaults() {
    let f = FilterState::new("", SortMode::DeadlineAsc, []);
    assert!(f.is_default());
}

#[test]
fn reset_only_reports_real_changes() {
    let mut f = FilterState::default();
    assert!(!f.reset());

    f.set_search("  研習 ");
    assert_eq!(f.search(), "研習");
    f.sort = SortMode::DateAsc;
    f.set_status(Expired, true);
    assert!(f.reset());
    assert!(f.is_default());

    f.set_search("x");
    assert!(f.clear_search());
    assert!(!f.clear_search());
}

#[test]
fn view_does_not_mutate_collection() {
    let docs = collection(mixed());
    let before = docs.clone();
    let _ = compute_view(&docs, &all_statuses(SortMode::DateAsc));
    let _ = compute_view(&docs, &all_statuses(SortMode::DeadlineDesc));
    assert_eq!(docs, before);
}

#[test]
fn view_positions_line_up_with_its_documents() {
    let docs = collection(mixed());
    let filters = FilterState::new("", SortMode::DateDesc, [Active, Expired]);
    let view = compute_view(&docs, &filters);

    assert_eq!(view.row_ix(), select(docs.documents(), &filters).as_slice());
    assert_eq!(view.iter().count(), view.row_ix().len());
    for (doc, &ix) in view.iter().zip(view.row_ix()) {
        assert_eq!(doc, &docs.documents()[ix]);
    }
}
