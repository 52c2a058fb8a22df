use apod_core::{filter, parse_feed, DateRange, Paginator, Record};
use chrono::NaiveDate;
use serde_json::json;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Seven image records, 2024-01-01 through 2024-01-07, delivered out of order.
fn week() -> Vec<Record> {
    let payload: Vec<serde_json::Value> = [3, 7, 1, 5, 2, 6, 4]
        .iter()
        .map(|d| {
            json!({
                "title": format!("Day {d}"),
                "explanation": "",
                "date": format!("2024-01-0{d}"),
                "media_type": "image",
                "url": format!("https://e/{d}.jpg")
            })
        })
        .collect();
    parse_feed(&serde_json::to_vec(&payload).unwrap()).unwrap()
}

fn dates(records: &[Record]) -> Vec<String> {
    records.iter().map(|r| r.date.clone()).collect()
}

#[test]
fn unbounded_filter_returns_input_unchanged() {
    let all = week();
    assert_eq!(filter(&all, DateRange::default()), all);
}

#[test]
fn bounded_filter_keeps_inclusive_range_in_order() {
    let all = week();
    let range = DateRange::new(Some(day("2024-01-03")), Some(day("2024-01-05")));
    let view = filter(&all, range);
    assert_eq!(dates(&view), vec!["2024-01-05", "2024-01-04", "2024-01-03"]);
}

#[test]
fn every_filtered_record_is_within_bounds() {
    let all = week();
    for start in 1usize..=7 {
        for end in start..=7 {
            let (s, e) = (day(&format!("2024-01-0{start}")), day(&format!("2024-01-0{end}")));
            let view = filter(&all, DateRange::new(Some(s), Some(e)));
            assert_eq!(view.len(), end - start + 1);
            assert!(view.iter().all(|r| r.day() >= s && r.day() <= e));
            assert!(view.windows(2).all(|w| w[0].day() > w[1].day()));
        }
    }
}

#[test]
fn open_ended_bounds() {
    let all = week();
    let from = filter(&all, DateRange::new(Some(day("2024-01-06")), None));
    assert_eq!(dates(&from), vec!["2024-01-07", "2024-01-06"]);

    let until = filter(&all, DateRange::new(None, Some(day("2024-01-01"))));
    assert_eq!(dates(&until), vec!["2024-01-01"]);
}

#[test]
fn inverted_or_disjoint_range_is_empty() {
    let all = week();
    let inverted = DateRange::new(Some(day("2024-01-05")), Some(day("2024-01-03")));
    assert!(filter(&all, inverted).is_empty());

    let later = DateRange::new(Some(day("2025-01-01")), None);
    assert!(filter(&all, later).is_empty());
}

#[test]
fn typed_bounds_are_parsed() {
    let range = DateRange::parse(" 2024-01-03 ", "").unwrap();
    assert_eq!(range, DateRange::new(Some(day("2024-01-03")), None));
    assert!(DateRange::parse("", "").unwrap().is_unbounded());

    let err = DateRange::parse("03/01/2024", "").unwrap_err();
    assert!(err.contains("start"));
}

#[test]
fn batches_of_three_over_a_week() {
    let mut pager = Paginator::new(3);
    pager.reset(week());

    let first = pager.next_batch();
    assert_eq!(dates(&first.items), vec!["2024-01-07", "2024-01-06", "2024-01-05"]);
    assert!(first.has_more);
    assert_eq!(pager.remaining(), 4);

    let second = pager.next_batch();
    assert_eq!(dates(&second.items), vec!["2024-01-04", "2024-01-03", "2024-01-02"]);
    assert!(second.has_more);

    let third = pager.next_batch();
    assert_eq!(dates(&third.items), vec!["2024-01-01"]);
    assert!(!third.has_more);
    assert_eq!(pager.revealed(), 7);
}

#[test]
fn batches_concatenate_to_the_whole_view() {
    let all = week();
    for size in 1..=8 {
        let mut pager = Paginator::new(size);
        pager.reset(all.clone());
        let mut seen = Vec::new();
        loop {
            let batch = pager.next_batch();
            seen.extend(batch.items);
            if !batch.has_more {
                break;
            }
        }
        assert_eq!(seen, all, "batch size {size}");
    }
}

#[test]
fn exhausted_pager_keeps_returning_empty_batches() {
    let mut pager = Paginator::new(5);
    pager.reset(week());
    pager.next_batch();
    pager.next_batch();

    for _ in 0..4 {
        let batch = pager.next_batch();
        assert!(batch.items.is_empty());
        assert!(!batch.has_more);
    }
}

#[test]
fn empty_view_yields_empty_batch() {
    let mut pager = Paginator::new(3);
    pager.reset(Vec::new());
    let batch = pager.next_batch();
    assert!(batch.items.is_empty());
    assert!(!batch.has_more);
}

#[test]
fn reset_rewinds_the_cursor() {
    let mut pager = Paginator::new(3);
    pager.reset(week());
    pager.next_batch();
    assert_eq!(pager.revealed(), 3);

    pager.reset(week());
    assert_eq!(pager.revealed(), 0);
    assert_eq!(dates(&pager.next_batch().items)[0], "2024-01-07");
}

#[test]
fn zero_batch_size_still_makes_progress() {
    let mut pager = Paginator::new(0);
    pager.reset(week());
    assert_eq!(pager.batch_size(), 1);
    assert_eq!(pager.next_batch().items.len(), 1);
}
