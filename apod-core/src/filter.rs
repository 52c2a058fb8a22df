use chrono::NaiveDate;
use tracing::debug;

use crate::record::{parse_feed_date, Record};

/// Inclusive date bounds; an absent bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// Reads bounds typed by the user. Blank input means "no bound".
    pub fn parse(start: &str, end: &str) -> Result<Self, String> {
        Ok(Self {
            start: parse_bound(start, "start")?,
            end: parse_bound(end, "end")?,
        })
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start.map_or(true, |start| day >= start) && self.end.map_or(true, |end| day <= end)
    }
}

fn parse_bound(input: &str, which: &str) -> Result<Option<NaiveDate>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    parse_feed_date(input)
        .map(Some)
        .ok_or_else(|| format!("Invalid {which} date \"{input}\" (expected YYYY-MM-DD)"))
}

/// Returns the records inside `range`, keeping their relative order.
pub fn filter(all: &[Record], range: DateRange) -> Vec<Record> {
    if range.is_unbounded() {
        return all.to_vec();
    }
    let view: Vec<Record> = all
        .iter()
        .filter(|record| range.contains(record.day()))
        .cloned()
        .collect();
    debug!(?range, matched = view.len(), total = all.len(), "filter applied");
    view
}
