//! Month-by-month message counts for a raw transcript.
//!
//! A quick look at an export before running the full pipeline: every line
//! that starts with a date is counted under its calendar month. Nothing else
//! about the line is interpreted, so continuation lines and system notices
//! without a date are simply skipped.

use std::collections::BTreeMap;

use chrono::Month;
use regex::Regex;
use serde::Serialize;

use crate::transcript::normalize::strip_direction_marks;
use crate::transcript::timestamp::expand_year;

/// Lines counted for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    /// e.g. "January 2024"
    pub label: String,
    pub count: usize,
}

/// Recognizes a date at the start of a line.
#[derive(Debug, Clone)]
pub struct LeadingDate {
    /// `D/M/Y` or `D.M.Y`, optionally after `[`
    day_first: Regex,
    /// `YYYY-MM-DD`, optionally after `[`
    iso: Regex,
}

impl LeadingDate {
    pub fn new() -> Self {
        Self {
            day_first: Regex::new(r"^\s*\[?(\d{1,2})[/.](\d{1,2})[/.](\d{2,4})\b")
                .expect("day-first date regex"),
            iso: Regex::new(r"^\s*\[?(\d{4})-(\d{2})-(\d{2})\b").expect("iso date regex"),
        }
    }

    /// `(year, month)` of the line's leading date, if any.
    pub fn year_month(&self, line: &str) -> Option<(i32, u32)> {
        let line = strip_direction_marks(line);
        let (year, month) = if let Some(caps) = self.iso.captures(&line) {
            (caps[1].parse().ok()?, caps[2].parse().ok()?)
        } else {
            let caps = self.day_first.captures(&line)?;
            (expand_year(caps[3].parse().ok()?), caps[2].parse().ok()?)
        };
        (1..=12).contains(&month).then_some((year, month))
    }
}

impl Default for LeadingDate {
    fn default() -> Self {
        Self::new()
    }
}

/// Count dated lines per month, oldest first.
pub fn month_buckets(input: &str) -> Vec<MonthBucket> {
    let dates = LeadingDate::new();
    let mut counts: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for line in input.lines() {
        if let Some(key) = dates.year_month(line) {
            *counts.entry(key).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|((year, month), count)| MonthBucket {
            year,
            month,
            label: month_label(year, month),
            count,
        })
        .collect()
}

fn month_label(year: i32, month: u32) -> String {
    let name = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("Unknown");
    format!("{} {}", name, year)
}
