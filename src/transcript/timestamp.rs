//! Timestamp resolution for transcript headers.
//!
//! Exports write dates in two families:
//!
//! ```text
//! 15/01/24, 9:05 PM        <- slash date, 2-digit year, 12-hour clock
//! 15/01/2024, 21:05:33     <- slash date, 4-digit year, 24-hour clock
//! 2024-01-15 21:05:33      <- ISO
//! ```
//!
//! Day and month are taken literally left-to-right; there is no locale
//! negotiation. No timezone arithmetic happens here: the result is a naive
//! wall-clock instant as written in the export.

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use super::types::TimestampSource;

/// Two-digit years above this pivot land in the 1900s, the rest in the 2000s.
pub const PIVOT_YEAR: i32 = 50;

/// Result of resolving a header timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedTimestamp {
    pub at: NaiveDateTime,
    pub source: TimestampSource,
}

/// Converts matched date/time text into an instant.
///
/// Unresolvable input falls back to the `fallback` instant supplied at
/// construction (the wall clock captured when the parse run started).
#[derive(Debug, Clone)]
pub struct TimestampResolver {
    slash: Regex,
    iso: Regex,
    fallback: NaiveDateTime,
}

impl TimestampResolver {
    pub fn new(fallback: NaiveDateTime) -> Self {
        let slash = Regex::new(
            r"^(\d{1,2})/(\d{1,2})/(\d{1,4}),?\s*(\d{1,2}):(\d{2})(?::(\d{2}))?(?:\s*([AaPp])\.?[Mm]\.?)?$",
        )
        .expect("slash timestamp regex");
        let iso = Regex::new(r"^(\d{4})-(\d{2})-(\d{2})[ T](\d{2}):(\d{2}):(\d{2})$")
            .expect("iso timestamp regex");
        Self {
            slash,
            iso,
            fallback,
        }
    }

    /// The instant used when nothing else resolves.
    pub fn fallback(&self) -> NaiveDateTime {
        self.fallback
    }

    /// Resolve `text`, falling back to the run's wall-clock instant.
    pub fn resolve(&self, text: &str) -> ResolvedTimestamp {
        match self.parse(text) {
            Some(at) => ResolvedTimestamp {
                at,
                source: TimestampSource::Parsed,
            },
            None => {
                tracing::warn!(
                    timestamp = text,
                    fallback = %self.fallback,
                    "unresolvable timestamp, using wall-clock fallback"
                );
                ResolvedTimestamp {
                    at: self.fallback,
                    source: TimestampSource::Fallback,
                }
            }
        }
    }

    /// Try each known format; `None` when nothing matches or the fields do
    /// not form a real calendar instant.
    pub fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        self.parse_slash(text).or_else(|| self.parse_iso(text))
    }

    fn parse_slash(&self, text: &str) -> Option<NaiveDateTime> {
        let caps = self.slash.captures(text)?;
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year = expand_year(caps[3].parse().ok()?);
        let hour: u32 = caps[4].parse().ok()?;
        let minute: u32 = caps[5].parse().ok()?;
        let second: u32 = match caps.get(6) {
            Some(m) => m.as_str().parse().ok()?,
            None => 0,
        };
        let meridiem = caps.get(7).map(|m| m.as_str().to_ascii_uppercase());
        let hour = to_24_hour(hour, meridiem.as_deref());

        NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
    }

    fn parse_iso(&self, text: &str) -> Option<NaiveDateTime> {
        let caps = self.iso.captures(text)?;
        let field = |i: usize| caps[i].parse::<u32>().ok();
        let year: i32 = caps[1].parse().ok()?;
        NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)?.and_hms_opt(
            field(4)?,
            field(5)?,
            field(6)?,
        )
    }
}

/// Expand a two-digit year with the fixed pivot; wider years pass through.
pub fn expand_year(year: i32) -> i32 {
    if year >= 100 {
        year
    } else if year > PIVOT_YEAR {
        1900 + year
    } else {
        2000 + year
    }
}

/// Apply a 12-hour suffix (`"A"` or `"P"`). Without a suffix the hour is
/// already on the 24-hour clock.
pub fn to_24_hour(hour: u32, meridiem: Option<&str>) -> u32 {
    match meridiem {
        Some("P") if hour < 12 => hour + 12,
        Some("A") if hour == 12 => 0,
        _ => hour,
    }
}
