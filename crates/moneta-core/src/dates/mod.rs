mod error;

use std::fs;
use std::path::Path;

use chrono::NaiveDate;

pub use error::{DateError, DateResult};

use crate::{CoreError, CoreResult};

/// A date range with optional bounds.
///
/// At least one bound is always present; when both are present the range is
/// ordered. Both invariants are enforced at construction, so a `DateRange`
/// value is valid by existence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateRange {
    first: Option<NaiveDate>,
    last: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(first: Option<NaiveDate>, last: Option<NaiveDate>) -> DateResult<Self> {
        if first.is_none() && last.is_none() {
            return Err(DateError::EmptyRange);
        }

        if let (Some(start), Some(end)) = (first, last)
            && start > end
        {
            return Err(DateError::BackwardRange {
                first: start,
                last: end,
            });
        }

        Ok(Self { first, last })
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.first
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.last
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        let on_or_after_first = self.first.is_none_or(|first| date >= first);
        let on_or_before_last = self.last.is_none_or(|last| date <= last);
        on_or_after_first && on_or_before_last
    }
}

/// One entry of a date sequence: a discrete date or a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceEntry {
    Single(NaiveDate),
    Range(DateRange),
}

impl SequenceEntry {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self {
            SequenceEntry::Single(entry) => *entry == date,
            SequenceEntry::Range(range) => range.contains(date),
        }
    }
}

/// An ordered union of dates and date ranges, used as one filter criterion.
///
/// Equality is element-wise and order-sensitive; membership is
/// order-independent. An empty sequence matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DateSequence {
    entries: Vec<SequenceEntry>,
}

impl DateSequence {
    pub fn new(entries: Vec<SequenceEntry>) -> Self {
        Self { entries }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.entries.iter().any(|entry| entry.contains(date))
    }

    /// Appends `other`'s entries after the existing entries, in order.
    pub fn extend(&mut self, other: DateSequence) {
        self.entries.extend(other.entries);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[SequenceEntry] {
        &self.entries
    }
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses `YYYY-MM-DD` into a calendar date.
pub fn parse_date(input: &str) -> DateResult<NaiveDate> {
    let mut components = input.split('-');
    let (Some(year), Some(month), Some(day), None) = (
        components.next(),
        components.next(),
        components.next(),
        components.next(),
    ) else {
        return Err(DateError::invalid_date(input));
    };

    let Ok(year) = year.parse::<i32>() else {
        return Err(DateError::invalid_date(input));
    };
    let Ok(month) = month.parse::<u32>() else {
        return Err(DateError::invalid_date(input));
    };
    let Ok(day) = day.parse::<u32>() else {
        return Err(DateError::invalid_date(input));
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateError::invalid_date(input))
}

/// Parses `[DATE]..[DATE]` into a range.
///
/// The input must contain exactly one `..`. An empty side is an open bound;
/// both sides empty is `EmptyRange`. A side that fails to parse as a date
/// surfaces that date error unchanged, and a backward range surfaces as
/// `BackwardRange` rather than a syntax failure.
pub fn parse_date_range(input: &str) -> DateResult<DateRange> {
    let sides: Vec<&str> = input.split("..").collect();
    if sides.len() != 2 {
        return Err(DateError::invalid_range_syntax(input));
    }

    let first = parse_optional_bound(sides[0])?;
    let last = parse_optional_bound(sides[1])?;
    DateRange::new(first, last)
}

fn parse_optional_bound(side: &str) -> DateResult<Option<NaiveDate>> {
    if side.is_empty() {
        return Ok(None);
    }
    parse_date(side).map(Some)
}

/// Parses a comma-separated sequence of dates and ranges.
///
/// Empty tokens contribute nothing, so `""` and `","` both yield the empty
/// sequence. Errors inside a token propagate unchanged.
pub fn parse_date_sequence(input: &str) -> DateResult<DateSequence> {
    let mut entries = Vec::new();
    for token in input.split(',') {
        if token.is_empty() {
            continue;
        }
        if token.contains("..") {
            entries.push(SequenceEntry::Range(parse_date_range(token)?));
        } else {
            entries.push(SequenceEntry::Single(parse_date(token)?));
        }
    }
    Ok(DateSequence { entries })
}

/// Reads a whole file as a date sequence, one date or range per line or
/// comma-separated. An empty file yields an empty sequence.
pub fn parse_date_sequence_file(path: &Path) -> CoreResult<DateSequence> {
    let content = fs::read_to_string(path)
        .map_err(|error| CoreError::dates_file_unreadable(path, &error.to_string()))?;

    let joined = content
        .lines()
        .map(str::trim_end)
        .collect::<Vec<&str>>()
        .join(",");

    let sequence = parse_date_sequence(&joined)?;
    Ok(sequence)
}
