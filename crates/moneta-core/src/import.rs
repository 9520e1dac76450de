use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;

use crate::dates;
use crate::transaction::Transaction;
use crate::{CoreError, CoreResult};

/// Row classifications that are internal account movement, not spending or
/// income, and are dropped on import.
const TRANSFER_KINDS: [&str; 2] = ["payment", "acct_xfer"];

#[derive(Debug, Clone, Serialize)]
pub struct ImportFileSummary {
    pub path: String,
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub rows_dropped: usize,
    pub rows_kept: usize,
}

/// Column positions discovered from an activity file's header row.
///
/// Banks disagree on header spellings, so detection is case-insensitive and
/// every column is optional; a file where nothing is recognized is rejected.
#[derive(Debug, Clone, Copy, Default)]
struct ColumnLayout {
    kind: Option<usize>,
    trans_date: Option<usize>,
    post_date: Option<usize>,
    description: Option<usize>,
    amount: Option<usize>,
}

impl ColumnLayout {
    fn from_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Self {
        let mut layout = Self::default();
        for (index, header) in headers.enumerate() {
            match header.trim().to_lowercase().as_str() {
                "type" => layout.kind = Some(index),
                "trans date" => layout.trans_date = Some(index),
                "posting date" | "post date" => layout.post_date = Some(index),
                "description" => layout.description = Some(index),
                "amount" => layout.amount = Some(index),
                _ => {}
            }
        }
        layout
    }

    fn recognized_nothing(&self) -> bool {
        self.kind.is_none()
            && self.trans_date.is_none()
            && self.post_date.is_none()
            && self.description.is_none()
            && self.amount.is_none()
    }
}

/// Parses one bank/credit-card activity export into canonical transactions.
///
/// Rows that fail to normalize are counted and skipped rather than failing
/// the file; rows classified as account transfers are dropped.
pub fn parse_activity_file(path: &Path) -> CoreResult<(Vec<Transaction>, ImportFileSummary)> {
    let content = fs::read_to_string(path)
        .map_err(|error| CoreError::import_file_unreadable(path, &error.to_string()))?;
    parse_activity(&content, path)
}

fn parse_activity(content: &str, path: &Path) -> CoreResult<(Vec<Transaction>, ImportFileSummary)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| CoreError::import_missing_header(path))?
        .clone();
    let layout = ColumnLayout::from_headers(headers.iter());
    if layout.recognized_nothing() {
        return Err(CoreError::import_missing_header(path));
    }

    let mut transactions = Vec::new();
    let mut rows_read = 0usize;
    let mut rows_skipped = 0usize;
    let mut rows_dropped = 0usize;

    for record in reader.records() {
        rows_read += 1;

        let Ok(record) = record else {
            rows_skipped += 1;
            continue;
        };
        let Some(transaction) = parse_row(&layout, &record) else {
            rows_skipped += 1;
            continue;
        };

        if TRANSFER_KINDS.contains(&transaction.kind.as_str()) {
            rows_dropped += 1;
            continue;
        }

        transactions.push(transaction);
    }

    let summary = ImportFileSummary {
        path: path.display().to_string(),
        rows_read,
        rows_skipped,
        rows_dropped,
        rows_kept: transactions.len(),
    };
    Ok((transactions, summary))
}

fn parse_row(layout: &ColumnLayout, record: &csv::StringRecord) -> Option<Transaction> {
    let kind = layout
        .kind
        .and_then(|index| record.get(index))
        .map(|value| value.trim().to_lowercase())
        .unwrap_or_default();

    let trans_date = parse_date_cell(layout.trans_date, record)?;
    let post_date = parse_date_cell(layout.post_date, record)?;

    let description = layout
        .description
        .and_then(|index| record.get(index))
        .map(|value| value.trim().to_string())
        .unwrap_or_default();

    let amount = match layout.amount {
        Some(index) => record.get(index)?.trim().parse::<f64>().ok()?,
        None => return None,
    };

    Some(Transaction {
        kind,
        trans_date,
        post_date,
        description,
        amount,
        tags: BTreeMap::new(),
    })
}

/// An absent column or blank cell is `None`; a present but unparsable cell
/// poisons the row.
fn parse_date_cell(
    index: Option<usize>,
    record: &csv::StringRecord,
) -> Option<Option<NaiveDate>> {
    let Some(index) = index else {
        return Some(None);
    };
    let Some(raw) = record.get(index) else {
        return Some(None);
    };
    let value = raw.trim();
    if value.is_empty() {
        return Some(None);
    }

    parse_activity_date(value).map(Some)
}

/// Dates arrive as `MM/DD/YYYY` in most exports, `YYYY-MM-DD` in others.
fn parse_activity_date(value: &str) -> Option<NaiveDate> {
    let slash_parts: Vec<&str> = value.split('/').collect();
    if slash_parts.len() == 3 {
        let month = slash_parts[0].parse::<u32>().ok()?;
        let day = slash_parts[1].parse::<u32>().ok()?;
        let year = slash_parts[2].parse::<i32>().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    dates::parse_date(value).ok()
}
