use std::cmp;

use moneta_core::transaction::Transaction;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;
const LINE_WIDTH: usize = 80;
const AMOUNT_MIN_WIDTH: usize = 7;
const MISSING_DATE: &str = "????-??-??";

pub fn money(amount: f64) -> String {
    format!("{amount:.2}")
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    if entries.is_empty() {
        return Vec::new();
    }

    let label_width = entries
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// One transaction on one exactly-80-column line: effective date, signed
/// amount, description, then tags as `[a|b:20.00]` (`[]` when untagged).
/// The description absorbs whatever width the other fields leave over:
/// runs of spaces collapse to one, long descriptions are truncated with
/// `...`, and short ones are padded so the tag brackets line up.
pub fn transaction_row(
    date: Option<&str>,
    amount: f64,
    description: &str,
    tags: &str,
) -> String {
    let date = date.unwrap_or(MISSING_DATE);
    let amount = format!("{:>AMOUNT_MIN_WIDTH$}", money(amount));
    let tags = format!("[{tags}]");

    let budget = LINE_WIDTH
        .saturating_sub(date.len() + 1)
        .saturating_sub(amount.len() + 1)
        .saturating_sub(tags.len() + 1);
    let description = fit_description(description, budget);

    format!("{date} {amount} {description} {tags}")
}

fn fit_description(description: &str, width: usize) -> String {
    let collapsed = collapse_spaces(description);
    let length = collapsed.chars().count();
    if length <= width {
        return format!("{collapsed:<width$}");
    }
    if width > 3 {
        let mut truncated: String = collapsed.chars().take(width - 3).collect();
        truncated.push_str("...");
        return truncated;
    }
    collapsed.chars().take(width).collect()
}

fn collapse_spaces(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut previous_was_space = false;
    for ch in text.chars() {
        if ch == ' ' {
            if !previous_was_space {
                collapsed.push(ch);
            }
            previous_was_space = true;
        } else {
            collapsed.push(ch);
            previous_was_space = false;
        }
    }
    collapsed
}

pub fn transaction_line(transaction: &Transaction) -> String {
    let date = transaction.effective_date_display();
    transaction_row(
        date.as_deref(),
        transaction.amount,
        &transaction.description,
        &tag_list(
            transaction
                .tags
                .iter()
                .map(|(name, split)| (name.as_str(), *split)),
        ),
    )
}

pub fn tag_list<'a>(tags: impl Iterator<Item = (&'a str, Option<f64>)>) -> String {
    tags.map(|(name, split_amount)| match split_amount {
        Some(amount) => format!("{name}:{}", money(amount)),
        None => name.to_string(),
    })
    .collect::<Vec<String>>()
    .join("|")
}

/// A plain indented table with natural column widths. Cells are short
/// (tags, counts, money) so no wrapping is attempted.
pub fn render_table(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let mut widths = columns
        .iter()
        .map(|column| column.name.len())
        .collect::<Vec<usize>>();
    for row in rows {
        for (index, value) in row.iter().enumerate() {
            if let Some(slot) = widths.get_mut(index) {
                *slot = cmp::max(*slot, value.len());
            }
        }
    }

    let mut output = Vec::with_capacity(rows.len() + 1);
    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<String>>();
    output.push(format_row(columns, &header, &widths));
    for row in rows {
        output.push(format_row(columns, row, &widths));
    }
    output
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let mut pieces = Vec::with_capacity(columns.len());
    for (index, column) in columns.iter().enumerate() {
        let width = *widths.get(index).unwrap_or(&0);
        let value = cells.get(index).cloned().unwrap_or_default();
        let piece = match column.align {
            Align::Left => format!("{value:<width$}"),
            Align::Right => format!("{value:>width$}"),
        };
        pieces.push(piece);
    }

    format!(
        "{}{}",
        " ".repeat(INDENT),
        pieces.join(&" ".repeat(COLUMN_GAP))
    )
    .trim_end()
    .to_string()
}
