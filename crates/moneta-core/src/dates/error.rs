use chrono::NaiveDate;
use thiserror::Error;

pub type DateResult<T> = Result<T, DateError>;

/// Errors from the date/range/sequence grammar.
///
/// The first three variants are syntax failures; `BackwardRange` is the
/// distinct case where both bounds parsed fine but are out of order, so
/// callers can tell "that isn't a date" apart from "that range is backward".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("`{input}` is not a date (expected YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("`{input}` is not a date range (expected [DATE]..[DATE] with exactly one `..`)")]
    InvalidRangeSyntax { input: String },

    #[error("date range has no bounds (at least one side of `..` must be a date)")]
    EmptyRange,

    #[error("backward date range: {first} is after {last}")]
    BackwardRange { first: NaiveDate, last: NaiveDate },
}

impl DateError {
    pub fn invalid_date(input: impl Into<String>) -> Self {
        DateError::InvalidDate {
            input: input.into(),
        }
    }

    pub fn invalid_range_syntax(input: impl Into<String>) -> Self {
        DateError::InvalidRangeSyntax {
            input: input.into(),
        }
    }

    /// True for the semantic out-of-order range, false for every syntax kind.
    pub fn is_backward_range(&self) -> bool {
        matches!(self, DateError::BackwardRange { .. })
    }
}
