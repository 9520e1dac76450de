use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

use crate::dates::DateError;

/// User-facing error carried across the command boundary.
///
/// `code` is a stable machine-readable kind; `recovery_steps` feed the CLI's
/// "What to do next" section.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct CoreError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl CoreError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::new(
            "invalid_argument",
            message,
            vec!["Run `moneta --help` for usage.".to_string()],
        )
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn invalid_argument_for_command(message: &str, command_hint: Option<&str>) -> Self {
        let Some(hint) = command_hint else {
            return Self::invalid_argument(message);
        };
        Self::new(
            "invalid_argument",
            message,
            vec![format!("Run `moneta {hint} --help` for usage.")],
        )
        .with_data(json!({ "command_hint": hint }))
    }

    pub fn invalid_regex(pattern: &str, detail: &str) -> Self {
        Self::new(
            "invalid_regex",
            &format!("`{pattern}` is not a valid regular expression: {detail}"),
            vec![
                "Fix the pattern passed to --include-regex/--exclude-regex.".to_string(),
                "Patterns are matched case-insensitively anywhere in the description.".to_string(),
            ],
        )
        .with_data(json!({ "pattern": pattern }))
    }

    pub fn dates_file_unreadable(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "dates_file_unreadable",
            &format!("Could not read dates file `{location}`: {detail}"),
            vec![
                "Verify the path passed to --dates-file exists and is readable.".to_string(),
                "Dates files hold one date or range per line, or comma-separated.".to_string(),
            ],
        )
    }

    pub fn import_file_unreadable(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "import_file_unreadable",
            &format!("Could not read activity file `{location}`: {detail}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                "Rerun `moneta import <FILE>`.".to_string(),
            ],
        )
    }

    pub fn import_missing_header(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "import_missing_header",
            &format!("Activity file `{location}` has no recognizable header row."),
            vec![
                "Export activity as CSV with a header row naming the columns.".to_string(),
                "Recognized columns: type, trans date, posting date/post date, description, amount."
                    .to_string(),
            ],
        )
    }

    pub fn store_missing(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_missing",
            &format!("No transaction store at `{location}`."),
            vec![
                "Run `moneta import <FILE>` to create one from account activity.".to_string(),
                "Or set `MONETA_HOME` to the directory holding an existing store.".to_string(),
            ],
        )
        .with_data(json!({ "store_path": location }))
    }

    pub fn store_corrupt(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_corrupt",
            &format!(
                "Transaction store at `{location}` is not a valid transaction array: {detail}"
            ),
            vec![format!(
                "Restore `{location}` from backup or re-import your activity files."
            )],
        )
    }

    pub fn store_io(path: &Path, detail: &str) -> Self {
        let location = path.display().to_string();
        Self::new(
            "store_io",
            &format!("Could not write transaction store at `{location}`: {detail}"),
            vec![format!(
                "Grant write access to `{location}` or set `MONETA_HOME` to a writable directory."
            )],
        )
    }

    pub fn home_unresolved() -> Self {
        Self::new(
            "home_unresolved",
            "Could not resolve a home directory for the transaction store.",
            vec!["Set `MONETA_HOME` to a writable directory.".to_string()],
        )
    }

    pub fn interactive_io(detail: &str) -> Self {
        Self::new(
            "interactive_io_error",
            &format!("Interactive session failed: {detail}"),
            vec!["Rerun `moneta classify`.".to_string()],
        )
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

impl From<DateError> for CoreError {
    /// Keeps the parse vs backward-range distinction intact: a backward range
    /// is never downgraded to a generic parse failure.
    fn from(error: DateError) -> Self {
        if error.is_backward_range() {
            return CoreError::new(
                "invalid_date_range",
                &error.to_string(),
                vec!["Swap the bounds so the earlier date comes first.".to_string()],
            );
        }

        CoreError::new(
            "date_parse_error",
            &error.to_string(),
            vec![
                "Dates use YYYY-MM-DD; ranges use DATE..DATE with either side optional."
                    .to_string(),
                "Separate multiple dates and ranges with commas.".to_string(),
            ],
        )
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
