mod error_text;
pub mod format;
mod import_text;
mod json;
mod list_text;
mod mode;
mod tags_text;

use std::io;

use moneta_core::{CoreError, SuccessEnvelope};

use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(success: &SuccessEnvelope, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &CoreError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope) -> io::Result<String> {
    match success.command.as_str() {
        "import" => import_text::render_import(&success.data),
        "list" => list_text::render_list(&success.data),
        "tags" => tags_text::render_tags(&success.data),
        "classify" => Ok(render_classify_summary(&success.data)),
        _ => Err(io::Error::other(format!(
            "unsupported text output command `{}`",
            success.command
        ))),
    }
}

fn render_classify_summary(data: &serde_json::Value) -> String {
    let reviewed = data.get("reviewed").and_then(serde_json::Value::as_u64);
    let tagged = data.get("tagged").and_then(serde_json::Value::as_u64);
    let store_path = data
        .get("store_path")
        .and_then(serde_json::Value::as_str)
        .unwrap_or("unknown");

    let mut lines = vec!["Classify session complete.".to_string(), String::new()];
    lines.extend(format::key_value_rows(
        &[
            ("Reviewed:", reviewed.unwrap_or(0).to_string()),
            ("Tagged:", tagged.unwrap_or(0).to_string()),
            ("Store path:", store_path.to_string()),
        ],
        2,
    ));
    lines.join("\n")
}
