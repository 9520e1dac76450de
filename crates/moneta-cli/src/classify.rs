use std::io::{self, BufRead};

use moneta_core::commands::classify::{ClassifySession, session};
use moneta_core::filter::FilterOptions;
use moneta_core::tagging::{ClassifyToken, parse_input_line};
use moneta_core::{CoreError, CoreResult, SuccessEnvelope};

use crate::output::format;
use crate::stdout_io::{write_stdout_line, write_stdout_prompt};

/// Runs the interactive tagging loop over the filtered store. Each selected
/// transaction is shown once; the answer line holds tags to apply, `!save`
/// to store mid-session, or `!quit` to stop early. The store is rewritten
/// when the loop ends.
pub fn run(filter: FilterOptions) -> CoreResult<SuccessEnvelope> {
    let mut session = session(filter)?;

    for report in session.stages() {
        emit(&report.stage.progress_line(report.removed))?;
    }

    if session.is_empty() {
        emit("Nothing to classify.")?;
        return session.finish(0, false);
    }

    emit(&format!(
        "{} transaction(s) to classify.",
        session.len()
    ))?;
    emit("Enter tags separated by spaces, with an optional split amount (cash:20.00).")?;
    emit("Press Enter to skip. Commands: !save stores now, !quit stops.")?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let total = session.len();
    let mut reviewed = 0;

    'session: for position in 0..total {
        emit("")?;
        if let Some(transaction) = session.transaction(position) {
            emit(&format!(
                "[{}/{total}] {}",
                position + 1,
                format::transaction_line(transaction)
            ))?;
        }

        loop {
            write_stdout_prompt("> ").map_err(interactive_failure)?;
            let Some(line) = lines.next() else {
                break 'session;
            };
            let line = line.map_err(interactive_failure)?;

            match parse_input_line(line.trim()) {
                Err(error) => {
                    emit(&error.message)?;
                }
                Ok(tokens) => {
                    session.apply(position, &tokens);
                    reviewed += 1;

                    if tokens.iter().any(|t| matches!(t, ClassifyToken::Save)) {
                        store_now(&session)?;
                    }
                    if tokens.iter().any(|t| matches!(t, ClassifyToken::Quit)) {
                        break 'session;
                    }
                    break;
                }
            }
        }
    }

    session.store()?;
    session.finish(reviewed, true)
}

fn store_now(session: &ClassifySession) -> CoreResult<()> {
    session.store()?;
    emit(&format!(
        "Stored transactions to {}.",
        session.store_path().display()
    ))
}

fn emit(text: &str) -> CoreResult<()> {
    write_stdout_line(text).map_err(interactive_failure)
}

fn interactive_failure(error: io::Error) -> CoreError {
    CoreError::interactive_io(&error.to_string())
}
