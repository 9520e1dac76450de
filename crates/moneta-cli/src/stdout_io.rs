use std::io::{self, Write};

/// Writes preformatted text to stdout. A closed pipe (e.g. `moneta list |
/// head`) is treated as success so the process can exit cleanly.
pub fn write_stdout_text(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    tolerate_broken_pipe(stdout.write_all(text.as_bytes()))?;
    tolerate_broken_pipe(stdout.flush())
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    tolerate_broken_pipe(stdout.write_all(text.as_bytes()))?;
    tolerate_broken_pipe(stdout.write_all(b"\n"))?;
    tolerate_broken_pipe(stdout.flush())
}

/// Writes a prompt without a trailing newline, flushed so it shows before
/// the read on stdin blocks.
pub fn write_stdout_prompt(text: &str) -> io::Result<()> {
    write_stdout_text(text)
}

fn tolerate_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
