use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Extended help shown after `moneta import --help`.
pub const IMPORT_AFTER_HELP: &str = "\
How import works:
  Moneta reads CSV activity exports straight from your bank or card
  provider. The header row names the columns; recognized columns are
  Type, Trans Date, Posting Date (or Post Date), Description, and Amount.

  Dates may be MM/DD/YYYY or YYYY-MM-DD. Rows whose type is a transfer
  between your own accounts (payment, acct_xfer) are dropped, and rows
  that fail to parse are skipped and counted.

  Importing replaces the transaction store. Tags live in the store, so
  import first, then tag with `moneta classify`.

What to do next:
  1. Export account activity as CSV from your bank.
  2. Run `moneta import <FILE>...`.
  3. Run `moneta list` to see what was imported.
  4. Run `moneta classify --no-tags` to tag transactions.
";

/// Shared filter flags for the commands that read the store.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Dates to match: `2018-09-14`, `..2018-09-14`, `2018-09-14..`,
    /// `2018-09-01..2018-09-14`, or a comma-separated mix
    // Raw text; parsed in dispatch so date errors keep their own codes.
    #[arg(long, value_name = "SEQUENCE")]
    pub dates: Option<String>,
    /// File of dates/ranges, one per line or comma-separated (repeatable)
    #[arg(long = "dates-file", value_name = "PATH")]
    pub dates_files: Vec<PathBuf>,
    /// Keep only descriptions matching this regex, case-insensitive (repeatable)
    #[arg(long = "include-regex", value_name = "PATTERN")]
    pub include_regexs: Vec<String>,
    /// Drop descriptions matching this regex, case-insensitive (repeatable)
    #[arg(long = "exclude-regex", value_name = "PATTERN")]
    pub exclude_regexs: Vec<String>,
    /// Keep only transactions without tags
    #[arg(long = "no-tags")]
    pub no_tags: bool,
}

#[derive(Debug, Parser)]
#[command(
    name = "moneta",
    version,
    about = "personal finance transaction tracker",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Import CSV activity exports into the transaction store
    #[command(after_long_help = IMPORT_AFTER_HELP, arg_required_else_help = true)]
    Import {
        /// CSV activity files to import
        #[arg(required = true, value_name = "FILE")]
        files: Vec<PathBuf>,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// List transactions in the store, optionally filtered
    List {
        #[command(flatten)]
        filter: FilterArgs,
        /// Print the summed amount of the listed transactions
        #[arg(long)]
        total: bool,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Summarize spending per tag, optionally filtered
    Tags {
        #[command(flatten)]
        filter: FilterArgs,
        /// Emit machine-readable JSON output
        #[arg(long)]
        json: bool,
    },
    /// Interactively tag transactions (tip: start with --no-tags)
    Classify {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

#[cfg(test)]
pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
