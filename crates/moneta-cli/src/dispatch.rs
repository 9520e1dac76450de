use moneta_core::commands;
use moneta_core::dates::parse_date_sequence;
use moneta_core::filter::FilterOptions;
use moneta_core::{CoreError, CoreResult, SuccessEnvelope};

use crate::classify;
use crate::cli::{Cli, Commands, FilterArgs};

pub fn dispatch(cli: &Cli) -> CoreResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Import { files, .. } => commands::import::run(files.clone()),
        Commands::List { filter, total, .. } => {
            commands::list::run(filter_options(filter)?, *total)
        }
        Commands::Tags { filter, .. } => commands::tags::run(filter_options(filter)?),
        Commands::Classify { filter } => classify::run(filter_options(filter)?),
    }
}

/// Parsing `--dates` here rather than in a clap value parser keeps the
/// date errors' own codes (`date_parse_error`, `invalid_date_range`)
/// instead of clap folding them into a generic argument failure.
fn filter_options(args: &FilterArgs) -> CoreResult<FilterOptions> {
    let dates = args
        .dates
        .as_deref()
        .map(parse_date_sequence)
        .transpose()
        .map_err(CoreError::from)?;

    Ok(FilterOptions {
        dates,
        dates_files: args.dates_files.clone(),
        include_regexs: args.include_regexs.clone(),
        exclude_regexs: args.exclude_regexs.clone(),
        no_tags: args.no_tags,
    })
}
