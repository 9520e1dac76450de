use std::path::PathBuf;

use regex::{Regex, RegexBuilder};
use serde::Serialize;

use crate::dates::{self, DateSequence};
use crate::transaction::Transaction;
use crate::{CoreError, CoreResult};

/// Criteria for narrowing a transaction collection. Absent fields skip their
/// stage entirely.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub dates: Option<DateSequence>,
    pub dates_files: Vec<PathBuf>,
    pub include_regexs: Vec<String>,
    pub exclude_regexs: Vec<String>,
    pub no_tags: bool,
}

impl FilterOptions {
    pub fn is_unfiltered(&self) -> bool {
        self.dates.is_none()
            && self.dates_files.is_empty()
            && self.include_regexs.is_empty()
            && self.exclude_regexs.is_empty()
            && !self.no_tags
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterStage {
    Dates,
    IncludeRegex,
    ExcludeRegex,
    NoTags,
}

impl FilterStage {
    /// Progress line for one stage, phrased the way the list/classify output
    /// has always reported it.
    pub fn progress_line(&self, removed: usize) -> String {
        match self {
            FilterStage::Dates => {
                format!("Filtered {removed} transaction(s) for not matching dates.")
            }
            FilterStage::IncludeRegex => {
                format!("Filtered {removed} transaction(s) for not matching include regex.")
            }
            FilterStage::ExcludeRegex => {
                format!("Filtered {removed} transaction(s) for matching exclude regex.")
            }
            FilterStage::NoTags => {
                format!("Filtered {removed} transaction(s) for not having tags.")
            }
        }
    }
}

/// How many transactions one stage removed. Only stages that actually ran
/// are reported. Serialized with the rendered progress message so output
/// layers print the exact line without rebuilding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    pub stage: FilterStage,
    pub removed: usize,
}

impl Serialize for StageReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("StageReport", 3)?;
        state.serialize_field("stage", &self.stage)?;
        state.serialize_field("removed", &self.removed)?;
        state.serialize_field("message", &self.stage.progress_line(self.removed))?;
        state.end()
    }
}

/// Survivors of the pipeline, as indices into the original collection in
/// original order, plus the per-stage removal counts.
#[derive(Debug, Clone)]
pub struct FilterOutcome {
    pub kept: Vec<usize>,
    pub stages: Vec<StageReport>,
}

/// Runs the fixed four-stage pipeline: dates, include regex, exclude regex,
/// no-tags. Each stage runs only when its option is present, and each stage
/// only narrows the surviving set. The input collection is never mutated.
pub fn apply(transactions: &[Transaction], options: &FilterOptions) -> CoreResult<FilterOutcome> {
    let mut kept: Vec<usize> = (0..transactions.len()).collect();
    let mut stages = Vec::new();

    let date_sequence = combined_date_sequence(options)?;
    if !date_sequence.is_empty() {
        run_stage(transactions, &mut kept, &mut stages, FilterStage::Dates, |t| {
            t.effective_date()
                .is_some_and(|date| date_sequence.contains(date))
        });
    }

    if !options.include_regexs.is_empty() {
        let patterns = compile_patterns(&options.include_regexs)?;
        run_stage(
            transactions,
            &mut kept,
            &mut stages,
            FilterStage::IncludeRegex,
            |t| any_pattern_matches(&patterns, &t.description),
        );
    }

    if !options.exclude_regexs.is_empty() {
        let patterns = compile_patterns(&options.exclude_regexs)?;
        run_stage(
            transactions,
            &mut kept,
            &mut stages,
            FilterStage::ExcludeRegex,
            |t| !any_pattern_matches(&patterns, &t.description),
        );
    }

    if options.no_tags {
        run_stage(
            transactions,
            &mut kept,
            &mut stages,
            FilterStage::NoTags,
            |t| t.tags.is_empty(),
        );
    }

    Ok(FilterOutcome { kept, stages })
}

/// Cloning convenience over [`apply`] for callers that want the surviving
/// transactions themselves.
pub fn filter_transactions(
    transactions: &[Transaction],
    options: &FilterOptions,
) -> CoreResult<(Vec<Transaction>, Vec<StageReport>)> {
    let outcome = apply(transactions, options)?;
    let survivors = outcome
        .kept
        .iter()
        .map(|&index| transactions[index].clone())
        .collect();
    Ok((survivors, outcome.stages))
}

/// The `--dates` sequence extended with each dates file's sequence, in
/// argument order.
fn combined_date_sequence(options: &FilterOptions) -> CoreResult<DateSequence> {
    let mut sequence = options.dates.clone().unwrap_or_default();
    for path in &options.dates_files {
        sequence.extend(dates::parse_date_sequence_file(path)?);
    }
    Ok(sequence)
}

fn run_stage(
    transactions: &[Transaction],
    kept: &mut Vec<usize>,
    stages: &mut Vec<StageReport>,
    stage: FilterStage,
    keeps: impl Fn(&Transaction) -> bool,
) {
    let before = kept.len();
    kept.retain(|&index| keeps(&transactions[index]));
    stages.push(StageReport {
        stage,
        removed: before - kept.len(),
    });
}

fn compile_patterns(patterns: &[String]) -> CoreResult<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|error| CoreError::invalid_regex(pattern, &error.to_string()))
        })
        .collect()
}

fn any_pattern_matches(patterns: &[Regex], description: &str) -> bool {
    patterns.iter().any(|pattern| pattern.is_match(description))
}
