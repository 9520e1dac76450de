use std::collections::BTreeMap;
use std::path::Path;

use crate::CoreResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{TagRow, TagsData};
use crate::filter::{self, FilterOptions};
use crate::store;
use crate::transaction::Transaction;

#[derive(Debug, Default)]
pub struct TagsRunOptions<'a> {
    pub filter: FilterOptions,
    pub home_override: Option<&'a Path>,
}

pub fn run(filter: FilterOptions) -> CoreResult<SuccessEnvelope> {
    run_with_options(TagsRunOptions {
        filter,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: TagsRunOptions<'_>) -> CoreResult<SuccessEnvelope> {
    let store_path = store::resolve_store_path(options.home_override)?;
    let transactions = store::load_transactions(&store_path)?;
    let (survivors, stages) = filter::filter_transactions(&transactions, &options.filter)?;

    let data = TagsData {
        rows: summarize(&survivors),
        stages,
    };
    success("tags", data)
}

#[derive(Debug, Default)]
struct Accumulator {
    count: usize,
    expense: f64,
    income: f64,
}

/// Groups transactions by tag, counting untagged ones under `None`. A tag
/// with a split amount contributes that amount; other tags on the same
/// transaction share its full amount. BTreeMap ordering puts the untagged
/// bucket first, then tags alphabetically.
fn summarize(transactions: &[Transaction]) -> Vec<TagRow> {
    let mut buckets: BTreeMap<Option<String>, Accumulator> = BTreeMap::new();

    for transaction in transactions {
        if transaction.tags.is_empty() {
            tally(buckets.entry(None).or_default(), transaction.amount);
            continue;
        }
        for (tag, split_amount) in &transaction.tags {
            let amount = split_amount.unwrap_or(transaction.amount);
            tally(
                buckets.entry(Some(tag.clone())).or_default(),
                amount,
            );
        }
    }

    buckets
        .into_iter()
        .map(|(tag, bucket)| TagRow {
            tag,
            count: bucket.count,
            expense: bucket.expense,
            income: bucket.income,
            volume: bucket.expense.abs() + bucket.income,
            net: bucket.income + bucket.expense,
        })
        .collect()
}

fn tally(bucket: &mut Accumulator, amount: f64) {
    bucket.count += 1;
    if amount < 0.0 {
        bucket.expense += amount;
    } else {
        bucket.income += amount;
    }
}
