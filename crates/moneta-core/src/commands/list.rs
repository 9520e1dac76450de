use std::path::Path;

use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::{ListData, TransactionView};
use crate::filter::{self, FilterOptions};
use crate::store;
use crate::CoreResult;

#[derive(Debug, Default)]
pub struct ListRunOptions<'a> {
    pub filter: FilterOptions,
    pub print_total: bool,
    pub home_override: Option<&'a Path>,
}

pub fn run(filter: FilterOptions, print_total: bool) -> CoreResult<SuccessEnvelope> {
    run_with_options(ListRunOptions {
        filter,
        print_total,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ListRunOptions<'_>) -> CoreResult<SuccessEnvelope> {
    let store_path = store::resolve_store_path(options.home_override)?;
    let transactions = store::load_transactions(&store_path)?;
    let (survivors, stages) = filter::filter_transactions(&transactions, &options.filter)?;

    let total = options
        .print_total
        .then(|| survivors.iter().map(|t| t.amount).sum());

    let data = ListData {
        matched: survivors.len(),
        rows: survivors.iter().map(TransactionView::from_transaction).collect(),
        stages,
        total,
    };
    success("list", data)
}
