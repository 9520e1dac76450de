use serde::Serialize;

use crate::filter::StageReport;
use crate::import::ImportFileSummary;
use crate::transaction::Transaction;

#[derive(Debug, Clone, Serialize)]
pub struct TransactionView {
    #[serde(rename = "type")]
    pub kind: String,
    pub trans_date: Option<String>,
    pub post_date: Option<String>,
    pub description: String,
    pub amount: f64,
    pub tags: Vec<TagView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_amount: Option<f64>,
}

impl TransactionView {
    pub fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            kind: transaction.kind.clone(),
            trans_date: transaction.trans_date_display(),
            post_date: transaction.post_date_display(),
            description: transaction.description.clone(),
            amount: transaction.amount,
            tags: transaction
                .tags
                .iter()
                .map(|(name, split_amount)| TagView {
                    name: name.clone(),
                    split_amount: *split_amount,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ListData {
    pub rows: Vec<TransactionView>,
    pub stages: Vec<StageReport>,
    pub matched: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
}

/// One row of the tags report. `tag: None` is the untagged bucket.
#[derive(Debug, Clone, Serialize)]
pub struct TagRow {
    pub tag: Option<String>,
    pub count: usize,
    pub expense: f64,
    pub income: f64,
    pub volume: f64,
    pub net: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagsData {
    pub rows: Vec<TagRow>,
    pub stages: Vec<StageReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImportData {
    pub files: Vec<ImportFileSummary>,
    pub imported: usize,
    pub store_path: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassifyData {
    pub reviewed: usize,
    pub tagged: usize,
    pub stored: bool,
    pub store_path: String,
}
