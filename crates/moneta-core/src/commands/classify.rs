use std::path::{Path, PathBuf};

use crate::CoreResult;
use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ClassifyData;
use crate::filter::{self, FilterOptions, StageReport};
use crate::store;
use crate::tagging::ClassifyToken;
use crate::transaction::Transaction;

#[derive(Debug, Default)]
pub struct ClassifySessionOptions<'a> {
    pub filter: FilterOptions,
    pub home_override: Option<&'a Path>,
}

/// An in-memory tagging pass over the store. The whole collection is held
/// so edits to the selected subset persist alongside untouched rows.
#[derive(Debug)]
pub struct ClassifySession {
    transactions: Vec<Transaction>,
    selected: Vec<usize>,
    stages: Vec<StageReport>,
    store_path: PathBuf,
    tagged: usize,
}

pub fn session(filter: FilterOptions) -> CoreResult<ClassifySession> {
    session_with_options(ClassifySessionOptions {
        filter,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn session_with_options(options: ClassifySessionOptions<'_>) -> CoreResult<ClassifySession> {
    let store_path = store::resolve_store_path(options.home_override)?;
    let transactions = store::load_transactions(&store_path)?;
    let outcome = filter::apply(&transactions, &options.filter)?;

    Ok(ClassifySession {
        transactions,
        selected: outcome.kept,
        stages: outcome.stages,
        store_path,
        tagged: 0,
    })
}

impl ClassifySession {
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn stages(&self) -> &[StageReport] {
        &self.stages
    }

    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// The nth selected transaction, in store order.
    pub fn transaction(&self, position: usize) -> Option<&Transaction> {
        self.selected
            .get(position)
            .map(|&index| &self.transactions[index])
    }

    /// Applies the tag tokens of one input line to the nth selected
    /// transaction. Command tokens are the caller's to act on and are
    /// ignored here.
    pub fn apply(&mut self, position: usize, tokens: &[ClassifyToken]) {
        let Some(&index) = self.selected.get(position) else {
            return;
        };
        let mut applied = false;
        for token in tokens {
            if let ClassifyToken::Tag { name, split_amount } = token {
                self.transactions[index]
                    .tags
                    .insert(name.clone(), *split_amount);
                applied = true;
            }
        }
        if applied {
            self.tagged += 1;
        }
    }

    /// Rewrites the store with the session's edits.
    pub fn store(&self) -> CoreResult<()> {
        store::store_transactions(&self.store_path, &self.transactions)
    }

    pub fn finish(&self, reviewed: usize, stored: bool) -> CoreResult<SuccessEnvelope> {
        let data = ClassifyData {
            reviewed,
            tagged: self.tagged,
            stored,
            store_path: self.store_path.display().to_string(),
        };
        success("classify", data)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::filter::FilterOptions;
    use crate::store;
    use crate::tagging::parse_input_line;
    use crate::transaction::Transaction;

    use super::{ClassifySessionOptions, session_with_options};

    fn seed(description: &str, tags: &[&str]) -> Transaction {
        Transaction {
            kind: "sale".to_string(),
            trans_date: NaiveDate::from_ymd_opt(2018, 9, 14),
            post_date: None,
            description: description.to_string(),
            amount: -10.0,
            tags: tags
                .iter()
                .map(|name| (name.to_string(), None))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn session_selects_per_filter_and_persists_edits() {
        let dir = tempdir();
        assert!(dir.is_ok());
        let Ok(dir) = dir else {
            return;
        };
        let store_path = store::store_file_path(dir.path());
        let seeded = vec![
            seed("WALGREENS", &[]),
            seed("TRADER JOE'S", &["grocery"]),
        ];
        assert!(store::store_transactions(&store_path, &seeded).is_ok());

        let session = session_with_options(ClassifySessionOptions {
            filter: FilterOptions {
                no_tags: true,
                ..FilterOptions::default()
            },
            home_override: Some(dir.path()),
        });
        assert!(session.is_ok());
        let Ok(mut session) = session else {
            return;
        };
        assert_eq!(session.len(), 1);
        assert_eq!(
            session.transaction(0).map(|t| t.description.as_str()),
            Some("WALGREENS")
        );

        let tokens = parse_input_line("pharmacy cash:20.00");
        assert!(tokens.is_ok());
        if let Ok(tokens) = tokens {
            session.apply(0, &tokens);
        }
        assert!(session.store().is_ok());

        let loaded = store::load_transactions(&store_path);
        assert!(loaded.is_ok());
        if let Ok(transactions) = loaded {
            assert_eq!(transactions.len(), 2);
            assert_eq!(transactions[0].tags.get("pharmacy"), Some(&None));
            assert_eq!(transactions[0].tags.get("cash"), Some(&Some(20.0)));
            // Untouched rows survive the rewrite.
            assert!(transactions[1].tags.contains_key("grocery"));
        }
    }

    #[test]
    fn finish_reports_session_counts() {
        let dir = tempdir();
        assert!(dir.is_ok());
        let Ok(dir) = dir else {
            return;
        };
        let store_path = store::store_file_path(dir.path());
        assert!(store::store_transactions(&store_path, &[seed("WALGREENS", &[])]).is_ok());

        let session = session_with_options(ClassifySessionOptions {
            filter: FilterOptions::default(),
            home_override: Some(dir.path()),
        });
        assert!(session.is_ok());
        let Ok(mut session) = session else {
            return;
        };

        let tokens = parse_input_line("pharmacy");
        assert!(tokens.is_ok());
        if let Ok(tokens) = tokens {
            session.apply(0, &tokens);
        }

        let envelope = session.finish(1, true);
        assert!(envelope.is_ok());
        if let Ok(envelope) = envelope {
            assert_eq!(envelope.data["reviewed"], 1);
            assert_eq!(envelope.data["tagged"], 1);
            assert_eq!(envelope.data["stored"], true);
        }
    }
}
