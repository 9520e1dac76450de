use std::path::{Path, PathBuf};

use crate::contracts::envelope::{SuccessEnvelope, success};
use crate::contracts::types::ImportData;
use crate::import::parse_activity_file;
use crate::store;
use crate::{CoreError, CoreResult};

#[derive(Debug, Default)]
pub struct ImportRunOptions<'a> {
    pub paths: Vec<PathBuf>,
    pub home_override: Option<&'a Path>,
}

pub fn run(paths: Vec<PathBuf>) -> CoreResult<SuccessEnvelope> {
    run_with_options(ImportRunOptions {
        paths,
        home_override: None,
    })
}

#[doc(hidden)]
pub fn run_with_options(options: ImportRunOptions<'_>) -> CoreResult<SuccessEnvelope> {
    if options.paths.is_empty() {
        return Err(CoreError::invalid_argument(
            "`moneta import` needs at least one activity file.",
        ));
    }

    let store_path = store::resolve_store_path(options.home_override)?;

    let mut transactions = Vec::new();
    let mut files = Vec::new();
    for path in &options.paths {
        let (mut parsed, summary) = parse_activity_file(path)?;
        transactions.append(&mut parsed);
        files.push(summary);
    }

    // The store holds exactly the last import; tagging happens afterwards
    // via `moneta classify`.
    store::store_transactions(&store_path, &transactions)?;

    let data = ImportData {
        files,
        imported: transactions.len(),
        store_path: store_path.display().to_string(),
    };
    success("import", data)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::tempdir;

    use crate::store;

    use super::{ImportRunOptions, run_with_options};

    const ACTIVITY: &str = "\
Type,Trans Date,Post Date,Description,Amount
Sale,09/14/2018,09/15/2018,WALGREENS #123,-10.53
Payment,09/14/2018,09/15/2018,AUTOMATIC PAYMENT,500.00
Sale,09/20/2018,09/21/2018,TRADER JOE'S,-42.00
";

    #[test]
    fn import_writes_the_store_and_reports_per_file_counts() {
        let dir = tempdir();
        assert!(dir.is_ok());
        let Ok(dir) = dir else {
            return;
        };
        let activity = dir.path().join("activity.csv");
        assert!(fs::write(&activity, ACTIVITY).is_ok());

        let envelope = run_with_options(ImportRunOptions {
            paths: vec![activity],
            home_override: Some(dir.path()),
        });
        assert!(envelope.is_ok());
        if let Ok(envelope) = envelope {
            assert_eq!(envelope.data["imported"], 2);
            assert_eq!(envelope.data["files"][0]["rows_read"], 3);
            assert_eq!(envelope.data["files"][0]["rows_dropped"], 1);
        }

        let loaded = store::load_transactions(&store::store_file_path(dir.path()));
        assert!(loaded.is_ok());
        if let Ok(transactions) = loaded {
            assert_eq!(transactions.len(), 2);
            assert_eq!(transactions[0].description, "WALGREENS #123");
        }
    }

    #[test]
    fn import_replaces_an_existing_store() {
        let dir = tempdir();
        assert!(dir.is_ok());
        let Ok(dir) = dir else {
            return;
        };
        let activity = dir.path().join("activity.csv");
        assert!(fs::write(&activity, ACTIVITY).is_ok());

        let first = run_with_options(ImportRunOptions {
            paths: vec![activity.clone()],
            home_override: Some(dir.path()),
        });
        assert!(first.is_ok());

        let second = run_with_options(ImportRunOptions {
            paths: vec![activity],
            home_override: Some(dir.path()),
        });
        assert!(second.is_ok());

        let loaded = store::load_transactions(&store::store_file_path(dir.path()));
        assert!(loaded.is_ok());
        if let Ok(transactions) = loaded {
            assert_eq!(transactions.len(), 2);
        }
    }

    #[test]
    fn import_without_files_is_an_invalid_argument() {
        let result = run_with_options(ImportRunOptions {
            paths: Vec::new(),
            home_override: None,
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
        }
    }

    #[test]
    fn missing_activity_file_surfaces_a_coded_error() {
        let dir = tempdir();
        assert!(dir.is_ok());
        let Ok(dir) = dir else {
            return;
        };
        let result = run_with_options(ImportRunOptions {
            paths: vec![PathBuf::from("no-such-activity.csv")],
            home_override: Some(dir.path()),
        });
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "import_file_unreadable");
        }
    }
}
