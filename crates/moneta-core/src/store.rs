use std::fs;
use std::path::{Path, PathBuf};

use crate::transaction::Transaction;
use crate::{CoreError, CoreResult};

const STORE_FILE_NAME: &str = "transactions.json";

/// Resolves the directory holding the transaction store: an explicit
/// override first, then `MONETA_HOME`, then `~/.moneta`. The path is always
/// passed around explicitly from here on; nothing holds it as process-wide
/// state.
pub fn resolve_store_home(home_override: Option<&Path>) -> CoreResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os("MONETA_HOME") {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(".moneta")
            } else {
                return Err(CoreError::home_unresolved());
            }
        }
    };

    absolutize(&candidate)
}

pub fn store_file_path(home: &Path) -> PathBuf {
    home.join(STORE_FILE_NAME)
}

pub fn resolve_store_path(home_override: Option<&Path>) -> CoreResult<PathBuf> {
    Ok(store_file_path(&resolve_store_home(home_override)?))
}

/// Reads and decodes the whole store. A missing file is a coded error with
/// recovery steps, not a silent empty collection.
pub fn load_transactions(path: &Path) -> CoreResult<Vec<Transaction>> {
    let content = fs::read_to_string(path).map_err(|error| {
        if error.kind() == std::io::ErrorKind::NotFound {
            CoreError::store_missing(path)
        } else {
            CoreError::store_io(path, &error.to_string())
        }
    })?;

    serde_json::from_str::<Vec<Transaction>>(&content)
        .map_err(|error| CoreError::store_corrupt(path, &error.to_string()))
}

/// Rewrites the whole store in place, creating the parent directory on
/// first use.
pub fn store_transactions(path: &Path, transactions: &[Transaction]) -> CoreResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| CoreError::store_io(parent, &error.to_string()))?;
    }

    let body = serde_json::to_string_pretty(transactions)
        .map_err(|error| CoreError::internal_serialization(&error.to_string()))?;

    fs::write(path, body).map_err(|error| CoreError::store_io(path, &error.to_string()))
}

fn absolutize(path: &Path) -> CoreResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|_| CoreError::home_unresolved())
}
