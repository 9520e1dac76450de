pub mod commands;
pub mod contracts;
pub mod dates;
pub mod error;
pub mod filter;
pub mod import;
pub mod store;
pub mod tagging;
pub mod transaction;

pub use contracts::envelope::{FailureEnvelope, SuccessEnvelope};
pub use error::{CoreError, CoreResult};

pub const API_VERSION: &str = env!("CARGO_PKG_VERSION");
