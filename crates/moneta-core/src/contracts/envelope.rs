use serde::Serialize;
use serde_json::Value;

use crate::API_VERSION;
use crate::error::{CoreError, CoreResult};

/// What a command hands back on success: the command name selects the
/// text renderer, `data` is the JSON payload, and `version` stamps the
/// crate version the payload shape belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    pub ok: bool,
    pub command: String,
    pub version: String,
    pub data: Value,
}

/// The machine-readable failure shape, nesting the error under `error`
/// exactly as the CLI's JSON output serializes it.
#[derive(Debug, Clone, Serialize)]
pub struct FailureEnvelope {
    pub ok: bool,
    pub error: ErrorContract,
}

/// A coded error with recovery steps and optional structured context
/// (e.g. a `command_hint` for argument failures).
#[derive(Debug, Clone, Serialize)]
pub struct ErrorContract {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

pub fn success<T>(command: &str, data: T) -> CoreResult<SuccessEnvelope>
where
    T: Serialize,
{
    let json_data = serde_json::to_value(data)
        .map_err(|err| CoreError::internal_serialization(&err.to_string()))?;
    Ok(SuccessEnvelope {
        ok: true,
        command: command.to_string(),
        version: API_VERSION.to_string(),
        data: json_data,
    })
}

impl From<&CoreError> for ErrorContract {
    fn from(error: &CoreError) -> Self {
        Self {
            code: error.code.clone(),
            message: error.message.clone(),
            recovery_steps: error.recovery_steps.clone(),
            data: error.data.clone(),
        }
    }
}

impl From<&CoreError> for FailureEnvelope {
    fn from(error: &CoreError) -> Self {
        Self {
            ok: false,
            error: ErrorContract::from(error),
        }
    }
}
