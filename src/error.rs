use std::num::ParseFloatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("HTTP transport error: {0}")]
    Transport(String),

    #[error("Unexpected HTTP status: expected {expected}, got {actual}")]
    UnexpectedStatus { expected: u16, actual: u16 },

    #[error("Login page did not contain the ccf_nonce field")]
    MissingNonce,

    #[error("Login rejected with HTTP status {status}")]
    LoginRejected { status: u16 },

    #[error("JSON error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to parse {field} value {value:?}: {source}")]
    FieldParse {
        field: &'static str,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("SmartOilGauge API error: {0}")]
    RemoteError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ExporterError {
    fn from(err: reqwest::Error) -> Self {
        ExporterError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ExporterError>;
