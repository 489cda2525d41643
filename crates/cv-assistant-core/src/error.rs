use thiserror::Error;

/// Rejections from the conversation store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConversationError {
    #[error("message is empty")]
    EmptyMessage,
}

/// Failures of the outbound call to the answer service.
///
/// None of these reach the visitor; the session swaps them for a fixed
/// fallback message and logs the cause.
#[derive(Debug, Error)]
pub enum AskError {
    #[error("request to answer service failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("answer service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("could not decode answer body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("response has no answer field")]
    MissingAnswer,

    #[error("answer task did not finish: {0}")]
    TaskFailed(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
}
