use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("[{status}] {error_type}: {reason}")]
    Engine {
        status: u16,
        error_type: String,
        reason: String,
    },
    #[error("search engine unreachable: {0}")]
    Transport(String),
    #[error("failed to decode engine response: {0}")]
    Decode(String),
    #[error("internal error: {0}")]
    Internal(String),
}
