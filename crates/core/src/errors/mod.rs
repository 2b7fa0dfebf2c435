//! Error types and Result alias for the AdCrate manager

use thiserror::Error;

/// Main error type for the AdCrate manager
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid claim data: {0}")]
    Validation(String),

    #[error("Remote recorder error: {0}")]
    Transport(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid reward state: {0}")]
    State(String),

    #[error("Unknown reward: {category}/{id}")]
    UnknownReward { category: String, id: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}
