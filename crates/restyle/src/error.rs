use thiserror::Error;

#[derive(Error, Debug)]
pub enum RestyleError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Injection failed: {0}")]
    Injection(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl RestyleError {
    /// True for failures coming from the persistence layer.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            RestyleError::Io(_) | RestyleError::Serialization(_) | RestyleError::Store(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RestyleError>;
