use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloudAuditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Model service error: {0}")]
    External(String),
}

pub type Result<T> = std::result::Result<T, CloudAuditError>;
