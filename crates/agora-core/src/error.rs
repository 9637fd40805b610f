use thiserror::Error;

/// Top-level error type for the Agora system.
///
/// Subsystem crates define their own error types and wrap this one with
/// `#[from]` so that the `?` operator works across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AgoraError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for AgoraError {
    fn from(err: toml::de::Error) -> Self {
        AgoraError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for AgoraError {
    fn from(err: toml::ser::Error) -> Self {
        AgoraError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for AgoraError {
    fn from(err: serde_json::Error) -> Self {
        AgoraError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Agora operations.
pub type Result<T> = std::result::Result<T, AgoraError>;
