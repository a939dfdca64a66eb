use thiserror::Error;

/// Top-level error type for Argus.
#[derive(Debug, Error)]
pub enum ArgusError {
    /// Missing or malformed config/keywords/superusers file. Fatal at
    /// startup and on reload.
    #[error("config error: {0}")]
    Config(String),

    /// Error from the messaging transport (roster, presence, send).
    #[error("transport error: {0}")]
    Transport(String),

    /// Failure launching or running a requested command.
    #[error("exec error: {0}")]
    Exec(String),

    /// Failure invoking a notification or call sink.
    #[error("sink error: {0}")]
    Sink(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
