use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not a git repository: {0}")]
    NotARepository(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{command} failed: {message}")]
    Tool { command: String, message: String },

    #[error("Failed for {} of {} file(s): {}", .failed.len(), .outcomes.len(), .failed.join(", "))]
    PartialFailure {
        failed: Vec<String>,
        outcomes: Vec<crate::actions::FileOutcome>,
    },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashError>;
