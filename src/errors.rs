use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed source: {0}")]
    MalformedSource(String),

    #[error("Toggle lookup error: {0}")]
    ToggleLookup(String),

    #[error("Acquisition error: {0}")]
    Acquisition(String),

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Folds a mid-resolution failure into an acquisition error, keeping the step that failed.
    pub fn into_acquisition(self, step: &str) -> Self {
        match self {
            AppError::Acquisition(msg) => AppError::Acquisition(msg),
            other => AppError::Acquisition(format!("{}: {}", step, other)),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
