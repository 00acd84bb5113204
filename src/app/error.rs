use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] rusqlite_migration::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Launch not found: {0}")]
    LaunchNotFound(String),

    #[error("{0}")]
    Other(String),
}

impl From<crate::config::ConfigError> for AtlasError {
    fn from(err: crate::config::ConfigError) -> Self {
        AtlasError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AtlasError>;
