use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open input file {path}: {source}")]
    OpenInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Export decoding error: {0}")]
    Decode(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Identifier construction failed: {0}")]
    Identity(String),

    #[error("Invalid tracking pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Publish rejected with HTTP {status}: {body}")]
    PublishRejected { status: u16, body: String },

    #[error("Save error reported by remote service: {codes:?} {message}")]
    SaveError { codes: Vec<String>, message: String },

    #[error("No API key configured (use --api-key, OMNIVORE_API_KEY or the config file)")]
    MissingApiKey,
}

impl MigrateError {
    /// Errors that must abort the whole run rather than a single note or file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            MigrateError::OpenInput { .. } | MigrateError::Identity(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, MigrateError>;
