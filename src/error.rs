use std::path::PathBuf;
use thiserror::Error;

pub type ConvertResult<T> = Result<T, ConvertError>;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Duplicate key '{key}': headers '{first}' and '{second}' normalize to the same name")]
    DuplicateKey {
        key: String,
        first: String,
        second: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConvertError {
    /// True for the "input could not be located" family of errors
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConvertError::NotFound(_))
    }
}
