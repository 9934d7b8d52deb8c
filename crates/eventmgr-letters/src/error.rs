use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LetterError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid attendee id for a letter filename: {0:?}")]
    InvalidId(String),
}

pub type Result<T> = std::result::Result<T, LetterError>;
