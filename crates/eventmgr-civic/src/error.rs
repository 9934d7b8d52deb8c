use thiserror::Error;

#[derive(Debug, Error)]
pub enum CivicError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("civic api rejected the api key (status {0})")]
    Unauthorized(u16),
    #[error("civic api rate limit exceeded")]
    RateLimited,
    #[error("civic api returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid civic api url: {0}")]
    Url(String),
    #[error("parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, CivicError>;
