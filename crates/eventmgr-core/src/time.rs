use chrono::NaiveDateTime;
use thiserror::Error;

/// Registration timestamps look like `11/12/08 10:47`, with the hour
/// unpadded or space-padded.
pub const REGDATE_FORMAT: &str = "%m/%d/%y %k:%M";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("registration date cannot be empty")]
    Empty,
    #[error("invalid registration date {0:?}: expected MM/DD/YY H:MM")]
    InvalidRegistrationDate(String),
}

pub fn parse_registration_date(input: &str) -> Result<NaiveDateTime, TimeParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TimeParseError::Empty);
    }

    NaiveDateTime::parse_from_str(trimmed, REGDATE_FORMAT)
        .map_err(|_| TimeParseError::InvalidRegistrationDate(trimmed.to_string()))
}
