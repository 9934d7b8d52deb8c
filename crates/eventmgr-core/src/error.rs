use crate::time::TimeParseError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("attendee {id:?} is missing the {field} column")]
    MissingField { id: String, field: &'static str },
    #[error("attendee {id:?}: {source}")]
    Time {
        id: String,
        #[source]
        source: TimeParseError,
    },
}
