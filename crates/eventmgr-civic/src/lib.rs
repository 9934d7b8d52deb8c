pub mod client;
pub mod error;
pub mod source;

pub use client::{classify_status, CivicClient, StatusClass};
pub use error::{CivicError, Result};
pub use source::{Legislators, Official, RepresentativeSource, FALLBACK_MESSAGE};
