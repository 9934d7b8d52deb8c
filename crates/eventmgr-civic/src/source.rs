use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const FALLBACK_MESSAGE: &str =
    "You can find your representatives by visiting www.commoncause.org/take-action/find-elected-officials";

/// A representative record as returned by the civic information service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Official {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(default)]
    pub phones: Vec<String>,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
}

/// Outcome of a lookup the caller can always render: the officials, or the
/// fallback text when the service could not place the address.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Legislators {
    Officials(Vec<Official>),
    Unresolved(String),
}

impl Legislators {
    pub fn unresolved() -> Self {
        Legislators::Unresolved(FALLBACK_MESSAGE.to_string())
    }

    pub fn officials(&self) -> &[Official] {
        match self {
            Legislators::Officials(officials) => officials.as_slice(),
            Legislators::Unresolved(_) => &[],
        }
    }

    pub fn fallback(&self) -> Option<&str> {
        match self {
            Legislators::Officials(_) => None,
            Legislators::Unresolved(message) => Some(message.as_str()),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Legislators::Officials(_))
    }
}

pub trait RepresentativeSource {
    fn source_name(&self) -> &'static str;

    /// Looks up the country-level legislators for a normalized ZIP code.
    /// Only an address the service rejects becomes `Legislators::Unresolved`;
    /// every other failure is an error.
    fn legislators_by_zipcode(&self, zipcode: &str) -> Result<Legislators>;
}
