use serde::Serialize;
use std::collections::BTreeMap;

const PHONE_KEYS: [&str; 3] = ["homephone", "phone_number", "phone"];

/// One roster row: the value of the first column plus every column keyed by
/// its symbolized header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attendee {
    id: String,
    fields: BTreeMap<String, String>,
}

impl Attendee {
    pub fn new(id: impl Into<String>, fields: BTreeMap<String, String>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Builds an attendee from symbolized keys and the row's values, in
    /// column order. The first column supplies the id; a key seen twice keeps
    /// its first value.
    pub fn from_columns<'a, K, V>(keys: K, values: V) -> Self
    where
        K: IntoIterator<Item = &'a str>,
        V: IntoIterator<Item = &'a str>,
    {
        let mut id = None;
        let mut fields = BTreeMap::new();
        for (key, value) in keys.into_iter().zip(values) {
            if id.is_none() {
                id = Some(value.to_string());
            }
            fields
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }
        Self::new(id.unwrap_or_default(), fields)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn first_name(&self) -> Option<&str> {
        self.get("first_name")
    }

    pub fn zipcode(&self) -> Option<&str> {
        self.get("zipcode")
    }

    pub fn phone(&self) -> Option<&str> {
        PHONE_KEYS.iter().find_map(|key| self.get(key))
    }

    pub fn regdate(&self) -> Option<&str> {
        self.get("regdate")
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }
}

/// Turns a CSV header into a lookup key: lowercase, word characters only,
/// whitespace runs collapsed to `_`.
pub fn symbolize_header(header: &str) -> String {
    let kept: String = header
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_whitespace() || ch.is_ascii_alphanumeric() || *ch == '_')
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join("_")
}
