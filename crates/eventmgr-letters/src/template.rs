use crate::error::{LetterError, Result};
use eventmgr_civic::{Legislators, Official};
use minijinja::Environment;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const LETTER: &str = "letter";

/// Everything a letter template may reference.
#[derive(Debug, Serialize)]
pub struct LetterContext<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub first_name: &'a str,
    pub zipcode: &'a str,
    pub phone: &'a str,
    pub legislators: &'a Legislators,
    pub officials: &'a [Official],
    pub fallback: Option<&'a str>,
    pub attendee: &'a BTreeMap<String, String>,
}

/// A compiled letter template. Values are inserted as-is, without escaping.
pub struct LetterTemplate {
    env: Environment<'static>,
}

impl LetterTemplate {
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| LetterError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::compile(source)
    }

    pub fn compile(source: String) -> Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.add_template_owned(LETTER, source)?;
        Ok(Self { env })
    }

    pub fn render(&self, context: &LetterContext<'_>) -> Result<String> {
        let template = self.env.get_template(LETTER)?;
        Ok(template.render(context)?)
    }
}
