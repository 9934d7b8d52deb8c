use crate::error::{LetterError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// `thanks_<id>.html` for any id without a path separator. The prefix keeps
/// blank and dot ids inside the output directory.
pub fn letter_filename(id: &str) -> Result<String> {
    if id.contains(|ch: char| ch == '/' || ch == '\\') {
        return Err(LetterError::InvalidId(id.to_string()));
    }
    Ok(format!("thanks_{id}.html"))
}

/// Writes one letter per attendee into a single directory.
#[derive(Debug, Clone)]
pub struct LetterWriter {
    dir: PathBuf,
}

impl LetterWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the output directory when needed and replaces
    /// `thanks_<id>.html` with `letter`, newline-terminated.
    pub fn save_thank_you_letter(&self, id: &str, letter: &str) -> Result<PathBuf> {
        let path = self.dir.join(letter_filename(id)?);
        fs::create_dir_all(&self.dir).map_err(|source| LetterError::Write {
            path: self.dir.clone(),
            source,
        })?;

        let mut contents = String::with_capacity(letter.len() + 1);
        contents.push_str(letter);
        if !contents.ends_with('\n') {
            contents.push('\n');
        }

        fs::write(&path, contents).map_err(|source| LetterError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}
