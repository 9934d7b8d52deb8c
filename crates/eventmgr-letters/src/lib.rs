pub mod error;
pub mod output;
pub mod roster;
pub mod template;

pub use error::{LetterError, Result};
pub use output::{letter_filename, LetterWriter};
pub use roster::Roster;
pub use template::{LetterContext, LetterTemplate};
