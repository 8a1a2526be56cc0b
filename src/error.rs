#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of errors that `lumi-lex` encounters while scanning the input text.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// No lexical rule matches the text at the cursor.
    Lexical,
    /// A rule matched but the text is not a valid value, e.g., an impossible
    /// calendar date or a badly grouped number.
    Conversion,
    /// A construct exceeded a configured bound, e.g., an overly long string.
    ResourceLimit,
}

/// Contains the full information of an error. Errors never abort a lexing
/// pass; each one is paired with an [`Error`](crate::TokenKind::Error) token
/// in the token stream.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Error {
    pub msg: String,
    /// 1-indexed physical line where the offending text begins.
    pub line: usize,
    pub r#type: ErrorType,
}

impl Error {
    /// Formats the error as `file:line: message`.
    pub fn report<'a>(&'a self, file: &'a str) -> impl fmt::Display + 'a {
        Report { file, error: self }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.line, self.msg)
    }
}

struct Report<'a> {
    file: &'a str,
    error: &'a Error,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.error)
    }
}
