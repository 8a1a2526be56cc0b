#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default upper bound of physical lines a string literal may span.
pub const DEFAULT_LONG_STRING_MAXLINES: usize = 64;

const MAXLINES_ENV: &str = "LUMI_LONG_STRING_MAXLINES";

/// Options of a lexing session.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// A string literal spanning more lines than this is reported as an
    /// error and abandoned. Always at least 1.
    pub long_string_maxlines: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            long_string_maxlines: DEFAULT_LONG_STRING_MAXLINES,
        }
    }
}

impl Options {
    /// Returns the default options, with `long_string_maxlines` overridden by
    /// the `LUMI_LONG_STRING_MAXLINES` environment variable if it is set to
    /// a valid number.
    pub fn from_env() -> Self {
        let mut options = Options::default();
        if let Some(num) = std::env::var(MAXLINES_ENV)
            .ok()
            .and_then(|num| num.parse::<usize>().ok())
        {
            options.long_string_maxlines = num.max(1);
        }
        options
    }
}
