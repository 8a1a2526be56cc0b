use super::Lexer;
use crate::Options;

/// Configures and starts a lexing session.
///
/// ```
/// use lumi_lex::{LexBuilder, TokenKind};
///
/// let mut lexer = LexBuilder::new()
///     .long_string_maxlines(8)
///     .lex("USD,CAD\n");
/// let kinds: Vec<_> = lexer.by_ref().map(|token| token.kind).collect();
/// assert_eq!(kinds[1], TokenKind::Comma);
/// assert!(lexer.errors().is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LexBuilder {
    options: Options,
    first_line: usize,
}

impl Default for LexBuilder {
    fn default() -> Self {
        LexBuilder::with_options(Options::default())
    }
}

impl LexBuilder {
    pub fn new() -> Self {
        LexBuilder::default()
    }

    pub fn with_options(options: Options) -> Self {
        LexBuilder {
            options,
            first_line: 1,
        }
    }

    /// Sets the number of lines a string literal may span. Values below 1
    /// are raised to 1.
    pub fn long_string_maxlines(mut self, maxlines: usize) -> Self {
        self.options.long_string_maxlines = maxlines.max(1);
        self
    }

    /// Sets the number of the first line of the input, e.g., when lexing a
    /// fragment of a larger file.
    pub fn first_line(mut self, line: usize) -> Self {
        self.first_line = line.max(1);
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Starts a session over `src`.
    pub fn lex(self, src: &str) -> Lexer<'_> {
        Lexer::new(src, self.options, self.first_line)
    }
}
