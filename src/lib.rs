//! # lumi-lex
//!
//! lumi-lex turns the text of a ledger file into a stream of typed,
//! line-tagged tokens for a downstream grammar. It never gives up on
//! malformed input: errors are collected in the session and marked by
//! [`TokenKind::Error`] tokens, and lexing continues with the next token.
//!
//! ```
//! use lumi_lex::{lex, Options, TokenKind, Value};
//!
//! let (tokens, errors) = lex("2014-07-05 * \"Coffee\"\n", Options::default());
//! assert!(errors.is_empty());
//! assert_eq!(tokens[0].kind, TokenKind::Date);
//! assert_eq!(tokens[2].value, Some(Value::Str("Coffee".into())));
//! ```
#![doc(html_root_url = "https://docs.rs/lumi-lex/0.1.0")]

mod error;
mod options;
pub mod parse;
pub mod utils;

pub use chrono::NaiveDate as Date;
pub use error::{Error, ErrorType};
pub use options::{Options, DEFAULT_LONG_STRING_MAXLINES};
pub use parse::{LexBuilder, Lexer, Token, TokenKind, Value};
pub use rust_decimal::Decimal;

/// Lexes `src` in a fresh session and returns all tokens together with the
/// errors found.
pub fn lex(src: &str, options: Options) -> (Vec<Token<'_>>, Vec<Error>) {
    let mut lexer = LexBuilder::with_options(options).lex(src);
    let tokens = lexer.by_ref().collect();
    (tokens, lexer.into_errors())
}
