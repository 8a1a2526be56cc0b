use crate::{Date, Decimal};
#[cfg(feature = "serde")]
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Kinds of tokens produced by the [`Lexer`](crate::parse::Lexer).
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Date,
    Eol,
    Indent,
    Account,
    Currency,
    String,
    Number,
    Tag,
    Link,
    Flag,
    Comma,
    /// The offending text of a lexical or conversion error. A matching entry
    /// is recorded in the session's error list.
    Error,

    /// Metadata key, e.g. `filename:`.
    Key,
    Bool,
    Null,
    Pipe,
    At,
    AtAt,
    LCurl,
    LCurlCurl,
    RCurl,
    RCurlCurl,
    Tilde,

    Txn,
    Balance,
    Open,
    Close,
    Commodity,
    Pad,
    Event,
    Price,
    Note,
    Document,
    Query,
    Custom,
    PushTag,
    PopTag,
    PushMeta,
    PopMeta,
    Option,
    Include,
    Plugin,
}

impl TokenKind {
    /// Returns the keyword kind of a lowercase word.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "txn" => TokenKind::Txn,
            "balance" => TokenKind::Balance,
            "open" => TokenKind::Open,
            "close" => TokenKind::Close,
            "commodity" => TokenKind::Commodity,
            "pad" => TokenKind::Pad,
            "event" => TokenKind::Event,
            "price" => TokenKind::Price,
            "note" => TokenKind::Note,
            "document" => TokenKind::Document,
            "query" => TokenKind::Query,
            "custom" => TokenKind::Custom,
            "pushtag" => TokenKind::PushTag,
            "poptag" => TokenKind::PopTag,
            "pushmeta" => TokenKind::PushMeta,
            "popmeta" => TokenKind::PopMeta,
            "option" => TokenKind::Option,
            "include" => TokenKind::Include,
            "plugin" => TokenKind::Plugin,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Date => "DATE",
            TokenKind::Eol => "EOL",
            TokenKind::Indent => "INDENT",
            TokenKind::Account => "ACCOUNT",
            TokenKind::Currency => "CURRENCY",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::Tag => "TAG",
            TokenKind::Link => "LINK",
            TokenKind::Flag => "FLAG",
            TokenKind::Comma => "COMMA",
            TokenKind::Error => "ERROR",
            TokenKind::Key => "KEY",
            TokenKind::Bool => "BOOL",
            TokenKind::Null => "NULL",
            TokenKind::Pipe => "PIPE",
            TokenKind::At => "AT",
            TokenKind::AtAt => "ATAT",
            TokenKind::LCurl => "LCURL",
            TokenKind::LCurlCurl => "LCURLCURL",
            TokenKind::RCurl => "RCURL",
            TokenKind::RCurlCurl => "RCURLCURL",
            TokenKind::Tilde => "TILDE",
            TokenKind::Txn => "TXN",
            TokenKind::Balance => "BALANCE",
            TokenKind::Open => "OPEN",
            TokenKind::Close => "CLOSE",
            TokenKind::Commodity => "COMMODITY",
            TokenKind::Pad => "PAD",
            TokenKind::Event => "EVENT",
            TokenKind::Price => "PRICE",
            TokenKind::Note => "NOTE",
            TokenKind::Document => "DOCUMENT",
            TokenKind::Query => "QUERY",
            TokenKind::Custom => "CUSTOM",
            TokenKind::PushTag => "PUSHTAG",
            TokenKind::PopTag => "POPTAG",
            TokenKind::PushMeta => "PUSHMETA",
            TokenKind::PopMeta => "POPMETA",
            TokenKind::Option => "OPTION",
            TokenKind::Include => "INCLUDE",
            TokenKind::Plugin => "PLUGIN",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The semantic value carried by a [`Token`].
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Value<'source> {
    Date(Date),
    Number(Decimal),
    /// Content of a string literal, without the quotes.
    Str(Cow<'source, str>),
    /// Account path, currency code, or the identifier of a tag, link or key.
    Text(&'source str),
    Bool(bool),
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Date(date) => write!(f, "{}", date),
            Value::Number(number) => write!(f, "{}", number),
            Value::Str(content) => write!(f, "{:?}", content),
            Value::Text(text) => write!(f, "{}", text),
            Value::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

/// A lexical unit: its kind, the line it begins on, the raw matched text and
/// the converted value, if the kind has one.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token<'source> {
    pub kind: TokenKind,
    pub line: usize,
    pub lexeme: &'source str,
    pub value: Option<Value<'source>>,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {:?}", self.line, self.kind, self.lexeme)?;
        if let Some(value) = &self.value {
            write!(f, " {}", value)?;
        }
        Ok(())
    }
}
