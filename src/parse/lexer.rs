use super::rules::{Rule, StringScan};
use super::token::{Token, TokenKind, Value};
use crate::utils::{parse_date, parse_number, unquote};
use crate::{Error, ErrorType, Options};
use getset::{CopyGetters, Getters};
use logos::{Lexer as LogosLexer, Logos};

/// Single-letter flags, besides the punctuation flags.
const LETTER_FLAGS: &str = "PSTCURM";

/// A lexing session over one input buffer.
///
/// The session is an iterator of [`Token`]s. Malformed input never stops it:
/// every failure is recorded in [`errors`](Lexer::errors) and shows up as a
/// [`TokenKind::Error`] token at the failure site. A session cannot be
/// restarted; lexing the text again requires a new one.
#[derive(Getters, CopyGetters)]
pub struct Lexer<'source> {
    llex: LogosLexer<'source, Rule>,

    /// Returns the errors collected so far, in detection order.
    #[getset(get = "pub")]
    errors: Vec<Error>,

    /// Returns the current physical line.
    #[getset(get_copy = "pub")]
    line: usize,

    line_start: bool,
    seen_token: bool,
}

impl<'source> Lexer<'source> {
    pub fn new(src: &'source str, mut options: Options, first_line: usize) -> Self {
        options.long_string_maxlines = options.long_string_maxlines.max(1);
        log::trace!(
            "lexing {} bytes from line {}, long_string_maxlines = {}",
            src.len(),
            first_line,
            options.long_string_maxlines
        );
        Lexer {
            llex: Rule::lexer_with_extras(src, options),
            errors: Vec::new(),
            line: first_line,
            line_start: true,
            seen_token: false,
        }
    }

    /// Returns the options of this session.
    pub fn options(&self) -> &Options {
        &self.llex.extras
    }

    /// Consumes the session and returns its errors.
    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }

    fn token(
        &mut self,
        kind: TokenKind,
        lexeme: &'source str,
        value: Option<Value<'source>>,
    ) -> Token<'source> {
        if kind != TokenKind::Eol && kind != TokenKind::Indent {
            self.seen_token = true;
        }
        Token {
            kind,
            line: self.line,
            lexeme,
            value,
        }
    }

    fn error(&mut self, r#type: ErrorType, lexeme: &'source str, msg: String) -> Token<'source> {
        log::debug!("line {}: {}", self.line, msg);
        self.errors.push(Error {
            msg,
            line: self.line,
            r#type,
        });
        self.token(TokenKind::Error, lexeme, None)
    }

    /// Extends the current match to the end of its non-blank run and returns
    /// the whole run.
    fn skip_run(&mut self) -> &'source str {
        let start = self.llex.span().start;
        let end = self.llex.span().end;
        let src = self.llex.source();
        let rest = &src[start..];
        let first_len = rest.chars().next().map_or(0, char::len_utf8);
        let run_len = rest
            .find(|c: char| matches!(c, ' ' | '\t' | '\r' | '\n'))
            .unwrap_or(rest.len())
            .max(first_len);
        if start + run_len > end {
            self.llex.bump(start + run_len - end);
        }
        &src[start..self.llex.span().end]
    }

    /// Reports the text at the cursor as an erroneous token. The error token
    /// covers only the first character, but the rest of the run is skipped.
    fn erroneous(&mut self) -> Token<'source> {
        let run = self.skip_run();
        let first_len = run.chars().next().map_or(0, char::len_utf8);
        self.error(
            ErrorType::Lexical,
            &run[..first_len],
            format!("Erroneous token '{}'", run),
        )
    }

    fn at_content(&self) -> bool {
        !matches!(
            self.llex.remainder().chars().next(),
            None | Some('\r' | '\n' | ';')
        )
    }

    fn string(&mut self, scan: StringScan, lexeme: &'source str) -> Token<'source> {
        match scan {
            StringScan::Closed => {
                let value = Value::Str(unquote(lexeme));
                let token = self.token(TokenKind::String, lexeme, Some(value));
                self.line += lexeme.matches('\n').count();
                token
            }
            StringScan::Overlong => {
                let maxlines = self.options().long_string_maxlines;
                self.error(
                    ErrorType::ResourceLimit,
                    lexeme,
                    format!("Overly long string: spans more than {} lines", maxlines),
                )
            }
            StringScan::Unterminated => self.error(
                ErrorType::Lexical,
                lexeme,
                "Unterminated string".to_string(),
            ),
        }
    }

    fn word(&mut self, word: &'source str) -> Token<'source> {
        if word.contains(':') {
            return match invalid_account_component(word) {
                None => self.token(TokenKind::Account, word, Some(Value::Text(word))),
                Some(component) => {
                    self.skip_run();
                    self.error(
                        ErrorType::Lexical,
                        component,
                        format!("Invalid account '{}': erroneous token '{}'", word, component),
                    )
                }
            };
        }
        match word {
            "TRUE" => self.token(TokenKind::Bool, word, Some(Value::Bool(true))),
            "FALSE" => self.token(TokenKind::Bool, word, Some(Value::Bool(false))),
            "NULL" => self.token(TokenKind::Null, word, None),
            _ if word.len() == 1 && LETTER_FLAGS.contains(word) => {
                self.token(TokenKind::Flag, word, None)
            }
            _ if is_currency(word) => {
                self.token(TokenKind::Currency, word, Some(Value::Text(word)))
            }
            _ => self.erroneous(),
        }
    }

    fn name(&mut self, name: &'source str) -> Token<'source> {
        if let Some(key) = name.strip_suffix(':') {
            return self.token(TokenKind::Key, name, Some(Value::Text(key)));
        }
        match TokenKind::keyword(name) {
            Some(kind) => self.token(kind, name, None),
            None => self.erroneous(),
        }
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Token<'source>;

    fn next(&mut self) -> Option<Token<'source>> {
        loop {
            let rule = self.llex.next()?;
            // The span of an error may end inside a multi-byte character.
            let text = match rule {
                Rule::Error => "",
                _ => self.llex.slice(),
            };
            let line_start = std::mem::replace(&mut self.line_start, false);
            let token = match rule {
                Rule::WhiteSpace => {
                    if line_start && self.seen_token && self.at_content() {
                        self.token(TokenKind::Indent, text, None)
                    } else {
                        continue;
                    }
                }
                Rule::Comment => continue,
                Rule::NewLine => {
                    let token = self.token(TokenKind::Eol, text, None);
                    self.line += 1;
                    self.line_start = true;
                    token
                }
                Rule::Date => match parse_date(text) {
                    Ok(date) => self.token(TokenKind::Date, text, Some(Value::Date(date))),
                    Err(e) => self.error(
                        ErrorType::Conversion,
                        text,
                        format!("Invalid date '{}': {}", text, e),
                    ),
                },
                Rule::Number | Rule::Fraction => match parse_number(text) {
                    Ok(number) => self.token(TokenKind::Number, text, Some(Value::Number(number))),
                    Err(e) => self.error(
                        ErrorType::Conversion,
                        text,
                        format!("Invalid number '{}': {}", text, e),
                    ),
                },
                Rule::String(scan) => self.string(scan, text),
                Rule::Tag => self.token(TokenKind::Tag, text, Some(Value::Text(&text[1..]))),
                Rule::Link => self.token(TokenKind::Link, text, Some(Value::Text(&text[1..]))),
                Rule::Flag => self.token(TokenKind::Flag, text, None),
                Rule::Word => self.word(text),
                Rule::Name => self.name(text),
                Rule::Comma => self.token(TokenKind::Comma, text, None),
                Rule::Pipe => self.token(TokenKind::Pipe, text, None),
                Rule::At => self.token(TokenKind::At, text, None),
                Rule::AtAt => self.token(TokenKind::AtAt, text, None),
                Rule::LCurl => self.token(TokenKind::LCurl, text, None),
                Rule::LCurlCurl => self.token(TokenKind::LCurlCurl, text, None),
                Rule::RCurl => self.token(TokenKind::RCurl, text, None),
                Rule::RCurlCurl => self.token(TokenKind::RCurlCurl, text, None),
                Rule::Tilde => self.token(TokenKind::Tilde, text, None),
                Rule::Error => self.erroneous(),
            };
            return Some(token);
        }
    }
}

/// Returns the first component of an account path that is not valid, or the
/// colon before it if the component is empty.
///
/// Every component must have at least two characters. The first one starts
/// with an uppercase letter (the remaining ones may also start with a digit),
/// and the rest are letters, digits or `-`. Non-ASCII letters are allowed
/// anywhere.
fn invalid_account_component(account: &str) -> Option<&str> {
    let mut offset = 0;
    for component in account.split(':') {
        let mut chars = component.chars();
        let valid = match chars.next() {
            Some(first) => {
                (first.is_ascii_uppercase() || first.is_ascii_digit() || !first.is_ascii())
                    && chars.clone().all(|c| c.is_ascii_alphanumeric() || c == '-' || !c.is_ascii())
                    && chars.count() >= 1
            }
            None => false,
        };
        if !valid {
            return Some(if component.is_empty() {
                &account[offset - 1..offset]
            } else {
                component
            });
        }
        offset += component.len() + 1;
    }
    None
}

/// Currencies start with an uppercase letter, end with an uppercase letter or
/// a digit, and have uppercase letters, digits, `'`, `.`, `_` or `-` in
/// between.
fn is_currency(word: &str) -> bool {
    let bytes = word.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) if bytes.len() >= 2 => {
            first.is_ascii_uppercase()
                && (last.is_ascii_uppercase() || last.is_ascii_digit())
                && bytes
                    .iter()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b"'._-".contains(b))
        }
        _ => false,
    }
}
