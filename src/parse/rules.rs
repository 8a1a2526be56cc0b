use crate::Options;
use logos::{Lexer as LogosLexer, Logos};

/// Outcome of scanning a string literal from its opening quote.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum StringScan {
    /// The closing quote was found; the lexeme covers both quotes.
    Closed,
    /// The literal spans more lines than allowed; only the opening quote is
    /// consumed.
    Overlong,
    /// The input ends before the closing quote; only the opening quote is
    /// consumed.
    Unterminated,
}

/// Lexical shapes recognized at the cursor. Several shapes are broader than
/// the token kinds they produce: the scanner validates and converts them, so
/// that a malformed date or account is reported as a whole instead of being
/// split into unrelated tokens.
#[derive(Debug, PartialEq, Logos, Clone, Copy)]
#[logos(extras = Options)]
pub enum Rule {
    #[regex(r"[ \t]+")]
    WhiteSpace,

    #[regex(r"\r?\n")]
    NewLine,

    #[regex(r";[^\r\n]*")]
    Comment,

    /// Anything starting with four digits and a date separator, including
    /// incomplete shapes like `2013-12` or `2013-`. Every prefix past the
    /// separator is an accepting state; the lexer never backtracks from here
    /// to a shorter number.
    #[regex(r"[0-9][0-9][0-9][0-9][\-/]([0-9]+([\-/][0-9]*)?)?")]
    Date,

    #[regex(r"[\-\+]?[0-9]+(,[0-9]+)*(\.[0-9]*)*")]
    Number,

    /// A number without integer part, e.g. `.25`.
    #[regex(r"[\-\+]?\.[0-9]+")]
    Fraction,

    #[token("\"", scan_string)]
    String(StringScan),

    #[regex(r"#[A-Za-z0-9\-_/.]+")]
    Tag,

    #[regex(r"\^[A-Za-z0-9\-_/.]+")]
    Link,

    #[regex(r"[!&?%*#]")]
    Flag,

    /// Accounts, currencies, single-letter flags and `TRUE`/`FALSE`/`NULL`.
    #[regex(r"[A-Z]([A-Za-z0-9'._:\-]|[^\x00-\x7F])*")]
    Word,

    /// Directive keywords and metadata keys.
    #[regex(r"[a-z][A-Za-z0-9_\-]*:?")]
    Name,

    #[token(",")]
    Comma,

    #[token("|")]
    Pipe,

    #[token("@")]
    At,

    #[token("@@")]
    AtAt,

    #[token("{")]
    LCurl,

    #[token("{{")]
    LCurlCurl,

    #[token("}")]
    RCurl,

    #[token("}}")]
    RCurlCurl,

    #[token("~")]
    Tilde,

    #[error]
    Error,
}

/// Finds the closing quote of a string literal whose opening quote was just
/// matched. Gives up as soon as the literal would span more than
/// `long_string_maxlines` lines, so the scan never runs past that bound.
fn scan_string(lex: &mut LogosLexer<Rule>) -> StringScan {
    let maxlines = lex.extras.long_string_maxlines;
    let mut newlines = 0;
    let mut escaped = false;
    let mut end = None;
    for (index, c) in lex.remainder().char_indices() {
        if c == '\n' {
            newlines += 1;
            if newlines >= maxlines {
                return StringScan::Overlong;
            }
        }
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '"' => {
                end = Some(index + 1);
                break;
            }
            _ => {}
        }
    }
    match end {
        Some(len) => {
            lex.bump(len);
            StringScan::Closed
        }
        None => StringScan::Unterminated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(src: &str) -> Vec<(Rule, &str)> {
        let mut lex = Rule::lexer(src);
        let mut result = vec![];
        while let Some(rule) = lex.next() {
            result.push((rule, lex.slice()));
        }
        result
    }

    #[test]
    fn date_shapes_win_over_numbers() {
        assert_eq!(rules("2013-12-228"), vec![(Rule::Date, "2013-12-228")]);
        assert_eq!(rules("2014/01/02"), vec![(Rule::Date, "2014/01/02")]);
        assert_eq!(rules("2013-12"), vec![(Rule::Date, "2013-12")]);
        assert_eq!(rules("1234-56-"), vec![(Rule::Date, "1234-56-")]);
        assert_eq!(
            rules("2014/ 12345-6"),
            vec![
                (Rule::Date, "2014/"),
                (Rule::WhiteSpace, " "),
                (Rule::Number, "12345"),
                (Rule::Number, "-6"),
            ]
        );
    }

    #[test]
    fn numbers_keep_grouping_and_dots() {
        assert_eq!(rules("1,002.00"), vec![(Rule::Number, "1,002.00")]);
        assert_eq!(rules("1.234.00"), vec![(Rule::Number, "1.234.00")]);
        assert_eq!(rules(".2347"), vec![(Rule::Fraction, ".2347")]);
        assert_eq!(
            rules("10,USD"),
            vec![(Rule::Number, "10"), (Rule::Comma, ","), (Rule::Word, "USD")]
        );
    }

    #[test]
    fn strings_span_lines() {
        assert_eq!(
            rules("\"a\nb\" x"),
            vec![
                (Rule::String(StringScan::Closed), "\"a\nb\""),
                (Rule::WhiteSpace, " "),
                (Rule::Name, "x"),
            ]
        );
        assert_eq!(
            rules(r#""say \"hi\"""#),
            vec![(Rule::String(StringScan::Closed), r#""say \"hi\"""#)]
        );
    }

    #[test]
    fn strings_give_up_past_the_line_bound() {
        let mut lex = Rule::lexer_with_extras(
            "\"\n\n\n\"",
            Options {
                long_string_maxlines: 3,
            },
        );
        assert_eq!(lex.next(), Some(Rule::String(StringScan::Overlong)));
        assert_eq!(lex.slice(), "\"");

        let mut lex = Rule::lexer("\"open");
        assert_eq!(lex.next(), Some(Rule::String(StringScan::Unterminated)));
        assert_eq!(lex.slice(), "\"");
    }

    #[test]
    fn tags_and_flags() {
        assert_eq!(rules("#tag"), vec![(Rule::Tag, "#tag")]);
        assert_eq!(rules("#"), vec![(Rule::Flag, "#")]);
        assert_eq!(rules("^link-1"), vec![(Rule::Link, "^link-1")]);
        assert_eq!(rules("@@"), vec![(Rule::AtAt, "@@")]);
        assert_eq!(rules("{{"), vec![(Rule::LCurlCurl, "{{")]);
    }
}
