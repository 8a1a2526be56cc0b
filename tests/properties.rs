//! Property-based tests for the lexer: invariants that hold for any input.

use lumi_lex::{lex, LexBuilder, Options, TokenKind};
use proptest::prelude::*;

fn options() -> Options {
    Options {
        long_string_maxlines: 8,
    }
}

proptest! {
    /// Without string literals, every line break yields exactly one EOL
    /// token carrying the number of the line it ends.
    #[test]
    fn eol_tokens_match_line_breaks(src in "[A-Za-z0-9:,.#^@{}*!;/_' \t\n-]{0,200}") {
        let (tokens, _) = lex(&src, options());
        let eols: Vec<_> = tokens.iter().filter(|token| token.kind == TokenKind::Eol).collect();
        prop_assert_eq!(eols.len(), src.matches('\n').count());
        for (index, eol) in eols.iter().enumerate() {
            prop_assert_eq!(eol.line, index + 1);
        }
    }

    #[test]
    fn lexing_is_deterministic(src in any::<String>()) {
        let first = lex(&src, options());
        let second = lex(&src, options());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn one_error_per_error_token(src in any::<String>()) {
        let mut lexer = LexBuilder::with_options(options()).lex(&src);
        let num_error_tokens = lexer
            .by_ref()
            .filter(|token| token.kind == TokenKind::Error)
            .count();
        prop_assert_eq!(num_error_tokens, lexer.errors().len());
    }

    /// Every token covers a non-empty slice of the input, and the slices move
    /// strictly forward.
    #[test]
    fn lexemes_advance_through_input(src in "\\PC{0,120}") {
        let (tokens, _) = lex(&src, options());
        let base = src.as_ptr() as usize;
        let mut cursor = 0;
        for token in &tokens {
            prop_assert!(!token.lexeme.is_empty());
            let start = token.lexeme.as_ptr() as usize - base;
            prop_assert!(start >= cursor);
            cursor = start + token.lexeme.len();
            prop_assert!(cursor <= src.len());
        }
    }

    #[test]
    fn grouped_numbers_round_trip(n in 0u64..1_000_000_000_000, cents in 0u32..100) {
        let mut grouped = String::new();
        let digits = n.to_string();
        for (index, digit) in digits.chars().enumerate() {
            if index > 0 && (digits.len() - index) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }
        let src = format!("{}.{:02} USD\n", grouped, cents);
        let (tokens, errors) = lex(&src, options());
        prop_assert!(errors.is_empty());
        let expected = format!("{}.{:02}", n, cents);
        prop_assert_eq!(
            tokens[0].value.as_ref().map(|value| value.to_string()),
            Some(expected)
        );
    }
}
