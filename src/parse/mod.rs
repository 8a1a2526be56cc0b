mod builder;
mod lexer;
mod rules;
mod token;

pub use builder::LexBuilder;
pub use lexer::Lexer;
pub use token::{Token, TokenKind, Value};
