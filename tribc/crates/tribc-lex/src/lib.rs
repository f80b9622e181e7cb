//! tribc-lex - Lexical analysis for the Tribhasha language.
//!
//! The scanner turns UTF-8 source text into a flat, line-numbered token
//! stream. Tribhasha keywords may be written in English, Hindi
//! (Devanagari), or Assamese (Bengali-Assamese script) and mixed freely;
//! each keyword lexeme resolves through a single process-wide table into a
//! kind that carries both its canonical role and its surface language.

pub mod cursor;
pub mod keywords;
pub mod lexer;
pub mod token;
pub mod unicode;

pub use keywords::{canonical, is_keyword, lookup};
pub use lexer::Lexer;
pub use token::{KeywordRole, Lang, Token, TokenKind};
