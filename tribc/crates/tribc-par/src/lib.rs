//! tribc-par - Recursive-descent parser for the Tribhasha language.
//!
//! The parser consumes the token sequence produced by `tribc-lex` and
//! builds the statement/expression tree defined in [`ast`]. Keyword roles
//! are matched independently of surface language, so `if`, `अगर`, and
//! `যদি` all begin an if statement.
//!
//! Parse errors are reported through the diagnostic handler and raised as
//! a recoverable [`ParseError`] at the production level. The top-level
//! declaration loop catches them and synchronizes to the next plausible
//! statement boundary, so one malformed declaration does not hide
//! diagnostics for the rest of the file.

pub mod ast;
mod expr;
pub mod printer;
mod stmt;

pub use ast::{Expr, LiteralKind, Stmt};
pub use printer::print_program;

use tribc_lex::{KeywordRole, Token, TokenKind};
use tribc_util::Handler;

/// A non-fatal parse failure.
///
/// The diagnostic has already been reported through the handler when this
/// value is constructed; it exists only to unwind the current production
/// back to the recovery point.
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
}

pub(crate) type ParseResult<T> = Result<T, ParseError>;

/// The Tribhasha parser. One instance per compilation; it owns the token
/// vector for its lifetime.
///
/// # Example
///
/// ```
/// use tribc_lex::Lexer;
/// use tribc_par::Parser;
/// use tribc_util::Handler;
///
/// let mut handler = Handler::new();
/// let tokens = Lexer::new("var x = 10;", &mut handler).scan_tokens();
/// let statements = Parser::new(tokens, &mut handler).parse();
///
/// assert_eq!(statements.len(), 1);
/// assert!(!handler.has_errors());
/// ```
pub struct Parser<'a> {
    tokens: Vec<Token>,
    current: usize,
    handler: &'a mut Handler,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, handler: &'a mut Handler) -> Self {
        Self {
            tokens,
            current: 0,
            handler,
        }
    }

    /// Parses the whole token sequence into a list of top-level
    /// statements.
    ///
    /// A parse error inside one declaration discards tokens up to the
    /// next statement boundary and parsing continues, so the result
    /// contains every well-formed top-level declaration in the source.
    pub fn parse(&mut self) -> Vec<Stmt> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            match self.declaration() {
                Ok(stmt) => statements.push(stmt),
                Err(_) => self.synchronize(),
            }
        }

        statements
    }

    // Token-buffer helpers

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    /// True if the next token is the given keyword role in any language.
    fn check_role(&self, role: KeywordRole) -> bool {
        self.peek().kind.keyword_role() == Some(role)
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_any(&mut self, kinds: &[TokenKind]) -> bool {
        for &kind in kinds {
            if self.matches(kind) {
                return true;
            }
        }
        false
    }

    /// Consumes the next token if it is the given keyword role in any
    /// language variant.
    fn match_role(&mut self, role: KeywordRole) -> bool {
        if self.check_role(role) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(kind) {
            return Ok(self.advance().clone());
        }
        Err(self.error_at_peek(message))
    }

    // Error reporting and recovery

    /// Reports a parse error against a specific token and returns the
    /// recoverable signal for the caller to raise.
    fn report(&mut self, token: &Token, message: &str) -> ParseError {
        let location = if token.kind == TokenKind::Eof {
            "end".to_string()
        } else {
            format!("'{}'", token.lexeme)
        };
        self.handler.error_at(token.line, location, message);
        ParseError {
            message: message.to_string(),
        }
    }

    fn error_at_peek(&mut self, message: &str) -> ParseError {
        let token = self.peek().clone();
        self.report(&token, message)
    }

    /// Panic-mode recovery: discard tokens until just past a semicolon or
    /// until the next token begins a declaration or statement, whichever
    /// comes first. Keyword roles match in any language.
    fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }

            if matches!(
                self.peek().kind.keyword_role(),
                Some(
                    KeywordRole::Var
                        | KeywordRole::Function
                        | KeywordRole::If
                        | KeywordRole::While
                        | KeywordRole::For
                        | KeywordRole::Return
                )
            ) {
                return;
            }

            self.advance();
        }
    }
}
