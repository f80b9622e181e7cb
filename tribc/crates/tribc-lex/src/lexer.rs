//! The Tribhasha scanner.
//!
//! Transforms UTF-8 source text into an ordered token sequence terminated
//! by a single end-of-input token. Identifiers may span Latin, Devanagari,
//! and Bengali-Assamese codepoints; completed identifier lexemes resolve
//! through the keyword table. Lexical errors are reported through the
//! diagnostic handler and never abort scanning.

use tribc_util::Handler;

use crate::cursor::Cursor;
use crate::keywords;
use crate::token::{Token, TokenKind};
use crate::unicode::{is_ident_continue, is_ident_start};

/// The scanner. One instance per compilation.
///
/// # Example
///
/// ```
/// use tribc_lex::{Lexer, TokenKind};
/// use tribc_util::Handler;
///
/// let mut handler = Handler::new();
/// let tokens = Lexer::new("var x = 42;", &mut handler).scan_tokens();
///
/// assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof);
/// assert!(!handler.has_errors());
/// ```
pub struct Lexer<'a> {
    /// Character cursor over the source.
    cursor: Cursor<'a>,

    /// Diagnostic sink for lexical errors.
    handler: &'a mut Handler,

    /// Accumulated output.
    tokens: Vec<Token>,

    /// Byte position where the current lexeme starts.
    token_start: usize,

    /// Line the current lexeme starts on.
    token_start_line: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, handler: &'a mut Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            tokens: Vec::new(),
            token_start: 0,
            token_start_line: 1,
        }
    }

    /// Scans the entire source, returning the token sequence.
    ///
    /// The result always ends with exactly one [`TokenKind::Eof`] token,
    /// whatever errors were encountered along the way.
    pub fn scan_tokens(mut self) -> Vec<Token> {
        while !self.cursor.is_at_end() {
            // We are at the beginning of the next lexeme
            self.token_start = self.cursor.position();
            self.token_start_line = self.cursor.line();
            self.scan_token();
        }

        let line = self.cursor.line();
        self.tokens.push(Token::new(TokenKind::Eof, "", line));
        self.tokens
    }

    /// Scans a single lexeme, dispatching on its first character.
    fn scan_token(&mut self) {
        let c = self.cursor.current_char();
        self.cursor.advance();

        match c {
            // Single-character tokens
            '(' => self.add_token(TokenKind::LParen),
            ')' => self.add_token(TokenKind::RParen),
            '{' => self.add_token(TokenKind::LBrace),
            '}' => self.add_token(TokenKind::RBrace),
            '[' => self.add_token(TokenKind::LBracket),
            ']' => self.add_token(TokenKind::RBracket),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            ':' => self.add_token(TokenKind::Colon),
            '*' => self.add_token(TokenKind::Star),
            '%' => self.add_token(TokenKind::Percent),

            // One or two character tokens
            '!' => {
                let kind = if self.cursor.match_char('=') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                };
                self.add_token(kind);
            }
            '=' => {
                let kind = if self.cursor.match_char('=') {
                    TokenKind::EqEq
                } else {
                    TokenKind::Eq
                };
                self.add_token(kind);
            }
            '<' => {
                let kind = if self.cursor.match_char('=') {
                    TokenKind::LessEq
                } else {
                    TokenKind::Less
                };
                self.add_token(kind);
            }
            '>' => {
                let kind = if self.cursor.match_char('=') {
                    TokenKind::GreaterEq
                } else {
                    TokenKind::Greater
                };
                self.add_token(kind);
            }

            // Division or line comment
            '/' => {
                if self.cursor.match_char('/') {
                    // A comment goes until the end of the line
                    while self.cursor.current_char() != '\n' && !self.cursor.is_at_end() {
                        self.cursor.advance();
                    }
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            // Whitespace; the cursor already counted any newline
            ' ' | '\r' | '\t' | '\n' => {}

            // String literals
            '"' => self.scan_string(),

            c if c.is_ascii_digit() => self.scan_number(),
            c if is_ident_start(c) => self.scan_identifier(),

            _ => {
                self.handler
                    .error(self.token_start_line, "Unexpected character.");
                self.add_token(TokenKind::Error);
            }
        }
    }

    /// Scans a string literal. The opening quote is already consumed.
    ///
    /// Newlines inside the literal advance the line counter. The emitted
    /// lexeme excludes the surrounding quotes. An unterminated literal
    /// reports on the opening line and produces no token.
    fn scan_string(&mut self) {
        while self.cursor.current_char() != '"' && !self.cursor.is_at_end() {
            self.cursor.advance();
        }

        if self.cursor.is_at_end() {
            self.handler
                .error(self.token_start_line, "Unterminated string.");
            return;
        }

        // The closing "
        self.cursor.advance();

        // Trim the surrounding quotes
        let full = self.cursor.slice_from(self.token_start);
        let value = &full[1..full.len() - 1];
        self.tokens.push(Token::new(
            TokenKind::StringLiteral,
            value,
            self.token_start_line,
        ));
    }

    /// Scans a number literal. The first digit is already consumed.
    ///
    /// A fractional part is consumed only when the character after the dot
    /// is itself a digit, so `3.` lexes as the integer `3` followed by a
    /// dot. `FLOAT_LITERAL` is emitted only when a fraction was consumed.
    fn scan_number(&mut self) {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        // Look for a fractional part
        if self.cursor.current_char() == '.' && self.cursor.peek_next().is_ascii_digit() {
            // Consume the "."
            self.cursor.advance();

            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }

            self.add_token(TokenKind::FloatLiteral);
        } else {
            self.add_token(TokenKind::IntLiteral);
        }
    }

    /// Scans an identifier or keyword. The first character is already
    /// consumed.
    fn scan_identifier(&mut self) {
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        // See if the identifier is a reserved word
        let text = self.cursor.slice_from(self.token_start);
        self.add_token(keywords::lookup(text));
    }

    /// Emits a token whose lexeme is the current source slice.
    fn add_token(&mut self, kind: TokenKind) {
        let lexeme = self.cursor.slice_from(self.token_start);
        self.tokens
            .push(Token::new(kind, lexeme, self.token_start_line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{KeywordRole, Lang};

    fn scan(source: &str) -> (Vec<Token>, Handler) {
        let mut handler = Handler::new();
        let tokens = Lexer::new(source, &mut handler).scan_tokens();
        (tokens, handler)
    }

    fn has_token(tokens: &[Token], kind: TokenKind, lexeme: &str) -> bool {
        tokens
            .iter()
            .any(|t| t.kind == kind && (lexeme.is_empty() || t.lexeme == lexeme))
    }

    #[test]
    fn test_english_lexing() {
        let (tokens, handler) = scan("var x = 10; function test() { return x + 5; }");
        assert!(!handler.has_errors());

        assert!(has_token(&tokens, TokenKind::Keyword(KeywordRole::Var, Lang::En), "var"));
        assert!(has_token(&tokens, TokenKind::Ident, "x"));
        assert!(has_token(&tokens, TokenKind::Eq, "="));
        assert!(has_token(&tokens, TokenKind::IntLiteral, "10"));
        assert!(has_token(&tokens, TokenKind::Semicolon, ";"));
        assert!(has_token(&tokens, TokenKind::Keyword(KeywordRole::Function, Lang::En), "function"));
        assert!(has_token(&tokens, TokenKind::Ident, "test"));
        assert!(has_token(&tokens, TokenKind::LParen, "("));
        assert!(has_token(&tokens, TokenKind::RParen, ")"));
        assert!(has_token(&tokens, TokenKind::LBrace, "{"));
        assert!(has_token(&tokens, TokenKind::Keyword(KeywordRole::Return, Lang::En), "return"));
        assert!(has_token(&tokens, TokenKind::Plus, "+"));
        assert!(has_token(&tokens, TokenKind::IntLiteral, "5"));
        assert!(has_token(&tokens, TokenKind::RBrace, "}"));
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_hindi_lexing() {
        let (tokens, handler) = scan("चर य = 10; फलन परीक्षण() { वापस य + 5; }");
        assert!(!handler.has_errors());

        assert!(has_token(&tokens, TokenKind::Keyword(KeywordRole::Var, Lang::Hi), "चर"));
        assert!(has_token(&tokens, TokenKind::Ident, "य"));
        assert!(has_token(&tokens, TokenKind::IntLiteral, "10"));
        assert!(has_token(&tokens, TokenKind::Keyword(KeywordRole::Function, Lang::Hi), "फलन"));
        assert!(has_token(&tokens, TokenKind::Ident, "परीक्षण"));
        assert!(has_token(&tokens, TokenKind::Keyword(KeywordRole::Return, Lang::Hi), "वापस"));
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_assamese_lexing() {
        let (tokens, handler) = scan("ভেৰিয়েবল জ = 10; কাৰ্য্য পৰীক্ষা() { ঘূৰাই_দিয়ক জ + 5; }");
        assert!(!handler.has_errors());

        assert!(has_token(&tokens, TokenKind::Keyword(KeywordRole::Var, Lang::As), "ভেৰিয়েবল"));
        assert!(has_token(&tokens, TokenKind::Ident, "জ"));
        assert!(has_token(&tokens, TokenKind::Keyword(KeywordRole::Function, Lang::As), "কাৰ্য্য"));
        assert!(has_token(&tokens, TokenKind::Ident, "পৰীক্ষা"));
        assert!(has_token(&tokens, TokenKind::Keyword(KeywordRole::Return, Lang::As), "ঘূৰাই_দিয়ক"));
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_mixed_language_lexing() {
        let source =
            "function factorial(n) { अगर (n <= 1) { ঘূৰাই_দিয়ক 1; } return n * factorial(n - 1); }";
        let (tokens, handler) = scan(source);
        assert!(!handler.has_errors());

        assert!(has_token(&tokens, TokenKind::Keyword(KeywordRole::Function, Lang::En), "function"));
        assert!(has_token(&tokens, TokenKind::Ident, "factorial"));
        assert!(has_token(&tokens, TokenKind::Keyword(KeywordRole::If, Lang::Hi), "अगर"));
        assert!(has_token(&tokens, TokenKind::LessEq, "<="));
        assert!(has_token(&tokens, TokenKind::Keyword(KeywordRole::Return, Lang::As), "ঘূৰাই_দিয়ক"));
        assert!(has_token(&tokens, TokenKind::Keyword(KeywordRole::Return, Lang::En), "return"));
        assert!(has_token(&tokens, TokenKind::Star, "*"));
        assert!(has_token(&tokens, TokenKind::Minus, "-"));
    }

    #[test]
    fn test_two_character_operators() {
        let (tokens, handler) = scan("== != <= >= = < > !");
        assert!(!handler.has_errors());

        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::LessEq,
                TokenKind::GreaterEq,
                TokenKind::Eq,
                TokenKind::Less,
                TokenKind::Greater,
                TokenKind::Bang,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_line_comment_is_discarded() {
        let (tokens, handler) = scan("var x; // this is ignored\nvar y;");
        assert!(!handler.has_errors());
        assert!(!has_token(&tokens, TokenKind::Ident, "this"));
        assert!(has_token(&tokens, TokenKind::Ident, "y"));

        let y = tokens.iter().find(|t| t.lexeme == "y").unwrap();
        assert_eq!(y.line, 2);
    }

    #[test]
    fn test_slash_alone_is_division() {
        let (tokens, handler) = scan("a / b");
        assert!(!handler.has_errors());
        assert!(has_token(&tokens, TokenKind::Slash, "/"));
    }

    #[test]
    fn test_string_literal_excludes_quotes() {
        let (tokens, handler) = scan("var s = \"hello world\";");
        assert!(!handler.has_errors());
        assert!(has_token(&tokens, TokenKind::StringLiteral, "hello world"));
    }

    #[test]
    fn test_string_literal_counts_newlines() {
        let (tokens, handler) = scan("\"a\nb\" x");
        assert!(!handler.has_errors());
        assert!(has_token(&tokens, TokenKind::StringLiteral, "a\nb"));

        let x = tokens.iter().find(|t| t.lexeme == "x").unwrap();
        assert_eq!(x.line, 2);
    }

    #[test]
    fn test_unterminated_string() {
        let (tokens, handler) = scan("var s = \"hello");
        assert!(handler.has_errors());
        assert_eq!(handler.diagnostics()[0].line, Some(1));
        assert!(handler.diagnostics()[0].message.contains("Unterminated"));

        // No string token is produced; the stream still terminates cleanly
        assert!(!tokens.iter().any(|t| t.kind == TokenKind::StringLiteral));
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        assert_eq!(
            tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(),
            1
        );
    }

    #[test]
    fn test_unterminated_string_reports_opening_line() {
        let (_, handler) = scan("var x;\nvar s = \"abc\ndef");
        assert!(handler.has_errors());
        assert_eq!(handler.diagnostics()[0].line, Some(2));
    }

    #[test]
    fn test_int_and_float_literals() {
        let (tokens, handler) = scan("42 3.14 0 100.5");
        assert!(!handler.has_errors());
        assert!(has_token(&tokens, TokenKind::IntLiteral, "42"));
        assert!(has_token(&tokens, TokenKind::FloatLiteral, "3.14"));
        assert!(has_token(&tokens, TokenKind::IntLiteral, "0"));
        assert!(has_token(&tokens, TokenKind::FloatLiteral, "100.5"));
    }

    #[test]
    fn test_trailing_dot_is_not_a_float() {
        let (tokens, handler) = scan("3.");
        assert!(!handler.has_errors());

        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::IntLiteral, TokenKind::Dot, TokenKind::Eof]);
    }

    #[test]
    fn test_unexpected_character() {
        let (tokens, handler) = scan("var @x = 5;");
        assert!(handler.has_errors());
        assert!(handler.diagnostics()[0].message.contains("Unexpected character"));

        // Scanning continues past the bad codepoint
        assert!(has_token(&tokens, TokenKind::Error, "@"));
        assert!(has_token(&tokens, TokenKind::Ident, "x"));
        assert!(has_token(&tokens, TokenKind::IntLiteral, "5"));
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_identifier_with_digits_and_underscores() {
        let (tokens, handler) = scan("var count_2 = 0;");
        assert!(!handler.has_errors());
        assert!(has_token(&tokens, TokenKind::Ident, "count_2"));
    }

    #[test]
    fn test_eof_line_number() {
        let (tokens, _) = scan("a;\nb;\nc;");
        assert_eq!(tokens.last().map(|t| t.line), Some(3));

        let (tokens, _) = scan("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!(tokens[0].line, 1);
    }
}

#[cfg(test)]
mod stream_invariants {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every source produces a stream with exactly one end-of-input
        /// token, in final position, with all line numbers within the
        /// bounds of the source.
        #[test]
        fn scan_always_terminates_cleanly(source in any::<String>()) {
            let mut handler = Handler::new();
            let tokens = Lexer::new(&source, &mut handler).scan_tokens();

            prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
            prop_assert_eq!(
                tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(),
                1
            );

            let max_line = source.matches('\n').count() as u32 + 1;
            for token in &tokens {
                prop_assert!(token.line >= 1);
                prop_assert!(token.line <= max_line);
            }
        }

        /// Keyword resolution is total: every identifier-shaped lexeme in
        /// the output either is a keyword in some language or maps to
        /// IDENTIFIER, never both.
        #[test]
        fn keyword_resolution_is_consistent(word in "[a-z]{1,10}") {
            let kind = crate::keywords::lookup(&word);
            if crate::keywords::is_keyword(&word) {
                prop_assert!(matches!(kind, TokenKind::Keyword(..)));
            } else {
                prop_assert_eq!(kind, TokenKind::Ident);
            }
        }
    }
}
