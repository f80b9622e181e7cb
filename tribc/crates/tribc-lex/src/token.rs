//! Token model for the Tribhasha language.
//!
//! A keyword kind carries both its canonical role (what the parser cares
//! about) and the surface language it was written in (what the token dump
//! and the shell's highlighter care about). The parser accepts any
//! language variant of a role interchangeably.

use std::fmt;

/// Surface language of a keyword lexeme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lang {
    /// English (Latin script)
    En,
    /// Hindi (Devanagari script)
    Hi,
    /// Assamese (Bengali-Assamese script)
    As,
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lang::En => write!(f, "EN"),
            Lang::Hi => write!(f, "HI"),
            Lang::As => write!(f, "AS"),
        }
    }
}

/// The language-independent identity of a keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeywordRole {
    Var,
    Function,
    If,
    Else,
    While,
    For,
    Return,
    True,
    False,
    And,
    Or,
    Not,
}

impl fmt::Display for KeywordRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeywordRole::Var => "VAR",
            KeywordRole::Function => "FUNCTION",
            KeywordRole::If => "IF",
            KeywordRole::Else => "ELSE",
            KeywordRole::While => "WHILE",
            KeywordRole::For => "FOR",
            KeywordRole::Return => "RETURN",
            KeywordRole::True => "TRUE",
            KeywordRole::False => "FALSE",
            KeywordRole::And => "AND",
            KeywordRole::Or => "OR",
            KeywordRole::Not => "NOT",
        };
        write!(f, "{name}")
    }
}

/// Kind of a lexical token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Structural markers
    /// End of input. Every token stream ends with exactly one of these.
    Eof,
    /// An unrecognized codepoint, kept in the stream for recovery.
    Error,

    // Literals and names
    Ident,
    IntLiteral,
    FloatLiteral,
    StringLiteral,

    /// A keyword: one value per (canonical role, surface language) pair.
    Keyword(KeywordRole, Lang),

    // Arithmetic operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Comparison operators
    EqEq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,

    // Assignment
    Eq,

    /// `!` - logical not. Equivalent to the `not` keyword role for the
    /// parser and lowering; kept as its own kind so the two-character
    /// `!=` lookahead does not overload a keyword.
    Bang,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Semicolon,
    Colon,
}

impl TokenKind {
    /// The canonical role of a keyword kind, or `None` for anything else.
    pub fn keyword_role(self) -> Option<KeywordRole> {
        match self {
            TokenKind::Keyword(role, _) => Some(role),
            _ => None,
        }
    }

    /// True for `!` and the `not` keyword in any language.
    pub fn is_not(self) -> bool {
        matches!(
            self,
            TokenKind::Bang | TokenKind::Keyword(KeywordRole::Not, _)
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Eof => write!(f, "END_OF_FILE"),
            TokenKind::Error => write!(f, "ERROR"),
            TokenKind::Ident => write!(f, "IDENTIFIER"),
            TokenKind::IntLiteral => write!(f, "INT_LITERAL"),
            TokenKind::FloatLiteral => write!(f, "FLOAT_LITERAL"),
            TokenKind::StringLiteral => write!(f, "STRING_LITERAL"),
            TokenKind::Keyword(role, lang) => write!(f, "{role}_{lang}"),
            TokenKind::Plus => write!(f, "PLUS"),
            TokenKind::Minus => write!(f, "MINUS"),
            TokenKind::Star => write!(f, "STAR"),
            TokenKind::Slash => write!(f, "SLASH"),
            TokenKind::Percent => write!(f, "MODULO"),
            TokenKind::EqEq => write!(f, "EQUAL"),
            TokenKind::NotEq => write!(f, "NOT_EQUAL"),
            TokenKind::Less => write!(f, "LESS"),
            TokenKind::LessEq => write!(f, "LESS_EQUAL"),
            TokenKind::Greater => write!(f, "GREATER"),
            TokenKind::GreaterEq => write!(f, "GREATER_EQUAL"),
            TokenKind::Eq => write!(f, "ASSIGN"),
            TokenKind::Bang => write!(f, "BANG"),
            TokenKind::LParen => write!(f, "LEFT_PAREN"),
            TokenKind::RParen => write!(f, "RIGHT_PAREN"),
            TokenKind::LBrace => write!(f, "LEFT_BRACE"),
            TokenKind::RBrace => write!(f, "RIGHT_BRACE"),
            TokenKind::LBracket => write!(f, "LEFT_BRACKET"),
            TokenKind::RBracket => write!(f, "RIGHT_BRACKET"),
            TokenKind::Comma => write!(f, "COMMA"),
            TokenKind::Dot => write!(f, "DOT"),
            TokenKind::Semicolon => write!(f, "SEMICOLON"),
            TokenKind::Colon => write!(f, "COLON"),
        }
    }
}

/// A lexical token: kind, exact source text, and the line it started on.
///
/// String-literal tokens carry their content without the surrounding
/// quotes. Tokens are immutable once emitted.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: u32) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
        }
    }
}

impl fmt::Display for Token {
    /// Renders the token in the dump format: `<KIND> <lexeme> (line N)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} (line {})", self.kind, self.lexeme, self.line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_role_extraction() {
        let kind = TokenKind::Keyword(KeywordRole::If, Lang::Hi);
        assert_eq!(kind.keyword_role(), Some(KeywordRole::If));
        assert_eq!(TokenKind::Ident.keyword_role(), None);
        assert_eq!(TokenKind::Semicolon.keyword_role(), None);
    }

    #[test]
    fn test_is_not_covers_bang_and_all_languages() {
        assert!(TokenKind::Bang.is_not());
        assert!(TokenKind::Keyword(KeywordRole::Not, Lang::En).is_not());
        assert!(TokenKind::Keyword(KeywordRole::Not, Lang::Hi).is_not());
        assert!(TokenKind::Keyword(KeywordRole::Not, Lang::As).is_not());
        assert!(!TokenKind::Keyword(KeywordRole::And, Lang::En).is_not());
        assert!(!TokenKind::Minus.is_not());
    }

    #[test]
    fn test_keyword_display_includes_language() {
        assert_eq!(
            TokenKind::Keyword(KeywordRole::Var, Lang::En).to_string(),
            "VAR_EN"
        );
        assert_eq!(
            TokenKind::Keyword(KeywordRole::Return, Lang::As).to_string(),
            "RETURN_AS"
        );
        assert_eq!(
            TokenKind::Keyword(KeywordRole::While, Lang::Hi).to_string(),
            "WHILE_HI"
        );
    }

    #[test]
    fn test_token_dump_format() {
        let token = Token::new(TokenKind::IntLiteral, "10", 3);
        assert_eq!(token.to_string(), "INT_LITERAL 10 (line 3)");

        let eof = Token::new(TokenKind::Eof, "", 7);
        assert_eq!(eof.to_string(), "END_OF_FILE  (line 7)");
    }
}
