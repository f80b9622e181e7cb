//! The trilingual keyword table.
//!
//! Three sub-tables (English, Hindi, Assamese) are collapsed into a single
//! flat map at first use. The map is the only process-wide state in the
//! compiler; it is read-only after initialization and safe to share across
//! threads.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::token::KeywordRole::*;
use crate::token::{KeywordRole, Lang, TokenKind};

const ENGLISH: &[(&str, KeywordRole)] = &[
    ("var", Var),
    ("function", Function),
    ("if", If),
    ("else", Else),
    ("while", While),
    ("for", For),
    ("return", Return),
    ("true", True),
    ("false", False),
    ("and", And),
    ("or", Or),
    ("not", Not),
];

const HINDI: &[(&str, KeywordRole)] = &[
    ("चर", Var),
    ("फलन", Function),
    ("अगर", If),
    ("अन्यथा", Else),
    ("जबतक", While),
    ("के_लिए", For),
    ("वापस", Return),
    ("सही", True),
    ("गलत", False),
    ("और", And),
    ("या", Or),
    ("नहीं", Not),
];

const ASSAMESE: &[(&str, KeywordRole)] = &[
    ("ভেৰিয়েবল", Var),
    ("কাৰ্য্য", Function),
    ("যদি", If),
    ("নহলে", Else),
    ("যতক্ষণ", While),
    ("ৰ_বাবে", For),
    ("ঘূৰাই_দিয়ক", Return),
    ("সত্য", True),
    ("মিছা", False),
    ("আৰু", And),
    ("বা", Or),
    ("নহয়", Not),
];

static KEYWORDS: Lazy<FxHashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    for &(lexeme, role) in ENGLISH {
        map.insert(lexeme, TokenKind::Keyword(role, Lang::En));
    }
    for &(lexeme, role) in HINDI {
        map.insert(lexeme, TokenKind::Keyword(role, Lang::Hi));
    }
    for &(lexeme, role) in ASSAMESE {
        map.insert(lexeme, TokenKind::Keyword(role, Lang::As));
    }
    map
});

/// Resolves a lexeme against the keyword table.
///
/// Returns the keyword kind for a reserved word in any of the three
/// languages, or [`TokenKind::Ident`] for everything else.
///
/// # Example
///
/// ```
/// use tribc_lex::{lookup, KeywordRole, Lang, TokenKind};
///
/// assert_eq!(lookup("var"), TokenKind::Keyword(KeywordRole::Var, Lang::En));
/// assert_eq!(lookup("चर"), TokenKind::Keyword(KeywordRole::Var, Lang::Hi));
/// assert_eq!(lookup("x"), TokenKind::Ident);
/// ```
pub fn lookup(lexeme: &str) -> TokenKind {
    KEYWORDS.get(lexeme).copied().unwrap_or(TokenKind::Ident)
}

/// True if the lexeme is a reserved word in any language.
pub fn is_keyword(lexeme: &str) -> bool {
    KEYWORDS.contains_key(lexeme)
}

/// Normalizes a keyword kind to its canonical (English) variant.
///
/// Non-keyword kinds pass through unchanged. Used by components that
/// branch on role rather than surface language.
pub fn canonical(kind: TokenKind) -> TokenKind {
    match kind {
        TokenKind::Keyword(role, _) => TokenKind::Keyword(role, Lang::En),
        other => other,
    }
}
