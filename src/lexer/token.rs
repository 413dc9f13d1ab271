use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/*
The finite alphabet of token kinds DevScript's lexical grammar can produce.
One variant per lexeme class; no two source bytes are ever classified under
more than one of these.
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Illegal,
    Eof,

    Datatype,
    Ident,
    Int,
    String,
    Bool,
    Null,

    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,

    Lt,
    Gt,
    Eq,
    NotEq,

    Comma,
    Semicolon,
    Colon,

    LParen,
    RParen,
    LBrace,
    RBrace,

    Function,
    Var,
    True,
    False,
    If,
    Else,
    Return,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("func", TokenKind::Function);
    m.insert("var", TokenKind::Var);
    m.insert("true", TokenKind::True);
    m.insert("false", TokenKind::False);
    m.insert("if", TokenKind::If);
    m.insert("else", TokenKind::Else);
    m.insert("return", TokenKind::Return);
    // data type hints used by `var x: int = ...`
    m.insert("int", TokenKind::Datatype);
    m.insert("string", TokenKind::Datatype);
    m.insert("bool", TokenKind::Datatype);
    m.insert("function", TokenKind::Datatype);
    m
});

// An immutable `(kind, literal)` pair, plus the source line for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            literal: literal.into(),
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.kind, self.literal)
    }
}
