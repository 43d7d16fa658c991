use std::fmt;

use crate::span::Span;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Identifier(String),
    Integer(String),
    Float(String),
    Plus,
    Minus,
    Asterisk,
    Slash,
    LeftParen,
    RightParen,
    Comma,
    Colon,
    Equals,
    NewLine,
    Illegal(String),
    EOF,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier(s) => write!(f, "identifier `{}`", s),
            TokenKind::Integer(s) | TokenKind::Float(s) => write!(f, "literal `{}`", s),
            TokenKind::Plus => write!(f, "`+`"),
            TokenKind::Minus => write!(f, "`-`"),
            TokenKind::Asterisk => write!(f, "`*`"),
            TokenKind::Slash => write!(f, "`/`"),
            TokenKind::LeftParen => write!(f, "`(`"),
            TokenKind::RightParen => write!(f, "`)`"),
            TokenKind::Comma => write!(f, "`,`"),
            TokenKind::Colon => write!(f, "`:`"),
            TokenKind::Equals => write!(f, "`=`"),
            TokenKind::NewLine => write!(f, "newline"),
            TokenKind::Illegal(s) => write!(f, "`{}`", s),
            TokenKind::EOF => write!(f, "end of file"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// A newline inside parens was skipped right before this token.
    pub line_break: bool,
}
