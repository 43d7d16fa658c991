use crate::{
    ast::token::{Token, TokenKind},
    span::{Pos, Span},
};

use std::collections::VecDeque;

pub struct Lexer {
    src: Vec<char>,
    pos: Pos,
    paren_depth: usize,
    token_stash: VecDeque<Token>,
}

fn is_valid_id_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl Lexer {
    pub fn new(src: &str) -> Lexer {
        Lexer {
            src: src.chars().collect(),
            pos: Pos::new(),
            paren_depth: 0,
            token_stash: VecDeque::new(),
        }
    }

    fn char_at(&self, index: usize) -> Option<char> {
        self.src.get(index).map(|c| *c)
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.char_at(self.pos.offset)?;
        if ch == '\n' {
            self.pos.lineno += 1;
            self.pos.col = 0;
        } else {
            self.pos.col += 1;
        }
        self.pos.offset += 1;
        Some(ch)
    }

    fn first(&self) -> char {
        self.char_at(self.pos.offset).unwrap_or('\0')
    }

    fn second(&self) -> char {
        self.char_at(self.pos.offset + 1).unwrap_or('\0')
    }

    fn next_char_while(
        &mut self,
        start_ch: Option<char>,
        mut f: impl FnMut(char) -> bool,
    ) -> String {
        let mut s = if let Some(ch) = start_ch {
            ch.to_string()
        } else {
            String::new()
        };
        while f(self.first()) {
            if let Some(ch) = self.next_char() {
                s.push(ch);
            } else {
                break;
            }
        }
        s
    }

    fn number(&mut self, start_ch: char) -> TokenKind {
        // [0-9]+
        let mut value = self.next_char_while(Some(start_ch), |c| c.is_ascii_digit());

        // (.[0-9]+)?
        if self.first() == '.' && self.second().is_ascii_digit() {
            value.push('.');
            self.next_char();
            value += &self.next_char_while(None, |c| c.is_ascii_digit());
            TokenKind::Float(value)
        } else {
            TokenKind::Integer(value)
        }
    }

    fn skip_trivia(&mut self) -> bool {
        let mut line_break = false;
        loop {
            match (self.first(), self.second()) {
                ('\n', _) if self.paren_depth > 0 => {
                    self.next_char();
                    line_break = true;
                }
                (c, _) if c != '\n' && c != '\0' && c.is_whitespace() => {
                    self.next_char();
                }
                ('/', '/') => {
                    // comments run up to (but not including) the newline
                    self.next_char_while(None, |c| c != '\n' && c != '\0');
                }
                _ => break,
            }
        }
        line_break
    }

    fn next_token(&mut self) -> Token {
        let line_break = self.skip_trivia();
        let start = self.pos;
        let kind = match self.next_char() {
            None => TokenKind::EOF,
            Some(c) => match c {
                '\n' => TokenKind::NewLine,
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Asterisk,
                '/' => TokenKind::Slash,
                ',' => TokenKind::Comma,
                ':' => TokenKind::Colon,
                '=' => TokenKind::Equals,
                '(' => {
                    self.paren_depth += 1;
                    TokenKind::LeftParen
                }
                ')' => {
                    self.paren_depth = self.paren_depth.saturating_sub(1);
                    TokenKind::RightParen
                }
                c if c == '_' || c.is_alphabetic() => {
                    TokenKind::Identifier(self.next_char_while(Some(c), is_valid_id_char))
                }
                c @ '0'..='9' => self.number(c),
                c => TokenKind::Illegal(
                    self.next_char_while(Some(c), |c| !c.is_whitespace() && c != '\0'),
                ),
            },
        };

        Token {
            kind,
            span: Span {
                start,
                end: self.pos,
            },
            line_break,
        }
    }

    fn ensure_tokens(&mut self, n: usize) {
        while self.token_stash.len() < n {
            let tok = self.next_token();
            self.token_stash.push_back(tok);
        }
    }

    pub fn peek_token(&mut self) -> &Token {
        self.peek_token_at(0)
    }

    pub fn peek_token_at(&mut self, idx: usize) -> &Token {
        self.ensure_tokens(idx + 1);
        &self.token_stash[idx]
    }

    /// Forgets any open parens, so newlines end lines again. Tokens already
    /// peeked keep their `line_break` flag.
    pub fn close_parens(&mut self) {
        self.paren_depth = 0;
    }

    pub fn token(&mut self) -> Token {
        self.ensure_tokens(1);
        match self.token_stash.pop_front() {
            Some(tok) => tok,
            None => self.next_token(),
        }
    }
}

/// Runs the lexer to completion, including the trailing EOF token.
pub fn tokens(src: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(src);
    let mut out = Vec::new();

    loop {
        let token = lexer.token();
        let is_eof = matches!(token.kind, TokenKind::EOF);
        out.push(token);
        if is_eof {
            break;
        }
    }

    out
}

#[cfg(test)]
mod lexer_tests {
    use crate::ast::token::TokenKind;

    use super::tokens;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokens(src).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_binding() {
        assert_eq!(
            kinds("add x y = x + y"),
            vec![
                TokenKind::Identifier(str!("add")),
                TokenKind::Identifier(str!("x")),
                TokenKind::Identifier(str!("y")),
                TokenKind::Equals,
                TokenKind::Identifier(str!("x")),
                TokenKind::Plus,
                TokenKind::Identifier(str!("y")),
                TokenKind::EOF,
            ]
        );
    }

    #[test]
    fn lexes_numbers() {
        assert_eq!(
            kinds("12 1.5 3."),
            vec![
                TokenKind::Integer(str!("12")),
                TokenKind::Float(str!("1.5")),
                TokenKind::Integer(str!("3")),
                TokenKind::Illegal(str!(".")),
                TokenKind::EOF,
            ]
        );
    }

    #[test]
    fn skips_comments_and_newlines_in_parens() {
        assert_eq!(
            kinds("// header\nf = g(1,\n  2)\n"),
            vec![
                TokenKind::NewLine,
                TokenKind::Identifier(str!("f")),
                TokenKind::Equals,
                TokenKind::Identifier(str!("g")),
                TokenKind::LeftParen,
                TokenKind::Integer(str!("1")),
                TokenKind::Comma,
                TokenKind::Integer(str!("2")),
                TokenKind::RightParen,
                TokenKind::NewLine,
                TokenKind::EOF,
            ]
        );
    }

    #[test]
    fn marks_line_breaks_in_parens() {
        let toks = tokens("g(1\n  2)");
        assert!(!toks[2].line_break);
        assert_eq!(toks[3].kind, TokenKind::Integer(str!("2")));
        assert!(toks[3].line_break);
    }

    #[test]
    fn tracks_spans() {
        let toks = tokens("i = 1\nj = 2");
        let j = &toks[4];
        assert_eq!(j.kind, TokenKind::Identifier(str!("j")));
        assert_eq!(j.span.start.lineno, 1);
        assert_eq!(j.span.start.col, 0);
        assert_eq!(j.span.len(), 1);
    }
}
