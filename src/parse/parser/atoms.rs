use super::{ParseResult, Parser};

use crate::{
    ast::{token::TokenKind, Arg, Expr},
    errors::ElzErrorKind,
    span::Span,
};

impl Parser {
    pub(crate) fn parse_atom(&mut self) -> ParseResult<Expr> {
        let prev_end = self.last_end;
        let tok = self.token();
        match tok.kind {
            TokenKind::Integer(digits) => Ok(Expr::IntLiteral(digits)),
            TokenKind::Float(digits) => Ok(Expr::FloatLiteral(digits)),
            TokenKind::Minus => {
                // only literals can be negated
                let lit = self.token();
                match lit.kind {
                    TokenKind::Integer(digits) => Ok(Expr::IntLiteral(format!("-{}", digits))),
                    TokenKind::Float(digits) => Ok(Expr::FloatLiteral(format!("-{}", digits))),
                    kind => Err(self.unexpected(&kind, lit.span, "a literal after `-`")),
                }
            }
            TokenKind::Identifier(name) => {
                if self.peek_kind() == TokenKind::LeftParen {
                    self.token();
                    let args = self.parse_args()?;
                    Ok(Expr::call(name, args))
                } else {
                    Ok(Expr::Ident(name))
                }
            }
            TokenKind::LeftParen => {
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RightParen)?;
                Ok(expr)
            }
            _ if tok.line_break => Err(self.error_at(
                ElzErrorKind::Parse,
                str!("expected an expression before the end of the line"),
                Span::from(prev_end),
            )),
            kind => Err(self.unexpected(&kind, tok.span, "an expression")),
        }
    }

    /// Parses the arguments of a call, after the opening paren.
    fn parse_args(&mut self) -> ParseResult<Vec<Arg>> {
        let mut args = vec![];
        loop {
            if self.peek_kind() == TokenKind::RightParen {
                self.token();
                break;
            }

            let label = match (self.peek_kind(), self.peek_kind_at(1)) {
                (TokenKind::Identifier(label), TokenKind::Colon) => {
                    self.token();
                    self.token();
                    Some(label)
                }
                _ => None,
            };

            let expr = self.parse_expr()?;
            args.push(Arg { label, expr });

            match self.peek_kind() {
                TokenKind::Comma => {
                    self.token();
                }
                TokenKind::RightParen => {
                    self.token();
                    break;
                }
                TokenKind::EOF => {
                    let span = self.peek_span();
                    return Err(self.error_at(
                        ElzErrorKind::Parse,
                        str!("unterminated argument list"),
                        span,
                    ));
                }
                _ => return Err(self.unclosed_or_unexpected("`,` or `)`")),
            }
        }

        Ok(args)
    }
}
