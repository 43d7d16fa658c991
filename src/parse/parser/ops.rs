use super::{ParseResult, Parser};

use crate::ast::{self, token::TokenKind};

impl Parser {
    pub(crate) fn parse_infix_expr(&mut self, min_prec: usize) -> ParseResult<ast::Expr> {
        let mut lhs = self.parse_atom()?;
        while let Some(op) = self.peek_infix_op() {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }

            // every operator is left-associative
            self.token();
            let rhs = self.parse_infix_expr(prec + 1)?;
            lhs = ast::Expr::binary(op, lhs, rhs);
        }

        Ok(lhs)
    }

    fn peek_infix_op(&mut self) -> Option<ast::InfixOp> {
        Some(match self.peek_kind() {
            TokenKind::Plus => ast::InfixOp::Add,
            TokenKind::Minus => ast::InfixOp::Sub,
            TokenKind::Asterisk => ast::InfixOp::Mul,
            TokenKind::Slash => ast::InfixOp::Div,
            _ => return None,
        })
    }
}
