mod atoms;
mod ops;

use crate::{
    ast::{
        token::{Token, TokenKind},
        Binding, BindingTable, Expr, FuncCall,
    },
    errors::{ElzError, ElzErrorKind},
    parse::lexer::Lexer,
    span::{Pos, Source, Span},
};

pub type ParseResult<T> = Result<T, ElzError>;

pub struct Parser {
    lex: Lexer,
    filepath: String,
    last_end: Pos,
    at_line_start: bool,
}

impl Parser {
    fn new(src: &str, filepath: &str) -> Parser {
        Parser {
            lex: Lexer::new(src),
            filepath: filepath.to_string(),
            last_end: Pos::new(),
            at_line_start: true,
        }
    }

    /// Parses every binding in `src`. Errors are collected per binding so one bad
    /// line doesn't hide the others.
    pub fn parse(src: &str, filepath: &str) -> Result<BindingTable, Vec<ElzError>> {
        let mut parser = Parser::new(src, filepath);
        let mut table = BindingTable::new();
        let mut errors = vec![];

        loop {
            parser.skip_newlines();
            if parser.peek_kind() == TokenKind::EOF {
                break;
            }

            match parser.parse_binding() {
                Ok(binding) => {
                    if table.contains(&binding.name) {
                        errors.push(ElzError::new(
                            ElzErrorKind::Name,
                            format!("binding `{}` is defined more than once", binding.name),
                            binding.src.into_iter().collect(),
                        ));
                    } else {
                        log::debug!("parsed {}", binding);
                        table.insert(binding);
                    }
                }
                Err(err) => {
                    errors.push(err);
                    parser.recover();
                }
            }
        }

        if errors.is_empty() {
            Ok(table)
        } else {
            Err(errors)
        }
    }

    /// Parses a standalone call expression like `add(1, 2)`.
    pub fn parse_call(src: &str, filepath: &str) -> ParseResult<FuncCall> {
        let mut parser = Parser::new(src, filepath);
        parser.skip_newlines();
        let start = parser.peek_span().start;
        let expr = parser.parse_expr()?;
        parser.skip_newlines();
        parser.expect_end_of_binding()?;
        match expr {
            Expr::FuncCall(call) => Ok(call),
            other => Err(parser.error_at(
                ElzErrorKind::Parse,
                format!("expected a call expression, but found {}", other),
                Span {
                    start,
                    end: parser.last_end,
                },
            )),
        }
    }

    fn parse_binding(&mut self) -> ParseResult<Binding> {
        let name_tok = self.token();
        let start = name_tok.span.start;
        let name = match name_tok.kind {
            TokenKind::Identifier(name) => name,
            kind => {
                return Err(self.unexpected(&kind, name_tok.span, "a binding name"));
            }
        };

        let mut params: Vec<String> = vec![];
        loop {
            let tok = self.token();
            match tok.kind {
                TokenKind::Identifier(param) => {
                    if params.contains(&param) {
                        return Err(self.error_at(
                            ElzErrorKind::Name,
                            format!(
                                "parameter `{}` is declared more than once in binding `{}`",
                                param, name
                            ),
                            tok.span,
                        ));
                    }
                    params.push(param);
                }
                TokenKind::Equals => break,
                kind => return Err(self.unexpected(&kind, tok.span, "a parameter or `=`")),
            }
        }

        let body = self.parse_expr()?;
        let span = Span {
            start,
            end: self.last_end,
        };
        self.expect_end_of_binding()?;

        Ok(Binding {
            name,
            params,
            body,
            src: Some(Source::new(self.filepath.as_str(), span)),
        })
    }

    pub(crate) fn parse_expr(&mut self) -> ParseResult<Expr> {
        self.parse_infix_expr(0)
    }

    fn expect_end_of_binding(&mut self) -> ParseResult<()> {
        match self.peek_kind() {
            TokenKind::NewLine | TokenKind::EOF => Ok(()),
            kind => {
                let span = self.peek_span();
                Err(self.unexpected(&kind, span, "the end of the line"))
            }
        }
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token> {
        if self.peek_kind() == kind {
            Ok(self.token())
        } else {
            Err(self.unclosed_or_unexpected(&kind.to_string()))
        }
    }

    /// Reports the next token without consuming it. A token on a later line
    /// means a paren was left open, and belongs to the next binding.
    pub(crate) fn unclosed_or_unexpected(&mut self, expected: &str) -> ElzError {
        let tok = self.lex.peek_token().clone();
        if tok.line_break {
            self.error_at(
                ElzErrorKind::Parse,
                format!("expected {} before the end of the line", expected),
                Span::from(self.last_end),
            )
        } else {
            self.unexpected(&tok.kind, tok.span, expected)
        }
    }

    fn recover(&mut self) {
        self.lex.close_parens();

        // skip the rest of the offending line, unless the error consumed its newline
        if self.at_line_start {
            return;
        }

        loop {
            let tok = self.lex.peek_token();
            if tok.line_break || matches!(tok.kind, TokenKind::NewLine | TokenKind::EOF) {
                break;
            }
            self.token();
        }
    }

    fn skip_newlines(&mut self) {
        while self.peek_kind() == TokenKind::NewLine {
            self.token();
        }
    }

    fn token(&mut self) -> Token {
        let tok = self.lex.token();
        self.last_end = tok.span.end;
        self.at_line_start = tok.kind == TokenKind::NewLine;
        tok
    }

    fn peek_kind(&mut self) -> TokenKind {
        self.lex.peek_token().kind.clone()
    }

    fn peek_kind_at(&mut self, idx: usize) -> TokenKind {
        self.lex.peek_token_at(idx).kind.clone()
    }

    fn peek_span(&mut self) -> Span {
        self.lex.peek_token().span
    }

    fn error_at(&self, kind: ElzErrorKind, msg: String, span: Span) -> ElzError {
        ElzError::new(kind, msg, vec![Source::new(self.filepath.as_str(), span)])
    }

    fn unexpected(&self, found: &TokenKind, span: Span, expected: &str) -> ElzError {
        self.error_at(
            ElzErrorKind::Parse,
            format!("expected {}, but found {}", expected, found),
            span,
        )
    }
}

#[cfg(test)]
mod parser_tests {
    use super::Parser;
    use crate::{
        ast::{Arg, Binding, Expr, InfixOp},
        errors::ElzErrorKind,
    };

    fn parse_one(src: &str) -> Binding {
        let table = Parser::parse(src, "test.elz").expect("source should parse");
        assert_eq!(table.len(), 1);
        table.iter().next().cloned().unwrap()
    }

    #[test]
    fn no_param_bind() {
        assert_eq!(parse_one("i = 1"), Binding::new("i", vec![], Expr::int("1")));
    }

    #[test]
    fn with_param() {
        assert_eq!(
            parse_one("add x y = x + y"),
            Binding::new(
                "add",
                vec!["x", "y"],
                Expr::binary(InfixOp::Add, Expr::ident("x"), Expr::ident("y"))
            )
        );
    }

    #[test]
    fn function_call() {
        assert_eq!(
            parse_one("addOne y = add(1, y)"),
            Binding::new(
                "addOne",
                vec!["y"],
                Expr::call(
                    "add",
                    vec![Arg::new(Expr::int("1")), Arg::new(Expr::ident("y"))]
                )
            )
        );
    }

    #[test]
    fn function_call_with_arg_name() {
        assert_eq!(
            parse_one("tests = assert(that: 1, should_be: 1)"),
            Binding::new(
                "tests",
                vec![],
                Expr::call(
                    "assert",
                    vec![
                        Arg::labeled("that", Expr::int("1")),
                        Arg::labeled("should_be", Expr::int("1")),
                    ]
                )
            )
        );
    }

    #[test]
    fn records_binding_source() {
        let table = Parser::parse("\ni = 1\nj = i()\n", "test.elz").unwrap();
        let src = table.get("j").and_then(|b| b.src.clone()).unwrap();
        assert_eq!(src.filepath, "test.elz");
        let span = src.span.unwrap();
        assert_eq!(span.start.lineno, 2);
        assert_eq!(span.start.col, 0);
        assert_eq!(span.end.col, 7);
    }

    #[test]
    fn duplicate_binding_is_a_name_error() {
        let errs = Parser::parse("i = 1\ni = 2", "test.elz").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, ElzErrorKind::Name);
    }

    #[test]
    fn duplicate_param_is_a_name_error() {
        let errs = Parser::parse("f x x = x", "test.elz").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, ElzErrorKind::Name);
    }

    #[test]
    fn collects_errors_from_every_line() {
        let errs = Parser::parse("f x = x +\ng = 1\nh = (1", "test.elz").unwrap_err();
        assert_eq!(errs.len(), 2);
        assert!(errs.iter().all(|e| e.kind == ElzErrorKind::Parse));
    }

    #[test]
    fn unclosed_paren_does_not_swallow_later_lines() {
        let errs = Parser::parse("f = g(1\ng = 2\nh = )\nk = (\n", "test.elz").unwrap_err();
        assert_eq!(errs.len(), 3);
        assert!(errs[0].msg.contains("before the end of the line"));
        assert_eq!(errs[0].src[0].span.map(|s| s.start.lineno), Some(0));
        assert_eq!(errs[1].src[0].span.map(|s| s.start.lineno), Some(2));
        assert_eq!(errs[2].src[0].span.map(|s| s.start.lineno), Some(3));

        // the line after the unclosed paren is still parsed
        let errs = Parser::parse("f = (1\ng = 2\ng = 3\n", "test.elz").unwrap_err();
        let kinds = errs.iter().map(|e| e.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![ElzErrorKind::Parse, ElzErrorKind::Name]);
    }

    #[test]
    fn parses_standalone_call() {
        let call = Parser::parse_call("add(1, 2)", "<call>").unwrap();
        assert_eq!(call.name, "add");
        assert_eq!(call.args.len(), 2);

        let err = Parser::parse_call("1 + 2", "<call>").unwrap_err();
        assert_eq!(err.kind, ElzErrorKind::Parse);
    }
}
