use std::fmt;

use crate::utils::join;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                InfixOp::Add => "+",
                InfixOp::Sub => "-",
                InfixOp::Mul => "*",
                InfixOp::Div => "/",
            }
        )
    }
}

impl InfixOp {
    pub fn precedence(&self) -> usize {
        match self {
            InfixOp::Add | InfixOp::Sub => 1,
            InfixOp::Mul | InfixOp::Div => 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BinaryExpr {
    pub op: InfixOp,
    pub lhs: Box<Expr>,
    pub rhs: Box<Expr>,
}

impl fmt::Display for BinaryExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(binop {} {} {})", self.op, self.lhs, self.rhs)
    }
}

/// A call-site argument. The label is only present for `f(name: expr)` syntax.
#[derive(Clone, Debug, PartialEq)]
pub struct Arg {
    pub label: Option<String>,
    pub expr: Expr,
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "(label {} {})", label, self.expr),
            None => write!(f, "{}", self.expr),
        }
    }
}

impl Arg {
    pub fn new(expr: Expr) -> Arg {
        Arg { label: None, expr }
    }

    pub fn labeled<S: Into<String>>(label: S, expr: Expr) -> Arg {
        Arg {
            label: Some(label.into()),
            expr,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FuncCall {
    pub name: String,
    pub args: Vec<Arg>,
}

impl fmt::Display for FuncCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            write!(f, "(call {})", self.name)
        } else {
            write!(f, "(call {} {})", self.name, join(&self.args, " "))
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Ident(String),
    IntLiteral(String),
    FloatLiteral(String),
    BinaryExpr(BinaryExpr),
    FuncCall(FuncCall),
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident(name) => write!(f, "{}", name),
            Expr::IntLiteral(digits) | Expr::FloatLiteral(digits) => write!(f, "{}", digits),
            Expr::BinaryExpr(b) => write!(f, "{}", b),
            Expr::FuncCall(c) => write!(f, "{}", c),
        }
    }
}

impl Expr {
    pub fn ident<S: Into<String>>(name: S) -> Expr {
        Expr::Ident(name.into())
    }

    pub fn int<S: Into<String>>(digits: S) -> Expr {
        Expr::IntLiteral(digits.into())
    }

    pub fn float<S: Into<String>>(digits: S) -> Expr {
        Expr::FloatLiteral(digits.into())
    }

    pub fn binary(op: InfixOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::BinaryExpr(BinaryExpr {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    pub fn call<S: Into<String>>(name: S, args: Vec<Arg>) -> Expr {
        Expr::FuncCall(FuncCall {
            name: name.into(),
            args,
        })
    }
}
