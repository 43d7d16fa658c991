use crate::{
    strutils::indent_lines,
    typing::ty::Ty,
    utils::{join, map_join},
};

macro_rules! LirImplInto {
    ($dst:ident for $src:ident) => {
        impl Into<$dst> for $src {
            fn into(self) -> $dst {
                $dst::$src(self)
            }
        }
    };
}

/// Registers are numbered per function: parameters first, then locals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variable {
    Param(usize),
    Local(usize),
}

impl Variable {
    pub fn idx(&self) -> usize {
        match self {
            Variable::Param(i) | Variable::Local(i) => *i,
        }
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}", self.idx())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Atom {
    Variable(Variable, Ty),
    IntConst(i64),
    FloatConst(f64),
}

impl std::fmt::Display for Atom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Atom::Variable(v, _) => write!(f, "{}", v),
            Atom::IntConst(i) => write!(f, "{}", i),
            Atom::FloatConst(c) => write!(f, "{:?}", c),
        }
    }
}

impl Atom {
    pub fn ty(&self) -> Ty {
        match self {
            Atom::Variable(_, ty) => *ty,
            Atom::IntConst(_) => Ty::int(),
            Atom::FloatConst(_) => Ty::f64(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl std::fmt::Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Op::Add => write!(f, "add"),
            Op::Sub => write!(f, "sub"),
            Op::Mul => write!(f, "mul"),
            Op::Div => write!(f, "div"),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BinOp {
    pub op: Op,
    pub ty: Ty,
    pub lhs: Atom,
    pub rhs: Atom,
}

LirImplInto!(Value for BinOp);

impl std::fmt::Display for BinOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}, {}", self.op, self.lhs, self.rhs)
    }
}

/// A handle to a generated specialization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FuncRef {
    pub idx: usize,
    pub name: String,
    pub param_tys: Vec<Ty>,
    pub ret_ty: Ty,
}

impl std::fmt::Display for FuncRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "$fn[{}]", self.name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub fn_ref: FuncRef,
    pub args: Vec<Atom>,
}

LirImplInto!(Value for Call);

impl std::fmt::Display for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "call {}({})", self.fn_ref, join(&self.args, ", "))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    BinOp(BinOp),
    Call(Call),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::BinOp(b) => write!(f, "{}", b),
            Value::Call(c) => write!(f, "{}", c),
        }
    }
}

impl Value {
    pub fn ty(&self) -> Ty {
        match self {
            Value::BinOp(b) => b.ty,
            Value::Call(c) => c.fn_ref.ret_ty,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Inst {
    SetLocal(usize, Value),
    Return(Atom),
}

impl std::fmt::Display for Inst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Inst::SetLocal(s, v) => write!(f, "${} = {}", s, v),
            Inst::Return(v) => write!(f, "ret {}", v),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    pub name: String,
    pub instructions: Vec<Inst>,
}

impl std::fmt::Display for Block {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", indent_lines(join(&self.instructions, "\n"), 2))
    }
}

impl Block {
    pub fn new<S: Into<String>>(name: S) -> Block {
        Block {
            name: name.into(),
            instructions: vec![],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub idx: usize,
    pub ty: Ty,
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${}: {}", self.idx, self.ty)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Func {
    pub name: String,
    pub binding: String,
    pub params: Vec<Param>,
    pub ret_ty: Ty,
    pub body: Block,
}

impl std::fmt::Display for Func {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "fn {}({}) -> {} {{\n{}\n}}",
            self.name,
            join(&self.params, ", "),
            self.ret_ty,
            self.body
        )
    }
}

impl Func {
    pub fn new<S: Into<String>>(name: S, binding: S, param_tys: &[Ty], ret_ty: Ty) -> Func {
        let name = name.into();
        log::debug!(
            "type of {}: ({}) -> {}",
            name,
            map_join(param_tys, ", ", |t| t.to_string()),
            ret_ty
        );
        Func {
            name,
            binding: binding.into(),
            params: param_tys
                .iter()
                .enumerate()
                .map(|(idx, ty)| Param { idx, ty: *ty })
                .collect(),
            ret_ty,
            body: Block::new("entry"),
        }
    }

    pub fn param_tys(&self) -> Vec<Ty> {
        self.params.iter().map(|p| p.ty).collect()
    }
}

/// The output module: generated specializations in generation order.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub module_path: String,
    pub funcs: Vec<Func>,
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", join(&self.funcs, "\n\n"))
    }
}

impl Program {
    pub fn new<S: Into<String>>(module_path: S) -> Program {
        Program {
            module_path: module_path.into(),
            funcs: vec![],
        }
    }

    pub fn push_func(&mut self, func: Func) -> FuncRef {
        let idx = self.funcs.len();
        let fn_ref = FuncRef {
            idx,
            name: func.name.clone(),
            param_tys: func.param_tys(),
            ret_ty: func.ret_ty,
        };
        self.funcs.push(func);
        fn_ref
    }

    pub fn get(&self, fn_ref: &FuncRef) -> Option<&Func> {
        self.funcs.get(fn_ref.idx)
    }

    pub fn len(&self) -> usize {
        self.funcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funcs.is_empty()
    }

    /// Drops every function generated after the first `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.funcs.truncate(len);
    }
}

#[cfg(test)]
mod lir_tests {
    use super::{Atom, BinOp, Func, Inst, Op, Program, Variable};
    use crate::typing::ty::Ty;

    #[test]
    fn displays_function() {
        let mut func = Func::new("add(int,int)", "add", &[Ty::int(), Ty::int()], Ty::int());
        func.body.instructions = vec![
            Inst::SetLocal(
                2,
                BinOp {
                    op: Op::Add,
                    ty: Ty::int(),
                    lhs: Atom::Variable(Variable::Param(0), Ty::int()),
                    rhs: Atom::Variable(Variable::Param(1), Ty::int()),
                }
                .into(),
            ),
            Inst::Return(Atom::Variable(Variable::Local(2), Ty::int())),
        ];

        let mut prog = Program::new("main");
        let fn_ref = prog.push_func(func);
        assert_eq!(fn_ref.idx, 0);
        assert_eq!(fn_ref.param_tys, vec![Ty::int(), Ty::int()]);
        assert_eq!(
            prog.to_string(),
            "fn add(int,int)($0: int, $1: int) -> int {\n  $2 = add $0, $1\n  ret $2\n}"
        );
    }

    #[test]
    fn atom_types() {
        assert_eq!(Atom::IntConst(1).ty(), Ty::int());
        assert_eq!(Atom::FloatConst(1.5).ty(), Ty::f64());
        assert_eq!(Atom::FloatConst(2.0).to_string(), "2.0");
    }
}
