use crate::{lir, strutils::is_plain_symbol, typing::ty::Ty, utils::map_join};

use super::Codegen;

/// Renders `program` as LLVM textual IR, one `define` per specialization in
/// generation order.
pub fn render(program: &lir::Program) -> String {
    let mut ctx = LLVMCodegenCtx::new();
    let funcs = program.funcs.codegen(&mut ctx);

    let mut out = String::new();
    if !program.module_path.is_empty() {
        out.push_str(&format!("; ModuleID = '{}'\n\n", program.module_path));
    }
    out.push_str(&funcs.join("\n\n"));
    out.push('\n');
    out
}

pub struct LLVMCodegenCtx {
    fn_count: usize,
}

impl LLVMCodegenCtx {
    fn new() -> LLVMCodegenCtx {
        LLVMCodegenCtx { fn_count: 0 }
    }
}

/// Symbol names that are not plain identifiers (every key with a type list)
/// have to be quoted.
fn global_name(name: &str) -> String {
    if is_plain_symbol(name) {
        format!("@{}", name)
    } else {
        format!("@\"{}\"", name.replace('\\', "\\5C").replace('"', "\\22"))
    }
}

fn llvm_ty(ty: &Ty) -> String {
    match ty {
        Ty::Int => format!("i{}", ty.bits()),
        Ty::F64 => str!("double"),
    }
}

impl Codegen<LLVMCodegenCtx> for lir::Atom {
    type Output = String;

    fn codegen(&self, _: &mut LLVMCodegenCtx) -> String {
        match self {
            lir::Atom::Variable(v, _) => format!("%{}", v.idx()),
            lir::Atom::IntConst(i) => i.to_string(),
            lir::Atom::FloatConst(f) => format!("0x{:016X}", f.to_bits()),
        }
    }
}

/// `value` with its type, as it appears in operand lists.
fn typed(atom: &lir::Atom, ctx: &mut LLVMCodegenCtx) -> String {
    format!("{} {}", llvm_ty(&atom.ty()), atom.codegen(ctx))
}

impl Codegen<LLVMCodegenCtx> for lir::BinOp {
    type Output = String;

    fn codegen(&self, ctx: &mut LLVMCodegenCtx) -> String {
        // integers are always signed
        let opcode = match (&self.op, self.ty.is_float()) {
            (lir::Op::Add, false) => "add",
            (lir::Op::Sub, false) => "sub",
            (lir::Op::Mul, false) => "mul",
            (lir::Op::Div, false) => "sdiv",
            (lir::Op::Add, true) => "fadd",
            (lir::Op::Sub, true) => "fsub",
            (lir::Op::Mul, true) => "fmul",
            (lir::Op::Div, true) => "fdiv",
        };
        format!(
            "{} {} {}, {}",
            opcode,
            llvm_ty(&self.ty),
            self.lhs.codegen(ctx),
            self.rhs.codegen(ctx)
        )
    }
}

impl Codegen<LLVMCodegenCtx> for lir::Call {
    type Output = String;

    fn codegen(&self, ctx: &mut LLVMCodegenCtx) -> String {
        let args = self
            .args
            .iter()
            .map(|a| typed(a, ctx))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "call {} {}({})",
            llvm_ty(&self.fn_ref.ret_ty),
            global_name(&self.fn_ref.name),
            args
        )
    }
}

impl Codegen<LLVMCodegenCtx> for lir::Value {
    type Output = String;

    fn codegen(&self, ctx: &mut LLVMCodegenCtx) -> String {
        match self {
            lir::Value::BinOp(b) => b.codegen(ctx),
            lir::Value::Call(c) => c.codegen(ctx),
        }
    }
}

impl Codegen<LLVMCodegenCtx> for lir::Inst {
    type Output = String;

    fn codegen(&self, ctx: &mut LLVMCodegenCtx) -> String {
        match self {
            lir::Inst::SetLocal(idx, value) => format!("%{} = {}", idx, value.codegen(ctx)),
            lir::Inst::Return(atom) => format!("ret {}", typed(atom, ctx)),
        }
    }
}

impl Codegen<LLVMCodegenCtx> for lir::Func {
    type Output = String;

    fn codegen(&self, ctx: &mut LLVMCodegenCtx) -> String {
        ctx.fn_count += 1;
        log::debug!("rendering function #{}: {}", ctx.fn_count, self.name);

        let params = map_join(&self.params, ", ", |p| {
            format!("{} %{}", llvm_ty(&p.ty), p.idx)
        });
        let body = self
            .body
            .instructions
            .codegen(ctx)
            .into_iter()
            .map(|line| format!("  {}", line))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "define {} {}({}) {{\n{}:\n{}\n}}",
            llvm_ty(&self.ret_ty),
            global_name(&self.name),
            params,
            self.body.name,
            body
        )
    }
}
