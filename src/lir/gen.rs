use crate::{
    ast::{BinaryExpr, Expr, FuncCall},
    lir,
    sema::{op_key, Generator, Scope},
    typing::error::{GenError, GenResult},
};

pub trait LirGen<T> {
    fn lir_gen(&self, ctx: &mut GenCtx<'_, '_>) -> GenResult<T>;
}

/// State for lowering the body of one specialization.
pub struct GenCtx<'c, 'a> {
    gen: &'c mut Generator<'a>,
    scope: &'c Scope,
    func: lir::Func,
    next_local: usize,
}

impl<'c, 'a> GenCtx<'c, 'a> {
    fn new_local(&mut self) -> usize {
        let idx = self.next_local;
        self.next_local += 1;
        idx
    }

    fn push(&mut self, inst: lir::Inst) {
        self.func.body.instructions.push(inst);
    }

    fn set_local(&mut self, value: lir::Value) -> lir::Atom {
        let ty = value.ty();
        let loc = self.new_local();
        self.push(lir::Inst::SetLocal(loc, value));
        lir::Atom::Variable(lir::Variable::Local(loc), ty)
    }
}

impl<'a> Generator<'a> {
    /// Lowers `body` into `func` and terminates it with a return of the result.
    pub(crate) fn lower(
        &mut self,
        func: lir::Func,
        body: &Expr,
        scope: &Scope,
    ) -> GenResult<lir::Func> {
        let next_local = func.params.len();
        let mut ctx = GenCtx {
            gen: self,
            scope,
            func,
            next_local,
        };
        let value = body.lir_gen(&mut ctx)?;
        ctx.push(lir::Inst::Return(value));
        Ok(ctx.func)
    }
}

impl LirGen<lir::Atom> for Expr {
    fn lir_gen(&self, ctx: &mut GenCtx<'_, '_>) -> GenResult<lir::Atom> {
        Ok(match self {
            Expr::IntLiteral(digits) => {
                let value = digits
                    .parse::<i64>()
                    .map_err(|_| GenError::invalid_literal(digits))?;
                lir::Atom::IntConst(value)
            }
            Expr::FloatLiteral(digits) => {
                let value = digits
                    .parse::<f64>()
                    .map_err(|_| GenError::invalid_literal(digits))?;
                lir::Atom::FloatConst(value)
            }
            Expr::Ident(name) => {
                // parameters are read from the specialization's own arguments
                let idx = ctx
                    .scope
                    .index_of(name)
                    .ok_or_else(|| GenError::unknown_ident(name))?;
                let ty = ctx
                    .scope
                    .ty_of(name)
                    .ok_or_else(|| GenError::unknown_ident(name))?;
                lir::Atom::Variable(lir::Variable::Param(idx), ty)
            }
            Expr::BinaryExpr(ex) => ex.lir_gen(ctx)?,
            Expr::FuncCall(call) => call.lir_gen(ctx)?,
        })
    }
}

impl LirGen<lir::Atom> for BinaryExpr {
    fn lir_gen(&self, ctx: &mut GenCtx<'_, '_>) -> GenResult<lir::Atom> {
        let lhs = self.lhs.lir_gen(ctx)?;
        let rhs = self.rhs.lir_gen(ctx)?;
        let key = op_key(self.op, &lhs.ty(), &rhs.ty());
        let ty = match ctx.gen.type_of(&key) {
            Some(ty) => ty,
            None => return Err(GenError::unresolved_op(key)),
        };

        // an operator can have a type and still lack an instruction
        let op = match ctx.gen.operators().lowering(&key) {
            Some(op) => op.clone(),
            None => return Err(GenError::unresolved_op(key)),
        };

        Ok(ctx.set_local(lir::BinOp { op, ty, lhs, rhs }.into()))
    }
}

impl LirGen<lir::Atom> for FuncCall {
    fn lir_gen(&self, ctx: &mut GenCtx<'_, '_>) -> GenResult<lir::Atom> {
        let scope = ctx.scope;
        let fn_ref = ctx.gen.specialize_call(self, scope)?;
        let args = self
            .args
            .iter()
            .map(|arg| arg.expr.lir_gen(ctx))
            .collect::<GenResult<Vec<_>>>()?;
        Ok(ctx.set_local(lir::Call { fn_ref, args }.into()))
    }
}
