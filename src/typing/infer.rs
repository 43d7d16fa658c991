use crate::{
    ast::Expr,
    sema::{op_key, Generator, Scope},
    typing::{
        error::{GenError, GenResult},
        ty::Ty,
    },
};

impl<'a> Generator<'a> {
    /// Infers the static type of `expr` within `scope`. Calls are resolved by
    /// specializing the callee, so inference can generate code as a side effect.
    pub(crate) fn infer(&mut self, expr: &Expr, scope: &Scope) -> GenResult<Ty> {
        match expr {
            Expr::IntLiteral(_) => Ok(Ty::int()),
            Expr::FloatLiteral(_) => Ok(Ty::f64()),
            Expr::Ident(name) => scope
                .ty_of(name)
                .ok_or_else(|| GenError::unknown_ident(name)),
            Expr::BinaryExpr(ex) => {
                let lhs = self.infer(&ex.lhs, scope)?;
                let rhs = self.infer(&ex.rhs, scope)?;
                let key = op_key(ex.op, &lhs, &rhs);
                self.type_of(&key)
                    .ok_or_else(|| GenError::unresolved_op(key))
            }
            Expr::FuncCall(call) => {
                let fn_ref = self.specialize_call(call, scope)?;
                Ok(fn_ref.ret_ty)
            }
        }
    }
}

#[cfg(test)]
mod infer_tests {
    use crate::{
        ast::{Arg, Binding, BindingTable, Expr, InfixOp},
        sema::{Generator, Scope},
        typing::{error::GenErrorKind, ty::Ty},
    };

    #[test]
    fn infers_literals_and_operators() {
        let bindings = BindingTable::new();
        let mut gen = Generator::new(&bindings);
        let scope = Scope::root();

        assert_eq!(gen.infer(&Expr::int("7"), &scope), Ok(Ty::int()));
        assert_eq!(gen.infer(&Expr::float("0.5"), &scope), Ok(Ty::f64()));

        let sum = Expr::binary(InfixOp::Add, Expr::int("1"), Expr::int("2"));
        assert_eq!(gen.infer(&sum, &scope), Ok(Ty::int()));

        // f64 arithmetic has a result type even though it cannot be lowered
        let product = Expr::binary(InfixOp::Mul, Expr::float("1.5"), Expr::float("2.0"));
        assert_eq!(gen.infer(&product, &scope), Ok(Ty::f64()));
    }

    #[test]
    fn mixed_operands_do_not_coerce() {
        let bindings = BindingTable::new();
        let mut gen = Generator::new(&bindings);
        let mixed = Expr::binary(InfixOp::Add, Expr::int("1"), Expr::float("2.0"));
        let err = gen.infer(&mixed, &Scope::root()).unwrap_err();
        assert_eq!(err.kind, GenErrorKind::UnresolvedOperator(str!("+(int,f64)")));
    }

    #[test]
    fn unknown_identifier() {
        let bindings = BindingTable::new();
        let mut gen = Generator::new(&bindings);
        let err = gen.infer(&Expr::ident("x"), &Scope::root()).unwrap_err();
        assert_eq!(err.kind, GenErrorKind::UnknownIdentifier(str!("x")));
    }

    #[test]
    fn call_type_is_callee_return_type() {
        let bindings = BindingTable::from(vec![
            Binding::new("half", vec!["x"], Expr::ident("x")),
            Binding::new(
                "wrap",
                vec!["v"],
                Expr::call("half", vec![Arg::new(Expr::ident("v"))]),
            ),
        ]);
        let mut gen = Generator::new(&bindings);
        let call = Expr::call("wrap", vec![Arg::new(Expr::float("3.0"))]);
        assert_eq!(gen.infer(&call, &Scope::root()), Ok(Ty::f64()));
        assert!(gen.lookup("half(f64)").is_some());
        assert!(gen.lookup("wrap(f64)").is_some());
    }
}
