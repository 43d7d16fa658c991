use crate::{ast::InfixOp, typing::ty::Ty, utils::join};

/// The canonical key of a specialization: `name(ty1,ty2,...)`. Bindings
/// without parameters are keyed by their bare name.
pub fn spec_key<'t, S, I>(name: S, tys: I) -> String
where
    S: ToString,
    I: IntoIterator<Item = &'t Ty>,
{
    let tys = tys.into_iter().collect::<Vec<_>>();
    let mut key = name.to_string();
    if !tys.is_empty() {
        key = format!("{}({})", key, join(tys, ","));
    }
    key
}

/// Operator keys share the specialization key namespace, e.g. `+(int,int)`.
pub fn op_key(op: InfixOp, lhs: &Ty, rhs: &Ty) -> String {
    spec_key(op, vec![lhs, rhs])
}

#[cfg(test)]
mod mangle_tests {
    use super::{op_key, spec_key};
    use crate::{ast::InfixOp, typing::ty::Ty};

    #[test]
    fn keys_by_name_and_types() {
        assert_eq!(spec_key("add", &[Ty::int(), Ty::int()]), "add(int,int)");
        assert_eq!(spec_key("identity", &[Ty::f64()]), "identity(f64)");
        assert_eq!(spec_key("i", Vec::<&Ty>::new()), "i");
    }

    #[test]
    fn operator_keys() {
        assert_eq!(op_key(InfixOp::Add, &Ty::int(), &Ty::int()), "+(int,int)");
        assert_eq!(op_key(InfixOp::Div, &Ty::f64(), &Ty::int()), "/(f64,int)");
    }
}
