use fnv::FnvHashMap;

use crate::{ast::InfixOp, lir, sema::op_key, typing::ty::Ty};

lazy_static! {
    static ref BUILTIN_OPS: OperatorTable = OperatorTable::new_builtin();
}

/// Maps operator keys like `+(int,int)` to their result type and, separately,
/// to the instruction that implements them. An operator can type-check and
/// still have no lowering rule, so the two tables have to be extended together.
#[derive(Debug)]
pub struct OperatorTable {
    types: FnvHashMap<String, Ty>,
    lowering: FnvHashMap<String, lir::Op>,
}

impl OperatorTable {
    pub fn builtin() -> &'static OperatorTable {
        &BUILTIN_OPS
    }

    fn new_builtin() -> OperatorTable {
        let mut table = OperatorTable {
            types: FnvHashMap::default(),
            lowering: FnvHashMap::default(),
        };

        let arith = [
            (InfixOp::Add, lir::Op::Add),
            (InfixOp::Sub, lir::Op::Sub),
            (InfixOp::Mul, lir::Op::Mul),
            (InfixOp::Div, lir::Op::Div),
        ];
        for (op, inst) in arith.iter() {
            let int_key = op_key(*op, &Ty::int(), &Ty::int());
            table.types.insert(int_key.clone(), Ty::int());
            table.lowering.insert(int_key, inst.clone());

            // floats type-check but have no lowering rule yet
            table
                .types
                .insert(op_key(*op, &Ty::f64(), &Ty::f64()), Ty::f64());
        }

        table
    }

    pub fn result_ty(&self, key: &str) -> Option<Ty> {
        self.types.get(key).copied()
    }

    pub fn lowering(&self, key: &str) -> Option<&lir::Op> {
        self.lowering.get(key)
    }
}
