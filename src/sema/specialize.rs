use fnv::FnvHashMap;

use crate::{
    ast::{Arg, Binding, BindingTable, Expr, FuncCall},
    codegen::llvm,
    lir,
    sema::spec_key,
    typing::{
        error::{GenError, GenResult},
        ops::OperatorTable,
        ty::Ty,
    },
};

/// What a parameter stands for inside one specialization: the expression the
/// caller supplied (already expressed in the caller's own terms) and its type.
/// Inference and lowering only read `ty`; `expr` is kept for tracing.
#[derive(Clone, Debug, PartialEq)]
pub struct Bound {
    pub expr: Expr,
    pub ty: Ty,
}

/// The substitution and type environments of a single specialization.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    params: Vec<(String, Bound)>,
}

impl Scope {
    /// The scope of a top-level request, which has no parameters in view.
    pub fn root() -> Scope {
        Scope { params: vec![] }
    }

    fn bind(params: &[String], args: &[BoundArg]) -> Scope {
        Scope {
            params: params
                .iter()
                .zip(args.iter())
                .map(|(name, arg)| {
                    (
                        name.clone(),
                        Bound {
                            expr: arg.expr.clone(),
                            ty: arg.ty,
                        },
                    )
                })
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Bound> {
        self.params
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, bound)| bound)
    }

    pub fn ty_of(&self, name: &str) -> Option<Ty> {
        self.get(name).map(|b| b.ty)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|(param, _)| param == name)
    }

    pub fn tys(&self) -> Vec<Ty> {
        self.params.iter().map(|(_, b)| b.ty).collect()
    }

    /// Replaces every bound identifier in `expr` with the expression the
    /// caller supplied for it. Unbound identifiers are left alone.
    pub fn substitute(&self, expr: &Expr) -> Expr {
        match expr {
            Expr::Ident(name) => match self.get(name) {
                Some(bound) => bound.expr.clone(),
                None => expr.clone(),
            },
            Expr::IntLiteral(_) | Expr::FloatLiteral(_) => expr.clone(),
            Expr::BinaryExpr(ex) => Expr::binary(
                ex.op,
                self.substitute(&ex.lhs),
                self.substitute(&ex.rhs),
            ),
            Expr::FuncCall(call) => Expr::FuncCall(FuncCall {
                name: call.name.clone(),
                args: call
                    .args
                    .iter()
                    .map(|arg| Arg {
                        label: arg.label.clone(),
                        expr: self.substitute(&arg.expr),
                    })
                    .collect(),
            }),
        }
    }
}

/// A call-site argument after its type has been inferred in the caller's scope.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundArg {
    pub label: Option<String>,
    pub expr: Expr,
    pub ty: Ty,
}

#[derive(Clone, Debug)]
enum Slot {
    InProgress,
    Done(lir::FuncRef),
}

#[derive(Clone, Copy, Debug)]
struct Checkpoint {
    keys: usize,
    funcs: usize,
}

/// A code generation session over one binding table. Every specialization it
/// produces lands in a single output module, keyed by `name(ty1,ty2,...)`.
pub struct Generator<'a> {
    bindings: &'a BindingTable,
    ops: &'static OperatorTable,
    cache: FnvHashMap<String, Slot>,
    order: Vec<String>,
    types: FnvHashMap<String, Ty>,
    program: lir::Program,
}

impl<'a> Generator<'a> {
    pub fn new(bindings: &'a BindingTable) -> Generator<'a> {
        Generator::with_module(bindings, "main")
    }

    pub fn with_module<S: Into<String>>(bindings: &'a BindingTable, module: S) -> Generator<'a> {
        Generator {
            bindings,
            ops: OperatorTable::builtin(),
            cache: FnvHashMap::default(),
            order: vec![],
            types: FnvHashMap::default(),
            program: lir::Program::new(module),
        }
    }

    pub fn bindings(&self) -> &'a BindingTable {
        self.bindings
    }

    pub(crate) fn operators(&self) -> &'static OperatorTable {
        self.ops
    }

    /// Specializes `binding` for the types of `args`, generating it and
    /// everything it calls. On error the session is left as it was before the
    /// call.
    pub fn specialize(&mut self, binding: &Binding, args: &[Arg]) -> GenResult<lir::FuncRef> {
        log::debug!(
            "request: {}({})",
            binding.name,
            crate::utils::join(args, ", ")
        );

        let checkpoint = self.checkpoint();
        let result = self
            .bind_args(args, &Scope::root())
            .and_then(|args| self.specialize_bound(binding, &args));

        if let Err(err) = &result {
            log::debug!("request failed, rolling back: {}", err);
            self.rollback(checkpoint);
        }
        result
    }

    /// Like `specialize`, but resolves the callee by name first.
    pub fn call(&mut self, call: &FuncCall) -> GenResult<lir::FuncRef> {
        let bindings = self.bindings;
        let binding = bindings
            .get(&call.name)
            .ok_or_else(|| GenError::unknown_call(&call.name))?;
        self.specialize(binding, &call.args)
    }

    /// Resolves a nested call made from within `scope`.
    pub(crate) fn specialize_call(
        &mut self,
        call: &FuncCall,
        scope: &Scope,
    ) -> GenResult<lir::FuncRef> {
        let bindings = self.bindings;
        let binding = bindings
            .get(&call.name)
            .ok_or_else(|| GenError::unknown_call(&call.name))?;
        let args = self.bind_args(&call.args, scope)?;
        self.specialize_bound(binding, &args)
    }

    /// Infers the type of every argument in the caller's scope, and rewrites
    /// the argument in terms of the caller's own arguments.
    pub(crate) fn bind_args(&mut self, args: &[Arg], scope: &Scope) -> GenResult<Vec<BoundArg>> {
        args.iter()
            .map(|arg| {
                let ty = self.infer(&arg.expr, scope)?;
                Ok(BoundArg {
                    label: arg.label.clone(),
                    expr: scope.substitute(&arg.expr),
                    ty,
                })
            })
            .collect()
    }

    pub(crate) fn specialize_bound(
        &mut self,
        binding: &Binding,
        args: &[BoundArg],
    ) -> GenResult<lir::FuncRef> {
        // checked on every call site, cached or not
        if args.len() != binding.arity() {
            return Err(GenError::arity(&binding.name, binding.arity(), args.len()));
        }

        for (i, (arg, param)) in args.iter().zip(binding.params.iter()).enumerate() {
            if let Some(label) = &arg.label {
                if label != param {
                    return Err(GenError::arg_name(
                        binding.name.as_str(),
                        i,
                        param.as_str(),
                        label.as_str(),
                    ));
                }
            }
        }

        let key = spec_key(&binding.name, args.iter().map(|a| &a.ty));
        match self.cache.get(&key) {
            Some(Slot::Done(fn_ref)) => {
                log::debug!("cache hit: {}", key);
                return Ok(fn_ref.clone());
            }
            Some(Slot::InProgress) => return Err(GenError::recursive(key)),
            None => (),
        }

        log::debug!("specializing {}", key);
        self.cache.insert(key.clone(), Slot::InProgress);
        self.order.push(key.clone());

        let scope = Scope::bind(&binding.params, args);
        for (name, bound) in scope.params.iter() {
            log::debug!("  {} := {}: {}", name, bound.expr, bound.ty);
        }

        let fn_ref = self
            .generate(&key, binding, &scope)
            .map_err(|err| err.within(&binding.name))?;
        self.cache.insert(key, Slot::Done(fn_ref.clone()));
        Ok(fn_ref)
    }

    fn generate(&mut self, key: &str, binding: &Binding, scope: &Scope) -> GenResult<lir::FuncRef> {
        let ret_ty = self.infer(&binding.body, scope)?;
        log::debug!("inferred {} -> {}", key, ret_ty);
        self.types.insert(key.to_string(), ret_ty);

        let func = lir::Func::new(key, binding.name.as_str(), &scope.tys(), ret_ty);
        let func = self.lower(func, &binding.body, scope)?;
        log::debug!("emitted:\n{}", func);
        Ok(self.program.push_func(func))
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            keys: self.order.len(),
            funcs: self.program.len(),
        }
    }

    fn rollback(&mut self, checkpoint: Checkpoint) {
        for key in self.order.drain(checkpoint.keys..) {
            self.cache.remove(&key);
            self.types.remove(&key);
        }
        self.program.truncate(checkpoint.funcs);
    }

    /// The result type registered under `key`. Built-in operators are
    /// consulted before user specializations.
    pub fn type_of(&self, key: &str) -> Option<Ty> {
        self.ops
            .result_ty(key)
            .or_else(|| self.types.get(key).copied())
    }

    /// The completed specialization registered under `key`.
    pub fn lookup(&self, key: &str) -> Option<&lir::FuncRef> {
        match self.cache.get(key) {
            Some(Slot::Done(fn_ref)) => Some(fn_ref),
            _ => None,
        }
    }

    pub fn is_in_progress(&self, key: &str) -> bool {
        matches!(self.cache.get(key), Some(Slot::InProgress))
    }

    /// Keys of every cached specialization, in generation request order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(|k| k.as_str())
    }

    pub fn program(&self) -> &lir::Program {
        &self.program
    }

    pub fn into_program(self) -> lir::Program {
        self.program
    }

    pub fn render(&self) -> String {
        llvm::render(&self.program)
    }
}
