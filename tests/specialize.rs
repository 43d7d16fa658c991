#![cfg(test)]

mod utils;

use elz::{
    ast::{Arg, Expr},
    sema::Generator,
    typing::{GenErrorKind, Ty},
};
use utils::{test_bindings, test_call};

const SRC: &str = r#"
// arithmetic
add x y = x + y
addOne y = add(1, y)
identity x = x
assert that should_be = that - should_be
scale x = x * 2.0
loop n = loop(n)
ping n = pong(n)
pong n = ping(n)
broken = nope(1)
"#;

#[test]
fn memoizes_by_key() {
    let bindings = test_bindings(SRC);
    let mut gen = Generator::new(&bindings);
    let add = bindings.get("add").unwrap();

    let first = gen
        .specialize(add, &[Arg::new(Expr::int("1")), Arg::new(Expr::int("2"))])
        .unwrap();
    let second = gen
        .specialize(add, &[Arg::new(Expr::int("3")), Arg::new(Expr::int("4"))])
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(gen.program().len(), 1);
    assert_eq!(gen.render().matches("@\"add(int,int)\"(").count(), 1);
}

#[test]
fn fans_out_by_argument_type() {
    let bindings = test_bindings(SRC);
    let mut gen = Generator::new(&bindings);
    let identity = bindings.get("identity").unwrap();

    let int = gen.specialize(identity, &[Arg::new(Expr::int("1"))]).unwrap();
    let float = gen
        .specialize(identity, &[Arg::new(Expr::float("1.0"))])
        .unwrap();

    assert_ne!(int, float);
    assert_eq!(int.name, "identity(int)");
    assert_eq!(float.name, "identity(f64)");
    assert_eq!(gen.type_of("identity(int)"), Some(Ty::int()));
    assert_eq!(gen.type_of("identity(f64)"), Some(Ty::f64()));
    assert_eq!(gen.program().len(), 2);
}

#[test]
fn enforces_arity() {
    let bindings = test_bindings(SRC);
    let mut gen = Generator::new(&bindings);
    let add = bindings.get("add").unwrap();

    let err = gen.specialize(add, &[Arg::new(Expr::int("1"))]).unwrap_err();
    assert_eq!(
        err.kind,
        GenErrorKind::ArityMismatch {
            binding: "add".to_string(),
            expected: 2,
            found: 1
        }
    );
    assert!(gen.lookup("add(int)").is_none());

    let three = vec![Arg::new(Expr::int("1")); 3];
    let err = gen.specialize(add, &three).unwrap_err();
    assert!(matches!(err.kind, GenErrorKind::ArityMismatch { found: 3, .. }));
    assert!(gen.lookup("add(int,int,int)").is_none());
    assert_eq!(gen.type_of("add(int,int,int)"), None);
    assert!(gen.program().is_empty());
}

#[test]
fn matches_named_arguments() {
    let bindings = test_bindings(SRC);

    let mut gen = Generator::new(&bindings);
    let ok = gen.call(&test_call("assert(that: 1, should_be: 1)"));
    assert!(ok.is_ok(), "{:?}", ok);

    // labels are checked by position, never used to reorder
    let mut gen = Generator::new(&bindings);
    let err = gen
        .call(&test_call("assert(should_be: 1, that: 1)"))
        .unwrap_err();
    assert_eq!(
        err.kind,
        GenErrorKind::ArgumentNameMismatch {
            binding: "assert".to_string(),
            position: 0,
            expected: "that".to_string(),
            found: "should_be".to_string(),
        }
    );
    assert!(gen.program().is_empty());
}

#[test]
fn labels_are_checked_on_cached_specializations() {
    let bindings = test_bindings(SRC);
    let mut gen = Generator::new(&bindings);
    gen.call(&test_call("assert(that: 1, should_be: 1)")).unwrap();
    let before = gen.render();

    // same key as the cached specialization, but the labels are swapped
    let err = gen
        .call(&test_call("assert(should_be: 3, that: 1)"))
        .unwrap_err();
    assert!(matches!(
        err.kind,
        GenErrorKind::ArgumentNameMismatch { position: 0, .. }
    ));

    // and from inside another binding
    let nested = test_bindings(&format!("{}t = assert(should_be: 3, that: 1)
", SRC));
    let mut gen = Generator::new(&nested);
    gen.call(&test_call("assert(that: 1, should_be: 1)")).unwrap();
    let err = gen.call(&test_call("t()")).unwrap_err();
    assert!(matches!(
        err.kind,
        GenErrorKind::ArgumentNameMismatch { position: 0, .. }
    ));
    assert_eq!(err.binding.as_deref(), Some("t"));
    assert!(gen.lookup("t").is_none());
    assert!(!gen.render().contains("(i64 3, i64 1)"));

    let mut gen = Generator::new(&bindings);
    gen.call(&test_call("assert(that: 1, should_be: 1)")).unwrap();
    assert!(gen.call(&test_call("assert(1, 2)")).is_ok());
    assert_eq!(gen.render(), before);
}

#[test]
fn arity_is_checked_on_every_call() {
    let bindings = test_bindings(SRC);
    let mut gen = Generator::new(&bindings);
    gen.call(&test_call("identity(1)")).unwrap();
    let err = gen.call(&test_call("identity(1, 2)")).unwrap_err();
    assert!(matches!(err.kind, GenErrorKind::ArityMismatch { found: 2, .. }));
}

#[test]
fn mixes_labeled_and_positional_arguments() {
    let bindings = test_bindings(SRC);
    let mut gen = Generator::new(&bindings);
    assert!(gen.call(&test_call("assert(1, should_be: 2)")).is_ok());
}

#[test]
fn unknown_target_leaves_module_unmodified() {
    let bindings = test_bindings(SRC);
    let mut gen = Generator::new(&bindings);
    gen.call(&test_call("addOne(1)")).unwrap();
    let before = gen.render();

    let err = gen.call(&test_call("missing(1)")).unwrap_err();
    assert_eq!(err.kind, GenErrorKind::UnknownCallTarget("missing".to_string()));

    let err = gen.call(&test_call("broken()")).unwrap_err();
    assert_eq!(err.kind, GenErrorKind::UnknownCallTarget("nope".to_string()));
    assert_eq!(err.binding.as_deref(), Some("broken"));
    assert_eq!(gen.render(), before);
}

#[test]
fn detects_recursion() {
    let bindings = test_bindings(SRC);
    let mut gen = Generator::new(&bindings);

    let err = gen.call(&test_call("loop(1)")).unwrap_err();
    assert_eq!(
        err.kind,
        GenErrorKind::RecursiveSpecialization("loop(int)".to_string())
    );

    let err = gen.call(&test_call("ping(1)")).unwrap_err();
    assert_eq!(
        err.kind,
        GenErrorKind::RecursiveSpecialization("ping(int)".to_string())
    );
    assert_eq!(err.binding.as_deref(), Some("pong"));

    // nothing is left marked in progress
    assert!(!gen.is_in_progress("ping(int)"));
    assert!(!gen.is_in_progress("pong(int)"));
    assert_eq!(gen.keys().count(), 0);
}

#[test]
fn float_arithmetic_has_no_lowering() {
    let bindings = test_bindings(SRC);
    let mut gen = Generator::new(&bindings);
    let err = gen.call(&test_call("scale(1.5)")).unwrap_err();
    assert_eq!(
        err.kind,
        GenErrorKind::UnresolvedOperator("*(f64,f64)".to_string())
    );
    assert_eq!(gen.type_of("scale(f64)"), None);
}

#[test]
fn failed_request_rolls_back_nested_work() {
    let bindings = test_bindings("inner x = x\nouter x = inner(x) + 1.0\n");
    let mut gen = Generator::new(&bindings);

    // `inner(int)` completes before `+(int,f64)` fails
    let err = gen.call(&test_call("outer(1)")).unwrap_err();
    assert_eq!(
        err.kind,
        GenErrorKind::UnresolvedOperator("+(int,f64)".to_string())
    );
    assert_eq!(err.binding.as_deref(), Some("outer"));
    assert!(gen.lookup("inner(int)").is_none());
    assert!(gen.program().is_empty());

    // the session is still usable
    gen.call(&test_call("inner(1)")).unwrap();
    assert_eq!(gen.program().len(), 1);
}

#[test]
fn independent_sessions() {
    let bindings = test_bindings(SRC);
    let mut a = Generator::new(&bindings);
    let b = Generator::new(&bindings);
    a.call(&test_call("addOne(5)")).unwrap();
    assert_eq!(a.program().len(), 2);
    assert!(b.program().is_empty());
    assert!(b.lookup("addOne(int)").is_none());
}
