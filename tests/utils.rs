#![cfg(test)]

use elz::{
    ast::{Arg, BindingTable, FuncCall},
    errors::ElzError,
    parse::Parser,
    sema::Generator,
    typing::GenError,
};

#[allow(dead_code)]
pub fn enable_debug_logs() {
    fern::Dispatch::new()
        .level(log::LevelFilter::Debug)
        .chain(std::io::stderr())
        .apply()
        .unwrap();
}

#[allow(dead_code)]
pub fn test_bindings(src: &str) -> BindingTable {
    match Parser::parse(src, "test.elz") {
        Ok(table) => table,
        Err(errs) => panic!(
            "could not parse bindings: {}",
            errs.iter()
                .map(ElzError::to_string)
                .collect::<Vec<_>>()
                .join("; ")
        ),
    }
}

#[allow(dead_code)]
pub fn test_call(src: &str) -> FuncCall {
    Parser::parse_call(src, "<call>").expect("could not parse call")
}

/// Specializes `name` with `args` in a session of its own.
#[allow(dead_code)]
pub fn specialize(bindings: &BindingTable, name: &str, args: &[Arg]) -> Result<String, GenError> {
    let mut gen = Generator::new(bindings);
    let binding = bindings
        .get(name)
        .unwrap_or_else(|| panic!("no binding named {}", name));
    gen.specialize(binding, args)?;
    Ok(gen.render())
}
