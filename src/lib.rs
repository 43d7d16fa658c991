#[macro_use]
extern crate lazy_static;

#[macro_use]
pub mod macros;

pub mod ast;
pub mod cli;
pub mod codegen;
pub mod driver;
pub mod errors;
pub mod lir;
pub mod parse;
pub mod sema;
pub mod span;
pub mod strutils;
pub mod typing;
pub mod utils;
