mod binding;
mod expr;
pub mod token;

pub use binding::*;
pub use expr::*;
