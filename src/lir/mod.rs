mod gen;
mod types;

pub use gen::*;
pub use types::*;
