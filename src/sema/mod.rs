mod mangle;
mod specialize;

pub use mangle::*;
pub use specialize::*;
