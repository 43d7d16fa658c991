mod infer;

pub mod error;
pub mod ops;
pub mod ty;

pub use error::{GenError, GenErrorKind, GenResult};
pub use ops::OperatorTable;
pub use ty::Ty;
