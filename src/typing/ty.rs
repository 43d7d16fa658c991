use std::fmt;

/// The built-in value types. Each carries a canonical name used in
/// specialization keys and enough structure to pick a target type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ty {
    Int,
    F64,
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Ty {
    pub fn int() -> Ty {
        Ty::Int
    }

    pub fn f64() -> Ty {
        Ty::F64
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ty::Int => "int",
            Ty::F64 => "f64",
        }
    }

    pub fn bits(&self) -> u32 {
        match self {
            Ty::Int | Ty::F64 => 64,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Ty::F64)
    }
}
