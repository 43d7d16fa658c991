use std::fmt;

use crate::errors::{ElzError, ElzErrorKind};

pub type GenResult<T> = Result<T, GenError>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GenErrorKind {
    ArityMismatch {
        binding: String,
        expected: usize,
        found: usize,
    },
    ArgumentNameMismatch {
        binding: String,
        position: usize,
        expected: String,
        found: String,
    },
    UnknownIdentifier(String),
    UnresolvedOperator(String),
    UnknownCallTarget(String),
    RecursiveSpecialization(String),
    InvalidLiteral(String),
}

/// A failed specialization request. `binding` names the binding whose body was
/// being generated when the error occurred, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenError {
    pub kind: GenErrorKind,
    pub binding: Option<String>,
}

impl From<GenErrorKind> for GenError {
    fn from(kind: GenErrorKind) -> GenError {
        GenError {
            kind,
            binding: None,
        }
    }
}

impl fmt::Display for GenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl From<GenError> for ElzError {
    fn from(err: GenError) -> Self {
        let kind = match &err.kind {
            GenErrorKind::UnknownIdentifier(_) | GenErrorKind::UnknownCallTarget(_) => {
                ElzErrorKind::Name
            }
            GenErrorKind::ArityMismatch { .. }
            | GenErrorKind::ArgumentNameMismatch { .. }
            | GenErrorKind::UnresolvedOperator(_) => ElzErrorKind::Type,
            GenErrorKind::RecursiveSpecialization(_) | GenErrorKind::InvalidLiteral(_) => {
                ElzErrorKind::Compile
            }
        };

        ElzError {
            msg: err.message(),
            src: vec![],
            kind,
        }
    }
}

impl GenError {
    pub fn arity<S: Into<String>>(binding: S, expected: usize, found: usize) -> Self {
        GenErrorKind::ArityMismatch {
            binding: binding.into(),
            expected,
            found,
        }
        .into()
    }

    pub fn arg_name<S: Into<String>>(
        binding: S,
        position: usize,
        expected: S,
        found: S,
    ) -> Self {
        GenErrorKind::ArgumentNameMismatch {
            binding: binding.into(),
            position,
            expected: expected.into(),
            found: found.into(),
        }
        .into()
    }

    pub fn unknown_ident<S: Into<String>>(name: S) -> Self {
        GenErrorKind::UnknownIdentifier(name.into()).into()
    }

    pub fn unresolved_op<S: Into<String>>(key: S) -> Self {
        GenErrorKind::UnresolvedOperator(key.into()).into()
    }

    pub fn unknown_call<S: Into<String>>(name: S) -> Self {
        GenErrorKind::UnknownCallTarget(name.into()).into()
    }

    pub fn recursive<S: Into<String>>(key: S) -> Self {
        GenErrorKind::RecursiveSpecialization(key.into()).into()
    }

    pub fn invalid_literal<S: Into<String>>(digits: S) -> Self {
        GenErrorKind::InvalidLiteral(digits.into()).into()
    }

    /// Attributes the error to `binding` unless an inner binding already claimed it.
    pub fn within(mut self, binding: &str) -> Self {
        if self.binding.is_none() {
            self.binding = Some(binding.to_string());
        }
        self
    }

    pub fn message(&self) -> String {
        let msg = match &self.kind {
            GenErrorKind::ArityMismatch {
                binding,
                expected,
                found,
            } => format!(
                "`{}` takes {} argument{} but {} {} supplied",
                binding,
                expected,
                if *expected == 1 { "" } else { "s" },
                found,
                if *found == 1 { "was" } else { "were" }
            ),
            GenErrorKind::ArgumentNameMismatch {
                binding,
                position,
                expected,
                found,
            } => format!(
                "argument {} of `{}` is labeled `{}`, but the parameter at that position is `{}`",
                position + 1,
                binding,
                found,
                expected
            ),
            GenErrorKind::UnknownIdentifier(name) => {
                format!("cannot find the type of identifier `{}`", name)
            }
            GenErrorKind::UnresolvedOperator(key) => {
                format!("no implementation of operator `{}`", key)
            }
            GenErrorKind::UnknownCallTarget(name) => format!("cannot find binding `{}`", name),
            GenErrorKind::RecursiveSpecialization(key) => {
                format!("`{}` depends on itself and cannot be specialized", key)
            }
            GenErrorKind::InvalidLiteral(digits) => {
                format!("literal `{}` is out of range for its type", digits)
            }
        };

        match &self.binding {
            Some(binding) => format!("{} (in `{}`)", msg, binding),
            None => msg,
        }
    }
}
