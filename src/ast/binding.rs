use std::fmt;

use fnv::FnvHashMap;

use crate::{ast::Expr, span::Source, utils::join};

/// A named, parameterized expression: `add x y = x + y`.
#[derive(Clone, Debug)]
pub struct Binding {
    pub name: String,
    pub params: Vec<String>,
    pub body: Expr,
    pub src: Option<Source>,
}

impl PartialEq for Binding {
    fn eq(&self, other: &Binding) -> bool {
        self.name == other.name && self.params == other.params && self.body == other.body
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(binding {} [{}] {})",
            self.name,
            join(&self.params, " "),
            self.body
        )
    }
}

impl Binding {
    pub fn new<S: Into<String>>(name: S, params: Vec<&str>, body: Expr) -> Binding {
        Binding {
            name: name.into(),
            params: params.into_iter().map(String::from).collect(),
            body,
            src: None,
        }
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

/// Bindings by name, kept in definition order.
#[derive(Clone, Debug, Default)]
pub struct BindingTable {
    bindings: Vec<Binding>,
    index: FnvHashMap<String, usize>,
}

impl fmt::Display for BindingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", join(&self.bindings, "\n"))
    }
}

impl BindingTable {
    pub fn new() -> BindingTable {
        BindingTable::default()
    }

    /// Adds the binding unless one with the same name exists. Returns whether it was added.
    pub fn insert(&mut self, binding: Binding) -> bool {
        if self.index.contains_key(&binding.name) {
            return false;
        }

        self.index.insert(binding.name.clone(), self.bindings.len());
        self.bindings.push(binding);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.index.get(name).map(|idx| &self.bindings[*idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Binding> {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl From<Vec<Binding>> for BindingTable {
    fn from(bindings: Vec<Binding>) -> BindingTable {
        let mut table = BindingTable::new();
        for binding in bindings {
            table.insert(binding);
        }
        table
    }
}

impl<'a> IntoIterator for &'a BindingTable {
    type Item = &'a Binding;
    type IntoIter = std::slice::Iter<'a, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.bindings.iter()
    }
}

#[cfg(test)]
mod binding_tests {
    use super::{Binding, BindingTable};
    use crate::ast::{Expr, InfixOp};

    #[test]
    fn first_definition_wins() {
        let mut table = BindingTable::new();
        assert!(table.insert(Binding::new("i", vec![], Expr::int("1"))));
        assert!(!table.insert(Binding::new("i", vec![], Expr::int("2"))));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("i").map(|b| &b.body), Some(&Expr::int("1")));
    }

    #[test]
    fn keeps_definition_order() {
        let table = BindingTable::from(vec![
            Binding::new(
                "add",
                vec!["x", "y"],
                Expr::binary(InfixOp::Add, Expr::ident("x"), Expr::ident("y")),
            ),
            Binding::new("i", vec![], Expr::int("1")),
        ]);
        let names = table.iter().map(|b| b.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["add", "i"]);
        assert_eq!(
            table.to_string(),
            "(binding add [x y] (binop + x y))\n(binding i [] 1)"
        );
    }
}
