//! Rule-like constructs: rules, queries and their atoms.
//!
//! A rule and a query share the same shape (name, body atoms, head atoms).
//! The only signal telling them apart is whether any builtin atom carries a
//! predicate name from the reserved query builtin set, which arrives from
//! configuration rather than from a type tag.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Mutex, MutexGuard};

use lazy_static::lazy_static;
use serde::Serialize;

use crate::construct::{Iri, Literal, NameHasher};

// ------------- Atom -------------
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum AtomArgument {
    Variable(String),
    Individual(Iri),
    Literal(Literal),
}
impl fmt::Display for AtomArgument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AtomArgument::Variable(name) => write!(f, "?{}", name),
            AtomArgument::Individual(iri) => write!(f, "{}", iri),
            AtomArgument::Literal(literal) => write!(f, "{}", literal),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Atom {
    Class {
        class: Iri,
        argument: AtomArgument,
    },
    ObjectProperty {
        property: Iri,
        subject: AtomArgument,
        object: AtomArgument,
    },
    DataProperty {
        property: Iri,
        subject: AtomArgument,
        value: AtomArgument,
    },
    SameAs {
        first: AtomArgument,
        second: AtomArgument,
    },
    DifferentFrom {
        first: AtomArgument,
        second: AtomArgument,
    },
    Builtin {
        predicate: String,
        arguments: Vec<AtomArgument>,
    },
}
impl Atom {
    pub fn predicate_name(&self) -> &str {
        match self {
            Atom::Class { class, .. } => class.as_str(),
            Atom::ObjectProperty { property, .. } => property.as_str(),
            Atom::DataProperty { property, .. } => property.as_str(),
            Atom::SameAs { .. } => "sameAs",
            Atom::DifferentFrom { .. } => "differentFrom",
            Atom::Builtin { predicate, .. } => predicate,
        }
    }
    pub fn is_builtin_among(&self, names: &QueryBuiltins) -> bool {
        match self {
            Atom::Builtin { predicate, .. } => names.contains(predicate),
            _ => false,
        }
    }
}
impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Atom::Class { class, argument } => write!(f, "{}({})", class, argument),
            Atom::ObjectProperty {
                property,
                subject,
                object,
            } => write!(f, "{}({}, {})", property, subject, object),
            Atom::DataProperty {
                property,
                subject,
                value,
            } => write!(f, "{}({}, {})", property, subject, value),
            Atom::SameAs { first, second } => write!(f, "sameAs({}, {})", first, second),
            Atom::DifferentFrom { first, second } => {
                write!(f, "differentFrom({}, {})", first, second)
            }
            Atom::Builtin {
                predicate,
                arguments,
            } => {
                let mut s = String::new();
                for argument in arguments {
                    s += &(argument.to_string() + ", ");
                }
                s.pop();
                s.pop();
                write!(f, "{}({})", predicate, s)
            }
        }
    }
}

// ------------- QueryBuiltins -------------
// The reserved predicate names that flag a rule-like construct as a query.
// The default set covers selection, aggregation, ordering, slicing and
// collection operators; configuration may add further names.
lazy_static! {
    static ref DEFAULT_BUILTIN_NAMES: Vec<&'static str> = vec![
        "select",
        "selectDistinct",
        "count",
        "countDistinct",
        "min",
        "max",
        "sum",
        "avg",
        "median",
        "orderBy",
        "orderByDescending",
        "columnNames",
        "limit",
        "makeSet",
        "makeBag",
        "groupBy",
        "size",
        "isEmpty",
        "notEmpty",
        "intersection",
        "union",
        "difference",
    ];
}

#[derive(Debug, Clone)]
pub struct QueryBuiltins {
    names: HashSet<String, NameHasher>,
}
impl QueryBuiltins {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }
    pub fn with_additional(additional: &[String]) -> Self {
        let mut builtins = Self::default();
        for name in additional {
            builtins.names.insert(name.clone());
        }
        builtins
    }
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }
    pub fn len(&self) -> usize {
        self.names.len()
    }
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
impl Default for QueryBuiltins {
    fn default() -> Self {
        Self::new(DEFAULT_BUILTIN_NAMES.iter().map(|name| name.to_string()))
    }
}

// ------------- Rule -------------
// A rule is an ordinary statement and enters the master asserted set.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Rule {
    name: String,
    body: Vec<Atom>,
    head: Vec<Atom>,
    active: bool,
    comment: String,
}
impl Rule {
    pub fn new(
        name: impl Into<String>,
        body: Vec<Atom>,
        head: Vec<Atom>,
        active: bool,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            body,
            head,
            active,
            comment: comment.into(),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn body(&self) -> &[Atom] {
        &self.body
    }
    pub fn head(&self) -> &[Atom] {
        &self.head
    }
    pub fn active(&self) -> bool {
        self.active
    }
    pub fn comment(&self) -> &str {
        &self.comment
    }
    pub fn builtin_atoms_from_head(&self, names: &QueryBuiltins) -> Vec<&Atom> {
        Self::builtin_atoms_among(&self.head, names)
    }
    pub fn builtin_atoms_from_body(&self, names: &QueryBuiltins) -> Vec<&Atom> {
        Self::builtin_atoms_among(&self.body, names)
    }
    fn builtin_atoms_among<'a>(atoms: &'a [Atom], names: &QueryBuiltins) -> Vec<&'a Atom> {
        atoms
            .iter()
            .filter(|atom| atom.is_builtin_among(names))
            .collect()
    }
}
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {}",
            self.name,
            join_atoms(&self.body),
            join_atoms(&self.head)
        )
    }
}

fn join_atoms(atoms: &[Atom]) -> String {
    let mut s = String::new();
    for atom in atoms {
        s += &(atom.to_string() + " ^ ");
    }
    for _ in 0..3 {
        s.pop();
    }
    s
}

// ------------- Query -------------
// Structurally a rule, but never a statement. A query additionally owns
// the mutable result that execution populates.
#[derive(Debug)]
pub struct Query {
    name: String,
    body: Vec<Atom>,
    head: Vec<Atom>,
    active: bool,
    comment: String,
    result: Mutex<QueryResult>,
}
impl Query {
    pub fn new(
        name: impl Into<String>,
        body: Vec<Atom>,
        head: Vec<Atom>,
        active: bool,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            body,
            head,
            active,
            comment: comment.into(),
            result: Mutex::new(QueryResult::new()),
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn body(&self) -> &[Atom] {
        &self.body
    }
    pub fn head(&self) -> &[Atom] {
        &self.head
    }
    pub fn active(&self) -> bool {
        self.active
    }
    pub fn comment(&self) -> &str {
        &self.comment
    }
    /// Snapshot of the current result.
    pub fn result(&self) -> QueryResult {
        self.result.lock().unwrap().clone()
    }
    /// Writable handle for the executor that populates the result.
    pub fn result_mut(&self) -> MutexGuard<'_, QueryResult> {
        self.result.lock().unwrap()
    }
}
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}: {} -> {}",
            self.name,
            join_atoms(&self.body),
            join_atoms(&self.head)
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}
impl QueryResult {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn set_columns(&mut self, columns: Vec<String>) {
        self.columns = columns;
    }
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
    pub fn clear(&mut self) {
        self.columns.clear();
        self.rows.clear();
    }
}
