//! The backing ontology store, seen through the narrow interface the
//! processor consumes: retrieval of statements by category, and the ordered
//! sequence of rule-like constructs awaiting classification.

use std::sync::Arc;

use crate::construct::{Axiom, AxiomKind};
use crate::rule::Rule;

pub trait OntologySource {
    /// All statements of the given category. When `asserted_only` is set,
    /// statements the store itself inferred are excluded.
    fn axioms_with_kind(&self, kind: AxiomKind, asserted_only: bool) -> Vec<Axiom>;
    /// The rule-like constructs, in the order they were supplied.
    fn rule_candidates(&self) -> Vec<Arc<Rule>>;
}

// ------------- MemoryOntology -------------
// An insertion-ordered in-memory store. Inferred statements are held apart
// from asserted ones so the asserted_only flag can be honored.
#[derive(Debug, Default)]
pub struct MemoryOntology {
    asserted: Vec<Axiom>,
    inferred: Vec<Axiom>,
    rules: Vec<Arc<Rule>>,
}
impl MemoryOntology {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn add_axiom(&mut self, axiom: Axiom) {
        if !self.asserted.contains(&axiom) {
            self.asserted.push(axiom);
        }
    }
    pub fn add_inferred_axiom(&mut self, axiom: Axiom) {
        if !self.inferred.contains(&axiom) {
            self.inferred.push(axiom);
        }
    }
    pub fn add_rule(&mut self, rule: Rule) -> Arc<Rule> {
        let rule = Arc::new(rule);
        self.rules.push(Arc::clone(&rule));
        rule
    }
    pub fn axiom_count(&self) -> usize {
        self.asserted.len()
    }
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}
impl OntologySource for MemoryOntology {
    fn axioms_with_kind(&self, kind: AxiomKind, asserted_only: bool) -> Vec<Axiom> {
        let mut axioms: Vec<Axiom> = self
            .asserted
            .iter()
            .filter(|axiom| axiom.kind() == kind)
            .cloned()
            .collect();
        if !asserted_only {
            axioms.extend(
                self.inferred
                    .iter()
                    .filter(|axiom| axiom.kind() == kind)
                    .cloned(),
            );
        }
        axioms
    }
    fn rule_candidates(&self) -> Vec<Arc<Rule>> {
        self.rules.clone()
    }
}
