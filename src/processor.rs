//! The processing engine: classifies rule-like constructs into rules and
//! queries, then computes the declaration closure of every statement
//! category served by the backing store.
//!
//! The processor owns all registries for the duration of one pass: the
//! rule and query tables, the master asserted-statement set and one
//! declaration keeper per entity kind. It is rebuilt from scratch on every
//! [`Processor::process_ontology`] call; there is no incremental update.
//! Callers must serialize processing; reads are safe to share once a pass
//! has completed.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::construct::{
    Axiom, AxiomKind, ClassTerm, Declaration, DeclarationKeeper, Entity, EntityKind,
    IndividualTerm, Iri, NameHasher, ObjectPropertyTerm,
};
use crate::error::{OntolithError, Result};
use crate::resolve::EntityRecorder;
use crate::rule::{Query, QueryBuiltins, QueryResult, Rule};
use crate::store::OntologySource;

// Declaration categories run first so explicit declarations are recorded
// before any synthesis takes place; assertions and hierarchy axioms follow,
// property characteristics last.
const PROCESSING_ORDER: [AxiomKind; 30] = [
    AxiomKind::ClassDeclaration,
    AxiomKind::IndividualDeclaration,
    AxiomKind::ObjectPropertyDeclaration,
    AxiomKind::DataPropertyDeclaration,
    AxiomKind::AnnotationPropertyDeclaration,
    AxiomKind::ClassAssertion,
    AxiomKind::ObjectPropertyAssertion,
    AxiomKind::DataPropertyAssertion,
    AxiomKind::SameIndividual,
    AxiomKind::DifferentIndividuals,
    AxiomKind::SubClassOf,
    AxiomKind::EquivalentClasses,
    AxiomKind::SubObjectPropertyOf,
    AxiomKind::SubDataPropertyOf,
    AxiomKind::EquivalentDataProperties,
    AxiomKind::EquivalentObjectProperties,
    AxiomKind::TransitiveObjectProperty,
    AxiomKind::SymmetricObjectProperty,
    AxiomKind::FunctionalObjectProperty,
    AxiomKind::InverseFunctionalObjectProperty,
    AxiomKind::FunctionalDataProperty,
    AxiomKind::ObjectPropertyDomain,
    AxiomKind::DataPropertyDomain,
    AxiomKind::ObjectPropertyRange,
    AxiomKind::DataPropertyRange,
    AxiomKind::InverseObjectProperties,
    AxiomKind::IrreflexiveObjectProperty,
    AxiomKind::AsymmetricObjectProperty,
    AxiomKind::DisjointObjectProperties,
    AxiomKind::DisjointDataProperties,
];

pub struct Processor<S: OntologySource, R: EntityRecorder> {
    // collaborators, owned externally
    source: Arc<S>,
    recorder: Arc<Mutex<R>>,
    // the reserved predicate names that turn a rule-like construct into a query
    builtins: QueryBuiltins,
    // owned registries, rebuilt on every pass
    rules: HashMap<String, Arc<Rule>, NameHasher>,
    queries: HashMap<String, Arc<Query>, NameHasher>,
    asserted: HashSet<Axiom, NameHasher>,
    class_declarations: DeclarationKeeper,
    individual_declarations: DeclarationKeeper,
    object_property_declarations: DeclarationKeeper,
    data_property_declarations: DeclarationKeeper,
    annotation_property_declarations: DeclarationKeeper,
}

impl<S: OntologySource, R: EntityRecorder> Processor<S, R> {
    pub fn new(source: Arc<S>, recorder: Arc<Mutex<R>>) -> Self {
        Self::with_builtins(source, recorder, QueryBuiltins::default())
    }
    pub fn with_builtins(source: Arc<S>, recorder: Arc<Mutex<R>>, builtins: QueryBuiltins) -> Self {
        Self {
            source,
            recorder,
            builtins,
            rules: HashMap::default(),
            queries: HashMap::default(),
            asserted: HashSet::default(),
            class_declarations: DeclarationKeeper::new(EntityKind::Class),
            individual_declarations: DeclarationKeeper::new(EntityKind::NamedIndividual),
            object_property_declarations: DeclarationKeeper::new(EntityKind::ObjectProperty),
            data_property_declarations: DeclarationKeeper::new(EntityKind::DataProperty),
            annotation_property_declarations: DeclarationKeeper::new(EntityKind::AnnotationProperty),
        }
    }

    /// Clears every owned registry and tells the entity recorder to do the
    /// same. Idempotent.
    pub fn reset(&mut self) {
        self.rules.clear();
        self.queries.clear();

        self.recorder.lock().unwrap().reset();

        self.asserted.clear();

        self.class_declarations = DeclarationKeeper::new(EntityKind::Class);
        self.object_property_declarations = DeclarationKeeper::new(EntityKind::ObjectProperty);
        self.data_property_declarations = DeclarationKeeper::new(EntityKind::DataProperty);
        self.annotation_property_declarations =
            DeclarationKeeper::new(EntityKind::AnnotationProperty);
        self.individual_declarations = DeclarationKeeper::new(EntityKind::NamedIndividual);
    }

    /// One full reset-and-rebuild pass over the backing store.
    pub fn process_ontology(&mut self) {
        self.reset();

        self.process_rules_and_queries();
        self.process_axioms();

        info!(
            rules = self.rules.len(),
            queries = self.queries.len(),
            axioms = self.asserted.len(),
            "ontology processed"
        );
    }

    // ------------- classification -------------

    fn process_rules_and_queries(&mut self) {
        for candidate in self.source.rule_candidates() {
            self.process_rule_or_query(candidate);
        }
    }

    fn process_rule_or_query(&mut self, candidate: Arc<Rule>) {
        if self.is_query_candidate(&candidate) {
            let active = true; // TODO: carry the activation flag over from the source construct
            let comment = ""; // TODO: carry the comment over from the source construct
            let query = Query::new(
                candidate.name(),
                candidate.body().to_vec(),
                candidate.head().to_vec(),
                active,
                comment,
            );
            self.queries
                .insert(candidate.name().to_string(), Arc::new(query));
        } else {
            self.rules
                .insert(candidate.name().to_string(), Arc::clone(&candidate));
            // a rule is a kind of statement; a query is not
            self.asserted.insert(Axiom::Rule(candidate));
        }
    }

    fn is_query_candidate(&self, candidate: &Rule) -> bool {
        !candidate.builtin_atoms_from_head(&self.builtins).is_empty()
            || !candidate.builtin_atoms_from_body(&self.builtins).is_empty()
    }

    // ------------- declaration closure -------------

    fn process_axioms(&mut self) {
        for kind in PROCESSING_ORDER {
            self.process_axioms_with_kind(kind);
        }
    }

    fn process_axioms_with_kind(&mut self, kind: AxiomKind) {
        let axioms = self.source.axioms_with_kind(kind, true);
        if !axioms.is_empty() {
            debug!(?kind, count = axioms.len(), "processing category");
        }
        for axiom in axioms {
            self.record_referenced_entities(&axiom);
            self.asserted.insert(axiom);
        }
    }

    // The per-category extraction rules. Exhaustive, so a statement variant
    // without an extraction rule will not compile.
    fn record_referenced_entities(&mut self, axiom: &Axiom) {
        match axiom {
            Axiom::Declaration(declaration) => self.keep_explicit_declaration(declaration),
            Axiom::ClassAssertion { class, individual } => {
                self.declare_class_term(class);
                self.declare_individual_term(individual);
            }
            Axiom::ObjectPropertyAssertion {
                property: _,
                subject,
                object,
            } => {
                self.declare_individual_term(subject);
                self.declare_individual_term(object);
            }
            Axiom::DataPropertyAssertion {
                property: _,
                subject,
                value: _,
            } => self.declare_individual_term(subject),
            Axiom::SameIndividual(members) | Axiom::DifferentIndividuals(members) => {
                for member in members {
                    self.declare_individual_term(member);
                }
            }
            Axiom::SubClassOf { sub, sup } => {
                self.declare_class_term(sub);
                self.declare_class_term(sup);
            }
            Axiom::EquivalentClasses(members) => {
                for member in members {
                    self.declare_class_term(member);
                }
            }
            Axiom::SubObjectPropertyOf { sub, sup } => {
                self.declare_object_property_term(sub);
                self.declare_object_property_term(sup);
            }
            Axiom::SubDataPropertyOf { sub, sup } => {
                self.declare_data_property(sub);
                self.declare_data_property(sup);
            }
            Axiom::EquivalentObjectProperties(members)
            | Axiom::DisjointObjectProperties(members) => {
                for member in members {
                    self.declare_object_property_term(member);
                }
            }
            Axiom::EquivalentDataProperties(members) | Axiom::DisjointDataProperties(members) => {
                for member in members {
                    self.declare_data_property(member);
                }
            }
            Axiom::TransitiveObjectProperty(property)
            | Axiom::SymmetricObjectProperty(property)
            | Axiom::FunctionalObjectProperty(property)
            | Axiom::InverseFunctionalObjectProperty(property)
            | Axiom::AsymmetricObjectProperty(property)
            | Axiom::IrreflexiveObjectProperty(property) => {
                self.declare_object_property_term(property)
            }
            Axiom::FunctionalDataProperty(property) => self.declare_data_property(property),
            Axiom::ObjectPropertyDomain { property, domain } => {
                self.declare_object_property_term(property);
                self.declare_class_term(domain);
            }
            Axiom::DataPropertyDomain { property, domain } => {
                self.declare_data_property(property);
                self.declare_class_term(domain);
            }
            Axiom::ObjectPropertyRange { property, range } => {
                self.declare_object_property_term(property);
                self.declare_class_term(range);
            }
            // the range of a data property is a datatype and never declared
            Axiom::DataPropertyRange { property, range: _ } => {
                self.declare_data_property(property)
            }
            Axiom::InverseObjectProperties { first, second } => {
                self.declare_object_property_term(first);
                self.declare_object_property_term(second);
            }
            // rules arrive through classification, never through the category walk
            Axiom::Rule(_) => (),
        }
    }

    // Explicit declarations are always recorded with the resolver, and kept
    // so that later synthesis finds them already present.
    fn keep_explicit_declaration(&mut self, declaration: &Declaration) {
        let iri = declaration.iri().clone();
        match declaration.kind() {
            EntityKind::Class => {
                self.class_declarations.keep(declaration.clone());
                self.recorder.lock().unwrap().record_class(&iri);
            }
            EntityKind::NamedIndividual => {
                self.individual_declarations.keep(declaration.clone());
                self.recorder.lock().unwrap().record_individual(&iri);
            }
            EntityKind::ObjectProperty => {
                self.object_property_declarations.keep(declaration.clone());
                self.recorder.lock().unwrap().record_object_property(&iri);
            }
            EntityKind::DataProperty => {
                self.data_property_declarations.keep(declaration.clone());
                self.recorder.lock().unwrap().record_data_property(&iri);
            }
            EntityKind::AnnotationProperty => {
                self.annotation_property_declarations
                    .keep(declaration.clone());
                self.recorder
                    .lock()
                    .unwrap()
                    .record_annotation_property(&iri);
            }
        }
    }

    // Compound expressions and anonymous individuals never receive
    // declarations; the guards below make the skip explicit.

    fn declare_class_term(&mut self, term: &ClassTerm) {
        if let ClassTerm::Named(iri) = term {
            self.declare_class(iri);
        }
    }

    fn declare_individual_term(&mut self, term: &IndividualTerm) {
        if let IndividualTerm::Named(iri) = term {
            self.declare_individual(iri);
        }
    }

    fn declare_object_property_term(&mut self, term: &ObjectPropertyTerm) {
        if let ObjectPropertyTerm::Named(iri) = term {
            self.declare_object_property(iri);
        }
    }

    // Generate-if-absent paths, one per kind. Re-invocation with an already
    // declared name is a no-op.

    fn declare_class(&mut self, iri: &Iri) {
        if !self.class_declarations.contains(iri) {
            let declaration = Declaration::new(Entity::class(iri.clone()));
            self.class_declarations.keep(declaration.clone());
            self.asserted.insert(Axiom::Declaration(declaration));
            self.recorder.lock().unwrap().record_class(iri);
        }
    }

    fn declare_individual(&mut self, iri: &Iri) {
        if !self.individual_declarations.contains(iri) {
            let declaration = Declaration::new(Entity::individual(iri.clone()));
            self.individual_declarations.keep(declaration.clone());
            self.asserted.insert(Axiom::Declaration(declaration));
            self.recorder.lock().unwrap().record_individual(iri);
        }
    }

    fn declare_object_property(&mut self, iri: &Iri) {
        if !self.object_property_declarations.contains(iri) {
            let declaration = Declaration::new(Entity::object_property(iri.clone()));
            self.object_property_declarations.keep(declaration.clone());
            self.asserted.insert(Axiom::Declaration(declaration));
            self.recorder.lock().unwrap().record_object_property(iri);
        }
    }

    fn declare_data_property(&mut self, iri: &Iri) {
        if !self.data_property_declarations.contains(iri) {
            let declaration = Declaration::new(Entity::data_property(iri.clone()));
            self.data_property_declarations.keep(declaration.clone());
            self.asserted.insert(Axiom::Declaration(declaration));
            self.recorder.lock().unwrap().record_data_property(iri);
        }
    }

    // ------------- accessors -------------

    pub fn number_of_rules(&self) -> usize {
        self.rules.len()
    }
    pub fn number_of_queries(&self) -> usize {
        self.queries.len()
    }
    pub fn number_of_axioms(&self) -> usize {
        self.asserted.len()
    }
    pub fn rule_names(&self) -> Vec<String> {
        self.rules.keys().cloned().collect()
    }
    pub fn query_names(&self) -> Vec<String> {
        self.queries.keys().cloned().collect()
    }
    pub fn rule(&self, name: &str) -> Result<Arc<Rule>> {
        self.rules
            .get(name)
            .cloned()
            .ok_or_else(|| OntolithError::Rule(format!("invalid rule name {}", name)))
    }
    pub fn query(&self, name: &str) -> Result<Arc<Query>> {
        self.queries
            .get(name)
            .cloned()
            .ok_or_else(|| OntolithError::InvalidQueryName(name.to_string()))
    }
    /// The result of a previously executed query.
    pub fn query_result(&self, name: &str) -> Result<QueryResult> {
        Ok(self.query(name)?.result())
    }
    pub fn is_query(&self, name: &str) -> bool {
        self.queries.contains_key(name)
    }
    pub fn rules(&self) -> impl Iterator<Item = &Arc<Rule>> {
        self.rules.values()
    }
    pub fn queries(&self) -> impl Iterator<Item = &Arc<Query>> {
        self.queries.values()
    }
    pub fn has_asserted_axiom(&self, axiom: &Axiom) -> bool {
        self.asserted.contains(axiom)
    }
    /// Immutable view of the full asserted set.
    pub fn axioms(&self) -> &HashSet<Axiom, NameHasher> {
        &self.asserted
    }
    pub fn class_declarations(&self) -> &DeclarationKeeper {
        &self.class_declarations
    }
    pub fn individual_declarations(&self) -> &DeclarationKeeper {
        &self.individual_declarations
    }
    pub fn object_property_declarations(&self) -> &DeclarationKeeper {
        &self.object_property_declarations
    }
    pub fn data_property_declarations(&self) -> &DeclarationKeeper {
        &self.data_property_declarations
    }
    pub fn annotation_property_declarations(&self) -> &DeclarationKeeper {
        &self.annotation_property_declarations
    }
    pub fn number_of_class_declarations(&self) -> usize {
        self.class_declarations.len()
    }
    pub fn number_of_individual_declarations(&self) -> usize {
        self.individual_declarations.len()
    }
    pub fn number_of_object_property_declarations(&self) -> usize {
        self.object_property_declarations.len()
    }
    pub fn number_of_data_property_declarations(&self) -> usize {
        self.data_property_declarations.len()
    }
    pub fn number_of_annotation_property_declarations(&self) -> usize {
        self.annotation_property_declarations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::IriRegistry;
    use crate::store::MemoryOntology;

    fn processor(
        ontology: MemoryOntology,
    ) -> Processor<MemoryOntology, IriRegistry> {
        Processor::new(
            Arc::new(ontology),
            Arc::new(Mutex::new(IriRegistry::new())),
        )
    }

    #[test]
    fn closure_is_idempotent_without_reset() {
        let mut ontology = MemoryOntology::new();
        ontology.add_axiom(Axiom::SubClassOf {
            sub: ClassTerm::named("ex:Woman"),
            sup: ClassTerm::named("ex:Person"),
        });
        ontology.add_axiom(Axiom::ClassAssertion {
            class: ClassTerm::named("ex:Woman"),
            individual: IndividualTerm::named("ex:mary"),
        });
        let mut processor = processor(ontology);
        processor.process_ontology();
        let axioms = processor.number_of_axioms();
        let classes = processor.number_of_class_declarations();
        let individuals = processor.number_of_individual_declarations();

        // a second walk over the unchanged store must not grow anything
        processor.process_axioms();
        assert_eq!(processor.number_of_axioms(), axioms);
        assert_eq!(processor.number_of_class_declarations(), classes);
        assert_eq!(processor.number_of_individual_declarations(), individuals);
    }

    #[test]
    fn compound_terms_are_skipped() {
        let mut ontology = MemoryOntology::new();
        ontology.add_axiom(Axiom::SubClassOf {
            sub: ClassTerm::Intersection(vec![
                ClassTerm::named("ex:Parent"),
                ClassTerm::named("ex:Male"),
            ]),
            sup: ClassTerm::named("ex:Father"),
        });
        let mut processor = processor(ontology);
        processor.process_ontology();
        // only the named superclass gets a declaration, not the expression
        // nor its member classes
        assert_eq!(processor.number_of_class_declarations(), 1);
        assert!(
            processor
                .class_declarations()
                .contains(&Iri::new("ex:Father"))
        );
    }

    #[test]
    fn anonymous_individuals_are_skipped() {
        let mut ontology = MemoryOntology::new();
        ontology.add_axiom(Axiom::ObjectPropertyAssertion {
            property: ObjectPropertyTerm::named("ex:knows"),
            subject: IndividualTerm::named("ex:mary"),
            object: IndividualTerm::anonymous("b0"),
        });
        let mut processor = processor(ontology);
        processor.process_ontology();
        assert_eq!(processor.number_of_individual_declarations(), 1);
        assert!(
            processor
                .individual_declarations()
                .contains(&Iri::new("ex:mary"))
        );
    }
}
