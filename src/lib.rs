//! Ontolith – an ontology statement closure and classification engine.
//!
//! Ontolith takes a batch of logical statements ("axioms") extracted from a
//! knowledge base and does two things:
//! * it partitions rule-like constructs into inference [`rule::Rule`]s and
//!   [`rule::Query`]s, depending on whether any builtin atom in their head
//!   or body carries a reserved query predicate name, and
//! * it computes the referential closure of all statements by synthesizing
//!   a [`construct::Declaration`] for every named entity that is referenced
//!   only implicitly, e.g. an individual that appears as the subject of an
//!   assertion but was never declared.
//!
//! Each statement category has its own entity-extraction rule; synthesis is
//! idempotent and duplicate-free, backed by one declaration keeper per
//! entity kind plus a master asserted-statement set. Rules count as
//! statements and enter the master set; queries never do.
//!
//! ## Modules
//! * [`construct`] – statements, entities, terms and the declaration keepers.
//! * [`rule`] – rules, queries, atoms and the reserved builtin name set.
//! * [`store`] – the backing store interface and an in-memory implementation.
//! * [`resolve`] – entity recording and prefixed-name resolution.
//! * [`processor`] – the engine driving classification and closure.
//! * [`settings`] – configuration file / environment settings.
//!
//! ## Quick Start
//! ```
//! use std::sync::{Arc, Mutex};
//! use ontolith::construct::{Axiom, ClassTerm, IndividualTerm};
//! use ontolith::processor::Processor;
//! use ontolith::resolve::IriRegistry;
//! use ontolith::store::MemoryOntology;
//!
//! let mut ontology = MemoryOntology::new();
//! ontology.add_axiom(Axiom::ClassAssertion {
//!     class: ClassTerm::named("ex:Male"),
//!     individual: IndividualTerm::named("ex:p1"),
//! });
//! let mut processor = Processor::new(
//!     Arc::new(ontology),
//!     Arc::new(Mutex::new(IriRegistry::new())),
//! );
//! processor.process_ontology();
//! // the assertion plus two synthesized declarations
//! assert_eq!(processor.number_of_axioms(), 3);
//! ```
//!
//! Processing is a full reset-and-rebuild every time; the engine is not
//! incremental and not safe for concurrent passes. Reads of the registries
//! are safe to share once a pass has completed.

pub mod construct;
pub mod error;
pub mod processor;
pub mod resolve;
pub mod rule;
pub mod settings;
pub mod store;
