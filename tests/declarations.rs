use std::sync::{Arc, Mutex};

use ontolith::construct::{
    Axiom, ClassTerm, Declaration, Entity, EntityKind, IndividualTerm, Iri,
};
use ontolith::processor::Processor;
use ontolith::resolve::IriRegistry;
use ontolith::store::MemoryOntology;

fn setup(
    ontology: MemoryOntology,
) -> (
    Processor<MemoryOntology, IriRegistry>,
    Arc<Mutex<IriRegistry>>,
) {
    let recorder = Arc::new(Mutex::new(IriRegistry::new()));
    let processor = Processor::new(Arc::new(ontology), Arc::clone(&recorder));
    (processor, recorder)
}

#[test]
fn explicit_declarations_are_recorded_not_resynthesized() {
    let mut ontology = MemoryOntology::new();
    ontology.add_axiom(Axiom::Declaration(Declaration::new(Entity::class(
        "ex:Male",
    ))));
    ontology.add_axiom(Axiom::ClassAssertion {
        class: ClassTerm::named("ex:Male"),
        individual: IndividualTerm::named("ex:p1"),
    });
    let (mut processor, _) = setup(ontology);
    processor.process_ontology();

    // the explicit declaration, the assertion, and one synthesized
    // declaration for the individual
    assert_eq!(processor.number_of_class_declarations(), 1);
    assert_eq!(processor.number_of_individual_declarations(), 1);
    assert_eq!(processor.number_of_axioms(), 3);
}

#[test]
fn kinds_are_registered_separately() {
    let mut ontology = MemoryOntology::new();
    ontology.add_axiom(Axiom::Declaration(Declaration::new(Entity::class(
        "ex:Person",
    ))));
    ontology.add_axiom(Axiom::Declaration(Declaration::new(Entity::individual(
        "ex:bob",
    ))));
    ontology.add_axiom(Axiom::Declaration(Declaration::new(
        Entity::object_property("ex:knows"),
    )));
    ontology.add_axiom(Axiom::Declaration(Declaration::new(Entity::data_property(
        "ex:age",
    ))));
    ontology.add_axiom(Axiom::Declaration(Declaration::new(
        Entity::annotation_property("ex:note"),
    )));
    let (mut processor, _) = setup(ontology);
    processor.process_ontology();

    assert_eq!(processor.number_of_class_declarations(), 1);
    assert_eq!(processor.number_of_individual_declarations(), 1);
    assert_eq!(processor.number_of_object_property_declarations(), 1);
    assert_eq!(processor.number_of_data_property_declarations(), 1);
    assert_eq!(processor.number_of_annotation_property_declarations(), 1);
    assert_eq!(processor.number_of_axioms(), 5);
}

#[test]
fn the_same_name_may_be_declared_under_several_kinds() {
    // punning: one name used as both a class and an individual
    let mut ontology = MemoryOntology::new();
    ontology.add_axiom(Axiom::Declaration(Declaration::new(Entity::class(
        "ex:Eagle",
    ))));
    ontology.add_axiom(Axiom::Declaration(Declaration::new(Entity::individual(
        "ex:Eagle",
    ))));
    let (mut processor, _) = setup(ontology);
    processor.process_ontology();

    assert!(processor.class_declarations().contains(&Iri::new("ex:Eagle")));
    assert!(
        processor
            .individual_declarations()
            .contains(&Iri::new("ex:Eagle"))
    );
    assert_eq!(processor.number_of_axioms(), 2);
}

#[test]
fn declarations_expose_their_entity() {
    let mut ontology = MemoryOntology::new();
    ontology.add_axiom(Axiom::SubClassOf {
        sub: ClassTerm::named("ex:A"),
        sup: ClassTerm::named("ex:B"),
    });
    let (mut processor, _) = setup(ontology);
    processor.process_ontology();

    let declaration = processor
        .class_declarations()
        .get(&Iri::new("ex:A"))
        .expect("ex:A declared");
    assert_eq!(declaration.kind(), EntityKind::Class);
    assert_eq!(declaration.iri(), &Iri::new("ex:A"));
    assert_eq!(declaration.entity(), &Entity::class("ex:A"));
}

#[test]
fn recorder_is_notified_per_kind() {
    let mut ontology = MemoryOntology::new();
    ontology.add_axiom(Axiom::ClassAssertion {
        class: ClassTerm::named("ex:Male"),
        individual: IndividualTerm::named("ex:p1"),
    });
    ontology.add_axiom(Axiom::Declaration(Declaration::new(Entity::data_property(
        "ex:age",
    ))));
    let (mut processor, recorder) = setup(ontology);
    processor.process_ontology();

    let recorder = recorder.lock().unwrap();
    assert!(recorder.is_class(&Iri::new("ex:Male")));
    assert!(recorder.is_individual(&Iri::new("ex:p1")));
    assert!(recorder.is_data_property(&Iri::new("ex:age")));
    assert_eq!(recorder.kind_of(&Iri::new("ex:Male")), Some(EntityKind::Class));
    assert_eq!(recorder.kind_of(&Iri::new("ex:unknown")), None);
}

#[test]
fn reset_clears_registries_and_recorder() {
    let mut ontology = MemoryOntology::new();
    ontology.add_axiom(Axiom::ClassAssertion {
        class: ClassTerm::named("ex:Male"),
        individual: IndividualTerm::named("ex:p1"),
    });
    let (mut processor, recorder) = setup(ontology);
    processor.process_ontology();
    assert_eq!(processor.number_of_axioms(), 3);

    processor.reset();
    assert_eq!(processor.number_of_axioms(), 0);
    assert_eq!(processor.number_of_class_declarations(), 0);
    assert_eq!(processor.number_of_individual_declarations(), 0);
    assert_eq!(processor.number_of_rules(), 0);
    assert_eq!(processor.number_of_queries(), 0);
    assert_eq!(recorder.lock().unwrap().recorded_count(), 0);

    // reset is idempotent
    processor.reset();
    assert_eq!(processor.number_of_axioms(), 0);
}
