use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ontolith::construct::{Axiom, ClassTerm, Declaration, Entity, IndividualTerm, ObjectPropertyTerm};
use ontolith::processor::Processor;
use ontolith::resolve::IriRegistry;
use ontolith::rule::{Atom, AtomArgument, Rule};
use ontolith::settings::Settings;
use ontolith::store::MemoryOntology;

#[derive(Serialize)]
struct ProcessingSummary {
    rules: usize,
    queries: usize,
    axioms: usize,
    class_declarations: usize,
    individual_declarations: usize,
    object_property_declarations: usize,
    data_property_declarations: usize,
    annotation_property_declarations: usize,
}

// A small family ontology exercising declarations, assertions, hierarchy
// axioms, one rule and one query.
fn sample_ontology() -> MemoryOntology {
    let mut ontology = MemoryOntology::new();
    ontology.add_axiom(Axiom::Declaration(Declaration::new(Entity::class(
        "family:Person",
    ))));
    ontology.add_axiom(Axiom::SubClassOf {
        sub: ClassTerm::named("family:Man"),
        sup: ClassTerm::named("family:Person"),
    });
    ontology.add_axiom(Axiom::SubClassOf {
        sub: ClassTerm::named("family:Woman"),
        sup: ClassTerm::named("family:Person"),
    });
    ontology.add_axiom(Axiom::ClassAssertion {
        class: ClassTerm::named("family:Man"),
        individual: IndividualTerm::named("family:bob"),
    });
    ontology.add_axiom(Axiom::ClassAssertion {
        class: ClassTerm::named("family:Woman"),
        individual: IndividualTerm::named("family:alice"),
    });
    ontology.add_axiom(Axiom::ObjectPropertyAssertion {
        property: ObjectPropertyTerm::named("family:hasSpouse"),
        subject: IndividualTerm::named("family:bob"),
        object: IndividualTerm::named("family:alice"),
    });
    ontology.add_axiom(Axiom::ObjectPropertyDomain {
        property: ObjectPropertyTerm::named("family:hasSpouse"),
        domain: ClassTerm::named("family:Person"),
    });
    ontology.add_axiom(Axiom::ObjectPropertyRange {
        property: ObjectPropertyTerm::named("family:hasSpouse"),
        range: ClassTerm::named("family:Person"),
    });
    ontology.add_rule(Rule::new(
        "SpousesKnowEachOther",
        vec![Atom::ObjectProperty {
            property: "family:hasSpouse".into(),
            subject: AtomArgument::Variable(String::from("x")),
            object: AtomArgument::Variable(String::from("y")),
        }],
        vec![Atom::ObjectProperty {
            property: "family:knows".into(),
            subject: AtomArgument::Variable(String::from("x")),
            object: AtomArgument::Variable(String::from("y")),
        }],
        true,
        "",
    ));
    ontology.add_rule(Rule::new(
        "AllPersons",
        vec![Atom::Class {
            class: "family:Person".into(),
            argument: AtomArgument::Variable(String::from("p")),
        }],
        vec![Atom::Builtin {
            predicate: String::from("select"),
            arguments: vec![AtomArgument::Variable(String::from("p"))],
        }],
        true,
        "",
    ));
    ontology
}

fn main() {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log.level)),
        )
        .init();

    let recorder = Arc::new(Mutex::new(IriRegistry::new()));
    let mut processor = Processor::with_builtins(
        Arc::new(sample_ontology()),
        Arc::clone(&recorder),
        settings.query_builtins(),
    );
    processor.process_ontology();

    for name in processor.rule_names() {
        info!(rule = %name, "classified as rule");
    }
    for name in processor.query_names() {
        info!(query = %name, "classified as query");
    }

    let summary = ProcessingSummary {
        rules: processor.number_of_rules(),
        queries: processor.number_of_queries(),
        axioms: processor.number_of_axioms(),
        class_declarations: processor.number_of_class_declarations(),
        individual_declarations: processor.number_of_individual_declarations(),
        object_property_declarations: processor.number_of_object_property_declarations(),
        data_property_declarations: processor.number_of_data_property_declarations(),
        annotation_property_declarations: processor.number_of_annotation_property_declarations(),
    };
    println!("{}", serde_json::to_string_pretty(&summary).unwrap());
}
