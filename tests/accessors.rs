use std::sync::{Arc, Mutex};

use ontolith::construct::{Axiom, ClassTerm, IndividualTerm};
use ontolith::processor::Processor;
use ontolith::resolve::IriRegistry;
use ontolith::rule::{Atom, AtomArgument, Rule};
use ontolith::store::MemoryOntology;

fn sample() -> MemoryOntology {
    let mut ontology = MemoryOntology::new();
    ontology.add_axiom(Axiom::ClassAssertion {
        class: ClassTerm::named("ex:Male"),
        individual: IndividualTerm::named("ex:p1"),
    });
    ontology.add_rule(Rule::new(
        "MalesAreAdults",
        vec![Atom::Class {
            class: "ex:Male".into(),
            argument: AtomArgument::Variable(String::from("m")),
        }],
        vec![Atom::Class {
            class: "ex:Adult".into(),
            argument: AtomArgument::Variable(String::from("m")),
        }],
        true,
        "all males count as adults here",
    ));
    ontology.add_rule(Rule::new(
        "ListMales",
        vec![Atom::Class {
            class: "ex:Male".into(),
            argument: AtomArgument::Variable(String::from("m")),
        }],
        vec![Atom::Builtin {
            predicate: String::from("select"),
            arguments: vec![AtomArgument::Variable(String::from("m"))],
        }],
        true,
        "",
    ));
    ontology
}

fn processed() -> Processor<MemoryOntology, IriRegistry> {
    let mut processor = Processor::new(
        Arc::new(sample()),
        Arc::new(Mutex::new(IriRegistry::new())),
    );
    processor.process_ontology();
    processor
}

#[test]
fn counts_and_names() {
    let processor = processed();

    assert_eq!(processor.number_of_rules(), 1);
    assert_eq!(processor.number_of_queries(), 1);
    assert_eq!(processor.rule_names(), vec![String::from("MalesAreAdults")]);
    assert_eq!(processor.query_names(), vec![String::from("ListMales")]);
    // assertion + 2 declarations + the rule statement
    assert_eq!(processor.number_of_axioms(), 4);
}

#[test]
fn rule_lookup_exposes_the_construct() {
    let processor = processed();
    let rule = processor.rule("MalesAreAdults").unwrap();

    assert_eq!(rule.name(), "MalesAreAdults");
    assert_eq!(rule.body().len(), 1);
    assert_eq!(rule.head().len(), 1);
    assert!(rule.active());
    assert_eq!(rule.comment(), "all males count as adults here");
    assert_eq!(rule.body()[0].predicate_name(), "ex:Male");
}

#[test]
fn asserted_set_is_exposed_as_an_immutable_view() {
    let processor = processed();
    let assertion = Axiom::ClassAssertion {
        class: ClassTerm::named("ex:Male"),
        individual: IndividualTerm::named("ex:p1"),
    };

    assert!(processor.has_asserted_axiom(&assertion));
    assert!(processor.axioms().contains(&assertion));
    assert_eq!(processor.axioms().len(), processor.number_of_axioms());
}

#[test]
fn query_results_are_owned_by_the_query() {
    let processor = processed();

    // empty until an executor populates it
    let result = processor.query_result("ListMales").unwrap();
    assert_eq!(result.row_count(), 0);

    {
        let query = processor.query("ListMales").unwrap();
        let mut result = query.result_mut();
        result.set_columns(vec![String::from("m")]);
        result.add_row(vec![String::from("ex:p1")]);
    }

    let result = processor.query_result("ListMales").unwrap();
    assert_eq!(result.columns(), &[String::from("m")]);
    assert_eq!(result.row_count(), 1);
    assert_eq!(result.rows()[0], vec![String::from("ex:p1")]);
}

#[test]
fn reprocessing_rebuilds_the_same_state() {
    let mut processor = Processor::new(
        Arc::new(sample()),
        Arc::new(Mutex::new(IriRegistry::new())),
    );
    processor.process_ontology();
    let axioms = processor.number_of_axioms();
    let rules = processor.number_of_rules();
    let queries = processor.number_of_queries();

    processor.process_ontology();
    assert_eq!(processor.number_of_axioms(), axioms);
    assert_eq!(processor.number_of_rules(), rules);
    assert_eq!(processor.number_of_queries(), queries);
}

#[test]
fn iteration_over_rules_and_queries() {
    let processor = processed();

    assert_eq!(processor.rules().count(), 1);
    assert_eq!(processor.queries().count(), 1);
    assert!(processor.queries().all(|query| query.active()));
}
