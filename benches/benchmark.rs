use criterion::{black_box, criterion_group, criterion_main, Criterion};

use std::sync::{Arc, Mutex};

use ontolith::construct::{Axiom, ClassTerm, IndividualTerm, ObjectPropertyTerm};
use ontolith::processor::Processor;
use ontolith::resolve::IriRegistry;
use ontolith::store::MemoryOntology;

// A synthetic ontology without any explicit declarations, so every entity
// has to be synthesized during the closure pass.
fn synthetic_ontology(classes: usize, individuals: usize) -> MemoryOntology {
    let mut ontology = MemoryOntology::new();
    for c in 0..classes {
        ontology.add_axiom(Axiom::SubClassOf {
            sub: ClassTerm::named(format!("bench:C{}", c)),
            sup: ClassTerm::named(format!("bench:C{}", (c + 1) % classes)),
        });
    }
    for i in 0..individuals {
        ontology.add_axiom(Axiom::ClassAssertion {
            class: ClassTerm::named(format!("bench:C{}", i % classes)),
            individual: IndividualTerm::named(format!("bench:i{}", i)),
        });
        ontology.add_axiom(Axiom::ObjectPropertyAssertion {
            property: ObjectPropertyTerm::named("bench:knows"),
            subject: IndividualTerm::named(format!("bench:i{}", i)),
            object: IndividualTerm::named(format!("bench:i{}", (i + 1) % individuals)),
        });
    }
    ontology
}

fn criterion_benchmark(c: &mut Criterion) {
    let ontology = Arc::new(synthetic_ontology(100, 1000));
    c.bench_function("full pass, 100 classes and 1000 individuals", |b| {
        b.iter(|| {
            let mut processor = Processor::new(
                Arc::clone(&ontology),
                Arc::new(Mutex::new(IriRegistry::new())),
            );
            processor.process_ontology();
            black_box(processor.number_of_axioms())
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
