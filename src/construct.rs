use std::sync::Arc;

// keepers use HashMap with a fast hasher, since all keys are names
use core::hash::BuildHasherDefault;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use seahash::SeaHasher;

// used for decimal literal values
use bigdecimal::BigDecimal;
use std::str::FromStr;

// used to print out readable forms of a construct
use std::fmt;
use std::ops;

use crate::rule::Rule;

pub type NameHasher = BuildHasherDefault<SeaHasher>;

// ------------- Iri -------------
// Entity names are interned so statements referencing the same entity
// share one allocation.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Iri(Arc<str>);

impl Iri {
    pub fn new(iri: &str) -> Self {
        Self(Arc::from(iri))
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<&str> for Iri {
    fn from(iri: &str) -> Self {
        Iri::new(iri)
    }
}
impl From<String> for Iri {
    fn from(iri: String) -> Self {
        Self(Arc::from(iri))
    }
}
impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ------------- Entity -------------
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum EntityKind {
    Class,
    NamedIndividual,
    ObjectProperty,
    DataProperty,
    AnnotationProperty,
}
impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            EntityKind::Class => "Class",
            EntityKind::NamedIndividual => "NamedIndividual",
            EntityKind::ObjectProperty => "ObjectProperty",
            EntityKind::DataProperty => "DataProperty",
            EntityKind::AnnotationProperty => "AnnotationProperty",
        };
        write!(f, "{}", name)
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Entity {
    kind: EntityKind,
    iri: Iri,
}
impl Entity {
    pub fn new(kind: EntityKind, iri: Iri) -> Self {
        Self { kind, iri }
    }
    pub fn class(iri: impl Into<Iri>) -> Self {
        Self::new(EntityKind::Class, iri.into())
    }
    pub fn individual(iri: impl Into<Iri>) -> Self {
        Self::new(EntityKind::NamedIndividual, iri.into())
    }
    pub fn object_property(iri: impl Into<Iri>) -> Self {
        Self::new(EntityKind::ObjectProperty, iri.into())
    }
    pub fn data_property(iri: impl Into<Iri>) -> Self {
        Self::new(EntityKind::DataProperty, iri.into())
    }
    pub fn annotation_property(iri: impl Into<Iri>) -> Self {
        Self::new(EntityKind::AnnotationProperty, iri.into())
    }
    // It's intentional to encapsulate the fields and only expose getters,
    // because this yields true immutability for entities after creation.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }
    pub fn iri(&self) -> &Iri {
        &self.iri
    }
}
impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.kind, self.iri)
    }
}

// ------------- Declaration -------------
// A declaration binds one entity name to its kind. The keepers below
// guarantee at most one declaration per name and kind.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Declaration {
    entity: Entity,
}
impl Declaration {
    pub fn new(entity: Entity) -> Self {
        Self { entity }
    }
    pub fn entity(&self) -> &Entity {
        &self.entity
    }
    pub fn kind(&self) -> EntityKind {
        self.entity.kind()
    }
    pub fn iri(&self) -> &Iri {
        self.entity.iri()
    }
}
impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Declaration({})", self.entity)
    }
}

// ------------- Terms -------------
// Positions in a statement hold terms, and only the Named variants refer
// to a declarable entity. Compound expressions are leaves as far as the
// closure is concerned and never receive declarations.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ClassTerm {
    Named(Iri),
    Intersection(Vec<ClassTerm>),
    Union(Vec<ClassTerm>),
    Complement(Box<ClassTerm>),
}
impl ClassTerm {
    pub fn named(iri: impl Into<Iri>) -> Self {
        ClassTerm::Named(iri.into())
    }
    pub fn name(&self) -> Option<&Iri> {
        match self {
            ClassTerm::Named(iri) => Some(iri),
            _ => None,
        }
    }
}
impl fmt::Display for ClassTerm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ClassTerm::Named(iri) => write!(f, "{}", iri),
            ClassTerm::Intersection(members) => {
                write!(f, "ObjectIntersectionOf({})", join(members))
            }
            ClassTerm::Union(members) => write!(f, "ObjectUnionOf({})", join(members)),
            ClassTerm::Complement(inner) => write!(f, "ObjectComplementOf({})", inner),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum IndividualTerm {
    Named(Iri),
    Anonymous(String),
}
impl IndividualTerm {
    pub fn named(iri: impl Into<Iri>) -> Self {
        IndividualTerm::Named(iri.into())
    }
    pub fn anonymous(label: impl Into<String>) -> Self {
        IndividualTerm::Anonymous(label.into())
    }
    pub fn name(&self) -> Option<&Iri> {
        match self {
            IndividualTerm::Named(iri) => Some(iri),
            IndividualTerm::Anonymous(_) => None,
        }
    }
}
impl fmt::Display for IndividualTerm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IndividualTerm::Named(iri) => write!(f, "{}", iri),
            IndividualTerm::Anonymous(label) => write!(f, "_:{}", label),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum ObjectPropertyTerm {
    Named(Iri),
    InverseOf(Box<ObjectPropertyTerm>),
}
impl ObjectPropertyTerm {
    pub fn named(iri: impl Into<Iri>) -> Self {
        ObjectPropertyTerm::Named(iri.into())
    }
    pub fn inverse_of(property: ObjectPropertyTerm) -> Self {
        ObjectPropertyTerm::InverseOf(Box::new(property))
    }
    pub fn name(&self) -> Option<&Iri> {
        match self {
            ObjectPropertyTerm::Named(iri) => Some(iri),
            ObjectPropertyTerm::InverseOf(_) => None,
        }
    }
}
impl fmt::Display for ObjectPropertyTerm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ObjectPropertyTerm::Named(iri) => write!(f, "{}", iri),
            ObjectPropertyTerm::InverseOf(inner) => write!(f, "ObjectInverseOf({})", inner),
        }
    }
}

// ------------- Literal -------------
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Literal {
    String(String),
    Integer(i64),
    Decimal(Decimal),
    Boolean(bool),
}
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "\"{}\"", s),
            Literal::Integer(i) => write!(f, "{}", i),
            Literal::Decimal(d) => write!(f, "{}", d),
            Literal::Boolean(b) => write!(f, "{}", b),
        }
    }
}

#[derive(Eq, PartialEq, Hash, PartialOrd, Ord, Clone, Debug)]
pub struct Decimal(BigDecimal);

impl Decimal {
    pub fn from_str(s: &str) -> Option<Decimal> {
        match BigDecimal::from_str(s) {
            Ok(decimal) => Some(Decimal(decimal)),
            _ => None,
        }
    }
}
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl ops::Deref for Decimal {
    type Target = BigDecimal;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

// --------------- Axiom ----------------
// The closed statement enumeration. Statements are value objects with
// structural equality; the master asserted set deduplicates on it.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum Axiom {
    Declaration(Declaration),
    ClassAssertion {
        class: ClassTerm,
        individual: IndividualTerm,
    },
    ObjectPropertyAssertion {
        property: ObjectPropertyTerm,
        subject: IndividualTerm,
        object: IndividualTerm,
    },
    DataPropertyAssertion {
        property: Iri,
        subject: IndividualTerm,
        value: Literal,
    },
    SameIndividual(Vec<IndividualTerm>),
    DifferentIndividuals(Vec<IndividualTerm>),
    SubClassOf {
        sub: ClassTerm,
        sup: ClassTerm,
    },
    EquivalentClasses(Vec<ClassTerm>),
    SubObjectPropertyOf {
        sub: ObjectPropertyTerm,
        sup: ObjectPropertyTerm,
    },
    SubDataPropertyOf {
        sub: Iri,
        sup: Iri,
    },
    EquivalentObjectProperties(Vec<ObjectPropertyTerm>),
    EquivalentDataProperties(Vec<Iri>),
    DisjointObjectProperties(Vec<ObjectPropertyTerm>),
    DisjointDataProperties(Vec<Iri>),
    TransitiveObjectProperty(ObjectPropertyTerm),
    SymmetricObjectProperty(ObjectPropertyTerm),
    FunctionalObjectProperty(ObjectPropertyTerm),
    InverseFunctionalObjectProperty(ObjectPropertyTerm),
    AsymmetricObjectProperty(ObjectPropertyTerm),
    IrreflexiveObjectProperty(ObjectPropertyTerm),
    FunctionalDataProperty(Iri),
    ObjectPropertyDomain {
        property: ObjectPropertyTerm,
        domain: ClassTerm,
    },
    DataPropertyDomain {
        property: Iri,
        domain: ClassTerm,
    },
    ObjectPropertyRange {
        property: ObjectPropertyTerm,
        range: ClassTerm,
    },
    DataPropertyRange {
        property: Iri,
        range: Iri,
    },
    InverseObjectProperties {
        first: ObjectPropertyTerm,
        second: ObjectPropertyTerm,
    },
    Rule(Arc<Rule>),
}

// Category tags, used when retrieving statements from the backing store.
// Declarations split into one category per entity kind.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AxiomKind {
    ClassDeclaration,
    IndividualDeclaration,
    ObjectPropertyDeclaration,
    DataPropertyDeclaration,
    AnnotationPropertyDeclaration,
    ClassAssertion,
    ObjectPropertyAssertion,
    DataPropertyAssertion,
    SameIndividual,
    DifferentIndividuals,
    SubClassOf,
    EquivalentClasses,
    SubObjectPropertyOf,
    SubDataPropertyOf,
    EquivalentDataProperties,
    EquivalentObjectProperties,
    TransitiveObjectProperty,
    SymmetricObjectProperty,
    FunctionalObjectProperty,
    InverseFunctionalObjectProperty,
    FunctionalDataProperty,
    ObjectPropertyDomain,
    DataPropertyDomain,
    ObjectPropertyRange,
    DataPropertyRange,
    InverseObjectProperties,
    IrreflexiveObjectProperty,
    AsymmetricObjectProperty,
    DisjointObjectProperties,
    DisjointDataProperties,
    Rule,
}

impl Axiom {
    // Exhaustive on purpose: a new statement variant will not compile
    // until it has been given a category.
    pub fn kind(&self) -> AxiomKind {
        match self {
            Axiom::Declaration(declaration) => match declaration.kind() {
                EntityKind::Class => AxiomKind::ClassDeclaration,
                EntityKind::NamedIndividual => AxiomKind::IndividualDeclaration,
                EntityKind::ObjectProperty => AxiomKind::ObjectPropertyDeclaration,
                EntityKind::DataProperty => AxiomKind::DataPropertyDeclaration,
                EntityKind::AnnotationProperty => AxiomKind::AnnotationPropertyDeclaration,
            },
            Axiom::ClassAssertion { .. } => AxiomKind::ClassAssertion,
            Axiom::ObjectPropertyAssertion { .. } => AxiomKind::ObjectPropertyAssertion,
            Axiom::DataPropertyAssertion { .. } => AxiomKind::DataPropertyAssertion,
            Axiom::SameIndividual(_) => AxiomKind::SameIndividual,
            Axiom::DifferentIndividuals(_) => AxiomKind::DifferentIndividuals,
            Axiom::SubClassOf { .. } => AxiomKind::SubClassOf,
            Axiom::EquivalentClasses(_) => AxiomKind::EquivalentClasses,
            Axiom::SubObjectPropertyOf { .. } => AxiomKind::SubObjectPropertyOf,
            Axiom::SubDataPropertyOf { .. } => AxiomKind::SubDataPropertyOf,
            Axiom::EquivalentObjectProperties(_) => AxiomKind::EquivalentObjectProperties,
            Axiom::EquivalentDataProperties(_) => AxiomKind::EquivalentDataProperties,
            Axiom::DisjointObjectProperties(_) => AxiomKind::DisjointObjectProperties,
            Axiom::DisjointDataProperties(_) => AxiomKind::DisjointDataProperties,
            Axiom::TransitiveObjectProperty(_) => AxiomKind::TransitiveObjectProperty,
            Axiom::SymmetricObjectProperty(_) => AxiomKind::SymmetricObjectProperty,
            Axiom::FunctionalObjectProperty(_) => AxiomKind::FunctionalObjectProperty,
            Axiom::InverseFunctionalObjectProperty(_) => {
                AxiomKind::InverseFunctionalObjectProperty
            }
            Axiom::AsymmetricObjectProperty(_) => AxiomKind::AsymmetricObjectProperty,
            Axiom::IrreflexiveObjectProperty(_) => AxiomKind::IrreflexiveObjectProperty,
            Axiom::FunctionalDataProperty(_) => AxiomKind::FunctionalDataProperty,
            Axiom::ObjectPropertyDomain { .. } => AxiomKind::ObjectPropertyDomain,
            Axiom::DataPropertyDomain { .. } => AxiomKind::DataPropertyDomain,
            Axiom::ObjectPropertyRange { .. } => AxiomKind::ObjectPropertyRange,
            Axiom::DataPropertyRange { .. } => AxiomKind::DataPropertyRange,
            Axiom::InverseObjectProperties { .. } => AxiomKind::InverseObjectProperties,
            Axiom::Rule(_) => AxiomKind::Rule,
        }
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    let mut s = String::new();
    for item in items {
        s += &(item.to_string() + " ");
    }
    s.pop();
    s
}

impl fmt::Display for Axiom {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Axiom::Declaration(declaration) => write!(f, "{}", declaration),
            Axiom::ClassAssertion { class, individual } => {
                write!(f, "ClassAssertion({} {})", class, individual)
            }
            Axiom::ObjectPropertyAssertion {
                property,
                subject,
                object,
            } => write!(
                f,
                "ObjectPropertyAssertion({} {} {})",
                property, subject, object
            ),
            Axiom::DataPropertyAssertion {
                property,
                subject,
                value,
            } => write!(f, "DataPropertyAssertion({} {} {})", property, subject, value),
            Axiom::SameIndividual(members) => write!(f, "SameIndividual({})", join(members)),
            Axiom::DifferentIndividuals(members) => {
                write!(f, "DifferentIndividuals({})", join(members))
            }
            Axiom::SubClassOf { sub, sup } => write!(f, "SubClassOf({} {})", sub, sup),
            Axiom::EquivalentClasses(members) => {
                write!(f, "EquivalentClasses({})", join(members))
            }
            Axiom::SubObjectPropertyOf { sub, sup } => {
                write!(f, "SubObjectPropertyOf({} {})", sub, sup)
            }
            Axiom::SubDataPropertyOf { sub, sup } => {
                write!(f, "SubDataPropertyOf({} {})", sub, sup)
            }
            Axiom::EquivalentObjectProperties(members) => {
                write!(f, "EquivalentObjectProperties({})", join(members))
            }
            Axiom::EquivalentDataProperties(members) => {
                write!(f, "EquivalentDataProperties({})", join(members))
            }
            Axiom::DisjointObjectProperties(members) => {
                write!(f, "DisjointObjectProperties({})", join(members))
            }
            Axiom::DisjointDataProperties(members) => {
                write!(f, "DisjointDataProperties({})", join(members))
            }
            Axiom::TransitiveObjectProperty(property) => {
                write!(f, "TransitiveObjectProperty({})", property)
            }
            Axiom::SymmetricObjectProperty(property) => {
                write!(f, "SymmetricObjectProperty({})", property)
            }
            Axiom::FunctionalObjectProperty(property) => {
                write!(f, "FunctionalObjectProperty({})", property)
            }
            Axiom::InverseFunctionalObjectProperty(property) => {
                write!(f, "InverseFunctionalObjectProperty({})", property)
            }
            Axiom::AsymmetricObjectProperty(property) => {
                write!(f, "AsymmetricObjectProperty({})", property)
            }
            Axiom::IrreflexiveObjectProperty(property) => {
                write!(f, "IrreflexiveObjectProperty({})", property)
            }
            Axiom::FunctionalDataProperty(property) => {
                write!(f, "FunctionalDataProperty({})", property)
            }
            Axiom::ObjectPropertyDomain { property, domain } => {
                write!(f, "ObjectPropertyDomain({} {})", property, domain)
            }
            Axiom::DataPropertyDomain { property, domain } => {
                write!(f, "DataPropertyDomain({} {})", property, domain)
            }
            Axiom::ObjectPropertyRange { property, range } => {
                write!(f, "ObjectPropertyRange({} {})", property, range)
            }
            Axiom::DataPropertyRange { property, range } => {
                write!(f, "DataPropertyRange({} {})", property, range)
            }
            Axiom::InverseObjectProperties { first, second } => {
                write!(f, "InverseObjectProperties({} {})", first, second)
            }
            Axiom::Rule(rule) => write!(f, "{}", rule),
        }
    }
}

// ------------- DeclarationKeeper -------------
// One keeper per entity kind. A keeper owns the declarations for its kind
// and guarantees at most one per entity name.
#[derive(Debug)]
pub struct DeclarationKeeper {
    kind: EntityKind,
    kept: HashMap<Iri, Declaration, NameHasher>,
}
impl DeclarationKeeper {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            kept: HashMap::default(),
        }
    }
    pub fn keep(&mut self, declaration: Declaration) -> (Declaration, bool) {
        debug_assert_eq!(declaration.kind(), self.kind);
        let keepsake = declaration.iri().clone();
        let mut previously_kept = true;
        match self.kept.entry(keepsake.clone()) {
            Entry::Vacant(e) => {
                e.insert(declaration);
                previously_kept = false;
            }
            Entry::Occupied(_e) => (),
        };
        (self.kept.get(&keepsake).unwrap().clone(), previously_kept)
    }
    pub fn kind(&self) -> EntityKind {
        self.kind
    }
    pub fn contains(&self, iri: &Iri) -> bool {
        self.kept.contains_key(iri)
    }
    pub fn get(&self, iri: &Iri) -> Option<&Declaration> {
        self.kept.get(iri)
    }
    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.kept.values()
    }
    pub fn len(&self) -> usize {
        self.kept.len()
    }
    pub fn is_empty(&self) -> bool {
        self.kept.is_empty()
    }
}
