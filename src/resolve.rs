//! Name resolution for discovered entities.
//!
//! The processor notifies a recorder about every entity it declares, one
//! notification per kind, so that downstream name resolution knows which
//! kind a bare name refers to. [`IriRegistry`] is the provided recorder; it
//! also keeps a bidirectional mapping between full names and their prefixed
//! short forms.

use std::collections::{HashMap, HashSet};

use bimap::BiMap;

use crate::construct::{EntityKind, Iri, NameHasher};

pub trait EntityRecorder {
    fn record_class(&mut self, iri: &Iri);
    fn record_individual(&mut self, iri: &Iri);
    fn record_object_property(&mut self, iri: &Iri);
    fn record_data_property(&mut self, iri: &Iri);
    fn record_annotation_property(&mut self, iri: &Iri);
    fn reset(&mut self);
}

// ------------- IriRegistry -------------
#[derive(Debug, Default)]
pub struct IriRegistry {
    prefixes: HashMap<String, String>,
    // prefixed name <-> full name, so lookups work from either side
    shortened: BiMap<String, Iri>,
    classes: HashSet<Iri, NameHasher>,
    individuals: HashSet<Iri, NameHasher>,
    object_properties: HashSet<Iri, NameHasher>,
    data_properties: HashSet<Iri, NameHasher>,
    annotation_properties: HashSet<Iri, NameHasher>,
}
impl IriRegistry {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn register_prefix(&mut self, prefix: &str, namespace: &str) {
        self.prefixes
            .insert(prefix.to_string(), namespace.to_string());
    }
    /// Prefixed short form of a full name, remembered once computed.
    pub fn shorten(&mut self, iri: &Iri) -> Option<String> {
        if let Some(short) = self.shortened.get_by_right(iri) {
            return Some(short.clone());
        }
        for (prefix, namespace) in &self.prefixes {
            if let Some(local) = iri.as_str().strip_prefix(namespace.as_str()) {
                let short = format!("{}:{}", prefix, local);
                self.shortened.insert(short.clone(), iri.clone());
                return Some(short);
            }
        }
        None
    }
    /// Full name for a prefixed short form.
    pub fn expand(&self, prefixed: &str) -> Option<Iri> {
        if let Some(iri) = self.shortened.get_by_left(prefixed) {
            return Some(iri.clone());
        }
        let (prefix, local) = prefixed.split_once(':')?;
        let namespace = self.prefixes.get(prefix)?;
        Some(Iri::from(format!("{}{}", namespace, local)))
    }
    pub fn is_class(&self, iri: &Iri) -> bool {
        self.classes.contains(iri)
    }
    pub fn is_individual(&self, iri: &Iri) -> bool {
        self.individuals.contains(iri)
    }
    pub fn is_object_property(&self, iri: &Iri) -> bool {
        self.object_properties.contains(iri)
    }
    pub fn is_data_property(&self, iri: &Iri) -> bool {
        self.data_properties.contains(iri)
    }
    pub fn is_annotation_property(&self, iri: &Iri) -> bool {
        self.annotation_properties.contains(iri)
    }
    pub fn kind_of(&self, iri: &Iri) -> Option<EntityKind> {
        if self.classes.contains(iri) {
            Some(EntityKind::Class)
        } else if self.individuals.contains(iri) {
            Some(EntityKind::NamedIndividual)
        } else if self.object_properties.contains(iri) {
            Some(EntityKind::ObjectProperty)
        } else if self.data_properties.contains(iri) {
            Some(EntityKind::DataProperty)
        } else if self.annotation_properties.contains(iri) {
            Some(EntityKind::AnnotationProperty)
        } else {
            None
        }
    }
    pub fn recorded_count(&self) -> usize {
        self.classes.len()
            + self.individuals.len()
            + self.object_properties.len()
            + self.data_properties.len()
            + self.annotation_properties.len()
    }
}
impl EntityRecorder for IriRegistry {
    fn record_class(&mut self, iri: &Iri) {
        self.classes.insert(iri.clone());
    }
    fn record_individual(&mut self, iri: &Iri) {
        self.individuals.insert(iri.clone());
    }
    fn record_object_property(&mut self, iri: &Iri) {
        self.object_properties.insert(iri.clone());
    }
    fn record_data_property(&mut self, iri: &Iri) {
        self.data_properties.insert(iri.clone());
    }
    fn record_annotation_property(&mut self, iri: &Iri) {
        self.annotation_properties.insert(iri.clone());
    }
    // Prefix registrations survive a reset; recorded entities do not.
    fn reset(&mut self) {
        self.shortened.clear();
        self.classes.clear();
        self.individuals.clear();
        self.object_properties.clear();
        self.data_properties.clear();
        self.annotation_properties.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorten_and_expand_are_inverse() {
        let mut registry = IriRegistry::new();
        registry.register_prefix("family", "http://example.org/family#");
        let iri = Iri::new("http://example.org/family#Person");

        let short = registry.shorten(&iri).expect("prefix registered");
        assert_eq!(short, "family:Person");
        assert_eq!(registry.expand(&short), Some(iri.clone()));
        // second lookup is served from the bidirectional map
        assert_eq!(registry.shorten(&iri), Some(short));
    }

    #[test]
    fn unknown_prefix_yields_nothing() {
        let mut registry = IriRegistry::new();
        assert_eq!(registry.shorten(&Iri::new("http://example.org/x#A")), None);
        assert_eq!(registry.expand("x:A"), None);
    }

    #[test]
    fn reset_keeps_prefixes_but_forgets_entities() {
        let mut registry = IriRegistry::new();
        registry.register_prefix("ex", "http://example.org/x#");
        let iri = Iri::new("http://example.org/x#A");
        registry.record_class(&iri);
        assert!(registry.is_class(&iri));

        registry.reset();
        assert!(!registry.is_class(&iri));
        assert_eq!(registry.recorded_count(), 0);
        assert_eq!(registry.shorten(&iri), Some(String::from("ex:A")));
    }
}
