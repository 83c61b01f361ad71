use std::ops::Index;
use std::sync::Arc;

use slotmap::{new_key_type, SlotMap};

use crate::inputs::InputValues;
use crate::term::Term;

new_key_type! {
    /// A term key
    pub struct TermKey;
}

/// Owner of the terms of one variable. Compound terms refer to them by
/// [`TermKey`], so two references are the same term exactly when their keys
/// are equal.
#[derive(Clone, Debug, Default)]
pub struct Terms(SlotMap<TermKey, Term>);

impl Terms {
    pub fn new() -> Self {
        Self(SlotMap::with_key())
    }

    pub fn insert(&mut self, term: Term) -> TermKey {
        self.0.insert(term)
    }

    pub fn get(&self, key: TermKey) -> Option<&Term> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: TermKey) -> Option<&mut Term> {
        self.0.get_mut(key)
    }

    pub fn remove(&mut self, key: TermKey) -> Option<Term> {
        self.0.remove(key)
    }

    /// Key of the first term named `name`.
    // REVIEW: Names are not unique; should insert reject duplicates?
    pub fn find(&self, name: &str) -> Option<TermKey> {
        self.0.iter().find(|(_, term)| term.name() == name).map(|(key, _)| key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TermKey, &Term)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Binds every linear term to `provider`.
    pub fn bind_inputs<P: InputValues + 'static>(&mut self, provider: &Arc<P>) {
        for term in self.0.values_mut() {
            term.bind_inputs(provider);
        }
    }
}

impl Index<TermKey> for Terms {
    type Output = Term;

    fn index(&self, key: TermKey) -> &Term {
        &self.0[key]
    }
}

#[test]
fn test_terms() {
    use crate::term::Shape;

    let mut terms = Terms::new();
    let low = terms.insert(Term::new("LOW", Shape::Ramp { start: 1., end: 0. }));
    let high = terms.insert(Term::new("HIGH", Shape::Ramp { start: 0., end: 1. }));

    assert_eq!(terms.len(), 2);
    assert_eq!(terms.find("HIGH"), Some(high));
    assert_eq!(terms.find("MEDIUM"), None);
    assert_eq!(terms[low].name(), "LOW");

    terms.get_mut(low).unwrap().set_name("VERY_LOW");
    assert_eq!(terms.find("LOW"), None);

    assert!(terms.remove(low).is_some());
    assert!(terms.get(low).is_none());
    assert_eq!(terms.iter().map(|(key, _)| key).collect::<Vec<_>>(), vec![high]);
}
