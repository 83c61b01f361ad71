use indexmap::IndexMap;
use parking_lot::RwLock;

/// Source of the current input values a [`Linear`](crate::term::Linear) term
/// weighs, in declaration order.
pub trait InputValues: Send + Sync {
    fn input_values(&self) -> Vec<f64>;
}

/// Named input values kept in the order they were declared.
#[derive(Debug, Default)]
pub struct Inputs(RwLock<IndexMap<String, f64>>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(RwLock::new(IndexMap::new()))
    }

    /// Declares `name` if it is new; either way sets its current value.
    pub fn set(&self, name: impl Into<String>, value: f64) {
        self.0.write().insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.read().get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for Inputs {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Inputs(RwLock::new(iter.into_iter().map(|(k, v)| (k.into(), v)).collect()))
    }
}

impl InputValues for Inputs {
    fn input_values(&self) -> Vec<f64> {
        self.0.read().values().copied().collect()
    }
}

#[test]
fn test_inputs_keep_declaration_order() {
    let inputs = Inputs::new();

    inputs.set("B", 1.);
    inputs.set("A", 0.);
    inputs.set("C", 2.);
    inputs.set("B", 5.);

    assert_eq!(inputs.input_values(), vec![5., 0., 2.]);
    assert_eq!(inputs.get("A"), Some(0.));
    assert_eq!(inputs.get("D"), None);
    assert_eq!(inputs.len(), 3);
}
