use std::sync::{Arc, Weak};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::inputs::InputValues;

/// Weighted sum of the current input values, plus an optional trailing bias.
///
/// The input provider is held weakly: once the provider is dropped the term
/// behaves as if it was never bound.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Linear {
    coefficients: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(skip))]
    inputs: Option<Weak<dyn InputValues>>,
}

impl Linear {
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self {
            coefficients,
            inputs: None,
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn set_coefficients(&mut self, coefficients: Vec<f64>) {
        self.coefficients = coefficients;
    }

    pub fn bind<P: InputValues + 'static>(&mut self, provider: &Arc<P>) {
        let inputs: Weak<dyn InputValues> = Arc::<P>::downgrade(provider);

        self.inputs = Some(inputs);
    }

    pub fn unbind(&mut self) {
        self.inputs = None;
    }

    pub fn is_bound(&self) -> bool {
        self.provider().is_some()
    }

    fn provider(&self) -> Option<Arc<dyn InputValues>> {
        self.inputs.as_ref().and_then(Weak::upgrade)
    }

    pub fn membership(&self) -> Result<f64> {
        let provider = self.provider().ok_or(Error::Unbound("a bound input provider"))?;
        let values = provider.input_values();
        let mut result = self
            .coefficients
            .iter()
            .zip(values.iter())
            .map(|(coefficient, value)| coefficient * value)
            .sum::<f64>();

        if let Some(bias) = self.coefficients.get(values.len()) {
            result += bias;
        }

        Ok(result)
    }
}

#[cfg(test)]
fn abc_inputs() -> Arc<crate::inputs::Inputs> {
    Arc::new([("A", 0.), ("B", 1.), ("C", 2.)].into_iter().collect())
}

#[test]
fn test_linear_membership() {
    let inputs = abc_inputs();
    let mut linear = Linear::new(vec![1., 2., 3.]);

    linear.bind(&inputs);
    assert_eq!(linear.membership(), Ok(8.));

    linear.set_coefficients(vec![1., 2., 3., 5.]);
    assert_eq!(linear.membership(), Ok(13.));

    // Coefficients past the bias are ignored
    linear.set_coefficients(vec![1., 2., 3., 5., 8.]);
    assert_eq!(linear.membership(), Ok(13.));

    inputs.set("B", 10.);
    assert_eq!(linear.membership(), Ok(1. * 0. + 2. * 10. + 3. * 2. + 5.));
}

#[test]
fn test_linear_without_provider() {
    let mut linear = Linear::new(vec![1., 2.]);

    assert!(!linear.is_bound());
    assert_eq!(linear.membership(), Err(Error::Unbound("a bound input provider")));

    let inputs = abc_inputs();
    linear.bind(&inputs);
    assert!(linear.is_bound());

    drop(inputs);
    assert!(!linear.is_bound());
    assert_eq!(linear.membership(), Err(Error::Unbound("a bound input provider")));
}
