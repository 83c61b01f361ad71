//! Linguistic terms: a name, a height and a membership function [`Shape`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Error, Result};
use crate::inputs::InputValues;
use crate::linspace::Linspace;
use crate::math::bound;
use crate::scalar;

mod discrete;
mod linear;
mod shape;

pub use discrete::Discrete;
pub use linear::Linear;
pub use shape::Shape;

#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Term {
    name: String,
    #[cfg_attr(feature = "serde", serde(default = "default_height"))]
    height: f64,
    shape: Shape,
}

#[cfg(feature = "serde")]
fn default_height() -> f64 {
    1.
}

impl Term {
    pub fn new(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            height: 1.,
            shape,
        }
    }

    /// Creates an unconfigured term of the shape called `class_name`.
    pub fn from_class_name(name: impl Into<String>, class_name: &str) -> Option<Self> {
        Shape::from_class_name(class_name).map(|shape| Self::new(name, shape))
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = height;
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn shape_mut(&mut self) -> &mut Shape {
        &mut self.shape
    }

    pub fn class_name(&self) -> &'static str {
        self.shape.class_name()
    }

    pub fn is_monotonic(&self) -> bool {
        self.shape.is_monotonic()
    }

    /// Constant and Linear terms report their value as is, so their height
    /// is neither applied nor printed.
    fn is_scaled(&self) -> bool {
        !matches!(self.shape, Shape::Constant { .. } | Shape::Linear(_))
    }

    /// Membership degree of `x`, scaled by the term's height.
    pub fn membership(&self, x: f64) -> Result<f64> {
        let y = self.shape.membership(x)?;

        Ok(if self.is_scaled() { self.height * y } else { y })
    }

    /// Inverse of a monotonic membership function, clamped to
    /// `[minimum, maximum]`.
    pub fn tsukamoto(&self, degree: f64, minimum: f64, maximum: f64) -> Result<f64> {
        self.shape.tsukamoto(degree, self.height, minimum, maximum)
    }

    /// Reconfigures the shape from whitespace separated values, e.g.
    /// `"-0.4 0.0 0.4 0.5"` for a triangle of height 0.5.
    pub fn configure(&mut self, parameters: &str) -> Result<()> {
        let values = scalar::parse_all(parameters)?;
        let (shape, height) = self.shape.configured(&values)?;

        trace!(term = %self.name, class = self.class_name(), parameters, "configured term");

        self.shape = shape;
        self.height = height;

        Ok(())
    }

    /// Shape parameters with three decimals, followed by the height unless it
    /// is 1.0.
    pub fn parameters(&self) -> String {
        let mut values = self.shape.parameters();

        if self.is_scaled() && self.height != 1. {
            values.push(self.height);
        }

        scalar::join(values)
    }

    /// Binds the input provider of a [`Linear`] term; other shapes ignore it.
    pub fn bind_inputs<P: InputValues + 'static>(&mut self, provider: &Arc<P>) {
        if let Shape::Linear(linear) = &mut self.shape {
            linear.bind(provider);
        }
    }

    /// Samples the membership function at `resolution + 1` evenly spaced
    /// points of `[start, end]`, optionally bounding each degree to `[0, 1]`.
    pub fn discretize(&self, start: f64, end: f64, resolution: usize, bounded: bool) -> Result<Term> {
        let xy = Linspace::new(start, end, resolution + 1)
            .map(|x| {
                let y = self.membership(x)?;

                Ok((x, if bounded { bound(y, 0., 1.) } else { y }))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Term::new(self.name.clone(), Shape::Discrete(Discrete::new(xy))))
    }
}

pub(crate) fn identifier(name: &str) -> &str {
    if name.is_empty() {
        "_"
    } else {
        name
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "term: {} {}", identifier(&self.name), self.class_name())?;

        let parameters = self.parameters();

        if !parameters.is_empty() {
            write!(f, " {parameters}")?;
        }

        Ok(())
    }
}

impl FromStr for Term {
    type Err = Error;

    /// Parses `term: <name> <class_name> [parameters...]`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();

        if tokens.next() != Some("term:") {
            return Err(Error::parse(s, "expected 'term:'"));
        }

        let name = tokens.next().ok_or_else(|| Error::parse(s, "expected a term name"))?;
        let class_name = tokens.next().ok_or_else(|| Error::parse(s, "expected a term class"))?;
        let mut term =
            Term::from_class_name(name, class_name).ok_or_else(|| Error::parse(s, "unknown term class"))?;

        term.configure(&tokens.collect::<Vec<_>>().join(" "))?;

        Ok(term)
    }
}

#[cfg(test)]
mod tests;
