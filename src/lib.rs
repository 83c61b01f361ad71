//! Fuzzy logic building blocks: linguistic terms and their membership
//! functions, the activated and aggregated terms produced by inference, and
//! a small engine for arithmetic formulas.
//!
//! ```
//! use fuzzy_core::{Shape, Term};
//!
//! let low: Term = "term: LOW Triangle -1.0 -0.5 0.0".parse().unwrap();
//!
//! assert_eq!(low.membership(-0.25).unwrap(), 0.5);
//! assert!(matches!(low.shape(), Shape::Triangle { .. }));
//! ```

mod activated;
mod aggregated;
mod error;
pub mod function;
mod inputs;
mod linspace;
mod math;
mod norm;
pub mod scalar;
mod term;
mod terms;

#[cfg(test)]
mod proptests;

pub use activated::Activated;
pub use aggregated::Aggregated;
pub use error::{Error, ErrorKind, Result};
pub use inputs::{InputValues, Inputs};
pub use linspace::Linspace;
pub use norm::{SNorm, TNorm};
pub use term::{Discrete, Linear, Shape, Term};
pub use terms::{TermKey, Terms};
