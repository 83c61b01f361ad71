//! Arithmetic formulas over named variables, as trees of [`Node`]s whose
//! operators and functions are described by [`Element`]s.

mod element;
mod factory;
mod node;
mod parser;

pub use element::{Associativity, Element, ElementKind, Method};
pub use factory::Factory;
pub use node::{Bindings, Node};
