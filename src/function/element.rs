use std::fmt;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Operator,
    Function,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// The numeric operation an element applies to its arguments.
#[derive(Clone, Copy, Debug)]
pub enum Method {
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
}

impl Method {
    pub fn arity(self) -> usize {
        match self {
            Method::Unary(_) => 1,
            Method::Binary(_) => 2,
        }
    }
}

/// Descriptor of an operator or a function usable in a formula.
///
/// An element without a method is a placeholder: it can be printed and
/// placed in a tree, but fails when evaluated.
#[derive(Clone, Debug)]
pub struct Element {
    pub name: String,
    pub description: String,
    pub kind: ElementKind,
    pub method: Option<Method>,
    pub arity: usize,
    /// Binding strength of an operator; higher binds tighter. Always 0 for
    /// functions.
    pub precedence: u8,
    pub associativity: Associativity,
}

impl Element {
    pub fn operator(
        name: impl Into<String>,
        description: impl Into<String>,
        method: Method,
        precedence: u8,
        associativity: Associativity,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind: ElementKind::Operator,
            method: Some(method),
            arity: method.arity(),
            precedence,
            associativity,
        }
    }

    pub fn function(name: impl Into<String>, description: impl Into<String>, method: Method) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind: ElementKind::Function,
            method: Some(method),
            arity: method.arity(),
            precedence: 0,
            associativity: Associativity::Left,
        }
    }

    /// An element of the given kind and arity with no method bound.
    pub fn placeholder(name: impl Into<String>, kind: ElementKind, arity: usize) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            kind,
            method: None,
            arity,
            precedence: 0,
            associativity: Associativity::Left,
        }
    }

    pub fn is_operator(&self) -> bool {
        self.kind == ElementKind::Operator
    }

    pub fn is_function(&self) -> bool {
        self.kind == ElementKind::Function
    }

    pub fn evaluate(&self, args: &[f64]) -> Result<f64> {
        let method = self.method.ok_or(Error::Unbound("a method reference"))?;

        match (method, args) {
            (Method::Unary(f), &[a]) => Ok(f(a)),
            (Method::Binary(f), &[a, b]) => Ok(f(a, b)),
            _ => Err(Error::ArityMismatch {
                element: self.name.clone(),
                expected: method.arity(),
                found: args.len(),
            }),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} '{}' ({}): arity={}",
            self.kind, self.name, self.description, self.arity
        )?;

        if self.is_operator() {
            write!(
                f,
                ", precedence={}, associativity={:?}",
                self.precedence, self.associativity
            )?;
        }

        Ok(())
    }
}

#[test]
fn test_element_evaluate() {
    let multiply = Element::operator("*", "multiplication", Method::Binary(|a, b| a * b), 80, Associativity::Left);
    let sin = Element::function("sin", "sine", Method::Unary(f64::sin));

    assert_eq!(multiply.evaluate(&[3., 4.]), Ok(12.));
    assert_eq!(sin.evaluate(&[0.]), Ok(0.));
    assert_eq!(
        sin.evaluate(&[1., 2.]),
        Err(Error::ArityMismatch {
            element: "sin".into(),
            expected: 1,
            found: 2
        })
    );

    let placeholder = Element::placeholder("?", ElementKind::Function, 1);

    assert_eq!(placeholder.evaluate(&[1.]), Err(Error::Unbound("a method reference")));
}

#[test]
fn test_element_display() {
    let power = Element::operator("^", "power", Method::Binary(f64::powf), 90, Associativity::Right);

    assert!(power.is_operator());
    assert_eq!(
        power.to_string(),
        "Operator '^' (power): arity=2, precedence=90, associativity=Right"
    );
    assert_eq!(
        Element::function("abs", "absolute value", Method::Unary(f64::abs)).to_string(),
        "Function 'abs' (absolute value): arity=1"
    );
}
