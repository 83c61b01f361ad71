use std::collections::HashMap;
use std::fmt;

use super::element::Element;
use crate::error::{Error, Result};
use crate::scalar;

/// Values of the variables a formula refers to.
pub type Bindings = HashMap<String, f64>;

/// Expression tree of a formula.
///
/// Every node owns its children and its element, so `clone` yields a fully
/// independent tree.
#[derive(Clone, Debug)]
pub enum Node {
    Constant(f64),
    Variable(String),
    /// Application of an element to one operand (`left`, or `right` when
    /// `left` is absent) or to two.
    Apply {
        element: Element,
        left: Option<Box<Node>>,
        right: Option<Box<Node>>,
    },
}

impl Node {
    pub fn constant(value: f64) -> Self {
        Node::Constant(value)
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Node::Variable(name.into())
    }

    pub fn unary(element: Element, operand: Node) -> Self {
        Node::Apply {
            element,
            left: Some(Box::new(operand)),
            right: None,
        }
    }

    pub fn binary(element: Element, left: Node, right: Node) -> Self {
        Node::Apply {
            element,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    pub fn element(&self) -> Option<&Element> {
        match self {
            Node::Apply { element, .. } => Some(element),
            _ => None,
        }
    }

    pub fn element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Apply { element, .. } => Some(element),
            _ => None,
        }
    }

    pub fn left(&self) -> Option<&Node> {
        match self {
            Node::Apply { left, .. } => left.as_deref(),
            _ => None,
        }
    }

    pub fn left_mut(&mut self) -> Option<&mut Node> {
        match self {
            Node::Apply { left, .. } => left.as_deref_mut(),
            _ => None,
        }
    }

    pub fn right(&self) -> Option<&Node> {
        match self {
            Node::Apply { right, .. } => right.as_deref(),
            _ => None,
        }
    }

    pub fn right_mut(&mut self) -> Option<&mut Node> {
        match self {
            Node::Apply { right, .. } => right.as_deref_mut(),
            _ => None,
        }
    }

    pub fn evaluate(&self, bindings: Option<&Bindings>) -> Result<f64> {
        match self {
            Node::Constant(value) => Ok(*value),
            Node::Variable(name) => bindings
                .and_then(|bindings| bindings.get(name))
                .copied()
                .ok_or_else(|| Error::MissingBinding {
                    variable: name.clone(),
                    available: describe(bindings),
                }),
            Node::Apply { element, left, right } => {
                if element.method.is_none() {
                    return Err(Error::Unbound("a method reference"));
                }

                let missing = |found| Error::MissingOperand {
                    element: element.name.clone(),
                    expected: element.arity,
                    found,
                };

                match (element.arity, left, right) {
                    (1, Some(operand), _) | (1, None, Some(operand)) => element.evaluate(&[operand.evaluate(bindings)?]),
                    (1, None, None) => Err(missing(0)),
                    (2, Some(left), Some(right)) => {
                        let a = left.evaluate(bindings)?;
                        let b = right.evaluate(bindings)?;

                        element.evaluate(&[a, b])
                    },
                    (2, ..) => Err(missing(left.is_some() as usize + right.is_some() as usize)),
                    (_, ..) => {
                        let args = [left, right]
                            .into_iter()
                            .flatten()
                            .map(|node| node.evaluate(bindings))
                            .collect::<Result<Vec<_>>>()?;

                        element.evaluate(&args)
                    },
                }
            },
        }
    }

    /// `operator left right`, e.g. `* 3.000 4.000`.
    pub fn prefix(&self) -> String {
        let mut tokens = Vec::new();

        self.visit_prefix(&mut tokens);
        tokens.join(" ")
    }

    /// `left operator right`, with functions as `name ( args )`.
    pub fn infix(&self) -> String {
        let mut tokens = Vec::new();

        self.visit_infix(&mut tokens);
        tokens.join(" ")
    }

    /// `left right operator`, e.g. `3.000 4.000 *`.
    pub fn postfix(&self) -> String {
        let mut tokens = Vec::new();

        self.visit_postfix(&mut tokens);
        tokens.join(" ")
    }

    fn visit_prefix(&self, tokens: &mut Vec<String>) {
        tokens.push(self.to_string());
        for child in self.children() {
            child.visit_prefix(tokens);
        }
    }

    fn visit_postfix(&self, tokens: &mut Vec<String>) {
        for child in self.children() {
            child.visit_postfix(tokens);
        }
        tokens.push(self.to_string());
    }

    fn visit_infix(&self, tokens: &mut Vec<String>) {
        let Node::Apply { element, .. } = self else {
            tokens.push(self.to_string());
            return;
        };

        let mut children = self.children();

        if element.is_function() {
            tokens.push(element.name.clone());
            tokens.push("(".to_owned());
            for child in children {
                child.visit_infix(tokens);
            }
            tokens.push(")".to_owned());
        } else if element.arity == 1 {
            tokens.push(element.name.clone());
            for child in children {
                child.visit_infix(tokens);
            }
        } else {
            if let Some(left) = children.next() {
                left.visit_infix(tokens);
            }
            tokens.push(element.name.clone());
            for child in children {
                child.visit_infix(tokens);
            }
        }
    }

    fn children(&self) -> impl Iterator<Item = &Node> {
        [self.left(), self.right()].into_iter().flatten()
    }
}

fn describe(bindings: Option<&Bindings>) -> String {
    let Some(bindings) = bindings else {
        return "None".to_owned();
    };

    let mut entries: Vec<_> = bindings.iter().collect();

    entries.sort_by(|a, b| a.0.cmp(b.0));

    let entries: Vec<_> = entries
        .into_iter()
        .map(|(name, value)| format!("{name}: {}", scalar::format(*value)))
        .collect();

    format!("{{{}}}", entries.join(", "))
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Constant(value) => f.write_str(&scalar::format(*value)),
            Node::Variable(name) => f.write_str(name),
            Node::Apply { element, .. } => f.write_str(&element.name),
        }
    }
}
