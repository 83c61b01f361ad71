use crate::error::{Error, Result};
use crate::norm::TNorm;
use crate::scalar;
use crate::term::identifier;
use crate::terms::{TermKey, Terms};

/// The consequent term of one fired rule: the term's membership cut (or
/// scaled) by the rule's activation degree through an implication operator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Activated {
    term: Option<TermKey>,
    degree: f64,
    implication: Option<TNorm>,
}

impl Activated {
    pub fn new(term: impl Into<Option<TermKey>>, degree: f64, implication: impl Into<Option<TNorm>>) -> Self {
        Self {
            term: term.into(),
            degree,
            implication: implication.into(),
        }
    }

    /// Activated terms are anonymous.
    pub fn name(&self) -> &str {
        ""
    }

    pub fn height(&self) -> f64 {
        1.
    }

    pub fn class_name(&self) -> &'static str {
        "Activated"
    }

    pub fn is_monotonic(&self) -> bool {
        false
    }

    pub fn term(&self) -> Option<TermKey> {
        self.term
    }

    pub fn set_term(&mut self, term: impl Into<Option<TermKey>>) {
        self.term = term.into();
    }

    pub fn degree(&self) -> f64 {
        self.degree
    }

    pub fn set_degree(&mut self, degree: f64) {
        self.degree = degree;
    }

    pub fn implication(&self) -> Option<TNorm> {
        self.implication
    }

    pub fn set_implication(&mut self, implication: impl Into<Option<TNorm>>) {
        self.implication = implication.into();
    }

    /// `implication(degree, term(x))`, with the term looked up in `terms`.
    pub fn membership(&self, x: f64, terms: &Terms) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }

        let term = self
            .term
            .and_then(|key| terms.get(key))
            .ok_or(Error::Unbound("a term to activate"))?;
        let implication = self.implication.ok_or(Error::Unbound("an implication operator"))?;

        Ok(implication.compute(self.degree, term.membership(x)?))
    }

    /// `Implication(degree,term)`, or `(degree*term)` without an implication.
    pub fn parameters(&self, terms: &Terms) -> String {
        let degree = scalar::format(self.degree);
        let name = match self.term.and_then(|key| terms.get(key)) {
            Some(term) => identifier(term.name()),
            None => "none",
        };

        match self.implication {
            Some(implication) => format!("{implication}({degree},{name})"),
            None => format!("({degree}*{name})"),
        }
    }

    /// `term: _ Activated <parameters>`
    pub fn export(&self, terms: &Terms) -> String {
        format!(
            "term: {} {} {}",
            identifier(self.name()),
            self.class_name(),
            self.parameters(terms)
        )
    }
}

#[cfg(test)]
fn triangle_terms() -> (Terms, TermKey) {
    use crate::term::{Shape, Term};

    let mut terms = Terms::new();
    let key = terms.insert(Term::new(
        "triangle",
        Shape::Triangle {
            vertex_a: -0.4,
            vertex_b: 0.,
            vertex_c: 0.4,
        },
    ));

    (terms, key)
}

#[test]
fn test_activated_membership() {
    let (terms, triangle) = triangle_terms();
    let mut activated = Activated::new(triangle, 1., TNorm::AlgebraicProduct);

    assert_eq!(activated.parameters(&terms), "AlgebraicProduct(1.000,triangle)");
    assert_eq!(activated.export(&terms), "term: _ Activated AlgebraicProduct(1.000,triangle)");
    assert_eq!((activated.name(), activated.height()), ("", 1.));
    assert!(!activated.is_monotonic());
    assert_eq!(activated.membership(-0.25, &terms), Ok(0.37500000000000006));
    assert_eq!(activated.membership(0.5, &terms), Ok(0.));
    assert!(activated.membership(f64::NAN, &terms).unwrap().is_nan());

    activated.set_degree(0.5);
    assert_eq!(activated.export(&terms), "term: _ Activated AlgebraicProduct(0.500,triangle)");
    assert_eq!(activated.membership(-0.25, &terms), Ok(0.18750000000000003));
    assert_eq!(activated.membership(-0.1, &terms), Ok(0.37500000000000006));

    activated.set_implication(TNorm::Minimum);
    assert_eq!(activated.parameters(&terms), "Minimum(0.500,triangle)");
    assert_eq!(activated.membership(0., &terms), Ok(0.5));
}

#[test]
fn test_activated_unbound() {
    let (mut terms, triangle) = triangle_terms();
    let placeholder = Activated::new(None, 1., None);

    assert_eq!(placeholder.export(&terms), "term: _ Activated (1.000*none)");

    let placeholder = Activated::new(None, 0.5, TNorm::Minimum);

    assert_eq!(placeholder.parameters(&terms), "Minimum(0.500,none)");
    assert_eq!(placeholder.membership(0., &terms), Err(Error::Unbound("a term to activate")));
    assert!(placeholder.membership(f64::NAN, &terms).unwrap().is_nan());

    let without_implication = Activated::new(triangle, 0.5, None);

    assert_eq!(without_implication.parameters(&terms), "(0.500*triangle)");
    assert_eq!(
        without_implication.membership(0., &terms),
        Err(Error::Unbound("an implication operator"))
    );

    // Removed terms behave as absent
    let activated = Activated::new(triangle, 0.5, TNorm::Minimum);

    terms.remove(triangle);
    assert_eq!(activated.membership(0., &terms), Err(Error::Unbound("a term to activate")));
    assert_eq!(activated.parameters(&terms), "Minimum(0.500,none)");
}
