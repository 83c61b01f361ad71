use tracing::trace;

use crate::activated::Activated;
use crate::error::{Error, Result};
use crate::norm::SNorm;
use crate::term::identifier;
use crate::terms::{TermKey, Terms};

/// Accumulated output of a rule block: every activated term, combined by an
/// aggregation operator over a fixed domain.
#[derive(Clone, Debug, PartialEq)]
pub struct Aggregated {
    name: String,
    minimum: f64,
    maximum: f64,
    aggregation: Option<SNorm>,
    terms: Vec<Activated>,
}

impl Aggregated {
    pub fn new(name: impl Into<String>, minimum: f64, maximum: f64, aggregation: impl Into<Option<SNorm>>) -> Self {
        Self {
            name: name.into(),
            minimum,
            maximum,
            aggregation: aggregation.into(),
            terms: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn height(&self) -> f64 {
        1.
    }

    pub fn class_name(&self) -> &'static str {
        "Aggregated"
    }

    pub fn is_monotonic(&self) -> bool {
        false
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    pub fn set_range(&mut self, minimum: f64, maximum: f64) {
        self.minimum = minimum;
        self.maximum = maximum;
    }

    pub fn range(&self) -> f64 {
        self.maximum - self.minimum
    }

    pub fn aggregation(&self) -> Option<SNorm> {
        self.aggregation
    }

    pub fn set_aggregation(&mut self, aggregation: impl Into<Option<SNorm>>) {
        self.aggregation = aggregation.into();
    }

    pub fn terms(&self) -> &[Activated] {
        &self.terms
    }

    pub fn push(&mut self, activated: Activated) {
        trace!(
            aggregated = %self.name,
            degree = activated.degree(),
            terms = self.terms.len() + 1,
            "appended activated term"
        );

        self.terms.push(activated);
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Aggregation of every activated membership of `x`, starting from zero.
    pub fn membership(&self, x: f64, terms: &Terms) -> Result<f64> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        if self.terms.is_empty() {
            return Ok(0.);
        }

        let aggregation = self.aggregation.ok_or(Error::Unbound("an aggregation operator"))?;

        self.terms.iter().try_fold(0., |result, activated| {
            Ok(aggregation.compute(result, activated.membership(x, terms)?))
        })
    }

    /// Aggregated degree of every activation of `term`, in insertion order.
    /// Without an aggregation operator the degrees are summed.
    pub fn activation_degree(&self, term: TermKey) -> f64 {
        self.terms
            .iter()
            .filter(|activated| activated.term() == Some(term))
            .fold(0., |result, activated| match self.aggregation {
                Some(aggregation) => aggregation.compute(result, activated.degree()),
                None => result + activated.degree(),
            })
    }

    /// The activated term with the greatest degree; ties keep the first.
    pub fn highest_activated_term(&self) -> Option<&Activated> {
        self.terms.iter().fold(None, |highest: Option<&Activated>, activated| match highest {
            Some(highest) if activated.degree() <= highest.degree() => Some(highest),
            _ => Some(activated),
        })
    }

    /// `Aggregation[a1,a2,...]`, or `[a1+a2+...]` without an aggregation.
    pub fn parameters(&self, terms: &Terms) -> String {
        let activated: Vec<_> = self.terms.iter().map(|a| a.parameters(terms)).collect();

        match self.aggregation {
            Some(aggregation) => format!("{aggregation}[{}]", activated.join(",")),
            None => format!("[{}]", activated.join("+")),
        }
    }

    /// `term: <name> Aggregated <parameters>`
    pub fn export(&self, terms: &Terms) -> String {
        format!(
            "term: {} {} {}",
            identifier(&self.name),
            self.class_name(),
            self.parameters(terms)
        )
    }
}

#[cfg(test)]
fn low_medium() -> (Terms, TermKey, TermKey) {
    use crate::term::{Shape, Term};

    let mut terms = Terms::new();
    let low = terms.insert(Term::new(
        "LOW",
        Shape::Triangle {
            vertex_a: -1.,
            vertex_b: -0.5,
            vertex_c: 0.,
        },
    ));
    let medium = terms.insert(Term::new(
        "MEDIUM",
        Shape::Triangle {
            vertex_a: -0.5,
            vertex_b: 0.,
            vertex_c: 0.5,
        },
    ));

    (terms, low, medium)
}

#[test]
fn test_aggregated() {
    use crate::norm::TNorm;

    let (terms, low, medium) = low_medium();
    let mut aggregated = Aggregated::new("fuzzy_output", -1., 1., SNorm::Maximum);

    aggregated.push(Activated::new(low, 0.6, TNorm::Minimum));
    aggregated.push(Activated::new(medium, 0.4, TNorm::Minimum));

    assert_eq!(
        aggregated.export(&terms),
        "term: fuzzy_output Aggregated Maximum[Minimum(0.600,LOW),Minimum(0.400,MEDIUM)]"
    );

    for (x, expected) in [
        (-0.5, 0.6),
        (-0.4, 0.6),
        (-0.25, 0.5),
        (-0.1, 0.4),
        (0.0, 0.4),
        (0.1, 0.4),
        (0.25, 0.4),
        (0.4, 0.19999999999999996),
        (0.5, 0.0),
        (f64::INFINITY, 0.0),
        (f64::NEG_INFINITY, 0.0),
    ] {
        assert_eq!(aggregated.membership(x, &terms), Ok(expected), "when x={x}");
    }
    assert!(aggregated.membership(f64::NAN, &terms).unwrap().is_nan());

    assert_eq!(aggregated.activation_degree(low), 0.6);
    assert_eq!(aggregated.activation_degree(medium), 0.4);
    assert_eq!(aggregated.highest_activated_term().and_then(Activated::term), Some(low));

    aggregated.push(Activated::new(low, 0.4, None));
    aggregated.set_aggregation(SNorm::UnboundedSum);
    assert_eq!(aggregated.activation_degree(low), 0.6 + 0.4);

    aggregated.set_aggregation(None);
    assert_eq!(
        aggregated.export(&terms),
        "term: fuzzy_output Aggregated [Minimum(0.600,LOW)+Minimum(0.400,MEDIUM)+(0.400*LOW)]"
    );
    assert_eq!(
        aggregated.membership(0., &terms),
        Err(Error::Unbound("an aggregation operator"))
    );
    assert_eq!(aggregated.activation_degree(low), 0.6 + 0.4);
    assert_eq!(aggregated.range(), 2.);
    assert_eq!((aggregated.class_name(), aggregated.height()), ("Aggregated", 1.));
    assert!(!aggregated.is_monotonic());
}

#[test]
fn test_aggregated_empty_and_ties() {
    use crate::norm::TNorm;

    let (terms, low, medium) = low_medium();
    let mut aggregated = Aggregated::new("", -1., 1., None);

    assert_eq!(aggregated.membership(0., &terms), Ok(0.));
    assert_eq!(aggregated.highest_activated_term(), None);
    assert_eq!(aggregated.activation_degree(low), 0.);
    assert_eq!(aggregated.export(&terms), "term: _ Aggregated []");

    aggregated.push(Activated::new(medium, 0.5, TNorm::Minimum));
    aggregated.push(Activated::new(low, 0.5, TNorm::Minimum));
    assert_eq!(aggregated.highest_activated_term().and_then(Activated::term), Some(medium));

    aggregated.clear();
    assert!(aggregated.is_empty());
}
