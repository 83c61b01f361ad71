use std::fmt;
use std::str::FromStr;

use num::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Conjunction operator, used as the implication of an activated term.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TNorm {
    Minimum,
    AlgebraicProduct,
    BoundedDifference,
    DrasticProduct,
    EinsteinProduct,
    HamacherProduct,
    NilpotentMinimum,
}

impl TNorm {
    pub const ALL: [Self; 7] = [
        Self::Minimum,
        Self::AlgebraicProduct,
        Self::BoundedDifference,
        Self::DrasticProduct,
        Self::EinsteinProduct,
        Self::HamacherProduct,
        Self::NilpotentMinimum,
    ];

    pub fn compute<F: Float>(self, u: F, v: F) -> F {
        let two = F::one() + F::one();

        match self {
            Self::Minimum => F::min(u, v),
            Self::AlgebraicProduct => u * v,
            Self::BoundedDifference => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProduct => {
                if F::max(u, v) == F::one() {
                    F::min(u, v)
                } else {
                    F::zero()
                }
            },
            Self::EinsteinProduct => (u * v) / (two - (u + v - u * v)),
            Self::HamacherProduct => {
                if u + v != F::zero() {
                    (u * v) / (u + v - u * v)
                } else {
                    F::zero()
                }
            },
            Self::NilpotentMinimum => {
                if u + v > F::one() {
                    F::min(u, v)
                } else {
                    F::zero()
                }
            },
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Self::Minimum => "Minimum",
            Self::AlgebraicProduct => "AlgebraicProduct",
            Self::BoundedDifference => "BoundedDifference",
            Self::DrasticProduct => "DrasticProduct",
            Self::EinsteinProduct => "EinsteinProduct",
            Self::HamacherProduct => "HamacherProduct",
            Self::NilpotentMinimum => "NilpotentMinimum",
        }
    }
}

/// Disjunction operator, used as the aggregation of fired rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SNorm {
    Maximum,
    AlgebraicSum,
    BoundedSum,
    DrasticSum,
    EinsteinSum,
    HamacherSum,
    NilpotentMaximum,
    NormalizedSum,
    /// Plain addition, not bounded to one
    UnboundedSum,
}

impl SNorm {
    pub const ALL: [Self; 9] = [
        Self::Maximum,
        Self::AlgebraicSum,
        Self::BoundedSum,
        Self::DrasticSum,
        Self::EinsteinSum,
        Self::HamacherSum,
        Self::NilpotentMaximum,
        Self::NormalizedSum,
        Self::UnboundedSum,
    ];

    pub fn compute<F: Float>(self, u: F, v: F) -> F {
        let two = F::one() + F::one();

        match self {
            Self::Maximum => F::max(u, v),
            Self::AlgebraicSum => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if F::min(u, v) == F::zero() {
                    F::max(u, v)
                } else {
                    F::one()
                }
            },
            Self::EinsteinSum => (u + v) / (F::one() + u * v),
            Self::HamacherSum => {
                if u * v != F::one() {
                    (u + v - two * u * v) / (F::one() - u * v)
                } else {
                    F::one()
                }
            },
            Self::NilpotentMaximum => {
                if u + v < F::one() {
                    F::max(u, v)
                } else {
                    F::one()
                }
            },
            Self::NormalizedSum => (u + v) / F::max(F::one(), F::max(u, v)),
            Self::UnboundedSum => u + v,
        }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Self::Maximum => "Maximum",
            Self::AlgebraicSum => "AlgebraicSum",
            Self::BoundedSum => "BoundedSum",
            Self::DrasticSum => "DrasticSum",
            Self::EinsteinSum => "EinsteinSum",
            Self::HamacherSum => "HamacherSum",
            Self::NilpotentMaximum => "NilpotentMaximum",
            Self::NormalizedSum => "NormalizedSum",
            Self::UnboundedSum => "UnboundedSum",
        }
    }
}

impl fmt::Display for TNorm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

impl fmt::Display for SNorm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

impl FromStr for TNorm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|norm| norm.class_name() == s)
            .ok_or_else(|| Error::parse(s, "unknown T-norm"))
    }
}

impl FromStr for SNorm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|norm| norm.class_name() == s)
            .ok_or_else(|| Error::parse(s, "unknown S-norm"))
    }
}

#[test]
fn test_tnorms() {
    assert_eq!(TNorm::Minimum.compute(0.6, 0.4), 0.4);
    assert_eq!(TNorm::AlgebraicProduct.compute(0.5, 0.5), 0.25);
    assert_eq!(TNorm::BoundedDifference.compute(0.25, 0.5), 0.);
    assert_eq!(TNorm::DrasticProduct.compute(1., 0.3), 0.3);
    assert_eq!(TNorm::DrasticProduct.compute(0.9, 0.3), 0.);
    assert_eq!(TNorm::HamacherProduct.compute(0., 0.), 0.);
    assert_eq!(TNorm::NilpotentMinimum.compute(0.6, 0.5), 0.5);
    assert_eq!(TNorm::NilpotentMinimum.compute(0.4, 0.5), 0.);
    assert_eq!(TNorm::EinsteinProduct.compute(1.0f32, 1.0f32), 1.);
}

#[test]
fn test_snorms() {
    assert_eq!(SNorm::Maximum.compute(0.6, 0.4), 0.6);
    assert_eq!(SNorm::AlgebraicSum.compute(0.5, 0.5), 0.75);
    assert_eq!(SNorm::BoundedSum.compute(0.6, 0.6), 1.);
    assert_eq!(SNorm::DrasticSum.compute(0., 0.3), 0.3);
    assert_eq!(SNorm::DrasticSum.compute(0.2, 0.3), 1.);
    assert_eq!(SNorm::HamacherSum.compute(1., 1.), 1.);
    assert_eq!(SNorm::NilpotentMaximum.compute(0.2, 0.3), 0.3);
    assert_eq!(SNorm::NormalizedSum.compute(0.75, 0.75), 1.5);
    assert_eq!(SNorm::NormalizedSum.compute(3., 1.), 4. / 3.);
    assert_eq!(SNorm::UnboundedSum.compute(0.75, 0.75), 1.5);
}

#[test]
fn test_norm_names() {
    for norm in TNorm::ALL {
        assert_eq!(norm.class_name().parse::<TNorm>(), Ok(norm));
    }
    for norm in SNorm::ALL {
        assert_eq!(norm.to_string().parse::<SNorm>(), Ok(norm));
    }
    assert!("Maximum".parse::<TNorm>().is_err());
}
