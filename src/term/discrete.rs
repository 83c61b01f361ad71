use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Error, Result};
use crate::math::interp;

/// A membership function given by explicit `(x, y)` points.
///
/// Points may be inserted in any order, but interpolation assumes they are
/// sorted by ascending x, so call [`Discrete::sort`] after building an
/// unordered set.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Discrete {
    xy: Vec<(f64, f64)>,
}

impl Discrete {
    pub fn new(xy: Vec<(f64, f64)>) -> Self {
        Self { xy }
    }

    /// Builds the points from a flat `x0 y0 x1 y1 ...` sequence.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        Ok(Self::new(Self::pairs_from(values)?))
    }

    pub fn pairs_from(values: &[f64]) -> Result<Vec<(f64, f64)>> {
        if values.len() % 2 != 0 {
            return Err(Error::OddNumberOfValues(values.len()));
        }

        Ok(values.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect())
    }

    pub fn values_from(pairs: &[(f64, f64)]) -> Vec<f64> {
        pairs.iter().flat_map(|&(x, y)| [x, y]).collect()
    }

    pub fn xy(&self) -> &[(f64, f64)] {
        &self.xy
    }

    pub fn push(&mut self, x: f64, y: f64) {
        self.xy.push((x, y));
    }

    pub fn x(&self) -> impl Iterator<Item = f64> + '_ {
        self.xy.iter().map(|&(x, _)| x)
    }

    pub fn y(&self) -> impl Iterator<Item = f64> + '_ {
        self.xy.iter().map(|&(_, y)| y)
    }

    /// Coordinate at `index` of the flattened points: even indices are x
    /// values, odd indices are y values.
    pub fn coordinate(&self, index: usize) -> Option<f64> {
        let (x, y) = self.xy.get(index / 2)?;

        Some(if index % 2 == 0 { *x } else { *y })
    }

    pub fn len(&self) -> usize {
        self.xy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.xy.is_empty()
    }

    /// Sorts the points by ascending x (ties by y).
    pub fn sort(&mut self) {
        self.xy.sort_by(|a, b| match a.0.total_cmp(&b.0) {
            Ordering::Equal => a.1.total_cmp(&b.1),
            ordering => ordering,
        });
        trace!(points = self.xy.len(), "sorted discrete points");
    }

    pub fn membership(&self, x: f64) -> Result<f64> {
        if self.xy.is_empty() {
            return Err(Error::EmptyPoints);
        }
        if x.is_nan() {
            return Ok(f64::NAN);
        }

        interp(x, &self.xy).ok_or(Error::EmptyPoints)
    }
}

#[test]
fn test_pairs() {
    let discrete = Discrete::from_values(&[0., 1., 2., 3., 4., 5., 6., 7.]).unwrap();

    assert_eq!(discrete.x().collect::<Vec<_>>(), vec![0., 2., 4., 6.]);
    assert_eq!(discrete.y().collect::<Vec<_>>(), vec![1., 3., 5., 7.]);
    assert_eq!(discrete.coordinate(4), Some(4.));
    assert_eq!(discrete.coordinate(5), Some(5.));
    assert_eq!(discrete.coordinate(8), None);

    assert_eq!(Discrete::pairs_from(&[]), Ok(vec![]));
    assert_eq!(
        Discrete::values_from(&Discrete::pairs_from(&[1., 2., 3., 4.]).unwrap()),
        vec![1., 2., 3., 4.]
    );
    assert_eq!(Discrete::pairs_from(&[1., 2., 3.]), Err(Error::OddNumberOfValues(3)));
}

#[test]
fn test_sort() {
    let mut discrete = Discrete::from_values(&[0., 1., 8., 9., 4., 5., 2., 3., 6., 7.]).unwrap();

    discrete.sort();

    assert_eq!(
        Discrete::values_from(discrete.xy()),
        vec![0., 1., 2., 3., 4., 5., 6., 7., 8., 9.]
    );
}

#[test]
fn test_membership() {
    let discrete = Discrete::from_values(&[-0.5, 0., -0.25, 1., 0., 0.5, 0.25, 1., 0.5, 0.]).unwrap();

    assert_eq!(discrete.membership(-0.5), Ok(0.));
    assert_eq!(discrete.membership(-0.4), Ok(0.3999999999999999));
    assert_eq!(discrete.membership(-0.25), Ok(1.));
    assert_eq!(discrete.membership(0.), Ok(0.5));
    assert_eq!(discrete.membership(0.25), Ok(1.));
    assert_eq!(discrete.membership(0.5), Ok(0.));
    assert_eq!(discrete.membership(f64::INFINITY), Ok(0.));
    assert_eq!(discrete.membership(f64::NEG_INFINITY), Ok(0.));
    assert!(discrete.membership(f64::NAN).unwrap().is_nan());

    assert_eq!(Discrete::default().membership(0.), Err(Error::EmptyPoints));
    assert_eq!(Discrete::default().membership(f64::NAN), Err(Error::EmptyPoints));
}

#[test]
fn test_membership_with_nan_points() {
    let discrete = Discrete::from_values(&[f64::NAN, 0., 1., 1.]).unwrap();

    assert!(discrete.membership(0.5).unwrap().is_nan());
    assert_eq!(discrete.membership(1.5), Ok(1.));
}
