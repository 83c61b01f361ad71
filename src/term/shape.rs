use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{Discrete, Linear};
use crate::error::{Error, Result};
use crate::math::{bound, scale};

/// Every membership function shape, each with its own parameters.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shape {
    Bell {
        center: f64,
        width: f64,
        slope: f64,
    },
    /// Step to one on the side of `start` that `direction` points to
    Binary {
        start: f64,
        direction: f64,
    },
    Concave {
        inflection: f64,
        end: f64,
    },
    Constant {
        value: f64,
    },
    Cosine {
        center: f64,
        width: f64,
    },
    Discrete(Discrete),
    Gaussian {
        mean: f64,
        standard_deviation: f64,
    },
    GaussianProduct {
        mean_a: f64,
        standard_deviation_a: f64,
        mean_b: f64,
        standard_deviation_b: f64,
    },
    Linear(Linear),
    PiShape {
        bottom_left: f64,
        top_left: f64,
        top_right: f64,
        bottom_right: f64,
    },
    Ramp {
        start: f64,
        end: f64,
    },
    Rectangle {
        start: f64,
        end: f64,
    },
    SShape {
        start: f64,
        end: f64,
    },
    Sigmoid {
        inflection: f64,
        slope: f64,
    },
    SigmoidDifference {
        left: f64,
        rising: f64,
        falling: f64,
        right: f64,
    },
    SigmoidProduct {
        left: f64,
        rising: f64,
        falling: f64,
        right: f64,
    },
    Spike {
        center: f64,
        width: f64,
    },
    Trapezoid {
        vertex_a: f64,
        vertex_b: f64,
        vertex_c: f64,
        vertex_d: f64,
    },
    Triangle {
        vertex_a: f64,
        vertex_b: f64,
        vertex_c: f64,
    },
    ZShape {
        start: f64,
        end: f64,
    },
}

impl Shape {
    pub const CLASS_NAMES: [&'static str; 20] = [
        "Bell",
        "Binary",
        "Concave",
        "Constant",
        "Cosine",
        "Discrete",
        "Gaussian",
        "GaussianProduct",
        "Linear",
        "PiShape",
        "Ramp",
        "Rectangle",
        "SShape",
        "Sigmoid",
        "SigmoidDifference",
        "SigmoidProduct",
        "Spike",
        "Trapezoid",
        "Triangle",
        "ZShape",
    ];

    /// Creates the shape called `class_name` with every parameter unset (NaN).
    pub fn from_class_name(class_name: &str) -> Option<Self> {
        const N: f64 = f64::NAN;

        Some(match class_name {
            "Bell" => Self::Bell {
                center: N,
                width: N,
                slope: N,
            },
            "Binary" => Self::Binary { start: N, direction: N },
            "Concave" => Self::Concave { inflection: N, end: N },
            "Constant" => Self::Constant { value: N },
            "Cosine" => Self::Cosine { center: N, width: N },
            "Discrete" => Self::Discrete(Discrete::default()),
            "Gaussian" => Self::Gaussian {
                mean: N,
                standard_deviation: N,
            },
            "GaussianProduct" => Self::GaussianProduct {
                mean_a: N,
                standard_deviation_a: N,
                mean_b: N,
                standard_deviation_b: N,
            },
            "Linear" => Self::Linear(Linear::default()),
            "PiShape" => Self::PiShape {
                bottom_left: N,
                top_left: N,
                top_right: N,
                bottom_right: N,
            },
            "Ramp" => Self::Ramp { start: N, end: N },
            "Rectangle" => Self::Rectangle { start: N, end: N },
            "SShape" => Self::SShape { start: N, end: N },
            "Sigmoid" => Self::Sigmoid {
                inflection: N,
                slope: N,
            },
            "SigmoidDifference" => Self::SigmoidDifference {
                left: N,
                rising: N,
                falling: N,
                right: N,
            },
            "SigmoidProduct" => Self::SigmoidProduct {
                left: N,
                rising: N,
                falling: N,
                right: N,
            },
            "Spike" => Self::Spike { center: N, width: N },
            "Trapezoid" => Self::Trapezoid {
                vertex_a: N,
                vertex_b: N,
                vertex_c: N,
                vertex_d: N,
            },
            "Triangle" => Self::Triangle {
                vertex_a: N,
                vertex_b: N,
                vertex_c: N,
            },
            "ZShape" => Self::ZShape { start: N, end: N },
            _ => return None,
        })
    }

    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Bell { .. } => "Bell",
            Self::Binary { .. } => "Binary",
            Self::Concave { .. } => "Concave",
            Self::Constant { .. } => "Constant",
            Self::Cosine { .. } => "Cosine",
            Self::Discrete(_) => "Discrete",
            Self::Gaussian { .. } => "Gaussian",
            Self::GaussianProduct { .. } => "GaussianProduct",
            Self::Linear(_) => "Linear",
            Self::PiShape { .. } => "PiShape",
            Self::Ramp { .. } => "Ramp",
            Self::Rectangle { .. } => "Rectangle",
            Self::SShape { .. } => "SShape",
            Self::Sigmoid { .. } => "Sigmoid",
            Self::SigmoidDifference { .. } => "SigmoidDifference",
            Self::SigmoidProduct { .. } => "SigmoidProduct",
            Self::Spike { .. } => "Spike",
            Self::Trapezoid { .. } => "Trapezoid",
            Self::Triangle { .. } => "Triangle",
            Self::ZShape { .. } => "ZShape",
        }
    }

    /// Number of values the shape needs to be configured. Discrete and Linear
    /// take any number of values.
    pub fn arity(&self) -> usize {
        match self {
            Self::Discrete(_) | Self::Linear(_) => 0,
            Self::Constant { .. } => 1,
            Self::Bell { .. } | Self::Triangle { .. } => 3,
            Self::GaussianProduct { .. }
            | Self::PiShape { .. }
            | Self::SigmoidDifference { .. }
            | Self::SigmoidProduct { .. }
            | Self::Trapezoid { .. } => 4,
            _ => 2,
        }
    }

    pub fn is_monotonic(&self) -> bool {
        matches!(
            self,
            Self::Concave { .. } | Self::Ramp { .. } | Self::Sigmoid { .. } | Self::SShape { .. } | Self::ZShape { .. }
        )
    }

    /// The shape's own parameter values, in configuration order.
    pub fn parameters(&self) -> Vec<f64> {
        match self {
            Self::Discrete(discrete) => Discrete::values_from(discrete.xy()),
            Self::Linear(linear) => linear.coefficients().to_vec(),
            Self::Constant { value } => vec![*value],
            Self::Bell { center, width, slope } => vec![*center, *width, *slope],
            Self::Binary { start, direction } => vec![*start, *direction],
            Self::Concave { inflection, end } => vec![*inflection, *end],
            Self::Cosine { center, width } | Self::Spike { center, width } => vec![*center, *width],
            Self::Gaussian {
                mean,
                standard_deviation,
            } => vec![*mean, *standard_deviation],
            Self::GaussianProduct {
                mean_a,
                standard_deviation_a,
                mean_b,
                standard_deviation_b,
            } => vec![*mean_a, *standard_deviation_a, *mean_b, *standard_deviation_b],
            Self::PiShape {
                bottom_left,
                top_left,
                top_right,
                bottom_right,
            } => vec![*bottom_left, *top_left, *top_right, *bottom_right],
            Self::Ramp { start, end }
            | Self::Rectangle { start, end }
            | Self::SShape { start, end }
            | Self::ZShape { start, end } => vec![*start, *end],
            Self::Sigmoid { inflection, slope } => vec![*inflection, *slope],
            Self::SigmoidDifference {
                left,
                rising,
                falling,
                right,
            }
            | Self::SigmoidProduct {
                left,
                rising,
                falling,
                right,
            } => vec![*left, *rising, *falling, *right],
            Self::Trapezoid {
                vertex_a,
                vertex_b,
                vertex_c,
                vertex_d,
            } => vec![*vertex_a, *vertex_b, *vertex_c, *vertex_d],
            Self::Triangle {
                vertex_a,
                vertex_b,
                vertex_c,
            } => vec![*vertex_a, *vertex_b, *vertex_c],
        }
    }

    /// Returns a copy of this shape configured from `values`, together with
    /// the height found after the shape's own parameters (1.0 if absent).
    /// `self` is left untouched so a failed configuration changes nothing.
    pub(crate) fn configured(&self, values: &[f64]) -> Result<(Self, f64)> {
        match self {
            Self::Discrete(_) => {
                let (points, height) = if values.len() % 2 == 0 {
                    (values, 1.)
                } else {
                    (&values[..values.len() - 1], values[values.len() - 1])
                };

                return Ok((Self::Discrete(Discrete::from_values(points)?), height));
            },
            Self::Linear(linear) => {
                let mut linear = linear.clone();

                linear.set_coefficients(values.to_vec());

                return Ok((Self::Linear(linear), 1.));
            },
            _ => (),
        }

        let arity = self.arity();

        if values.len() < arity {
            return Err(Error::NotEnoughValues {
                expected: arity,
                found: values.len(),
            });
        }

        let mut shape = self.clone();
        let p = values;

        match &mut shape {
            Self::Discrete(_) | Self::Linear(_) => (),
            Self::Constant { value } => *value = p[0],
            Self::Bell { center, width, slope } => (*center, *width, *slope) = (p[0], p[1], p[2]),
            Self::Binary { start, direction } => (*start, *direction) = (p[0], p[1]),
            Self::Concave { inflection, end } => (*inflection, *end) = (p[0], p[1]),
            Self::Cosine { center, width } | Self::Spike { center, width } => (*center, *width) = (p[0], p[1]),
            Self::Gaussian {
                mean,
                standard_deviation,
            } => (*mean, *standard_deviation) = (p[0], p[1]),
            Self::GaussianProduct {
                mean_a,
                standard_deviation_a,
                mean_b,
                standard_deviation_b,
            } => (*mean_a, *standard_deviation_a, *mean_b, *standard_deviation_b) = (p[0], p[1], p[2], p[3]),
            Self::PiShape {
                bottom_left,
                top_left,
                top_right,
                bottom_right,
            } => (*bottom_left, *top_left, *top_right, *bottom_right) = (p[0], p[1], p[2], p[3]),
            Self::Ramp { start, end }
            | Self::Rectangle { start, end }
            | Self::SShape { start, end }
            | Self::ZShape { start, end } => (*start, *end) = (p[0], p[1]),
            Self::Sigmoid { inflection, slope } => (*inflection, *slope) = (p[0], p[1]),
            Self::SigmoidDifference {
                left,
                rising,
                falling,
                right,
            }
            | Self::SigmoidProduct {
                left,
                rising,
                falling,
                right,
            } => (*left, *rising, *falling, *right) = (p[0], p[1], p[2], p[3]),
            Self::Trapezoid {
                vertex_a,
                vertex_b,
                vertex_c,
                vertex_d,
            } => (*vertex_a, *vertex_b, *vertex_c, *vertex_d) = (p[0], p[1], p[2], p[3]),
            Self::Triangle {
                vertex_a,
                vertex_b,
                vertex_c,
            } => (*vertex_a, *vertex_b, *vertex_c) = (p[0], p[1], p[2]),
        }

        // Constant has no height slot; anything after its value is ignored
        let height = match shape {
            Self::Constant { .. } => 1.,
            _ => p.get(arity).copied().unwrap_or(1.),
        };

        Ok((shape, height))
    }

    /// Unscaled membership of `x`.
    pub fn membership(&self, x: f64) -> Result<f64> {
        Ok(match *self {
            Self::Constant { value } => value,
            Self::Linear(ref linear) => linear.membership()?,
            Self::Discrete(ref discrete) => discrete.membership(x)?,
            _ if x.is_nan() => f64::NAN,
            Self::Bell { center, width, slope } => 1. / (1. + ((x - center) / width).abs().powf(2. * slope)),
            Self::Binary { start, direction } => {
                if (direction > start && x >= start) || (direction < start && x <= start) {
                    1.
                } else {
                    0.
                }
            },
            Self::Concave { inflection, end } => {
                if inflection <= end {
                    if x < end {
                        (end - inflection) / (2. * end - inflection - x)
                    } else {
                        1.
                    }
                } else if x > end {
                    (inflection - end) / (inflection - 2. * end + x)
                } else {
                    1.
                }
            },
            Self::Cosine { center, width } => {
                if x < center - width / 2. || x > center + width / 2. {
                    0.
                } else {
                    0.5 * (1. + (2. / width * PI * (x - center)).cos())
                }
            },
            Self::Gaussian {
                mean,
                standard_deviation,
            } => gaussian(x, mean, standard_deviation),
            Self::GaussianProduct {
                mean_a,
                standard_deviation_a,
                mean_b,
                standard_deviation_b,
            } => {
                let a = if x < mean_a {
                    gaussian(x, mean_a, standard_deviation_a)
                } else {
                    1.
                };
                let b = if x > mean_b {
                    gaussian(x, mean_b, standard_deviation_b)
                } else {
                    1.
                };

                a * b
            },
            Self::PiShape {
                bottom_left,
                top_left,
                top_right,
                bottom_right,
            } => s_shape(x, bottom_left, top_left) * z_shape(x, top_right, bottom_right),
            Self::Ramp { start, end } => ramp(x, start, end),
            Self::Rectangle { start, end } => {
                if start <= x && x <= end {
                    1.
                } else {
                    0.
                }
            },
            Self::SShape { start, end } => s_shape(x, start, end),
            Self::Sigmoid { inflection, slope } => sigmoid(x, inflection, slope),
            Self::SigmoidDifference {
                left,
                rising,
                falling,
                right,
            } => (sigmoid(x, left, rising) - sigmoid(x, right, falling)).abs(),
            Self::SigmoidProduct {
                left,
                rising,
                falling,
                right,
            } => sigmoid(x, left, rising) * sigmoid(x, right, falling),
            Self::Spike { center, width } => (-(10. / width * (x - center)).abs()).exp(),
            Self::Trapezoid {
                vertex_a,
                vertex_b,
                vertex_c,
                vertex_d,
            } => trapezoid(x, vertex_a, vertex_b, vertex_c, vertex_d),
            Self::Triangle {
                vertex_a,
                vertex_b,
                vertex_c,
            } => triangle(x, vertex_a, vertex_b, vertex_c),
            Self::ZShape { start, end } => z_shape(x, start, end),
        })
    }

    /// Domain value whose membership (scaled by `height`) is `degree`.
    ///
    /// Finite degrees give a value clamped to `[minimum, maximum]`; infinite
    /// degrees give the shape's unclamped limit.
    pub fn tsukamoto(&self, degree: f64, height: f64, minimum: f64, maximum: f64) -> Result<f64> {
        if !self.is_monotonic() {
            return Err(Error::NotMonotonic(self.class_name()));
        }
        if degree.is_nan() {
            return Ok(f64::NAN);
        }

        let y = bound(degree, 0., height);
        let x = match *self {
            // Extrapolates past the height instead of saturating
            Self::Ramp { start, end } => scale(degree, 0., height, start, end),
            Self::Concave { inflection, end } => height * (inflection - end) / y + 2. * end - inflection,
            Self::Sigmoid { inflection, slope } => inflection - (height / y - 1.).ln() / slope,
            Self::SShape { start, end } => {
                let difference = end - start;

                if y <= height / 2. {
                    start + difference * (y / (2. * height)).sqrt()
                } else {
                    end - difference * ((1. - y / height) / 2.).sqrt()
                }
            },
            Self::ZShape { start, end } => {
                let difference = end - start;

                if y >= height / 2. {
                    start + difference * ((1. - y / height) / 2.).sqrt()
                } else {
                    end - difference * (y / (2. * height)).sqrt()
                }
            },
            _ => return Err(Error::NotMonotonic(self.class_name())),
        };

        if degree.is_finite() && minimum <= maximum {
            Ok(bound(x, minimum, maximum))
        } else {
            Ok(x)
        }
    }
}

fn gaussian(x: f64, mean: f64, standard_deviation: f64) -> f64 {
    (-(x - mean) * (x - mean) / (2. * standard_deviation * standard_deviation)).exp()
}

fn sigmoid(x: f64, inflection: f64, slope: f64) -> f64 {
    1. / (1. + (-slope * (x - inflection)).exp())
}

fn ramp(x: f64, start: f64, end: f64) -> f64 {
    if start == end {
        0.
    } else if start < end {
        if x <= start {
            0.
        } else if x >= end {
            1.
        } else {
            (x - start) / (end - start)
        }
    } else if x >= start {
        0.
    } else if x <= end {
        1.
    } else {
        (start - x) / (start - end)
    }
}

fn s_shape(x: f64, start: f64, end: f64) -> f64 {
    let difference = end - start;
    let average = (start + end) / 2.;

    if x <= start {
        0.
    } else if x <= average {
        2. * ((x - start) / difference).powi(2)
    } else if x < end {
        1. - 2. * ((x - end) / difference).powi(2)
    } else {
        1.
    }
}

fn z_shape(x: f64, start: f64, end: f64) -> f64 {
    let difference = end - start;
    let average = (start + end) / 2.;

    if x <= start {
        1.
    } else if x <= average {
        1. - 2. * ((x - start) / difference).powi(2)
    } else if x < end {
        2. * ((x - end) / difference).powi(2)
    } else {
        0.
    }
}

fn trapezoid(x: f64, a: f64, b: f64, c: f64, d: f64) -> f64 {
    if x < a || x > d {
        0.
    } else if x < b {
        if a == f64::NEG_INFINITY {
            1.
        } else {
            (x - a) / (b - a)
        }
    } else if x <= c {
        1.
    } else if x < d {
        if d == f64::INFINITY {
            1.
        } else {
            (d - x) / (d - c)
        }
    } else if d == f64::INFINITY {
        1.
    } else {
        0.
    }
}

fn triangle(x: f64, a: f64, b: f64, c: f64) -> f64 {
    if x < a || x > c {
        0.
    } else if x == b {
        1.
    } else if x < b {
        if a == f64::NEG_INFINITY {
            1.
        } else {
            (x - a) / (b - a)
        }
    } else if c == f64::INFINITY {
        1.
    } else {
        (c - x) / (c - b)
    }
}

#[test]
fn test_class_names_round_trip() {
    for class_name in Shape::CLASS_NAMES {
        let shape = Shape::from_class_name(class_name).unwrap();

        assert_eq!(shape.class_name(), class_name);
        assert!(shape.parameters().iter().all(|p| p.is_nan()));
    }
    assert!(Shape::from_class_name("Unknown").is_none());
}

#[test]
fn test_configured_is_atomic() {
    let shape = Shape::Triangle {
        vertex_a: 0.,
        vertex_b: 1.,
        vertex_c: 2.,
    };

    assert_eq!(
        shape.configured(&[1., 2.]).unwrap_err(),
        Error::NotEnoughValues { expected: 3, found: 2 }
    );
    assert_eq!(shape.parameters(), vec![0., 1., 2.]);

    let (configured, height) = shape.configured(&[1., 2., 3., 0.5]).unwrap();

    assert_eq!(configured.parameters(), vec![1., 2., 3.]);
    assert_eq!(height, 0.5);
}

#[test]
fn test_monotonic_shapes() {
    let monotonic: Vec<_> = Shape::CLASS_NAMES
        .into_iter()
        .filter(|name| Shape::from_class_name(name).unwrap().is_monotonic())
        .collect();

    assert_eq!(monotonic, vec!["Concave", "Ramp", "SShape", "Sigmoid", "ZShape"]);
}
