//! Property-based tests for term membership.

use proptest::prelude::*;

use crate::{Discrete, Shape, Term};

// Strategy for term heights
fn height() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.5), Just(2.), 0.01f64..10.]
}

// Strategy for three ascending vertices
fn vertices() -> impl Strategy<Value = (f64, f64, f64)> {
    (-10f64..10., 0.01f64..5., 0.01f64..5.).prop_map(|(a, ab, bc)| (a, a + ab, a + ab + bc))
}

// Strategy for points with strictly ascending x
fn points() -> impl Strategy<Value = Vec<(f64, f64)>> {
    (-10f64..10., prop::collection::vec((0.01f64..2., 0f64..=1.), 2..20)).prop_map(|(start, steps)| {
        steps
            .into_iter()
            .scan(start, |x, (step, y)| {
                *x += step;
                Some((*x, y))
            })
            .collect()
    })
}

fn same(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn configured(class_name: &str, parameters: &str) -> Term {
    let mut term = Term::from_class_name("term", class_name).unwrap();

    term.configure(parameters).unwrap();
    term
}

proptest! {
    #[test]
    fn height_scales_membership(
        (a, b, c) in vertices(),
        h in height(),
        x in prop_oneof![Just(f64::NAN), Just(f64::INFINITY), Just(f64::NEG_INFINITY), -20f64..20.],
    ) {
        for (class_name, parameters) in [
            ("Triangle", format!("{a} {b} {c}")),
            ("Bell", format!("{b} {} 2", c - b)),
            ("Gaussian", format!("{b} {}", c - a)),
            ("Sigmoid", format!("{b} {c}")),
            ("Ramp", format!("{a} {c}")),
            ("Cosine", format!("{b} {}", c - a)),
        ] {
            let unit = configured(class_name, &parameters);
            let scaled = configured(class_name, &format!("{parameters} {h}"));

            prop_assert_eq!(scaled.height(), h);
            prop_assert!(
                same(scaled.membership(x).unwrap(), h * unit.membership(x).unwrap()),
                "{} at {}", class_name, x
            );
        }
    }

    #[test]
    fn sorting_restores_shuffled_points(
        (sorted, shuffled) in points().prop_flat_map(|points| (Just(points.clone()), Just(points).prop_shuffle())),
        x in -30f64..30.,
    ) {
        let expected = Discrete::new(sorted.clone());
        let mut discrete = Discrete::new(shuffled);

        discrete.sort();

        prop_assert_eq!(discrete.xy(), &sorted[..]);
        prop_assert_eq!(discrete.membership(x).unwrap(), expected.membership(x).unwrap());
    }

    #[test]
    fn ramp_tsukamoto_inverts_membership(
        (start, end) in (-10f64..10., -10f64..10.).prop_filter("distinct", |(s, e)| (s - e).abs() > 0.1),
        degree in 0f64..=1.,
    ) {
        let ramp = Term::new("ramp", Shape::Ramp { start, end });
        let (minimum, maximum) = (start.min(end), start.max(end));
        let x = ramp.tsukamoto(degree, minimum, maximum).unwrap();

        prop_assert!((ramp.membership(x).unwrap() - degree).abs() < 1e-9);
    }
}

#[cfg(feature = "serde")]
#[test]
fn terms_round_trip_through_json() {
    use crate::{SNorm, TNorm};

    for text in [
        "term: low Triangle -0.400 0.000 0.400 0.500",
        "term: spiky Spike 0.000 1.000",
        "term: steps Discrete 0.000 0.000 0.500 1.000 1.000 0.000",
        "term: weights Linear 1.000 2.000 3.000",
    ] {
        let term: Term = text.parse().unwrap();
        let json = serde_json::to_string(&term).unwrap();
        let parsed: Term = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.to_string(), text);
    }

    let json = serde_json::to_string(&(TNorm::HamacherProduct, SNorm::NormalizedSum)).unwrap();

    assert_eq!(
        serde_json::from_str::<(TNorm, SNorm)>(&json).unwrap(),
        (TNorm::HamacherProduct, SNorm::NormalizedSum)
    );
}
