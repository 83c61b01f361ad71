use std::sync::Arc;

use super::*;
use crate::inputs::Inputs;

const X: [f64; 9] = [-0.5, -0.4, -0.25, -0.1, 0.0, 0.1, 0.25, 0.4, 0.5];

fn term(class_name: &str, parameters: &str) -> Term {
    let mut term = Term::from_class_name(class_name.to_lowercase(), class_name).unwrap();

    term.configure(parameters).unwrap();
    term
}

#[track_caller]
fn assert_close(actual: f64, expected: f64, x: f64) {
    if expected.is_nan() {
        assert!(actual.is_nan(), "when x={x:.3}: expected nan, got {actual}");
    } else {
        assert!(
            actual == expected || (actual - expected).abs() <= 1e-15,
            "when x={x:.3}: expected {expected}, got {actual}"
        );
    }
}

/// Checks the membership at every `X`, at NaN and at both infinities, all
/// scaled by the term's height.
#[track_caller]
fn assert_memberships(term: &Term, expected: [f64; 9], at_neg_inf: f64, at_inf: f64) {
    let h = term.height();

    for (x, mf) in X.into_iter().zip(expected) {
        assert_close(term.membership(x).unwrap(), h * mf, x);
    }
    assert_close(term.membership(f64::NEG_INFINITY).unwrap(), h * at_neg_inf, f64::NEG_INFINITY);
    assert_close(term.membership(f64::INFINITY).unwrap(), h * at_inf, f64::INFINITY);
    assert!(term.membership(f64::NAN).unwrap().is_nan());
}

#[track_caller]
fn assert_takes_parameters(class_name: &str, expected: usize) {
    let mut term = Term::from_class_name("", class_name).unwrap();

    assert_eq!(
        term.configure(""),
        Err(Error::NotEnoughValues { expected, found: 0 })
    );
}

#[test]
fn test_term() {
    let term = Term::new("X", Shape::Constant { value: 0.5 });

    assert_eq!(term.name(), "X");
    assert_eq!(term.height(), 1.);
    assert_eq!(term.clone().with_height(0.5).height(), 0.5);
    assert!(!term.is_monotonic());

    let discrete = Term::new(
        "triangle",
        Shape::Triangle {
            vertex_a: -1.,
            vertex_b: 0.,
            vertex_c: 1.,
        },
    )
    .discretize(-1., 1., 10, true)
    .unwrap();

    let Shape::Discrete(points) = discrete.shape() else {
        panic!("expected a discrete shape");
    };

    assert_eq!(discrete.name(), "triangle");
    assert_eq!(points.len(), 11);

    let expected = [
        (-1.0, 0.0),
        (-0.8, 0.19999999999999996),
        (-0.6, 0.4),
        (-0.3999999999999999, 0.6000000000000001),
        (-0.19999999999999996, 0.8),
        (0.0, 1.0),
        (0.20000000000000018, 0.7999999999999998),
        (0.40000000000000013, 0.5999999999999999),
        (0.6000000000000001, 0.3999999999999999),
        (0.8, 0.19999999999999996),
        (1.0, 0.0),
    ];

    for (&(x, y), (expected_x, expected_y)) in points.xy().iter().zip(expected) {
        assert_close(x, expected_x, x);
        assert_close(y, expected_y, x);
    }
}

#[test]
fn test_display_and_parse() {
    assert_eq!(
        Term::from_class_name("bell", "Bell").unwrap().to_string(),
        "term: bell Bell nan nan nan"
    );
    assert_eq!(term("Bell", "0 0.25 3.0").to_string(), "term: bell Bell 0.000 0.250 3.000");
    assert_eq!(
        term("Bell", "0 0.25 3.0 0.5").to_string(),
        "term: bell Bell 0.000 0.250 3.000 0.500"
    );
    assert_eq!(term("Binary", "0 -inf 0.5").to_string(), "term: binary Binary 0.000 -inf 0.500");
    assert_eq!(Term::from_class_name("", "Discrete").unwrap().to_string(), "term: _ Discrete");

    let parsed: Term = "term: low Triangle -0.400 0.000 0.400 0.500".parse().unwrap();

    assert_eq!(parsed.name(), "low");
    assert_eq!(parsed.height(), 0.5);
    assert_eq!(parsed.to_string(), "term: low Triangle -0.400 0.000 0.400 0.500");

    assert!("low Triangle 1 2 3".parse::<Term>().is_err());
    assert!("term: low Hexagon 1 2 3".parse::<Term>().is_err());
    assert_eq!(
        "term: low Triangle 1 2".parse::<Term>().unwrap_err(),
        Error::NotEnoughValues { expected: 3, found: 2 }
    );
}

#[test]
fn test_configure_failure_keeps_term() {
    let mut triangle = term("Triangle", "-0.4 0 0.4 0.5");

    assert_eq!(
        triangle.configure("1 x 3"),
        Err(Error::InvalidNumber("x".into()))
    );
    assert_eq!(triangle.configure("1"), Err(Error::NotEnoughValues { expected: 3, found: 1 }));
    assert_eq!(triangle.parameters(), "-0.400 0.000 0.400 0.500");

    // A later configuration without height resets it
    triangle.configure("-0.4 0 0.4").unwrap();
    assert_eq!(triangle.height(), 1.);
}

#[test]
fn test_bell() {
    assert_takes_parameters("Bell", 3);

    let expected = [
        0.015384615384615385,
        0.05625177755617076,
        0.5,
        0.9959207087768499,
        1.0,
        0.9959207087768499,
        0.5,
        0.05625177755617076,
        0.015384615384615385,
    ];

    assert_memberships(&term("Bell", "0 0.25 3.0"), expected, 0., 0.);
    assert_memberships(&term("Bell", "0 0.25 3.0 0.5"), expected, 0., 0.);
    assert!(!term("Bell", "0 0.25 3.0").is_monotonic());
}

#[test]
fn test_binary() {
    assert_takes_parameters("Binary", 2);
    assert_memberships(
        &term("Binary", "0 inf"),
        [0., 0., 0., 0., 1., 1., 1., 1., 1.],
        0.,
        1.,
    );
    assert_memberships(
        &term("Binary", "0 -inf 0.5"),
        [1., 1., 1., 1., 1., 0., 0., 0., 0.],
        1.,
        0.,
    );
}

#[test]
fn test_concave() {
    assert_takes_parameters("Concave", 2);
    assert_memberships(
        &term("Concave", "0.00 0.50"),
        [
            0.3333333333333333,
            0.35714285714285715,
            0.4,
            0.45454545454545453,
            0.5,
            0.5555555555555556,
            0.6666666666666666,
            0.8333333333333334,
            1.0,
        ],
        0.,
        1.,
    );
    assert_memberships(
        &term("Concave", "0.00 -0.500 0.5"),
        [
            1.0,
            0.8333333333333334,
            0.6666666666666666,
            0.5555555555555556,
            0.5,
            0.45454545454545453,
            0.4,
            0.35714285714285715,
            0.3333333333333333,
        ],
        1.,
        0.,
    );
}

#[test]
fn test_constant() {
    assert_takes_parameters("Constant", 1);

    let constant = term("Constant", "0.5");

    assert_eq!(constant.to_string(), "term: constant Constant 0.500");
    for x in X.into_iter().chain([f64::NAN, f64::INFINITY, f64::NEG_INFINITY]) {
        assert_eq!(constant.membership(x), Ok(0.5));
    }

    // The trailing value is not a height for constants
    let constant = term("Constant", "-0.500 0.5");

    assert_eq!(constant.to_string(), "term: constant Constant -0.500");
    assert_eq!(constant.membership(f64::NAN), Ok(-0.5));

    // Height does not apply to constants
    let constant = constant.with_height(0.5);

    assert_eq!(constant.to_string(), "term: constant Constant -0.500");
    assert_eq!(constant.membership(0.), Ok(-0.5));
}

#[test]
fn test_cosine() {
    assert_takes_parameters("Cosine", 2);

    let expected = [
        0.0,
        0.09549150281252633,
        0.5,
        0.9045084971874737,
        1.0,
        0.9045084971874737,
        0.5,
        0.09549150281252633,
        0.0,
    ];

    assert_memberships(&term("Cosine", "0.0 1"), expected, 0., 0.);
    assert_memberships(&term("Cosine", "0.0 1.0 0.5"), expected, 0., 0.);
}

#[test]
fn test_discrete() {
    let mut discrete = Term::from_class_name("discrete", "Discrete").unwrap();

    assert_eq!(discrete.to_string(), "term: discrete Discrete");
    assert_eq!(discrete.membership(0.), Err(Error::EmptyPoints));
    assert_eq!(discrete.membership(f64::NAN), Err(Error::EmptyPoints));

    discrete.configure("0 1 8 9 4 5 2 3 6 7").unwrap();
    assert_eq!(
        discrete.parameters(),
        "0.000 1.000 8.000 9.000 4.000 5.000 2.000 3.000 6.000 7.000"
    );

    discrete.configure("0 1 8 9 4 5 2 3 6 7 0.5").unwrap();
    if let Shape::Discrete(points) = discrete.shape_mut() {
        points.sort();
    }
    assert_eq!(
        discrete.parameters(),
        "0.000 1.000 2.000 3.000 4.000 5.000 6.000 7.000 8.000 9.000 0.500"
    );

    let expected = [0.0, 0.3999999999999999, 1.0, 0.7, 0.5, 0.7, 1.0, 0.3999999999999999, 0.0];

    assert_memberships(
        &term("Discrete", "-0.500 0.000 -0.250 1.000 0.000 0.500 0.250 1.000 0.500 0.000"),
        expected,
        0.,
        0.,
    );
    assert_memberships(
        &term("Discrete", "-0.500 0.000 -0.250 1.000 0.000 0.500 0.250 1.000 0.500 0.000 0.5"),
        expected,
        0.,
        0.,
    );
}

#[test]
fn test_gaussian() {
    assert_takes_parameters("Gaussian", 2);

    let expected = [
        0.1353352832366127,
        0.2780373004531941,
        0.6065306597126334,
        0.9231163463866358,
        1.0,
        0.9231163463866358,
        0.6065306597126334,
        0.2780373004531941,
        0.1353352832366127,
    ];

    assert_memberships(&term("Gaussian", "0.0 0.25"), expected, 0., 0.);
    assert_memberships(&term("Gaussian", "0.0 0.25 0.5"), expected, 0., 0.);
}

#[test]
fn test_gaussian_product() {
    assert_takes_parameters("GaussianProduct", 4);

    let expected = [
        0.1353352832366127,
        0.2780373004531941,
        0.6065306597126334,
        0.9231163463866358,
        1.0,
        1.0,
        0.9559974818331,
        0.835270211411272,
        0.7261490370736908,
    ];

    assert_memberships(&term("GaussianProduct", "0.0 0.25 0.1 0.5"), expected, 0., 0.);
    assert_memberships(&term("GaussianProduct", "0.0 0.25 0.1 0.5 0.5"), expected, 0., 0.);
}

#[test]
fn test_linear() {
    let inputs = Arc::new([("A", 0.), ("B", 1.), ("C", 2.)].into_iter().collect::<Inputs>());
    let mut linear = Term::new("linear", Shape::Linear(Linear::new(vec![1., 2.])));

    assert_eq!(linear.membership(f64::NAN), Err(Error::Unbound("a bound input provider")));
    assert_eq!(linear.to_string(), "term: linear Linear 1.000 2.000");

    linear.bind_inputs(&inputs);
    linear.configure("1.0 2.0 3").unwrap();
    assert_eq!(linear.to_string(), "term: linear Linear 1.000 2.000 3.000");
    for x in X.into_iter().chain([f64::NAN, f64::INFINITY, f64::NEG_INFINITY]) {
        assert_eq!(linear.membership(x), Ok(8.));
    }

    // Reconfiguring keeps the provider
    linear.configure("1 2 3 5 8").unwrap();
    assert_eq!(linear.to_string(), "term: linear Linear 1.000 2.000 3.000 5.000 8.000");
    assert_eq!(linear.membership(f64::NAN), Ok(13.));

    linear.set_height(0.5);
    assert_eq!(linear.to_string(), "term: linear Linear 1.000 2.000 3.000 5.000 8.000");
    assert_eq!(linear.membership(0.), Ok(13.));
}

#[test]
fn test_pi_shape() {
    assert_takes_parameters("PiShape", 4);

    let expected = [
        0.5,
        0.71875,
        0.9296875,
        1.0,
        1.0,
        1.0,
        0.9444444444444444,
        0.7777777777777777,
        0.6049382716049383,
    ];

    let pi_shape = term("PiShape", "-.9 -.1 .1 1");

    assert_eq!(pi_shape.to_string(), "term: pishape PiShape -0.900 -0.100 0.100 1.000");
    assert_memberships(&pi_shape, expected, 0., 0.);
    assert_close(pi_shape.membership(0.95).unwrap(), 0.00617283950617285, 0.95);
    assert_memberships(&term("PiShape", "-.9 -.1 .1 1 .5"), expected, 0., 0.);
}

#[test]
fn test_ramp() {
    assert_takes_parameters("Ramp", 2);
    assert_memberships(&term("Ramp", "1 1"), [0.; 9], 0., 0.);

    let rising = term("Ramp", "-0.250 0.750");

    assert!(rising.is_monotonic());
    assert_memberships(
        &rising,
        [0.0, 0.0, 0.0, 0.150, 0.250, 0.350, 0.500, 0.650, 0.750],
        0.,
        1.,
    );
    for (degree, x) in [
        (0.0, -0.250),
        (0.1, -0.150),
        (0.25, 0.0),
        (0.4, 0.15000000000000002),
        (0.5, 0.25),
        (0.6, 0.35),
        (0.75, 0.5),
        (0.9, 0.65),
        (1.0, 0.75),
        (f64::INFINITY, f64::INFINITY),
        (f64::NEG_INFINITY, f64::NEG_INFINITY),
    ] {
        assert_close(rising.tsukamoto(degree, -1., 1.).unwrap(), x, degree);
    }
    assert!(rising.tsukamoto(f64::NAN, -1., 1.).unwrap().is_nan());

    let falling = term("Ramp", "0.250 -0.750 0.5");

    assert_memberships(
        &falling,
        [0.750, 0.650, 0.500, 0.350, 0.250, 0.150, 0.0, 0.0, 0.0],
        1.,
        0.,
    );
    for (degree, x) in [
        (0.0, 0.250),
        (0.1, 0.04999999999999999),
        (0.25, -0.25),
        (0.4, -0.550),
        (0.5, -0.75),
        (f64::INFINITY, f64::NEG_INFINITY),
        (f64::NEG_INFINITY, f64::INFINITY),
    ] {
        assert_close(falling.tsukamoto(degree, -1., 1.).unwrap(), x, degree);
    }
}

#[test]
fn test_tsukamoto_clamps_to_range() {
    let rising = term("Ramp", "-0.250 0.750");

    assert_eq!(rising.tsukamoto(0.25, -1., 1.), Ok(0.));
    assert_eq!(rising.tsukamoto(0.9, -1., 0.5), Ok(0.5));
    assert_eq!(rising.tsukamoto(0., 0., 1.), Ok(0.));

    let sigmoid = term("Sigmoid", "0 10");

    assert_eq!(sigmoid.tsukamoto(0.5, -1., 1.), Ok(0.));
    assert_eq!(sigmoid.tsukamoto(0., -1., 1.), Ok(-1.));
    assert_eq!(sigmoid.tsukamoto(1., -1., 1.), Ok(1.));
    assert_eq!(sigmoid.tsukamoto(f64::INFINITY, -1., 1.), Ok(f64::INFINITY));
}

#[test]
fn test_tsukamoto_inverts_monotonic_shapes() {
    for (class_name, parameters) in [
        ("SShape", "-0.4 0.4"),
        ("ZShape", "-0.4 0.4 0.5"),
        ("Concave", "0.00 0.50"),
        ("Concave", "0.00 -0.50"),
        ("Sigmoid", "0 10 0.5"),
    ] {
        let term = term(class_name, parameters);

        for x in [-0.3, -0.1, 0.1, 0.3] {
            let degree = term.membership(x).unwrap();
            let inverse = term.tsukamoto(degree, -1., 1.).unwrap();

            assert!(
                (inverse - x).abs() < 1e-9,
                "{class_name}({parameters}) at {x}: got {inverse}"
            );
        }
    }
}

#[test]
fn test_tsukamoto_requires_monotonic_shape() {
    assert_eq!(
        term("Rectangle", "-0.4 0.4").tsukamoto(0.5, -1., 1.),
        Err(Error::NotMonotonic("Rectangle"))
    );
    assert_eq!(
        term("Triangle", "-0.4 0 0.4").tsukamoto(f64::NAN, -1., 1.),
        Err(Error::NotMonotonic("Triangle"))
    );
}

#[test]
fn test_rectangle() {
    assert_takes_parameters("Rectangle", 2);

    let expected = [0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0];

    assert_memberships(&term("Rectangle", "-0.4 0.4"), expected, 0., 0.);
    assert_memberships(&term("Rectangle", "-0.4 0.4 0.5"), expected, 0., 0.);
}

#[test]
fn test_s_shape() {
    assert_takes_parameters("SShape", 2);

    let expected = [
        0.0,
        0.0,
        0.07031250000000001,
        0.28125000000000006,
        0.5,
        0.71875,
        0.9296875,
        1.0,
        1.0,
    ];

    assert_memberships(&term("SShape", "-0.4 0.4"), expected, 0., 1.);
    assert_memberships(&term("SShape", "-0.4 0.4 0.5"), expected, 0., 1.);
}

#[test]
fn test_sigmoid() {
    assert_takes_parameters("Sigmoid", 2);

    let expected = [
        0.0066928509242848554,
        0.01798620996209156,
        0.07585818002124355,
        0.2689414213699951,
        0.5,
        0.7310585786300049,
        0.9241418199787566,
        0.9820137900379085,
        0.9933071490757153,
    ];

    assert_memberships(&term("Sigmoid", "0 10"), expected, 0., 1.);
    assert_memberships(&term("Sigmoid", "0 10 .5"), expected, 0., 1.);
}

#[test]
fn test_sigmoid_difference() {
    assert_takes_parameters("SigmoidDifference", 4);

    let expected = [
        0.0019267346633274238,
        0.022977369910017923,
        0.49999999998611205,
        0.9770226049799834,
        0.9980695386973883,
        0.9992887851439739,
        0.49999627336071584,
        0.000552690994449101,
        3.7194451510957904e-06,
    ];

    assert_memberships(&term("SigmoidDifference", "-0.25 25.00 50.00 0.25"), expected, 0., 0.);
    assert_memberships(&term("SigmoidDifference", "-0.25 25.00 50.00 0.25 0.5"), expected, 0., 0.);
}

#[test]
fn test_sigmoid_product() {
    assert_takes_parameters("SigmoidProduct", 4);

    let expected = [
        0.006692848876926853,
        0.04742576597971327,
        0.4999773010656488,
        0.9517062830264366,
        0.9866590924049252,
        0.9517062830264366,
        0.4999773010656488,
        0.04742576597971327,
        0.006692848876926853,
    ];

    assert_memberships(&term("SigmoidProduct", "-0.250 20.000 -20.000 0.250"), expected, 0., 0.);
    assert_memberships(&term("SigmoidProduct", "-0.250 20.000 -20.000 0.250 0.5"), expected, 0., 0.);
}

#[test]
fn test_spike() {
    assert_takes_parameters("Spike", 2);

    let expected = [
        0.006737946999085467,
        0.01831563888873418,
        0.0820849986238988,
        0.36787944117144233,
        1.0,
        0.36787944117144233,
        0.0820849986238988,
        0.01831563888873418,
        0.006737946999085467,
    ];

    assert_memberships(&term("Spike", "0 1.0"), expected, 0., 0.);
    assert_memberships(&term("Spike", "0 1.0 .5"), expected, 0., 0.);
}

#[test]
fn test_trapezoid() {
    assert_takes_parameters("Trapezoid", 4);

    let expected = [0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 0.5, 0.0, 0.0];

    assert_memberships(&term("Trapezoid", "-0.400 -0.100 0.100 0.400"), expected, 0., 0.);
    assert_memberships(&term("Trapezoid", "-0.400 -0.100 0.100 0.400 .5"), expected, 0., 0.);
    assert_memberships(
        &term("Trapezoid", "-0.400 -0.400 0.100 0.400"),
        [0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 0.0, 0.0],
        0.,
        0.,
    );
    assert_memberships(
        &term("Trapezoid", "-0.400 -0.100 0.400 0.400"),
        [0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0],
        0.,
        0.,
    );

    let left_shoulder = term("Trapezoid", "-inf -0.100 0.100 .4");

    assert_eq!(left_shoulder.parameters(), "-inf -0.100 0.100 0.400");
    assert_memberships(
        &left_shoulder,
        [1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.5, 0.0, 0.0],
        1.,
        0.,
    );
    assert_memberships(
        &term("Trapezoid", "-.4 -0.100 0.100 inf .5"),
        [0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0],
        0.,
        1.,
    );
}

#[test]
fn test_triangle() {
    assert_takes_parameters("Triangle", 3);

    let expected = [
        0.0,
        0.0,
        0.37500000000000006,
        0.7500000000000001,
        1.0,
        0.7500000000000001,
        0.37500000000000006,
        0.0,
        0.0,
    ];
    let triangle = term("Triangle", "-0.400 0.000 0.400");

    assert_eq!(triangle.membership(-0.1), Ok(0.7500000000000001));
    assert_eq!(triangle.membership(0.), Ok(1.));
    assert_memberships(&triangle, expected, 0., 0.);
    assert_memberships(&term("Triangle", "-0.400 0.000 0.400 .5"), expected, 0., 0.);
    assert_memberships(
        &term("Triangle", "-0.500 0.000 0.500"),
        [0.0, 0.19999999999999996, 0.5, 0.8, 1.0, 0.8, 0.5, 0.19999999999999996, 0.0],
        0.,
        0.,
    );
    assert_memberships(
        &term("Triangle", "-0.500 -0.500 0.500"),
        [1.0, 0.9, 0.75, 0.6, 0.5, 0.4, 0.25, 0.09999999999999998, 0.0],
        0.,
        0.,
    );
    assert_memberships(
        &term("Triangle", "-0.500 0.500 0.500"),
        [0.0, 0.09999999999999998, 0.25, 0.4, 0.5, 0.6, 0.75, 0.9, 1.0],
        0.,
        0.,
    );
    assert_memberships(
        &term("Triangle", "-inf 0.000 0.400"),
        [1.0, 1.0, 1.0, 1.0, 1.0, 0.7500000000000001, 0.37500000000000006, 0.0, 0.0],
        1.,
        0.,
    );
    assert_memberships(
        &term("Triangle", "-0.400 0.000 inf .5"),
        [0.0, 0.0, 0.37500000000000006, 0.7500000000000001, 1.0, 1.0, 1.0, 1.0, 1.0],
        0.,
        1.,
    );
}

#[test]
fn test_z_shape() {
    assert_takes_parameters("ZShape", 2);

    let expected = [
        1.0,
        1.0,
        0.9296875,
        0.71875,
        0.5,
        0.28125000000000006,
        0.07031250000000001,
        0.0,
        0.0,
    ];

    assert_memberships(&term("ZShape", "-0.4 0.4"), expected, 1., 0.);
    assert_memberships(&term("ZShape", "-0.4 0.4 0.5"), expected, 1., 0.);
}
