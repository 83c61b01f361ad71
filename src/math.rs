use num::Float;

/// Similar to numpy.interp for a single `x`: linear interpolation over `coords`
/// sorted by ascending x, holding the boundary y outside of their range.
pub(crate) fn interp<F: Float>(x: F, coords: &[(F, F)]) -> Option<F> {
    let (&(first_x, first_y), &(last_x, last_y)) = (coords.first()?, coords.last()?);

    // Base cases
    if x <= first_x {
        return Some(first_y);
    }
    if x >= last_x {
        return Some(last_y);
    }

    // First point strictly to the right of x
    let upper = coords.partition_point(|&(xi, _)| xi <= x);

    // Neighbours are missing only when coordinates hold NaN
    let lower = upper.checked_sub(1).and_then(|i| coords.get(i));
    let (Some(&(x1, y1)), Some(&(x2, y2))) = (lower, coords.get(upper)) else {
        return Some(F::nan());
    };

    if x == x1 {
        return Some(y1);
    }

    Some(scale(x, x1, x2, y1, y2))
}

/// Linearly maps `x` from `[from_min, from_max]` onto `[to_min, to_max]`.
pub(crate) fn scale<F: Float>(x: F, from_min: F, from_max: F, to_min: F, to_max: F) -> F {
    (to_max - to_min) / (from_max - from_min) * (x - from_min) + to_min
}

/// Clamps `x` into `[min, max]`, leaving NaN untouched.
pub(crate) fn bound<F: Float>(x: F, min: F, max: F) -> F {
    if x < min {
        min
    } else if x > max {
        max
    } else {
        x
    }
}

#[test]
fn test_interp() {
    let coords = [(1., 3.), (2., 2.), (3., 0.)];
    let x = [0., 1., 1.5, 2.72, 3.24];
    let y: Vec<f64> = x.iter().map(|x| interp(*x, &coords).unwrap()).collect();

    assert_eq!(y, vec![3., 3., 2.5, 0.5599999999999996, 0.]);

    let coords = [(0., 0.), (1., 2.), (2., 5.), (3., 3.), (4.5, 2.)];

    assert_eq!(interp(2.5, &coords), Some(4.));
    assert_eq!(interp(-1., &coords), Some(0.));
    assert_eq!(interp(7.5, &coords), Some(2.));
    assert_eq!(interp(2., &coords), Some(5.));
    assert_eq!(interp(0.5, &[] as &[(f64, f64)]), None);

    // NaN x-coordinates defeat the boundary checks
    assert!(interp(0.5, &[(f64::NAN, 0.), (1., 1.)]).unwrap().is_nan());
    assert!(interp(0.5, &[(0., 0.), (f64::NAN, 1.)]).unwrap().is_nan());
}

#[test]
fn test_scale_and_bound() {
    assert_eq!(scale(0.25, 0., 1., -0.25, 0.75), 0.0);
    assert_eq!(bound(1.5, 0., 1.), 1.);
    assert_eq!(bound(-1.5, 0., 1.), 0.);
    assert!(bound(f64::NAN, 0., 1.).is_nan());
}
