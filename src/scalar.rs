//! Textual form of scalars shared by term parameters, activation degrees and
//! expression constants.

use crate::error::{Error, Result};

/// Number of decimals printed for every scalar
pub const DECIMALS: usize = 3;

/// Formats `x` with three decimals, or as `nan`, `inf`, `-inf`.
pub fn format(x: f64) -> String {
    if x.is_nan() {
        "nan".to_owned()
    } else if x == f64::INFINITY {
        "inf".to_owned()
    } else if x == f64::NEG_INFINITY {
        "-inf".to_owned()
    } else {
        format!("{:.*}", DECIMALS, x)
    }
}

/// Parses a scalar token, accepting the same `nan`/`inf`/`-inf` literals that
/// [`format`] produces.
pub fn parse(token: &str) -> Result<f64> {
    match token {
        "nan" => Ok(f64::NAN),
        "inf" | "+inf" => Ok(f64::INFINITY),
        "-inf" => Ok(f64::NEG_INFINITY),
        _ => token
            .parse::<f64>()
            .map_err(|_| Error::InvalidNumber(token.to_owned())),
    }
}

/// Parses every whitespace separated token in `text`.
pub fn parse_all(text: &str) -> Result<Vec<f64>> {
    text.split_whitespace().map(parse).collect()
}

pub(crate) fn join(values: impl IntoIterator<Item = f64>) -> String {
    values.into_iter().map(format).collect::<Vec<_>>().join(" ")
}

#[test]
fn test_format() {
    assert_eq!(format(0.5), "0.500");
    assert_eq!(format(-0.4), "-0.400");
    assert_eq!(format(10.), "10.000");
    assert_eq!(format(f64::NAN), "nan");
    assert_eq!(format(f64::INFINITY), "inf");
    assert_eq!(format(f64::NEG_INFINITY), "-inf");
}

#[test]
fn test_parse() {
    assert_eq!(parse("0.25"), Ok(0.25));
    assert_eq!(parse("-.9"), Ok(-0.9));
    assert_eq!(parse("inf"), Ok(f64::INFINITY));
    assert_eq!(parse("-inf"), Ok(f64::NEG_INFINITY));
    assert!(parse("nan").unwrap().is_nan());
    assert_eq!(parse("abc"), Err(Error::InvalidNumber("abc".into())));
    assert_eq!(parse_all(" 1  2\t3 "), Ok(vec![1., 2., 3.]));
}
