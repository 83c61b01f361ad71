use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Broad category of an [`Error`], used by callers that only care about
/// which class of mistake happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Wrong parameter count or unparsable text handed to a term or formula
    Configuration,
    /// Something that must be bound before evaluation was not
    UnboundReference,
    /// A variable referenced by an expression has no value
    MissingBinding,
    /// A point set or expression tree that cannot be evaluated as-is
    MalformedData,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("not enough values to unpack (expected {expected}, got {found})")]
    NotEnoughValues { expected: usize, found: usize },

    #[error("expected a numeric value, but found '{0}'")]
    InvalidNumber(String),

    #[error("failed to parse '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("expected {0}, but found none")]
    Unbound(&'static str),

    #[error("expected a monotonic term, but '{0}' is not monotonic")]
    NotMonotonic(&'static str),

    #[error("expected a map of variables containing the value for '{variable}', but the map contains: {available}")]
    MissingBinding { variable: String, available: String },

    #[error("expected a list of (x,y)-pairs, but found none")]
    EmptyPoints,

    #[error("not enough values to unpack (expected an even number, but got {0})")]
    OddNumberOfValues(usize),

    #[error("expected {expected} operand(s) for '{element}', but found {found}")]
    MissingOperand {
        element: String,
        expected: usize,
        found: usize,
    },

    #[error("'{element}' takes {expected} argument(s), but {found} were given")]
    ArityMismatch {
        element: String,
        expected: usize,
        found: usize,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotEnoughValues { .. } | Self::InvalidNumber(_) | Self::Parse { .. } => ErrorKind::Configuration,
            Self::Unbound(_) | Self::NotMonotonic(_) => ErrorKind::UnboundReference,
            Self::MissingBinding { .. } => ErrorKind::MissingBinding,
            Self::EmptyPoints | Self::OddNumberOfValues(_) | Self::MissingOperand { .. } | Self::ArityMismatch { .. } => {
                ErrorKind::MalformedData
            },
        }
    }

    pub(crate) fn parse(input: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.to_owned(),
            reason: reason.into(),
        }
    }
}

#[test]
fn test_error_messages() {
    assert_eq!(
        Error::NotEnoughValues { expected: 3, found: 0 }.to_string(),
        "not enough values to unpack (expected 3, got 0)"
    );
    assert_eq!(
        Error::Unbound("a method reference").to_string(),
        "expected a method reference, but found none"
    );
    assert_eq!(
        Error::OddNumberOfValues(3).to_string(),
        "not enough values to unpack (expected an even number, but got 3)"
    );
}

#[test]
fn test_error_kinds() {
    assert_eq!(Error::InvalidNumber("x".into()).kind(), ErrorKind::Configuration);
    assert_eq!(Error::NotMonotonic("Triangle").kind(), ErrorKind::UnboundReference);
    assert_eq!(Error::EmptyPoints.kind(), ErrorKind::MalformedData);
    assert_eq!(
        Error::MissingBinding {
            variable: "x".into(),
            available: "None".into()
        }
        .kind(),
        ErrorKind::MissingBinding
    );
}
