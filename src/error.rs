use std::fmt;

/// Why a numeral was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Nothing but whitespace or a bare sign.
    Empty,
    /// Radix outside of `[2, 36]`.
    InvalidRadix(u32),
    /// Character that is not a digit in the requested radix.
    InvalidDigit(char, u32),
    /// A `0x`/`0b` prefix that is not followed by any digit.
    MissingDigits,
    /// Exponent marker without digits, or a second exponent.
    InvalidExponent,
    /// More than one `.` or `/`, or a fraction with an empty side.
    InvalidFormat,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Empty => write!(f, "empty number"),
            ParseErrorKind::InvalidRadix(radix) => write!(f, "invalid radix: {}", radix),
            ParseErrorKind::InvalidDigit(c, radix) => {
                write!(f, "invalid digit '{}' for radix {}", c, radix)
            }
            ParseErrorKind::MissingDigits => write!(f, "prefix without digits"),
            ParseErrorKind::InvalidExponent => write!(f, "invalid exponent"),
            ParseErrorKind::InvalidFormat => write!(f, "invalid number format"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum NumError {
    #[error("cannot parse {input:?}: {kind}")]
    ParseError { input: String, kind: ParseErrorKind },
    #[error("division by zero")]
    DivisionByZero,
    #[error("no modular inverse exists")]
    NoInverse,
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl NumError {
    pub(crate) fn parse(input: &str, kind: ParseErrorKind) -> Self {
        NumError::ParseError {
            input: input.to_owned(),
            kind,
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        NumError::InvalidArgument(message.into())
    }

    /// Returns the parse failure reason, if this is a parse error.
    pub fn parse_kind(&self) -> Option<&ParseErrorKind> {
        match self {
            NumError::ParseError { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

pub type Result<T, E = NumError> = std::result::Result<T, E>;
