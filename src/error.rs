use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    Empty,
    InvalidDigit,
    UnsupportedRadix(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    DivisionByZero,
    // requested: limbs asked for, limit: the ceiling that refused them
    CapacityExceeded { requested: usize, limit: usize },
    Parse(ParseErrorKind),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:?}", self) }
}

impl std::error::Error for Error {}

impl From<ParseErrorKind> for Error {
    fn from(kind: ParseErrorKind) -> Self { Error::Parse(kind) }
}
