use core::fmt;

/// Reasons a mixer definition can be rejected at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Geometry key absent from the compiled-in registry.
    UnknownGeometry,
    /// Malformed mixer definition line.
    Parse,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownGeometry => write!(f, "unknown geometry"),
            Error::Parse => write!(f, "malformed mixer definition"),
        }
    }
}
