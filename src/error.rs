use std::{error::Error, fmt, io};

use crate::segments::SegmentId;

/// Rejection of a single input segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A segment line did not hold exactly four coordinates.
    CoordinateCount { found: usize },
    /// A coordinate token could not be parsed.
    NotANumber { token: String },
    /// A coordinate was NaN or infinite.
    NonFinite,
    /// Both endpoints are the same point.
    ZeroLength,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::CoordinateCount { found } => {
                write!(f, "expected 4 coordinates, found {}", found)
            }
            ValidationError::NotANumber { token } => write!(f, "`{}` is not a number", token),
            ValidationError::NonFinite => write!(f, "coordinates must be finite"),
            ValidationError::ZeroLength => write!(f, "segment has zero length"),
        }
    }
}

impl Error for ValidationError {}

/// A malformed line of a segment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFormatError {
    /// 1-based line number.
    pub line: usize,
    pub reason: ValidationError,
}

impl fmt::Display for InputFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

impl Error for InputFormatError {}

/// Errors raised while loading segments or running a sweep.
///
/// Rejections of the input carry their reason in the message; read
/// failures keep the I/O error as the source.
///
/// `EmptyQueue`, `NotFound` and `AlreadyActive` signal a broken
/// internal invariant (e.g. a stale sort key) and abort the sweep.
#[derive(Debug)]
pub enum SweepError {
    Validation(ValidationError),
    Input(InputFormatError),
    Io(io::Error),
    EmptyQueue,
    NotFound { segment: SegmentId },
    AlreadyActive { segment: SegmentId },
}

impl fmt::Display for SweepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SweepError::Validation(err) => write!(f, "invalid segment: {}", err),
            SweepError::Input(err) => write!(f, "invalid input: {}", err),
            SweepError::Io(_) => write!(f, "failed to read input"),
            SweepError::EmptyQueue => write!(f, "pop from an empty event queue"),
            SweepError::NotFound { segment } => {
                write!(f, "segment {} is not in the sweep status", segment)
            }
            SweepError::AlreadyActive { segment } => {
                write!(f, "segment {} is already in the sweep status", segment)
            }
        }
    }
}

impl Error for SweepError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SweepError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for SweepError {
    fn from(value: ValidationError) -> Self {
        SweepError::Validation(value)
    }
}

impl From<InputFormatError> for SweepError {
    fn from(value: InputFormatError) -> Self {
        SweepError::Input(value)
    }
}

impl From<io::Error> for SweepError {
    fn from(value: io::Error) -> Self {
        SweepError::Io(value)
    }
}
