//! Error types used by kvec.

use core::fmt;

use crate::alloc::AllocError;

/// An error raised by a fallible vector operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Error due to the computed capacity exceeding the collection's maximum
    /// (usually `isize::MAX` bytes).
    CapacityOverflow,

    /// The allocator failed to provide memory.
    #[non_exhaustive]
    AllocError {
        /// The underlying error.
        error: AllocError,
    },

    /// A checked access was made outside of the live elements.
    #[non_exhaustive]
    OutOfRange {
        /// The index which was accessed.
        index: usize,
        /// The length of the vector at the time of access.
        len: usize,
    },
}

impl Error {
    pub(crate) const fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }
}

impl From<AllocError> for Error {
    #[inline]
    fn from(error: AllocError) -> Self {
        Error::AllocError { error }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::CapacityOverflow => write!(f, "Capacity overflow"),
            Error::AllocError { error } => error.fmt(f),
            Error::OutOfRange { index, len } => {
                write!(f, "Index {index} is out of range for length {len}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::AllocError { error } => Some(error),
            _ => None,
        }
    }
}
