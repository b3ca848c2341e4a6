use core::fmt;

/// Result type returned by the fallible operations of a [`Deque`](crate::Deque).
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The ways a [`Deque`](crate::Deque) operation can fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// The allocation strategy could not provide a node or a map.
    OutOfMemory,
    /// A checked accessor was given an index past the end of the deque.
    IndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// The length of the deque at the time of the request.
        len: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::OutOfMemory => f.write_str("memory allocation failed"),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "index (is {}) should be < len (is {})", index, len)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::Error;
    use std::string::ToString;

    #[test]
    fn display() {
        assert_eq!(Error::OutOfMemory.to_string(), "memory allocation failed");
        assert_eq!(
            Error::IndexOutOfRange { index: 7, len: 3 }.to_string(),
            "index (is 7) should be < len (is 3)"
        );
    }
}
