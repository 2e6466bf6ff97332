use std::alloc::Layout;
use std::error::Error;
use std::fmt;

/// Failures reported by the checked operations of a [`Deque`](crate::Deque).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DequeError {
    /// A checked access named an index at or past the length.
    IndexOutOfRange { index: usize, len: usize },
    /// A pop was attempted on an empty deque.
    Empty,
    /// The allocator could not provide storage for a block.
    AllocFailed { layout: Layout },
}

impl fmt::Display for DequeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DequeError::IndexOutOfRange { index, len } => {
                write!(f, "index out of range: the len is {len} but the index is {index}")
            }
            DequeError::Empty => f.write_str("deque is empty"),
            DequeError::AllocFailed { layout } => {
                write!(f, "failed to allocate a block of {} bytes", layout.size())
            }
        }
    }
}

impl Error for DequeError {}

/// Error returned by the fallible push operations.
///
/// The element that could not be stored is handed back to the caller.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct TryPushError<T> {
    /// The element that caused the error.
    pub element: T,
    /// Why the element could not be stored.
    pub error: DequeError,
}

impl<T> TryPushError<T> {
    /// Discards the element, keeping only the cause.
    #[inline]
    pub fn into_error(self) -> DequeError {
        self.error
    }
}

// Hide the contained element
impl<T> fmt::Debug for TryPushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryPushError")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for TryPushError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<T> Error for TryPushError<T> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = DequeError::IndexOutOfRange { index: 5, len: 3 };
        assert_eq!(
            err.to_string(),
            "index out of range: the len is 3 but the index is 5"
        );
        assert_eq!(DequeError::Empty.to_string(), "deque is empty");
        let layout = Layout::array::<u64>(64).unwrap();
        assert_eq!(
            DequeError::AllocFailed { layout }.to_string(),
            "failed to allocate a block of 512 bytes"
        );
    }

    #[test]
    fn push_error_returns_element() {
        let err = TryPushError {
            element: String::from("kept"),
            error: DequeError::Empty,
        };
        assert!(err.source().is_some());
        assert_eq!(format!("{err:?}"), "TryPushError { error: Empty, .. }");
        assert_eq!(err.element, "kept");
    }
}
