//! Error types shared by every buffer operation.

use thiserror::Error;

/// Convenience alias for results carrying a [`BufferError`].
pub type Result<T, E = BufferError> = std::result::Result<T, E>;

/// Failure reported by a [`StringBuffer`](crate::StringBuffer) operation.
///
/// Every variant is returned to the immediate caller. A failed operation
/// leaves the buffer exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// An argument was empty where a non-empty one is required, or a
    /// configuration value was out of range.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the argument.
        reason: &'static str,
    },

    /// A slice end resolved to a position before its start.
    #[error("slice range {from}..{to} is invalid for content of length {len}")]
    Range {
        /// Requested start offset.
        from: usize,
        /// Effective end offset after negative-index resolution and clamping.
        to: isize,
        /// Content length at the time of the call.
        len: usize,
    },

    /// The allocator could not provide the requested block.
    #[error("failed to allocate {requested} bytes")]
    AllocationFailure {
        /// Capacity that was requested, excluding the terminator slot.
        requested: usize,
    },

    /// A search found no match.
    #[error("needle not found")]
    NotFound,

    /// A formatted write failed or produced a different length than measured.
    #[error("formatted write failed")]
    Format,
}

impl BufferError {
    /// Shorthand for [`BufferError::InvalidArgument`].
    pub(crate) const fn invalid(reason: &'static str) -> Self {
        Self::InvalidArgument { reason }
    }

    /// Returns `true` for the expected "no match" outcome of a search.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

impl From<std::fmt::Error> for BufferError {
    fn from(_: std::fmt::Error) -> Self {
        Self::Format
    }
}
