// error.rs - Error type for pattern compilation, queries and matching.
//
// Engine failures keep the engine's integer code next to its message so
// callers can still branch on the raw value.

use crate::engine::error_message;

/// Shorthand for results carrying [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Error type for every fallible operation in the crate.
///
/// A missing group *name* is not an error: lookups by name return
/// `Ok(None)` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The pattern text did not compile.
    ///
    /// `offset` is in code units of the pattern and points at the place
    /// where the engine gave up.
    #[error("pattern error at offset {offset}: {message}")]
    Compile {
        code: i32,
        message: String,
        offset: usize,
    },
    /// Metadata could not be read from a compiled pattern.
    #[error("pattern query failed: {message}")]
    Query { code: i32, message: String },
    /// The engine failed while matching (this is never "no match").
    #[error("match failed: {message}")]
    Execute { code: i32, message: String },
    /// The offset vector could not hold every group; trailing offsets are
    /// unreliable.
    #[error("offset vector too small for {groups} capturing groups")]
    BufferTooSmall { groups: usize },
    /// A group was requested from a result that did not match.
    #[error("pattern did not match")]
    NoMatch,
    /// A group index above the pattern's capturing-group count.
    #[error("no group {index} (pattern has {count} capturing groups)")]
    NoSuchGroup { index: usize, count: usize },
    /// The group exists but took no part in the match.
    #[error("group {index} did not participate in the match")]
    GroupNotParticipating { index: usize },
}

impl Error {
    pub(crate) fn compile(code: i32, offset: usize) -> Self {
        Error::Compile {
            code,
            message: error_message(code),
            offset,
        }
    }

    pub(crate) fn query(code: i32) -> Self {
        Error::Query {
            code,
            message: error_message(code),
        }
    }

    pub(crate) fn execute(code: i32) -> Self {
        Error::Execute {
            code,
            message: error_message(code),
        }
    }

    /// Returns the engine's error code, if the error came from the engine.
    pub fn code(&self) -> Option<i32> {
        match self {
            Error::Compile { code, .. } | Error::Query { code, .. } | Error::Execute { code, .. } => {
                Some(*code)
            }
            _ => None,
        }
    }
}
