//! Error model for reflection and value construction.

use thiserror::Error;

/// Result type returned by reflection probes.
pub type ReflectResult<T> = Result<T, ReflectError>;

/// Result type returned by validating value constructors.
pub type ValueResult<T> = Result<T, ValueError>;

/// Failure of the host's reflection over a value.
///
/// Probes never fail for well-formed graphs; the only way to provoke one is to
/// inspect an object while something else holds a mutable borrow of it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReflectError {
    /// The object is mutably borrowed and cannot be inspected right now.
    #[error("object is busy: {0}")]
    Busy(String),
}

impl ReflectError {
    pub fn busy(msg: impl Into<String>) -> Self {
        Self::Busy(msg.into())
    }
}

/// Rejected input to a value constructor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A pattern flag outside `gimsuy`.
    #[error("invalid pattern flag: {0:?}")]
    InvalidPatternFlag(char),

    /// The same pattern flag was given twice.
    #[error("duplicate pattern flag: {0:?}")]
    DuplicatePatternFlag(char),

    /// Only booleans, numbers and strings can be boxed.
    #[error("cannot box a non-primitive value: {0}")]
    NotAPrimitive(String),
}

impl ValueError {
    pub fn not_a_primitive(msg: impl Into<String>) -> Self {
        Self::NotAPrimitive(msg.into())
    }
}
