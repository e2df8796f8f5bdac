//! Error types for pattern tree construction.

use thiserror::Error;

/// Errors that can occur while building a pattern tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A constructor received an operand of the wrong vocabulary or layer.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// What the constructor accepts.
        expected: &'static str,
        /// Description of what it was given.
        found: String,
    },

    /// A container was used after leaving the state the operation requires.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A structurally valid combination that is not implemented.
    #[error("not supported: {feature}")]
    NotSupported {
        /// Description of the unsupported feature.
        feature: String,
    },
}

/// A qualifier list was built from no qualifiers.
///
/// Kept apart from [`PatternError`]: it only arises when rebuilding a list
/// from a plain `Vec`, for example while deserializing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("qualifier list must hold at least one qualifier")]
pub struct EmptyQualifierList;

/// Coarse classification of a [`PatternError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`PatternError::TypeMismatch`].
    TypeMismatch,
    /// See [`PatternError::InvalidState`].
    InvalidState,
    /// See [`PatternError::NotSupported`].
    NotSupported,
}

impl PatternError {
    pub(crate) fn type_mismatch(expected: &'static str, found: impl Into<String>) -> Self {
        PatternError::TypeMismatch {
            expected,
            found: found.into(),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PatternError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            PatternError::InvalidState(_) => ErrorKind::InvalidState,
            PatternError::NotSupported { .. } => ErrorKind::NotSupported,
        }
    }
}

/// Result type for pattern operations.
pub type PatternResult<T> = std::result::Result<T, PatternError>;
