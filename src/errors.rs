// Copyright 2025 Cowboy AI, LLC.

//! Error types for composition and member dispatch

use thiserror::Error;

/// Errors that can occur during composition or member dispatch
#[derive(Debug, Clone, Error)]
pub enum ComposeError {
    /// A named member was not found on the dispatch target
    #[error("Member not found: {member}")]
    MemberNotFound {
        /// Name of the member that was looked up
        member: String,
    },

    /// A named member exists but is not callable
    #[error("Member is not callable: {member}")]
    NotCallable {
        /// Name of the member that was invoked
        member: String,
    },

    /// A type initializer substituted a result that is not a type
    #[error("Type initializer returned {found}, not a type")]
    NotAType {
        /// Kind of value the initializer returned
        found: &'static str,
    },

    /// Error raised by a user-supplied method or initializer
    #[error("{0}")]
    Custom(String),
}

/// Result type for composition operations
pub type ComposeResult<T> = Result<T, ComposeError>;

impl ComposeError {
    /// Create a custom error from a user-supplied message
    pub fn custom(msg: impl Into<String>) -> Self {
        ComposeError::Custom(msg.into())
    }

    /// Check if this is a missing-member dispatch error
    pub fn is_member_not_found(&self) -> bool {
        matches!(self, ComposeError::MemberNotFound { .. })
    }
}
