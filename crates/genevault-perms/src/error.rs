//! Error types for the permissions module.

use genevault_core::Operation;
use thiserror::Error;

/// Errors that can occur during permission checks.
///
/// Deliberately carries no detail beyond the rejected operation: callers
/// learn that they lack the privilege, not which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PermsError {
    /// Caller lacks the privilege the operation requires.
    #[error("unauthorized: {0}")]
    Unauthorized(Operation),
}

/// Result type for permission operations.
pub type Result<T> = std::result::Result<T, PermsError>;
