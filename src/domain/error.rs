//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the identifier scheme.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed identifier '{input}': {reason}")]
    MalformedIdentifier { input: String, reason: String },
}
