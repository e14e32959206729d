//! Common error infrastructure for satchel-core.
//!
//! This module provides shared types and traits used across all error types in the crate.
//! Domain-specific errors (e.g. [`OwnershipError`](crate::engine::OwnershipError),
//! [`RegistryError`](crate::registry::RegistryError)) are defined in their respective
//! modules alongside the operations they validate.
//!
//! # Design Principles
//!
//! - **Type Safety**: Each subsystem has its own error type with specific variants
//! - **Rich Context**: Variants carry the item, character or slot that was rejected
//! - **Severity Classification**: Errors are categorized for recovery strategies
//! - **No partial state**: An error always means the graph is unchanged

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: Conditions that may succeed after the world changes (more capacity, another target)
/// - **Validation**: Invalid input that should be rejected without retry
/// - **Internal**: Unexpected state inconsistencies that require investigation
/// - **Fatal**: Unrecoverable errors indicating a corrupted graph
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - can retry with an alternative target or after freeing capacity.
    ///
    /// Examples: backpack full, item held by someone else
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown item id, terminated item, duplicate identification number
    Validation,

    /// Internal error - unexpected state inconsistency.
    ///
    /// Examples: back-reference mismatch between an item and its owner
    Internal,

    /// Fatal error - graph corrupted, cannot continue.
    ///
    /// Examples: containment cycle discovered while resolving a holder
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all satchel-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait DomainError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// This is useful for error categorization, metrics, and testing.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
