//! Common error infrastructure for technique-core.
//!
//! Domain-specific errors (`CatalogError`, `AddEffectError`, `TreeError`, ...)
//! are defined next to the operations they guard. This module only provides
//! the shared classification used by hosts to decide how to surface them.
//!
//! # Design Principles
//!
//! - **Checked outcomes**: rule violations are returned, never panicked
//! - **Unchanged state**: an operation that fails leaves its target untouched
//! - **Severity Classification**: errors are categorized for presentation

/// Severity level of an error, used for categorization and presentation.
///
/// - **Recoverable**: the user can fix the input and retry immediately
/// - **Validation**: the request itself is invalid and must change
/// - **Internal**: an inconsistency between caller and engine (contract bug)
/// - **Fatal**: reference data is unusable; the host cannot continue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - retry after adjusting the technique.
    ///
    /// Examples: level not chosen yet, mutually exclusive effect present
    Recoverable,

    /// Validation error - invalid request, should not retry unchanged.
    ///
    /// Examples: unknown option id, reparenting into a cycle
    Validation,

    /// Internal error - the caller referenced state that does not exist.
    ///
    /// Examples: removing an instance id that was never issued
    Internal,

    /// Fatal error - the catalog violates its data contract.
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

    /// Returns true if this error indicates a bug or broken data.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all technique-core errors.
///
/// # Implementation Guidelines
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait RulesError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_classification() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert!(ErrorSeverity::Internal.is_internal());
        assert_eq!(ErrorSeverity::Validation.as_str(), "validation");
    }
}
