//! Common error infrastructure for portal-core.
//!
//! Domain errors live next to the code that raises them (`ConfigError` with
//! definitions, `ActionError` with the executor, `RegistryError` with the
//! registry). This module holds the classification they share.
//!
//! A closed gate is *not* an error: it is reported as
//! [`GateOutcome::Denied`](crate::gate::GateOutcome) and the host falls back
//! to its default portal behavior.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recoverable error - the same portal may succeed on a later attempt.
    ///
    /// Examples: a host command failed, a destination world is not loaded yet
    Recoverable,

    /// Validation error - invalid input, should not retry without changes.
    ///
    /// Examples: unknown portal type, partial teleport target, duplicate id
    Validation,

    /// Fatal error - shared state is unusable.
    ///
    /// Examples: the registry lock was poisoned by a panicking writer
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all portal-core errors.
///
/// - All error enums implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait PortalError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log filtering and for asserting on variants in tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Failure reported by a host collaborator (command dispatch, teleport).
///
/// The core does not interpret these; it only carries the message to the
/// caller wrapped in an [`ActionError`](crate::action::ActionError).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HostError {
    message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl PortalError for HostError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        "HOST_FAILURE"
    }
}
