//! # Validation Result
//!
//! The outcome of every `validate` call. A failed validation is a value, not
//! an error: callers decide whether a mismatch is fatal.
//!
//! ## Invariant
//!
//! `reason` is present if and only if `success` is false. The fields are
//! private and the only constructors are [`ValidationResult::success`] and
//! [`ValidationResult::fail`], so the invariant cannot be broken downstream.

use devmeta_core::MetadataError;
use serde::Serialize;

/// Reason reported when a value does not have the shape a type requires.
pub const UNSUPPORTED_FORMAT: &str = "unsupported format";

/// Success, or failure with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ValidationResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl ValidationResult {
    /// A passing result.
    pub fn success() -> Self {
        Self {
            success: true,
            reason: None,
        }
    }

    /// A failing result with the given reason.
    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            reason: Some(reason.into()),
        }
    }

    /// A failing result for a value of the wrong shape.
    pub fn unsupported_format() -> Self {
        Self::fail(UNSUPPORTED_FORMAT)
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// The failure reason; `None` for passing results.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Lift into a `Result`, mapping failure to [`MetadataError::Validation`].
    pub fn into_result(self) -> Result<(), MetadataError> {
        match self.reason {
            Some(reason) if !self.success => Err(MetadataError::Validation(reason)),
            _ => Ok(()),
        }
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "FAIL: {reason}"),
            None => f.write_str("OK"),
        }
    }
}
