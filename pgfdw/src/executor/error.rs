//! Error reported by the backend for a statement.

use std::fmt::Display;

/// SQLSTATE codes the façade cares about.
pub mod code {
    pub const DUPLICATE_OBJECT: &str = "42710";
    pub const DUPLICATE_TABLE: &str = "42P07";
    pub const UNDEFINED_OBJECT: &str = "42704";
    pub const UNDEFINED_TABLE: &str = "42P01";
    pub const FEATURE_NOT_SUPPORTED: &str = "0A000";
}

/// The backend's ErrorResponse, kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    pub severity: String,
    /// SQLSTATE. Empty if the error came from the client, not the server.
    pub code: String,
    pub message: String,
    pub detail: Option<String>,
}

impl Default for BackendError {
    fn default() -> Self {
        Self {
            severity: "ERROR".into(),
            code: String::default(),
            message: String::default(),
            detail: None,
        }
    }
}

impl BackendError {
    pub fn new(code: impl ToString, message: impl ToString) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            ..Default::default()
        }
    }

    /// Error raised on the client side, e.g. a dropped connection or a bad row.
    pub fn client(message: impl ToString) -> Self {
        Self::new("", message)
    }

    /// The server never sent this error.
    pub fn is_client(&self) -> bool {
        self.code.is_empty()
    }

    /// The executor can't do what was asked.
    pub fn unsupported(what: &str) -> Self {
        Self::new(
            code::FEATURE_NOT_SUPPORTED,
            format!("{} is not supported by this executor", what),
        )
    }

    /// Object being created is already there.
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self.code.as_str(),
            code::DUPLICATE_OBJECT | code::DUPLICATE_TABLE
        )
    }

    /// Object being dropped isn't there.
    pub fn is_undefined(&self) -> bool {
        matches!(
            self.code.as_str(),
            code::UNDEFINED_OBJECT | code::UNDEFINED_TABLE
        )
    }
}

impl Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;
        if !self.code.is_empty() {
            write!(f, " ({})", self.code)?;
        }
        if let Some(ref detail) = self.detail {
            write!(f, "\nDETAIL: {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for BackendError {}
