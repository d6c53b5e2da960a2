//! Errors for FDW statement generation.

use std::fmt;
use thiserror::Error;

/// Errors that can occur when building DDL statements.
///
/// All of these are raised before any statement text leaves the builder,
/// so nothing is ever sent to the backend when one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid identifier {raw:?}: {reason}")]
    InvalidIdentifier { raw: String, reason: &'static str },

    #[error("invalid literal: string literals cannot contain a null byte")]
    InvalidLiteral,

    #[error("invalid option key {0:?}: option keys must be a single unquoted word")]
    InvalidOptionKey(String),

    #[error("invalid {field}: {reason}")]
    InvalidSpec { field: String, reason: String },

    #[error("unsupported option: {0}")]
    UnsupportedOption(&'static str),

    #[error("format error: {0}")]
    Format(#[from] fmt::Error),
}

impl Error {
    pub(crate) fn spec(field: impl ToString, reason: impl ToString) -> Self {
        Self::InvalidSpec {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Attach the name of the field that failed validation.
    ///
    /// Identifier and literal errors become [`Error::InvalidSpec`]; everything
    /// else is passed through as-is.
    pub(crate) fn in_field(self, field: impl ToString) -> Self {
        match self {
            Self::InvalidIdentifier { .. } | Self::InvalidLiteral => {
                Self::spec(field, self.to_string())
            }
            err => err,
        }
    }

    /// Prefix the field of an [`Error::InvalidSpec`] with the object it belongs to,
    /// e.g. `option host` becomes `server option host`.
    pub(crate) fn within(self, owner: impl fmt::Display) -> Self {
        match self {
            Self::InvalidSpec { field, reason } => Self::InvalidSpec {
                field: format!("{} {}", owner, field),
                reason,
            },
            err => err,
        }
    }
}
