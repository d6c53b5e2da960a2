//! Errors returned by the façade.

use thiserror::Error;

use crate::executor::BackendError;
use crate::schema::ObjectKind;
use crate::statement;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Statement(#[from] statement::Error),

    #[error("{kind} \"{name}\" already exists: {source}")]
    AlreadyExists {
        kind: ObjectKind,
        name: String,
        source: BackendError,
    },

    #[error("{kind} \"{name}\" does not exist: {source}")]
    DoesNotExist {
        kind: ObjectKind,
        name: String,
        source: BackendError,
    },

    #[error("backend: {0}")]
    Backend(#[from] BackendError),
}

impl Error {
    /// The backend's original error, if the statement got that far.
    pub fn backend(&self) -> Option<&BackendError> {
        match self {
            Self::Statement(_) => None,
            Self::AlreadyExists { source, .. } | Self::DoesNotExist { source, .. } => Some(source),
            Self::Backend(err) => Some(err),
        }
    }
}
