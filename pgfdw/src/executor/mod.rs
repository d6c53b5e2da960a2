//! Executing generated statements.
//!
//! The connection layer is not part of this crate. Anything that can run a
//! statement implements [`Executor`]; [`PostgresExecutor`] does it with
//! `tokio-postgres` and [`Recorder`] just keeps the statements.

mod catalog;
mod error;
mod postgres;
mod recorder;

use async_trait::async_trait;

pub use catalog::{exists_query, FOREIGN_TABLE_EXISTS, FOREIGN_TABLE_VISIBLE, SERVER_EXISTS};
pub use error::{code, BackendError};
pub use postgres::PostgresExecutor;
pub use recorder::Recorder;

use crate::schema::ObjectKind;

/// Runs DDL against one connection.
///
/// Calls are made one at a time; the façade holds `&mut self` for each.
#[async_trait]
pub trait Executor: Send {
    /// Execute a statement, returning the backend's error as-is on failure.
    async fn execute(&mut self, sql: &str) -> Result<(), BackendError>;

    /// Check the system catalogs for a server or foreign table.
    ///
    /// Only called when native `IF [NOT] EXISTS` guards are turned off.
    async fn exists(
        &mut self,
        kind: ObjectKind,
        schema: Option<&str>,
        name: &str,
    ) -> Result<bool, BackendError> {
        let _ = (kind, schema, name);
        Err(BackendError::unsupported("catalog existence check"))
    }
}
