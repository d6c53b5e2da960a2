//! Create and drop PostgreSQL foreign servers and foreign tables.

pub mod cli;
pub mod convert;
pub mod executor;
pub mod fdw;
pub mod logger;
pub mod schema;
pub mod statement;

pub use executor::{BackendError, Executor, PostgresExecutor, Recorder};
pub use fdw::{Fdw, Guards};
pub use schema::{ColumnSpec, DropDirective, ObjectKind, Options, ServerSpec, TableSpec};
