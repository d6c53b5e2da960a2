//! DDL statement generation for foreign servers and foreign tables.
//!
//! Builders are pure: they take a declarative spec and return statement text
//! or an [`Error`], never touching a connection.

mod error;
mod options;
mod quote;
mod server;
mod table;

pub use error::Error;
pub use options::build_options;
pub use quote::{qualified_name, quote_identifier, quote_literal};
pub use server::{create_server, create_server_if_not_exists, drop_server};
pub use table::{create_table, drop_table};

use crate::schema::{DropDirective, ObjectKind};

/// Generate the DROP statement matching the directive's object kind.
pub fn drop_statement(directive: &DropDirective) -> Result<String, Error> {
    match directive.kind {
        ObjectKind::Server => drop_server(directive),
        ObjectKind::Table => drop_table(directive),
    }
}
