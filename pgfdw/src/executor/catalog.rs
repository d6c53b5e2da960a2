//! Catalog queries used for existence checks.

use crate::schema::ObjectKind;

/// Does a foreign server exist? `$1` is the server name.
pub static SERVER_EXISTS: &str = include_str!("server_exists.sql");

/// Does a foreign table exist in a schema? `$1` is the table, `$2` the schema.
pub static FOREIGN_TABLE_EXISTS: &str = include_str!("foreign_table_exists.sql");

/// Is a foreign table visible on the search path? `$1` is the table.
pub static FOREIGN_TABLE_VISIBLE: &str = include_str!("foreign_table_visible.sql");

/// Pick the existence query for an object.
///
/// Server names are database-wide, so a schema is ignored for them.
pub fn exists_query(kind: ObjectKind, schema: Option<&str>) -> &'static str {
    match (kind, schema) {
        (ObjectKind::Server, _) => SERVER_EXISTS,
        (ObjectKind::Table, Some(_)) => FOREIGN_TABLE_EXISTS,
        (ObjectKind::Table, None) => FOREIGN_TABLE_VISIBLE,
    }
}
