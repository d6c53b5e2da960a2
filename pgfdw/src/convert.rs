//! Config file entries to specs.

use pgfdw_config::{Column, Config, Server, Table};

use crate::schema::{ColumnSpec, ServerSpec, TableSpec};

impl From<&Server> for ServerSpec {
    fn from(server: &Server) -> Self {
        Self {
            name: server.name.clone(),
            wrapper: server.wrapper.clone(),
            server_type: server.server_type.clone(),
            version: server.version.clone(),
            options: server.options.clone(),
        }
    }
}

impl From<&Column> for ColumnSpec {
    fn from(column: &Column) -> Self {
        Self {
            name: column.name.clone(),
            sql_type: column.data_type.clone(),
            nullable: column.nullable,
            default: column.default.clone(),
            collation: column.collation.clone(),
            options: column.options.clone(),
        }
    }
}

impl From<&Table> for TableSpec {
    fn from(table: &Table) -> Self {
        Self {
            schema: table.schema.clone(),
            name: table.name.clone(),
            columns: table.columns.iter().map(ColumnSpec::from).collect(),
            server: table.server.clone(),
            options: table.options.clone(),
        }
    }
}

/// Servers and tables declared in a config file.
pub fn specs(config: &Config) -> (Vec<ServerSpec>, Vec<TableSpec>) {
    (
        config.servers.iter().map(ServerSpec::from).collect(),
        config.tables.iter().map(TableSpec::from).collect(),
    )
}
