//! Declarative descriptions of foreign servers and foreign tables.
//!
//! These are plain values owned by the caller. Nothing here talks to the
//! database; statement builders take them by reference and return SQL text.

use std::fmt::Display;

use indexmap::IndexMap;

/// FDW options, kept in insertion order.
pub type Options = IndexMap<String, String>;

/// Kind of object a drop targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Server,
    Table,
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Server => write!(f, "server"),
            Self::Table => write!(f, "foreign table"),
        }
    }
}

/// A foreign server bound to an FDW extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSpec {
    pub name: String,
    /// Name of the foreign data wrapper, e.g. `postgres_fdw`.
    pub wrapper: String,
    /// Optional `TYPE '...'` clause.
    pub server_type: Option<String>,
    /// Optional `VERSION '...'` clause.
    pub version: Option<String>,
    pub options: Options,
}

impl ServerSpec {
    pub fn new(name: impl ToString, wrapper: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            wrapper: wrapper.to_string(),
            server_type: None,
            version: None,
            options: Options::new(),
        }
    }

    /// Add a server option. A repeated key replaces the earlier value.
    pub fn option(mut self, key: impl ToString, value: impl ToString) -> Self {
        self.options.insert(key.to_string(), value.to_string());
        self
    }

    pub fn server_type(mut self, server_type: impl ToString) -> Self {
        self.server_type = Some(server_type.to_string());
        self
    }

    pub fn version(mut self, version: impl ToString) -> Self {
        self.version = Some(version.to_string());
        self
    }

    /// Directive dropping this server.
    pub fn drop_directive(&self) -> DropDirective {
        DropDirective::server(&self.name)
    }
}

/// A column of a foreign table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    /// Type expression with modifiers, e.g. `character varying(255)`.
    pub sql_type: String,
    pub nullable: bool,
    /// Default expression, emitted as-is.
    pub default: Option<String>,
    pub collation: Option<String>,
    /// Column-level FDW options, e.g. `column_name`.
    pub options: Options,
}

impl ColumnSpec {
    pub fn new(name: impl ToString, sql_type: impl ToString) -> Self {
        Self {
            name: name.to_string(),
            sql_type: sql_type.to_string(),
            nullable: true,
            default: None,
            collation: None,
            options: Options::new(),
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn default(mut self, expr: impl ToString) -> Self {
        self.default = Some(expr.to_string());
        self
    }

    pub fn collation(mut self, collation: impl ToString) -> Self {
        self.collation = Some(collation.to_string());
        self
    }

    pub fn option(mut self, key: impl ToString, value: impl ToString) -> Self {
        self.options.insert(key.to_string(), value.to_string());
        self
    }
}

/// A foreign table living on a foreign server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    /// Schema to create the table in. Uses the search path if not set.
    pub schema: Option<String>,
    pub name: String,
    pub columns: Vec<ColumnSpec>,
    /// Server the table reads from. It must exist before the table is created.
    pub server: String,
    pub options: Options,
}

impl TableSpec {
    pub fn new(name: impl ToString, server: impl ToString) -> Self {
        Self {
            schema: None,
            name: name.to_string(),
            columns: vec![],
            server: server.to_string(),
            options: Options::new(),
        }
    }

    pub fn schema(mut self, schema: impl ToString) -> Self {
        self.schema = Some(schema.to_string());
        self
    }

    pub fn column(mut self, column: ColumnSpec) -> Self {
        self.columns.push(column);
        self
    }

    pub fn option(mut self, key: impl ToString, value: impl ToString) -> Self {
        self.options.insert(key.to_string(), value.to_string());
        self
    }

    /// Directive dropping this table.
    pub fn drop_directive(&self) -> DropDirective {
        let directive = DropDirective::table(&self.name);
        match &self.schema {
            Some(schema) => directive.schema(schema),
            None => directive,
        }
    }
}

/// Request to drop a server or a foreign table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropDirective {
    pub kind: ObjectKind,
    /// Only meaningful for tables.
    pub schema: Option<String>,
    pub name: String,
    /// Don't fail if the object is already gone.
    pub if_exists: bool,
    /// Drop dependent objects too. Only servers support this.
    pub cascade: bool,
}

impl DropDirective {
    pub fn server(name: impl ToString) -> Self {
        Self {
            kind: ObjectKind::Server,
            schema: None,
            name: name.to_string(),
            if_exists: false,
            cascade: false,
        }
    }

    pub fn table(name: impl ToString) -> Self {
        Self {
            kind: ObjectKind::Table,
            ..Self::server(name)
        }
    }

    pub fn schema(mut self, schema: impl ToString) -> Self {
        self.schema = Some(schema.to_string());
        self
    }

    pub fn if_exists(mut self, if_exists: bool) -> Self {
        self.if_exists = if_exists;
        self
    }

    pub fn cascade(mut self, cascade: bool) -> Self {
        self.cascade = cascade;
        self
    }

    /// Name used in log lines and errors, e.g. `public.events`.
    pub fn display_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_builders() {
        let server = ServerSpec::new("myfdwserver", "myfdwextension")
            .option("option1", "test")
            .option("option1", "again");
        assert_eq!(server.options.len(), 1);
        assert_eq!(server.options["option1"], "again");

        let table = TableSpec::new("events", "myfdwserver")
            .schema("remote")
            .column(ColumnSpec::new("id", "bigint").not_null())
            .column(ColumnSpec::new("payload", "jsonb").default("'{}'::jsonb"));
        assert_eq!(table.columns.len(), 2);
        assert!(!table.columns[0].nullable);
        assert!(table.columns[1].nullable);

        let drop = table.drop_directive();
        assert_eq!(drop.kind, ObjectKind::Table);
        assert_eq!(drop.schema.as_deref(), Some("remote"));
        assert_eq!(drop.display_name(), "remote.events");
        assert!(!drop.if_exists && !drop.cascade);
    }
}
