//! CREATE FOREIGN TABLE / DROP FOREIGN TABLE statement generation.

use std::collections::HashSet;
use std::fmt::Write;

use super::{build_options, qualified_name, quote_identifier, Error};
use crate::schema::{ColumnSpec, DropDirective, ObjectKind, TableSpec};

/// Check a raw SQL fragment (type or default expression) before writing it out.
///
/// These can't be quoted, so anything that could end the statement or
/// comment out the rest of it is rejected.
fn validate_expression(field: &str, expr: &str) -> Result<(), Error> {
    if expr.trim().is_empty() {
        return Err(Error::spec(field, "expression is empty"));
    }

    if expr.contains('\0') {
        return Err(Error::spec(field, "expression contains a null byte"));
    }

    if expr.contains(';') || expr.contains("--") || expr.contains("/*") {
        return Err(Error::spec(
            field,
            format!("expression {:?} contains a statement terminator or comment", expr),
        ));
    }

    Ok(())
}

/// Build one column definition.
fn build_column(position: usize, col: &ColumnSpec) -> Result<String, Error> {
    let field = |what: &str| format!("column {} {}", position, what);

    let name = quote_identifier(&col.name).map_err(|err| err.in_field(field("name")))?;
    validate_expression(&field("type"), &col.sql_type)?;

    let mut sql = String::new();
    write!(sql, "{} {}", name, col.sql_type.trim())?;

    let options =
        build_options(&col.options).map_err(|err| err.within(format!("column {}", position)))?;
    if !options.is_empty() {
        write!(sql, " {}", options)?;
    }

    if let Some(ref collation) = col.collation {
        let collation =
            quote_identifier(collation).map_err(|err| err.in_field(field("collation")))?;
        write!(sql, " COLLATE {}", collation)?;
    }

    if !col.nullable {
        sql.push_str(" NOT NULL");
    }

    if let Some(ref default) = col.default {
        validate_expression(&field("default"), default)?;
        write!(sql, " DEFAULT {}", default.trim())?;
    }

    Ok(sql)
}

/// Build the column list, checking it's non-empty and has no duplicate names.
///
/// Column names are always quoted, and quoted identifiers are case-sensitive,
/// so `id` and `ID` are different columns.
fn build_columns(spec: &TableSpec) -> Result<String, Error> {
    if spec.columns.is_empty() {
        return Err(Error::spec("columns", "foreign table has no columns"));
    }

    let mut seen = HashSet::new();
    for col in &spec.columns {
        if !seen.insert(col.name.as_str()) {
            return Err(Error::spec(
                "columns",
                format!("column {:?} is specified more than once", col.name),
            ));
        }
    }

    let columns = spec
        .columns
        .iter()
        .enumerate()
        .map(|(position, col)| build_column(position, col))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(columns.join(", "))
}

/// Generate `CREATE FOREIGN TABLE` for a table spec.
pub fn create_table(spec: &TableSpec, if_not_exists: bool) -> Result<String, Error> {
    let name = qualified_name(spec.schema.as_deref(), &spec.name)
        .map_err(|err| err.in_field("table name"))?;
    let columns = build_columns(spec)?;
    let server = quote_identifier(&spec.server).map_err(|err| err.in_field("server name"))?;
    let options = build_options(&spec.options).map_err(|err| err.within("table"))?;

    let mut sql = String::from("CREATE FOREIGN TABLE ");
    if if_not_exists {
        sql.push_str("IF NOT EXISTS ");
    }
    write!(sql, "{} ({}) SERVER {}", name, columns, server)?;

    if !options.is_empty() {
        write!(sql, " {}", options)?;
    }

    Ok(sql)
}

/// Generate `DROP FOREIGN TABLE`.
///
/// CASCADE isn't supported for foreign tables and is rejected rather than
/// silently ignored.
pub fn drop_table(directive: &DropDirective) -> Result<String, Error> {
    if directive.kind != ObjectKind::Table {
        return Err(Error::spec(
            "drop directive",
            format!("expected a foreign table, got a {}", directive.kind),
        ));
    }

    if directive.cascade {
        return Err(Error::UnsupportedOption(
            "CASCADE is not supported when dropping a foreign table",
        ));
    }

    let name = qualified_name(directive.schema.as_deref(), &directive.name)
        .map_err(|err| err.in_field("table name"))?;

    let mut sql = String::from("DROP FOREIGN TABLE ");
    if directive.if_exists {
        sql.push_str("IF EXISTS ");
    }
    sql.push_str(&name);

    Ok(sql)
}
