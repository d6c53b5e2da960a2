//! CREATE SERVER / DROP SERVER statement generation.

use std::fmt::Write;

use super::{build_options, quote_identifier, quote_literal, Error};
use crate::schema::{DropDirective, ObjectKind, ServerSpec};

fn build_create(spec: &ServerSpec, if_not_exists: bool) -> Result<String, Error> {
    let name = quote_identifier(&spec.name).map_err(|err| err.in_field("server name"))?;
    let wrapper =
        quote_identifier(&spec.wrapper).map_err(|err| err.in_field("foreign data wrapper"))?;
    let options = build_options(&spec.options).map_err(|err| err.within("server"))?;

    let mut sql = String::from("CREATE SERVER ");
    if if_not_exists {
        sql.push_str("IF NOT EXISTS ");
    }
    sql.push_str(&name);

    if let Some(ref server_type) = spec.server_type {
        let server_type = quote_literal(server_type).map_err(|err| err.in_field("server type"))?;
        write!(sql, " TYPE {}", server_type)?;
    }

    if let Some(ref version) = spec.version {
        let version = quote_literal(version).map_err(|err| err.in_field("server version"))?;
        write!(sql, " VERSION {}", version)?;
    }

    write!(sql, " FOREIGN DATA WRAPPER {}", wrapper)?;

    if !options.is_empty() {
        write!(sql, " {}", options)?;
    }

    Ok(sql)
}

/// Generate `CREATE SERVER` for a server spec.
pub fn create_server(spec: &ServerSpec) -> Result<String, Error> {
    build_create(spec, false)
}

/// Generate `CREATE SERVER IF NOT EXISTS` for a server spec.
pub fn create_server_if_not_exists(spec: &ServerSpec) -> Result<String, Error> {
    build_create(spec, true)
}

/// Generate `DROP SERVER`.
///
/// `IF EXISTS` is only added when the directive asks for it; without it,
/// dropping a missing server is an error reported by the backend.
pub fn drop_server(directive: &DropDirective) -> Result<String, Error> {
    if directive.kind != ObjectKind::Server {
        return Err(Error::spec(
            "drop directive",
            format!("expected a server, got a {}", directive.kind),
        ));
    }

    if directive.schema.is_some() {
        return Err(Error::UnsupportedOption(
            "servers are not schema-qualified",
        ));
    }

    let name = quote_identifier(&directive.name).map_err(|err| err.in_field("server name"))?;

    let mut sql = String::from("DROP SERVER ");
    if directive.if_exists {
        sql.push_str("IF EXISTS ");
    }
    sql.push_str(&name);

    if directive.cascade {
        sql.push_str(" CASCADE");
    }

    Ok(sql)
}
