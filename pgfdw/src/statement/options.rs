//! OPTIONS (...) clause.

use std::fmt::Write;

use super::{quote_literal, Error};
use crate::schema::Options;

/// Check that an option key can be written as a bare word.
///
/// FDW option names are unquoted in the OPTIONS clause, so only plain
/// identifier characters are accepted. Multi-word and quoted keys are rejected.
fn validate_key(key: &str) -> Result<(), Error> {
    let mut chars = key.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if valid {
        Ok(())
    } else {
        Err(Error::InvalidOptionKey(key.into()))
    }
}

/// Build an `OPTIONS (key 'value', ...)` clause.
///
/// Returns an empty string if there are no options. Keys are emitted in
/// insertion order.
pub fn build_options(options: &Options) -> Result<String, Error> {
    if options.is_empty() {
        return Ok(String::new());
    }

    let mut sql = String::from("OPTIONS (");
    for (i, (key, value)) in options.iter().enumerate() {
        validate_key(key)?;

        if i > 0 {
            sql.push_str(", ");
        }

        let value =
            quote_literal(value).map_err(|err| err.in_field(format!("option {}", key)))?;
        write!(sql, "{} {}", key, value)?;
    }
    sql.push(')');

    Ok(sql)
}
