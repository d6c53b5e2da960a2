//! Identifier and string literal quoting.
//!
//! Every name and value that ends up in a generated statement goes through
//! one of these functions. Identifiers are always quoted, which keeps their
//! case exactly as given.

use super::Error;

/// Quote an identifier, doubling any embedded double quote.
///
/// ```
/// use pgfdw::statement::quote_identifier;
///
/// assert_eq!(quote_identifier("srv").unwrap(), r#""srv""#);
/// assert_eq!(quote_identifier(r#"my"srv"#).unwrap(), r#""my""srv""#);
/// ```
pub fn quote_identifier(raw: &str) -> Result<String, Error> {
    if raw.is_empty() {
        return Err(Error::InvalidIdentifier {
            raw: raw.into(),
            reason: "identifier is empty",
        });
    }

    if raw.contains('\0') {
        return Err(Error::InvalidIdentifier {
            raw: raw.into(),
            reason: "identifier contains a null byte",
        });
    }

    Ok(format!("\"{}\"", raw.replace('"', "\"\"")))
}

/// Quote a string literal, doubling any embedded single quote.
///
/// Output is a standard conforming string: backslashes are not escape
/// characters and pass through untouched.
pub fn quote_literal(raw: &str) -> Result<String, Error> {
    if raw.contains('\0') {
        return Err(Error::InvalidLiteral);
    }

    Ok(format!("'{}'", raw.replace('\'', "''")))
}

/// Format a table name, qualified with its schema if one is given.
pub fn qualified_name(schema: Option<&str>, name: &str) -> Result<String, Error> {
    match schema {
        Some(schema) => Ok(format!(
            "{}.{}",
            quote_identifier(schema)?,
            quote_identifier(name)?
        )),
        None => quote_identifier(name),
    }
}
