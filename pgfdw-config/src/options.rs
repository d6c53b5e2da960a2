//! FDW option maps.
//!
//! Option values are strings on the PostgreSQL side, but it's natural to write
//! `port = 5432` in TOML, so scalars are accepted and turned into strings.

use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer};

/// Options in the order they appear in the file.
pub type Options = IndexMap<String, String>;

pub fn deserialize<'de, D>(deserializer: D) -> Result<Options, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: IndexMap<String, toml::Value> = IndexMap::deserialize(deserializer)?;

    raw.into_iter()
        .map(|(key, value)| {
            let value = match value {
                toml::Value::String(s) => s,
                toml::Value::Integer(i) => i.to_string(),
                toml::Value::Float(f) => f.to_string(),
                toml::Value::Boolean(b) => b.to_string(),
                toml::Value::Datetime(d) => d.to_string(),
                toml::Value::Array(_) | toml::Value::Table(_) => {
                    return Err(de::Error::custom(format!(
                        "option \"{}\" must be a string, number or boolean",
                        key
                    )))
                }
            };
            Ok((key, value))
        })
        .collect()
}
