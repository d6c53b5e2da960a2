use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::options::{self, Options};

/// A foreign table, i.e. `[[tables]]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Table {
    /// Schema the foreign table is created in. Uses the search path if omitted.
    #[serde(default)]
    pub schema: Option<String>,

    /// Table name.
    pub name: String,

    /// Name of the server the table reads from.
    pub server: String,

    /// Columns, in order.
    #[serde(default)]
    pub columns: Vec<Column>,

    /// Wrapper-specific table options, e.g. `schema_name`, `table_name`.
    #[serde(default, deserialize_with = "options::deserialize")]
    #[schemars(with = "BTreeMap<String, String>")]
    pub options: Options,
}

impl Table {
    /// `schema.name`, or just `name`.
    pub fn qualified_name(&self) -> String {
        match self.schema {
            Some(ref schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }
}

/// A foreign table column.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Column {
    pub name: String,

    /// Column type, e.g. `bigint` or `character varying(255)`.
    #[serde(rename = "type")]
    pub data_type: String,

    /// _Default:_ `true`
    #[serde(default = "Column::nullable")]
    pub nullable: bool,

    /// Default expression.
    #[serde(default)]
    pub default: Option<String>,

    #[serde(default)]
    pub collation: Option<String>,

    /// Wrapper-specific column options, e.g. `column_name`.
    #[serde(default, deserialize_with = "options::deserialize")]
    #[schemars(with = "BTreeMap<String, String>")]
    pub options: Options,
}

impl Column {
    fn nullable() -> bool {
        true
    }
}
