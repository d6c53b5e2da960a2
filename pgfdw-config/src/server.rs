use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::options::{self, Options};

/// A foreign server, i.e. `[[servers]]`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Server {
    /// Server name.
    pub name: String,

    /// Foreign data wrapper the server uses, e.g. `postgres_fdw`. The extension
    /// providing it must already be installed.
    pub wrapper: String,

    /// Optional server type, passed as `TYPE '...'`.
    #[serde(default, rename = "type")]
    pub server_type: Option<String>,

    /// Optional server version, passed as `VERSION '...'`.
    #[serde(default)]
    pub version: Option<String>,

    /// Wrapper-specific options, e.g. `host`, `port`, `dbname`.
    #[serde(default, deserialize_with = "options::deserialize")]
    #[schemars(with = "BTreeMap<String, String>")]
    pub options: Options,
}
