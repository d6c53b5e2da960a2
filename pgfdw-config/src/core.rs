use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::read_to_string;
use std::path::Path;
use tracing::warn;

use super::error::Error;
use super::general::General;
use super::server::Server;
use super::table::Table;

/// pgfdw.toml
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: General,

    /// Foreign servers, created in order.
    #[serde(default)]
    pub servers: Vec<Server>,

    /// Foreign tables, created in order after all servers.
    #[serde(default)]
    pub tables: Vec<Table>,
}

impl Config {
    /// Read and parse the config file. Doesn't validate it; see [`Config::check`].
    pub fn load(path: &Path) -> Result<Self, Error> {
        let source = read_to_string(path)?;
        let config = toml::from_str(&source).map_err(|err| Error::parse(path, err))?;
        Ok(config)
    }

    /// Check names are unique.
    ///
    /// A table on a server that isn't in the file is allowed, since the
    /// server may already exist, but it's logged.
    pub fn check(&self) -> Result<(), Error> {
        let mut servers = HashSet::new();
        for server in &self.servers {
            if !servers.insert(server.name.as_str()) {
                return Err(Error::Validation(format!(
                    "server \"{}\" is declared more than once",
                    server.name
                )));
            }
        }

        let mut tables = HashSet::new();
        for table in &self.tables {
            if !tables.insert((table.schema.as_deref(), table.name.as_str())) {
                return Err(Error::Validation(format!(
                    "table \"{}\" is declared more than once",
                    table.qualified_name()
                )));
            }

            if !servers.contains(table.server.as_str()) {
                warn!(
                    "table \"{}\" uses server \"{}\" which is not declared in this file",
                    table.qualified_name(),
                    table.server
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;
    use crate::Guards;

    const SOURCE: &str = r#"
[general]
database_url = "postgres://postgres@127.0.0.1:5432/postgres"
guards = "native"
checkfirst = true

[[servers]]
name = "myfdwserver"
wrapper = "myfdwextension"
options = { option1 = "test" }

[[tables]]
name = "myforeigntable"
server = "myfdwserver"
options = { tableoption = "optionvalue" }
columns = [
  { name = "col1", type = "integer" },
  { name = "col2", type = "text" },
]
"#;

    #[test]
    fn test_basic() {
        let config: Config = toml::from_str(SOURCE).unwrap();
        assert_eq!(config.general.guards, Guards::Native);
        assert!(config.general.checkfirst);
        assert_eq!(config.servers.len(), 1);
        assert_eq!(config.servers[0].options["option1"], "test");
        assert_eq!(config.tables[0].columns[1].data_type, "text");
        config.check().unwrap();
    }

    #[test]
    fn test_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.servers.is_empty());
        assert!(config.tables.is_empty());
        config.check().unwrap();
    }

    #[test]
    fn test_duplicate_server() {
        let config: Config = toml::from_str(
            r#"
[[servers]]
name = "srv"
wrapper = "a"

[[servers]]
name = "srv"
wrapper = "b"
"#,
        )
        .unwrap();
        assert!(matches!(config.check(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_duplicate_table() {
        let config: Config = toml::from_str(
            r#"
[[tables]]
name = "t"
server = "srv"

[[tables]]
schema = "other"
name = "t"
server = "srv"

[[tables]]
name = "t"
server = "srv"
"#,
        )
        .unwrap();
        let err = config.check().unwrap_err();
        assert_eq!(err.to_string(), "table \"t\" is declared more than once");
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SOURCE.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.tables[0].name, "myforeigntable");
    }

    #[test]
    fn test_load_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[[servers]]\nname = 1\n").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().starts_with("failed to parse"));
    }
}
