use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// How "create if missing" and "drop if present" are implemented.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Guards {
    /// Use `IF NOT EXISTS` / `IF EXISTS` in the statement itself.
    #[default]
    Native,
    /// Look the object up in the system catalogs first and send the
    /// statement without a guard.
    Catalog,
}

impl FromStr for Guards {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "catalog" => Ok(Self::Catalog),
            _ => Err(format!("Invalid guards: {}", s)),
        }
    }
}

impl std::fmt::Display for Guards {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Catalog => write!(f, "catalog"),
        }
    }
}

#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

/// Settings that apply to every server and table in the file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct General {
    /// Connection URL of the database the servers and foreign tables are created in.
    ///
    /// _Default:_ `PGFDW_DATABASE_URL`, if set.
    #[serde(default = "General::database_url")]
    pub database_url: Option<String>,

    /// How existence checks are done when `checkfirst` is on.
    ///
    /// _Default:_ `native`
    #[serde(default = "General::guards")]
    pub guards: Guards,

    /// Skip objects that already exist on create, and objects that are already
    /// gone on drop.
    ///
    /// _Default:_ `true`
    #[serde(default = "General::checkfirst")]
    pub checkfirst: bool,

    /// Log output format.
    ///
    /// _Default:_ `text`
    #[serde(default = "General::log_format")]
    pub log_format: LogFormat,
}

impl Default for General {
    fn default() -> Self {
        Self {
            database_url: Self::database_url(),
            guards: Self::guards(),
            checkfirst: Self::checkfirst(),
            log_format: Self::log_format(),
        }
    }
}

impl General {
    fn env_bool_or_default(env_var: &str, default: bool) -> bool {
        env::var(env_var)
            .ok()
            .and_then(|v| match v.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(true),
                "false" | "0" | "no" | "off" => Some(false),
                _ => None,
            })
            .unwrap_or(default)
    }

    fn env_option_string(env_var: &str) -> Option<String> {
        env::var(env_var).ok().filter(|s| !s.is_empty())
    }

    fn env_enum_or_default<T: FromStr + Default>(env_var: &str) -> T {
        env::var(env_var)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    fn database_url() -> Option<String> {
        Self::env_option_string("PGFDW_DATABASE_URL")
    }

    fn guards() -> Guards {
        Self::env_enum_or_default("PGFDW_GUARDS")
    }

    fn checkfirst() -> bool {
        Self::env_bool_or_default("PGFDW_CHECKFIRST", true)
    }

    /// Log format from `PGFDW_LOG_FORMAT`, used before the config file is read.
    pub fn log_format() -> LogFormat {
        Self::env_enum_or_default("PGFDW_LOG_FORMAT")
    }
}
