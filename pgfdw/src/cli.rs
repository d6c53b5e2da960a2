//! Command line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pgfdw_config::{Config, General, Guards};
use thiserror::Error;
use tracing::{error, info};

use crate::convert::specs;
use crate::executor::{Executor, PostgresExecutor, Recorder};
use crate::fdw::{self, Fdw};
use crate::logger::logger;
use crate::statement::{self, create_server, create_table, drop_statement};

/// pgfdw creates and drops PostgreSQL foreign servers and foreign tables.
#[derive(Parser, Debug)]
#[command(name = "pgfdw", version)]
pub struct Cli {
    /// Path to the configuration file. Default: "pgfdw.toml"
    #[arg(short, long, default_value = "pgfdw.toml")]
    pub config: PathBuf,
    /// Connection URL. Overrides general.database_url.
    #[arg(short, long)]
    pub database_url: Option<String>,
    /// Subcommand.
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the statements that create everything in the config file,
    /// as `apply` would send them to an empty database.
    Plan,

    /// Create servers, then foreign tables.
    Apply {
        /// Print the statements, don't execute them.
        #[arg(long)]
        dry_run: bool,
    },

    /// Drop foreign tables, then servers.
    Teardown {
        /// Drop objects that depend on the servers too.
        #[arg(long)]
        cascade: bool,

        /// Print the statements, don't execute them.
        #[arg(long)]
        dry_run: bool,
    },

    /// Check the configuration file for errors.
    Configcheck,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Config(#[from] pgfdw_config::Error),

    #[error("{0}")]
    Statement(#[from] statement::Error),

    #[error("{0}")]
    Fdw(#[from] fdw::Error),

    #[error("connect: {0}")]
    Connect(#[from] tokio_postgres::Error),

    #[error("no database url, set general.database_url or pass --database-url")]
    NoDatabaseUrl,
}

/// Load config, set up logging and run the command.
pub async fn run(cli: Cli) -> Result<(), Error> {
    let config = match Config::load(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            logger(General::log_format());
            return Err(err.into());
        }
    };

    logger(config.general.log_format);
    info!("loaded \"{}\"", cli.config.display());
    config.check()?;

    let database_url = cli
        .database_url
        .clone()
        .or_else(|| config.general.database_url.clone());

    match cli.command {
        Commands::Plan => {
            let statements = plan(&config)?;
            print_statements(&statements);
        }

        Commands::Configcheck => {
            configcheck(&config)?;
            info!(
                "\"{}\" is valid: {} servers, {} foreign tables",
                cli.config.display(),
                config.servers.len(),
                config.tables.len()
            );
        }

        Commands::Apply { dry_run } => {
            if dry_run {
                let mut recorder = Recorder::new();
                apply(&config, &mut recorder).await?;
                print_statements(recorder.statements());
            } else {
                let url = database_url.ok_or(Error::NoDatabaseUrl)?;
                let mut executor = PostgresExecutor::connect(&url).await?;
                apply(&config, &mut executor).await?;
            }
        }

        Commands::Teardown { cascade, dry_run } => {
            if dry_run {
                let mut recorder = Recorder::new().assume_exists();
                teardown(&config, &mut recorder, cascade).await?;
                print_statements(recorder.statements());
            } else {
                let url = database_url.ok_or(Error::NoDatabaseUrl)?;
                let mut executor = PostgresExecutor::connect(&url).await?;
                teardown(&config, &mut executor, cascade).await?;
            }
        }
    }

    Ok(())
}

/// Create statements for everything in the config, servers first.
///
/// `IF NOT EXISTS` is only written with checkfirst and native guards. With
/// catalog guards the existence check is a separate query, so the statements
/// are unguarded, same as `apply` sends them.
pub fn plan(config: &Config) -> Result<Vec<String>, Error> {
    let (servers, tables) = specs(config);
    let native = config.general.checkfirst && config.general.guards == Guards::Native;
    let mut statements = vec![];

    for server in &servers {
        statements.push(if native {
            statement::create_server_if_not_exists(server)?
        } else {
            create_server(server)?
        });
    }

    for table in &tables {
        statements.push(create_table(table, native)?);
    }

    Ok(statements)
}

/// Build every create and drop statement, reporting the first error.
pub fn configcheck(config: &Config) -> Result<(), Error> {
    let (servers, tables) = specs(config);

    for server in &servers {
        create_server(server)?;
        drop_statement(&server.drop_directive())?;
    }

    for table in &tables {
        create_table(table, false)?;
        drop_statement(&table.drop_directive())?;
    }

    Ok(())
}

/// Create everything in the config.
pub async fn apply<E: Executor>(config: &Config, executor: &mut E) -> Result<(), Error> {
    let (servers, tables) = specs(config);
    let mut fdw = Fdw::with_guards(executor, config.general.guards);

    if let Err(err) = fdw
        .create_all(&servers, &tables, config.general.checkfirst)
        .await
    {
        error!("[fdw] apply failed: {}", err);
        return Err(err.into());
    }

    info!(
        "[fdw] applied {} servers and {} foreign tables",
        servers.len(),
        tables.len()
    );

    Ok(())
}

/// Drop everything in the config.
pub async fn teardown<E: Executor>(
    config: &Config,
    executor: &mut E,
    cascade: bool,
) -> Result<(), Error> {
    let (servers, tables) = specs(config);
    let mut fdw = Fdw::with_guards(executor, config.general.guards);

    if let Err(err) = fdw
        .drop_all(&servers, &tables, config.general.checkfirst, cascade)
        .await
    {
        error!("[fdw] teardown failed: {}", err);
        return Err(err.into());
    }

    info!(
        "[fdw] dropped {} foreign tables and {} servers",
        tables.len(),
        servers.len()
    );

    Ok(())
}

fn print_statements(statements: &[String]) {
    for statement in statements {
        println!("{};", statement);
    }
}
