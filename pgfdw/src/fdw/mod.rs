//! Create and drop foreign servers and foreign tables.
//!
//! [`Fdw`] builds the statement, optionally checks the catalog, and hands
//! the text to an [`Executor`]. Nothing is sent if the statement can't be
//! built, and nothing is retried.

mod error;

use tracing::{debug, info};

pub use error::Error;
pub use pgfdw_config::Guards;

use crate::executor::{BackendError, Executor};
use crate::schema::{DropDirective, ObjectKind, ServerSpec, TableSpec};
use crate::statement::{
    create_server, create_server_if_not_exists, create_table, drop_statement,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Create,
    Drop,
}

/// DDL façade over one executor.
pub struct Fdw<'a, E: Executor> {
    executor: &'a mut E,
    guards: Guards,
}

impl<'a, E: Executor> Fdw<'a, E> {
    /// Use native `IF [NOT] EXISTS` guards.
    pub fn new(executor: &'a mut E) -> Self {
        Self::with_guards(executor, Guards::Native)
    }

    pub fn with_guards(executor: &'a mut E, guards: Guards) -> Self {
        Self { executor, guards }
    }

    /// Create a foreign server.
    ///
    /// With `checkfirst`, an existing server is left alone.
    pub async fn create_server(&mut self, spec: &ServerSpec, checkfirst: bool) -> Result<(), Error> {
        let sql = match (checkfirst, self.guards) {
            (true, Guards::Native) => create_server_if_not_exists(spec)?,
            _ => create_server(spec)?,
        };

        if checkfirst && self.guards == Guards::Catalog {
            let exists = self
                .executor
                .exists(ObjectKind::Server, None, &spec.name)
                .await?;
            if exists {
                info!("[fdw] server \"{}\" already exists, skipping", spec.name);
                return Ok(());
            }
        }

        self.run(&sql, Action::Create, ObjectKind::Server, &spec.name, checkfirst)
            .await?;

        info!("[fdw] created server \"{}\"", spec.name);

        Ok(())
    }

    /// Create a foreign table.
    ///
    /// With `checkfirst`, an existing table is left alone.
    pub async fn create_table(&mut self, spec: &TableSpec, checkfirst: bool) -> Result<(), Error> {
        let native = checkfirst && self.guards == Guards::Native;
        let sql = create_table(spec, native)?;
        let name = spec.drop_directive().display_name();

        if checkfirst && self.guards == Guards::Catalog {
            let exists = self
                .executor
                .exists(ObjectKind::Table, spec.schema.as_deref(), &spec.name)
                .await?;
            if exists {
                info!("[fdw] foreign table \"{}\" already exists, skipping", name);
                return Ok(());
            }
        }

        self.run(&sql, Action::Create, ObjectKind::Table, &name, checkfirst)
            .await?;

        info!(
            "[fdw] created foreign table \"{}\" on server \"{}\"",
            name, spec.server
        );

        Ok(())
    }

    /// Drop a foreign server or table.
    ///
    /// `directive.if_exists` is the checkfirst flag: a missing object is
    /// skipped instead of reported.
    pub async fn drop(&mut self, directive: &DropDirective) -> Result<(), Error> {
        let checkfirst = directive.if_exists;
        let name = directive.display_name();

        let sql = match self.guards {
            Guards::Native => drop_statement(directive)?,
            Guards::Catalog => drop_statement(&directive.clone().if_exists(false))?,
        };

        if checkfirst && self.guards == Guards::Catalog {
            let exists = self
                .executor
                .exists(directive.kind, directive.schema.as_deref(), &directive.name)
                .await?;
            if !exists {
                info!("[fdw] {} \"{}\" does not exist, skipping", directive.kind, name);
                return Ok(());
            }
        }

        self.run(&sql, Action::Drop, directive.kind, &name, checkfirst)
            .await?;

        info!("[fdw] dropped {} \"{}\"", directive.kind, name);

        Ok(())
    }

    /// Create servers, then the tables that use them.
    ///
    /// Every statement is built before the first one is sent, so an invalid
    /// table doesn't leave its servers behind.
    pub async fn create_all(
        &mut self,
        servers: &[ServerSpec],
        tables: &[TableSpec],
        checkfirst: bool,
    ) -> Result<(), Error> {
        for server in servers {
            create_server(server)?;
        }
        for table in tables {
            create_table(table, false)?;
        }

        for server in servers {
            self.create_server(server, checkfirst).await?;
        }
        for table in tables {
            self.create_table(table, checkfirst).await?;
        }

        Ok(())
    }

    /// Drop tables, then the servers they use.
    ///
    /// `cascade` applies to servers only.
    pub async fn drop_all(
        &mut self,
        servers: &[ServerSpec],
        tables: &[TableSpec],
        checkfirst: bool,
        cascade: bool,
    ) -> Result<(), Error> {
        let directives = tables
            .iter()
            .map(|table| table.drop_directive().if_exists(checkfirst))
            .chain(servers.iter().map(|server| {
                server
                    .drop_directive()
                    .if_exists(checkfirst)
                    .cascade(cascade)
            }))
            .collect::<Vec<_>>();

        for directive in &directives {
            drop_statement(directive)?;
        }

        for directive in &directives {
            self.drop(directive).await?;
        }

        Ok(())
    }

    /// Send a statement and classify the backend's answer.
    async fn run(
        &mut self,
        sql: &str,
        action: Action,
        kind: ObjectKind,
        name: &str,
        checkfirst: bool,
    ) -> Result<(), Error> {
        debug!("[fdw] {}", sql);

        let err = match self.executor.execute(sql).await {
            Ok(()) => return Ok(()),
            Err(err) => err,
        };

        Err(classify(err, action, kind, name, checkfirst))
    }
}

fn classify(
    err: BackendError,
    action: Action,
    kind: ObjectKind,
    name: &str,
    checkfirst: bool,
) -> Error {
    if checkfirst {
        return Error::Backend(err);
    }

    match action {
        Action::Create if err.is_duplicate() => Error::AlreadyExists {
            kind,
            name: name.into(),
            source: err,
        },
        Action::Drop if err.is_undefined() => Error::DoesNotExist {
            kind,
            name: name.into(),
            source: err,
        },
        _ => Error::Backend(err),
    }
}

#[cfg(test)]
mod test {
    use std::collections::{HashSet, VecDeque};

    use async_trait::async_trait;

    use super::*;
    use crate::executor::code;
    use crate::schema::ColumnSpec;
    use crate::statement;

    /// Executor that records statements and replays canned failures.
    #[derive(Default)]
    struct TestExecutor {
        statements: Vec<String>,
        failures: VecDeque<Option<BackendError>>,
        existing: HashSet<(ObjectKind, Option<String>, String)>,
        exists_calls: usize,
    }

    impl TestExecutor {
        fn failing(err: BackendError) -> Self {
            Self {
                failures: VecDeque::from([Some(err)]),
                ..Default::default()
            }
        }

        fn with_existing(kind: ObjectKind, schema: Option<&str>, name: &str) -> Self {
            let mut executor = Self::default();
            executor
                .existing
                .insert((kind, schema.map(String::from), name.into()));
            executor
        }
    }

    #[async_trait]
    impl Executor for TestExecutor {
        async fn execute(&mut self, sql: &str) -> Result<(), BackendError> {
            self.statements.push(sql.into());
            match self.failures.pop_front().flatten() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        async fn exists(
            &mut self,
            kind: ObjectKind,
            schema: Option<&str>,
            name: &str,
        ) -> Result<bool, BackendError> {
            self.exists_calls += 1;
            Ok(self
                .existing
                .contains(&(kind, schema.map(String::from), name.into())))
        }
    }

    /// Executor that only knows how to execute.
    #[derive(Default)]
    struct ExecuteOnly {
        statements: Vec<String>,
    }

    #[async_trait]
    impl Executor for ExecuteOnly {
        async fn execute(&mut self, sql: &str) -> Result<(), BackendError> {
            self.statements.push(sql.into());
            Ok(())
        }
    }

    fn server() -> ServerSpec {
        ServerSpec::new("myfdwserver", "myfdwextension").option("option1", "test")
    }

    fn table() -> TableSpec {
        TableSpec::new("myforeigntable", "myfdwserver")
            .column(ColumnSpec::new("col1", "integer"))
            .column(ColumnSpec::new("col2", "text"))
            .option("tableoption", "optionvalue")
    }

    #[tokio::test]
    async fn test_create_native() {
        let mut executor = TestExecutor::default();
        let mut fdw = Fdw::new(&mut executor);

        fdw.create_server(&server(), false).await.unwrap();
        fdw.create_server(&server(), true).await.unwrap();
        fdw.create_table(&table(), true).await.unwrap();

        assert_eq!(
            executor.statements,
            vec![
                r#"CREATE SERVER "myfdwserver" FOREIGN DATA WRAPPER "myfdwextension" OPTIONS (option1 'test')"#,
                r#"CREATE SERVER IF NOT EXISTS "myfdwserver" FOREIGN DATA WRAPPER "myfdwextension" OPTIONS (option1 'test')"#,
                r#"CREATE FOREIGN TABLE IF NOT EXISTS "myforeigntable" ("col1" integer, "col2" text) SERVER "myfdwserver" OPTIONS (tableoption 'optionvalue')"#,
            ]
        );
        assert_eq!(executor.exists_calls, 0);
    }

    #[tokio::test]
    async fn test_drop_native() {
        let mut executor = TestExecutor::default();
        let mut fdw = Fdw::new(&mut executor);

        fdw.drop(&DropDirective::table("myforeigntable").if_exists(true))
            .await
            .unwrap();
        fdw.drop(&DropDirective::server("myfdwserver").if_exists(true).cascade(true))
            .await
            .unwrap();

        assert_eq!(
            executor.statements,
            vec![
                r#"DROP FOREIGN TABLE IF EXISTS "myforeigntable""#,
                r#"DROP SERVER IF EXISTS "myfdwserver" CASCADE"#,
            ]
        );
    }

    #[tokio::test]
    async fn test_validation_before_execute() {
        let mut executor = TestExecutor::with_existing(ObjectKind::Table, None, "tbl");
        let mut fdw = Fdw::with_guards(&mut executor, Guards::Catalog);

        let bad = TableSpec::new("tbl", "srv")
            .column(ColumnSpec::new("id", "bigint"))
            .column(ColumnSpec::new("id", "bigint"));

        let err = fdw.create_table(&bad, true).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Statement(statement::Error::InvalidSpec { .. })
        ));

        let err = fdw
            .drop(&DropDirective::table("tbl").cascade(true))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Statement(statement::Error::UnsupportedOption(_))
        ));

        assert!(executor.statements.is_empty());
        assert_eq!(executor.exists_calls, 0);
    }

    #[tokio::test]
    async fn test_already_exists() {
        let mut backend = BackendError::new(code::DUPLICATE_OBJECT, "server \"myfdwserver\" already exists");
        backend.detail = Some("original detail".into());
        let mut executor = TestExecutor::failing(backend.clone());
        let mut fdw = Fdw::new(&mut executor);

        let err = fdw.create_server(&server(), false).await.unwrap_err();
        match err {
            Error::AlreadyExists {
                kind,
                ref name,
                ref source,
            } => {
                assert_eq!(kind, ObjectKind::Server);
                assert_eq!(name, "myfdwserver");
                assert_eq!(source, &backend);
            }
            ref err => panic!("unexpected error: {:?}", err),
        }
        assert_eq!(err.backend(), Some(&backend));
    }

    #[tokio::test]
    async fn test_does_not_exist() {
        let backend = BackendError::new(code::UNDEFINED_TABLE, "foreign table \"tbl\" does not exist");
        let mut executor = TestExecutor::failing(backend.clone());
        let mut fdw = Fdw::new(&mut executor);

        let err = fdw.drop(&DropDirective::table("tbl")).await.unwrap_err();
        assert!(matches!(
            err,
            Error::DoesNotExist { kind: ObjectKind::Table, ref name, .. } if name == "tbl"
        ));
        assert_eq!(err.backend(), Some(&backend));
    }

    #[tokio::test]
    async fn test_missing_server_on_create_is_backend_error() {
        // Creating a table on a missing server is not "table does not exist".
        let backend = BackendError::new(code::UNDEFINED_OBJECT, "server \"srv\" does not exist");
        let mut executor = TestExecutor::failing(backend.clone());
        let mut fdw = Fdw::new(&mut executor);

        let err = fdw.create_table(&table(), false).await.unwrap_err();
        assert!(matches!(err, Error::Backend(ref err) if err == &backend));
    }

    #[tokio::test]
    async fn test_checkfirst_errors_are_backend_errors() {
        let backend = BackendError::new(code::DUPLICATE_TABLE, "relation already exists");
        let mut executor = TestExecutor::failing(backend.clone());
        let mut fdw = Fdw::new(&mut executor);

        let err = fdw.create_table(&table(), true).await.unwrap_err();
        assert!(matches!(err, Error::Backend(ref err) if err == &backend));
    }

    #[tokio::test]
    async fn test_other_errors_unchanged() {
        let backend = BackendError::new("2BP01", "cannot drop server myfdwserver because other objects depend on it");
        let mut executor = TestExecutor::failing(backend.clone());
        let mut fdw = Fdw::new(&mut executor);

        let err = fdw
            .drop(&DropDirective::server("myfdwserver"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Backend(ref err) if err == &backend));
        assert_eq!(executor.statements.len(), 1);
    }

    #[tokio::test]
    async fn test_catalog_guards() {
        let mut executor = TestExecutor::with_existing(ObjectKind::Server, None, "myfdwserver");
        let mut fdw = Fdw::with_guards(&mut executor, Guards::Catalog);

        // Server exists: skipped. Table doesn't: created without IF NOT EXISTS.
        fdw.create_server(&server(), true).await.unwrap();
        fdw.create_table(&table(), true).await.unwrap();

        // Table doesn't exist: skipped. Server does: dropped without IF EXISTS.
        fdw.drop(&DropDirective::table("myforeigntable").if_exists(true))
            .await
            .unwrap();
        fdw.drop(&DropDirective::server("myfdwserver").if_exists(true).cascade(true))
            .await
            .unwrap();

        assert_eq!(
            executor.statements,
            vec![
                r#"CREATE FOREIGN TABLE "myforeigntable" ("col1" integer, "col2" text) SERVER "myfdwserver" OPTIONS (tableoption 'optionvalue')"#,
                r#"DROP SERVER "myfdwserver" CASCADE"#,
            ]
        );
        assert_eq!(executor.exists_calls, 4);
    }

    #[tokio::test]
    async fn test_catalog_guards_schema() {
        let mut executor = TestExecutor::with_existing(ObjectKind::Table, Some("remote"), "events");
        let mut fdw = Fdw::with_guards(&mut executor, Guards::Catalog);

        let events = TableSpec::new("events", "srv")
            .schema("remote")
            .column(ColumnSpec::new("id", "bigint"));

        fdw.create_table(&events, true).await.unwrap();
        fdw.create_table(&events.clone().schema("other"), true)
            .await
            .unwrap();

        assert_eq!(
            executor.statements,
            vec![r#"CREATE FOREIGN TABLE "other"."events" ("id" bigint) SERVER "srv""#]
        );
    }

    #[tokio::test]
    async fn test_catalog_guards_unsupported() {
        let mut executor = ExecuteOnly::default();
        let mut fdw = Fdw::with_guards(&mut executor, Guards::Catalog);

        let err = fdw.create_server(&server(), true).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Backend(ref err) if err.code == code::FEATURE_NOT_SUPPORTED
        ));

        // Without checkfirst the catalog is never consulted.
        fdw.create_server(&server(), false).await.unwrap();
        assert_eq!(executor.statements.len(), 1);
    }

    #[tokio::test]
    async fn test_create_all_and_drop_all() {
        let mut executor = TestExecutor::default();
        let mut fdw = Fdw::new(&mut executor);

        fdw.create_all(&[server()], &[table()], true).await.unwrap();
        fdw.drop_all(&[server()], &[table()], true, true)
            .await
            .unwrap();

        assert_eq!(
            executor.statements,
            vec![
                r#"CREATE SERVER IF NOT EXISTS "myfdwserver" FOREIGN DATA WRAPPER "myfdwextension" OPTIONS (option1 'test')"#,
                r#"CREATE FOREIGN TABLE IF NOT EXISTS "myforeigntable" ("col1" integer, "col2" text) SERVER "myfdwserver" OPTIONS (tableoption 'optionvalue')"#,
                r#"DROP FOREIGN TABLE IF EXISTS "myforeigntable""#,
                r#"DROP SERVER IF EXISTS "myfdwserver" CASCADE"#,
            ]
        );
    }

    #[tokio::test]
    async fn test_create_all_validates_first() {
        let mut executor = TestExecutor::default();
        let mut fdw = Fdw::new(&mut executor);

        let bad = TableSpec::new("empty", "myfdwserver");
        let err = fdw
            .create_all(&[server()], &[table(), bad], true)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Statement(_)));
        assert!(executor.statements.is_empty());
    }

    #[tokio::test]
    async fn test_create_all_stops_on_error() {
        let backend = BackendError::new("42501", "permission denied for foreign-data wrapper myfdwextension");
        let mut executor = TestExecutor::failing(backend);
        let mut fdw = Fdw::new(&mut executor);

        let err = fdw
            .create_all(&[server()], &[table()], false)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Backend(_)));
        assert_eq!(executor.statements.len(), 1);
    }
}
