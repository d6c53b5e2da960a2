//! Executor backed by a `tokio-postgres` client.

use async_trait::async_trait;
use tokio::spawn;
use tokio_postgres::{Client, NoTls};
use tracing::{debug, error};

use super::{exists_query, BackendError, Executor};
use crate::schema::ObjectKind;

impl From<tokio_postgres::Error> for BackendError {
    fn from(err: tokio_postgres::Error) -> Self {
        if let Some(db) = err.as_db_error() {
            BackendError {
                severity: db.severity().into(),
                code: db.code().code().into(),
                message: db.message().into(),
                detail: db.detail().map(String::from),
            }
        } else {
            BackendError::client(err)
        }
    }
}

/// Runs statements on a single PostgreSQL connection.
pub struct PostgresExecutor {
    client: Client,
}

impl PostgresExecutor {
    /// Wrap an already connected client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect to the database at `url`.
    ///
    /// The connection is driven on a background task until the client is dropped.
    pub async fn connect(url: &str) -> Result<Self, tokio_postgres::Error> {
        let (client, connection) = tokio_postgres::connect(url, NoTls).await?;

        spawn(async move {
            if let Err(err) = connection.await {
                error!("[fdw] connection error: {}", err);
            }
        });

        debug!("[fdw] connected");

        Ok(Self::new(client))
    }
}

#[async_trait]
impl Executor for PostgresExecutor {
    async fn execute(&mut self, sql: &str) -> Result<(), BackendError> {
        self.client.batch_execute(sql).await?;
        Ok(())
    }

    async fn exists(
        &mut self,
        kind: ObjectKind,
        schema: Option<&str>,
        name: &str,
    ) -> Result<bool, BackendError> {
        let query = exists_query(kind, schema);
        let row = match (kind, schema) {
            (ObjectKind::Table, Some(schema)) => {
                self.client.query_one(query, &[&name, &schema]).await?
            }
            _ => self.client.query_one(query, &[&name]).await?,
        };

        Ok(row.try_get(0)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_client_error_has_no_sqlstate() {
        let err = "no_such_setting=1"
            .parse::<tokio_postgres::Config>()
            .unwrap_err();
        let backend = BackendError::from(err);

        assert!(backend.is_client());
        assert!(backend.code.is_empty());
        assert!(!backend.message.is_empty());
        assert!(backend.detail.is_none());
    }
}
