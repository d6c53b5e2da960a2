//! Executor that records statements instead of running them.

use async_trait::async_trait;

use super::{BackendError, Executor};
use crate::schema::ObjectKind;

/// Keeps every statement it's given. Used for dry runs.
///
/// Catalog checks give the same answer for every object: missing by default,
/// present after [`Recorder::assume_exists`]. Creates want the first, drops
/// the second, so a dry run shows every statement that could be sent.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    statements: Vec<String>,
    exists: bool,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report every object as already present in catalog checks.
    pub fn assume_exists(mut self) -> Self {
        self.exists = true;
        self
    }

    /// Statements recorded so far, in order.
    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    pub fn into_statements(self) -> Vec<String> {
        self.statements
    }
}

#[async_trait]
impl Executor for Recorder {
    async fn execute(&mut self, sql: &str) -> Result<(), BackendError> {
        self.statements.push(sql.to_string());
        Ok(())
    }

    async fn exists(
        &mut self,
        _kind: ObjectKind,
        _schema: Option<&str>,
        _name: &str,
    ) -> Result<bool, BackendError> {
        Ok(self.exists)
    }
}
