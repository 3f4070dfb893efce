//! Shared test support: an in-memory session that records every statement
//! and keeps a tiny transactional ledger, enough to drive the manager
//! through its decision table without a real database.

#![allow(dead_code)]

use onceler_core::errors::{OnceError, OnceErrorKind, Result};
use onceler_core::manager::{
    BEGIN_TRANSACTION, COMMIT, INSERT_LEDGER_ROW, LEDGER_DDL, ROLLBACK, SELECT_LEDGER_HASH,
};
use onceler_core::session::{DatabaseSession, Row, Value};

#[derive(Default)]
pub struct FakeSession {
    pub statements: Vec<String>,
    pub params: Vec<Vec<Value>>,
    /// Committed ledger rows (name, hash)
    pub ledger: Vec<(String, String)>,
    /// Rows inserted inside the open transaction
    staged: Vec<(String, String)>,
    in_transaction: bool,
    fail_on: Vec<String>,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `statement` fail with [`sql_error`] every time it is executed
    pub fn fail_on(mut self, statement: &str) -> Self {
        self.fail_on.push(statement.to_string());
        self
    }

    /// Pretend `name` was applied earlier with `hash`
    pub fn with_recorded(mut self, name: &str, hash: &str) -> Self {
        self.ledger.push((name.to_string(), hash.to_string()));
        self
    }

    /// Statements that are neither ledger bookkeeping nor transaction control
    pub fn executed_scripts(&self) -> Vec<&str> {
        self.statements
            .iter()
            .map(String::as_str)
            .filter(|s| {
                ![
                    LEDGER_DDL,
                    BEGIN_TRANSACTION,
                    COMMIT,
                    ROLLBACK,
                    SELECT_LEDGER_HASH,
                    INSERT_LEDGER_ROW,
                ]
                .contains(&s)
            })
            .collect()
    }

    pub fn clear_log(&mut self) {
        self.statements.clear();
        self.params.clear();
    }

    fn visible_ledger(&self) -> impl Iterator<Item = &(String, String)> {
        self.ledger.iter().chain(self.staged.iter())
    }
}

/// The error the fake raises for statements registered with `fail_on`
pub fn sql_error(statement: &str) -> OnceError {
    OnceError::new(OnceErrorKind::Execution)
        .with_op("fake_execute")
        .with_message(format!("SQL Error near {statement:?}"))
}

impl DatabaseSession for FakeSession {
    fn execute(&mut self, statement: &str, params: &[Value]) -> Result<Vec<Row>> {
        self.statements.push(statement.to_string());
        self.params.push(params.to_vec());

        if self.fail_on.iter().any(|s| s == statement) {
            return Err(sql_error(statement));
        }

        match statement {
            BEGIN_TRANSACTION => {
                self.in_transaction = true;
                Ok(Vec::new())
            }
            COMMIT => {
                let staged = std::mem::take(&mut self.staged);
                self.ledger.extend(staged);
                self.in_transaction = false;
                Ok(Vec::new())
            }
            ROLLBACK => {
                self.staged.clear();
                self.in_transaction = false;
                Ok(Vec::new())
            }
            SELECT_LEDGER_HASH => {
                let name = params[0].as_text().unwrap_or_default().to_string();
                Ok(self
                    .visible_ledger()
                    .filter(|(n, _)| *n == name)
                    .map(|(_, h)| Row::new(vec![("hash".to_string(), Value::from(h.as_str()))]))
                    .collect())
            }
            INSERT_LEDGER_ROW => {
                assert!(self.in_transaction, "ledger insert outside a transaction");
                let name = params[0].as_text().unwrap_or_default().to_string();
                let hash = params[1].as_text().unwrap_or_default().to_string();
                self.staged.push((name, hash));
                Ok(Vec::new())
            }
            _ => Ok(Vec::new()),
        }
    }
}
