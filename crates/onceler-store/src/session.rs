//! rusqlite-backed database session
//!
//! Statement text is split with rusqlite's `Batch`, so a migration script
//! may hold several statements. Each statement binds the same positional
//! parameters; parameterized calls are expected to be single statements.

use onceler_core::session::{DatabaseSession, Row, Value};
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Batch, Connection, Statement};

use crate::errors::{from_rusqlite, Result};

/// Session over a borrowed connection
pub struct SqliteSession<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSession<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DatabaseSession for SqliteSession<'_> {
    /// Returns the rows of the last row-producing statement in `statement`
    fn execute(&mut self, statement: &str, params: &[Value]) -> Result<Vec<Row>> {
        let bound: Vec<SqlValue> = params.iter().map(to_sql_value).collect();

        let mut batch = Batch::new(self.conn, statement);
        let mut rows = Vec::new();
        while let Some(mut stmt) = batch.next().map_err(|e| from_rusqlite("prepare", e))? {
            if let Some(produced) = run_statement(&mut stmt, &bound)? {
                rows = produced;
            }
        }
        Ok(rows)
    }
}

fn run_statement(stmt: &mut Statement<'_>, params: &[SqlValue]) -> Result<Option<Vec<Row>>> {
    if stmt.column_count() == 0 {
        stmt.execute(params_from_iter(params.iter()))
            .map_err(|e| from_rusqlite("execute", e))?;
        return Ok(None);
    }

    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();

    let mut query = stmt
        .query(params_from_iter(params.iter()))
        .map_err(|e| from_rusqlite("query", e))?;

    let mut rows = Vec::new();
    while let Some(row) = query.next().map_err(|e| from_rusqlite("query", e))? {
        let mut values = Vec::with_capacity(columns.len());
        for (idx, name) in columns.iter().enumerate() {
            let value = row.get_ref(idx).map_err(|e| from_rusqlite("query", e))?;
            values.push((name.clone(), from_value_ref(value)));
        }
        rows.push(Row::new(values));
    }
    Ok(Some(rows))
}

fn to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Integer(i) => SqlValue::Integer(*i),
        Value::Real(f) => SqlValue::Real(*f),
        Value::Text(s) => SqlValue::Text(s.clone()),
        Value::Blob(b) => SqlValue::Blob(b.clone()),
    }
}

fn from_value_ref(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onceler_core::OnceErrorKind;

    fn session_conn() -> Connection {
        Connection::open_in_memory().unwrap()
    }

    #[test]
    fn test_positional_params_bind_in_order() {
        let conn = session_conn();
        let mut session = SqliteSession::new(&conn);

        session
            .execute("CREATE TABLE kv (k TEXT, v INTEGER)", &[])
            .unwrap();
        session
            .execute(
                "INSERT INTO kv (k, v) VALUES (?, ?)",
                &[Value::from("a"), Value::Integer(1)],
            )
            .unwrap();

        let rows = session
            .execute("SELECT k, v FROM kv WHERE k = ?", &[Value::from("a")])
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_text("k"), Some("a"));
        assert_eq!(rows[0].get("v"), Some(&Value::Integer(1)));
    }

    #[test]
    fn test_multi_statement_script_runs_every_statement() {
        let conn = session_conn();
        let mut session = SqliteSession::new(&conn);

        let rows = session
            .execute(
                "CREATE TABLE a (x INT);\nINSERT INTO a VALUES (1);\nINSERT INTO a VALUES (2);",
                &[],
            )
            .unwrap();
        assert!(rows.is_empty());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM a", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_blank_statement_is_a_noop() {
        let conn = session_conn();
        let mut session = SqliteSession::new(&conn);

        assert!(session.execute("  \n -- nothing\n", &[]).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_sql_is_an_error_not_empty_rows() {
        let conn = session_conn();
        let mut session = SqliteSession::new(&conn);

        let err = session.execute("INVALID SQL", &[]).unwrap_err();
        assert_eq!(err.kind(), OnceErrorKind::Execution);
    }

    #[test]
    fn test_transaction_control_through_execute() {
        let conn = session_conn();
        let mut session = SqliteSession::new(&conn);

        session.execute("CREATE TABLE t (x INT)", &[]).unwrap();
        session.execute("BEGIN TRANSACTION", &[]).unwrap();
        session.execute("INSERT INTO t VALUES (1)", &[]).unwrap();
        session.execute("ROLLBACK", &[]).unwrap();

        let rows = session.execute("SELECT x FROM t", &[]).unwrap();
        assert!(rows.is_empty());
        assert!(conn.is_autocommit());
    }
}
