//! Database session contract
//!
//! The manager talks to storage only through [`DatabaseSession::execute`].
//! Transaction control (`BEGIN TRANSACTION`, `COMMIT`, `ROLLBACK`) goes
//! through the same entry point as ordinary statements.

use crate::errors::Result;

/// A scalar bound to a `?` placeholder or read back from a result column
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

/// One result row with named columns, in select-list order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    pub fn new(columns: Vec<(String, Value)>) -> Self {
        Self { columns }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn get_text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(Value::as_text)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Something that can run SQL on the caller's behalf.
///
/// Implementations must surface every execution failure as an `Err`; an
/// empty row set always means "ran fine, returned nothing". With empty
/// `params`, `statement` may hold several `;`-separated statements.
pub trait DatabaseSession {
    fn execute(&mut self, statement: &str, params: &[Value]) -> Result<Vec<Row>>;
}

impl<S: DatabaseSession + ?Sized> DatabaseSession for &mut S {
    fn execute(&mut self, statement: &str, params: &[Value]) -> Result<Vec<Row>> {
        (**self).execute(statement, params)
    }
}
