use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using OnceError
pub type Result<T> = std::result::Result<T, OnceError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers and tests can match on
/// without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnceErrorKind {
    /// A recorded migration's script text no longer matches its ledger hash
    MigrationModified,
    /// The ledger returned something that is not a valid ledger row
    LedgerCorrupt,
    /// The database session failed to run a statement
    Execution,

    // Migration sources
    InvalidSource,
    NotFound,

    Io,
    Serialization,
    Internal,
}

impl OnceErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            OnceErrorKind::MigrationModified => "ERR_MIGRATION_MODIFIED",
            OnceErrorKind::LedgerCorrupt => "ERR_LEDGER_CORRUPT",
            OnceErrorKind::Execution => "ERR_EXECUTION",
            OnceErrorKind::InvalidSource => "ERR_INVALID_SOURCE",
            OnceErrorKind::NotFound => "ERR_NOT_FOUND",
            OnceErrorKind::Io => "ERR_IO",
            OnceErrorKind::Serialization => "ERR_SERIALIZATION",
            OnceErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification (`kind`) for programmatic handling plus optional
/// context: the operation that failed and the migration it concerned.
#[derive(Debug, Clone, PartialEq)]
pub struct OnceError {
    kind: OnceErrorKind,
    op: Option<String>,
    migration: Option<String>,
    message: String,
}

impl OnceError {
    pub fn new(kind: OnceErrorKind) -> Self {
        Self {
            kind,
            op: None,
            migration: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the name of the migration the error concerns
    pub fn with_migration(mut self, name: impl Into<String>) -> Self {
        self.migration = Some(name.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> OnceErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn migration(&self) -> Option<&str> {
        self.migration.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for OnceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(migration) = &self.migration {
            write!(f, " (migration: {})", migration)?;
        }
        Ok(())
    }
}

impl std::error::Error for OnceError {}

// ========== End Error Facility ==========

/// Domain errors raised by migration logic
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MigrationError {
    /// Script text changed after the migration was recorded
    #[error("Migration {name} has been modified")]
    Modified {
        name: String,
        recorded: String,
        current: String,
    },

    /// Ledger lookup returned a row without a text `hash` column
    #[error("Ledger row for migration {name} has no readable hash")]
    LedgerRowMalformed { name: String },

    /// A migration source file could not be turned into a migration
    #[error("Invalid migration source {}: {reason}", path.display())]
    InvalidSource { path: PathBuf, reason: String },
}

impl From<MigrationError> for OnceError {
    fn from(err: MigrationError) -> Self {
        let message = err.to_string();
        match err {
            MigrationError::Modified {
                name,
                recorded,
                current,
            } => {
                tracing::debug!(migration = %name, %recorded, %current, "hash mismatch");
                OnceError::new(OnceErrorKind::MigrationModified)
                    .with_op("verify_migration")
                    .with_migration(name)
                    .with_message(message)
            }
            MigrationError::LedgerRowMalformed { name } => {
                OnceError::new(OnceErrorKind::LedgerCorrupt)
                    .with_op("lookup_migration")
                    .with_migration(name)
                    .with_message(message)
            }
            MigrationError::InvalidSource { .. } => OnceError::new(OnceErrorKind::InvalidSource)
                .with_op("load_migrations")
                .with_message(message),
        }
    }
}

/// Create an execution error for a failed statement
pub fn execution_error(op: &str, reason: impl std::fmt::Display) -> OnceError {
    OnceError::new(OnceErrorKind::Execution)
        .with_op(op)
        .with_message(reason.to_string())
}

/// Create an IO error
pub fn io_error(op: &str, err: std::io::Error) -> OnceError {
    let kind = if err.kind() == std::io::ErrorKind::NotFound {
        OnceErrorKind::NotFound
    } else {
        OnceErrorKind::Io
    };
    OnceError::new(kind).with_op(op).with_message(err.to_string())
}
