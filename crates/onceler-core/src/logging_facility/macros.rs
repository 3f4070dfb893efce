//! Lifecycle logging macros
//!
//! The layer that owns an operation emits exactly one `start` and one
//! `end`/`end_error` event for it. Everything below that layer logs with
//! plain `tracing::debug!`.

/// Log the start of an operation
///
/// ```
/// # use onceler_core::log_op_start;
/// log_op_start!("migrate");
/// log_op_start!("migrate", batch_len = 3);
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = onceler_core_types::schema::EVENT_START,
        );
    };
    ($op:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = onceler_core_types::schema::EVENT_START,
            $($field)*
        );
    };
}

/// Log the successful end of an operation
///
/// ```
/// # use onceler_core::log_op_end;
/// log_op_end!("migrate", duration_ms = 42);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = onceler_core_types::schema::EVENT_END,
            duration_ms = $duration,
        );
    };
    ($op:expr, duration_ms = $duration:expr, $($field:tt)*) => {
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = onceler_core_types::schema::EVENT_END,
            duration_ms = $duration,
            $($field)*
        );
    };
}

/// Log an operation failure
///
/// `$err` is anything convertible into [`OnceError`](crate::errors::OnceError).
///
/// ```
/// # use onceler_core::log_op_error;
/// # use onceler_core::errors::{OnceError, OnceErrorKind};
/// let err = OnceError::new(OnceErrorKind::Execution);
/// log_op_error!("migrate", err, duration_ms = 10);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr) => {{
        let once_err: $crate::errors::OnceError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = onceler_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?once_err.kind(),
            err.code = once_err.code(),
        );
    }};
    ($op:expr, $err:expr, duration_ms = $duration:expr, $($field:tt)*) => {{
        let once_err: $crate::errors::OnceError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = onceler_core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?once_err.kind(),
            err.code = once_err.code(),
            $($field)*
        );
    }};
}
