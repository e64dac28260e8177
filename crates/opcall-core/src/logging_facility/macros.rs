//! Dispatcher lifecycle macros
//!
//! Every lifecycle event belongs to one dispatcher, so the dispatcher id is a
//! required argument rather than an optional field. End and error events take
//! the `Instant` the operation started at and derive `duration_ms` from it.
//! Field keys come from `opcall_core_types::schema`.
//!
//! Extra fields follow the fixed arguments using the usual `tracing` syntax.

/// Log the start of a dispatcher operation
///
/// # Example
///
/// ```
/// # use opcall_core::log_op_start;
/// # use opcall_core::opcall_core_types::DispatcherId;
/// let id = DispatcherId::new();
/// log_op_start!("submit", id);
/// log_op_start!("submit", id, input_kind = "token");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr, $dispatcher_id:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            { $crate::opcall_core_types::schema::FIELD_OP } = $op,
            { $crate::opcall_core_types::schema::FIELD_EVENT } =
                $crate::opcall_core_types::schema::EVENT_START,
            { $crate::opcall_core_types::schema::FIELD_DISPATCHER_ID } = %$dispatcher_id,
            $($($field)*)?
        )
    };
}

/// Log the successful end of a dispatcher operation
///
/// # Example
///
/// ```
/// # use opcall_core::log_op_end;
/// # use opcall_core::opcall_core_types::DispatcherId;
/// let id = DispatcherId::new();
/// let started = std::time::Instant::now();
/// log_op_end!("submit", id, started, result = ?Some(20.0));
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, $dispatcher_id:expr, $started:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = module_path!(),
            { $crate::opcall_core_types::schema::FIELD_OP } = $op,
            { $crate::opcall_core_types::schema::FIELD_EVENT } =
                $crate::opcall_core_types::schema::EVENT_END,
            { $crate::opcall_core_types::schema::FIELD_DISPATCHER_ID } = %$dispatcher_id,
            { $crate::opcall_core_types::schema::FIELD_DURATION_MS } =
                $started.elapsed().as_millis() as u64,
            $($($field)*)?
        )
    };
}

/// Log a failed dispatcher operation
///
/// `$err` is anything convertible into `ExError`. The event carries its
/// stable kind and code, and the command name when the error names one.
///
/// # Example
///
/// ```
/// # use opcall_core::{log_op_error, errors::DispatchError};
/// # use opcall_core::opcall_core_types::DispatcherId;
/// let id = DispatcherId::new();
/// let started = std::time::Instant::now();
/// let err = DispatchError::UnknownCommand { name: "median".to_string() };
/// log_op_error!("submit", id, started, err);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $dispatcher_id:expr, $started:expr, $err:expr $(, $($field:tt)*)?) => {{
        let ex_err = $crate::errors::ExError::from($err);
        tracing::error!(
            component = module_path!(),
            { $crate::opcall_core_types::schema::FIELD_OP } = $op,
            { $crate::opcall_core_types::schema::FIELD_EVENT } =
                $crate::opcall_core_types::schema::EVENT_END_ERROR,
            { $crate::opcall_core_types::schema::FIELD_DISPATCHER_ID } = %$dispatcher_id,
            { $crate::opcall_core_types::schema::FIELD_DURATION_MS } =
                $started.elapsed().as_millis() as u64,
            { $crate::opcall_core_types::schema::FIELD_ERR_KIND } = ?ex_err.kind(),
            { $crate::opcall_core_types::schema::FIELD_ERR_CODE } = ex_err.code(),
            { $crate::opcall_core_types::schema::FIELD_COMMAND } = ex_err.command(),
            $($($field)*)?
        );
    }};
}
