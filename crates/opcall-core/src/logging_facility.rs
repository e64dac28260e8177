//! Structured logging facility for OpCall
//!
//! This module provides:
//! - Single initialization point via `init(profile)`
//! - Lifecycle macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use opcall_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! The dispatcher owns lifecycle events for `submit` and `run`. The
//! parameter store and registry only emit `tracing::debug!` details.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
