//! Core types shared across OpCall facilities
//!
//! This crate provides foundational types used by both the error and
//! logging facilities of the dispatcher:
//!
//! - **Correlation types**: DispatcherId, RunId
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{DispatcherId, RunId};
