//! Core logic including tool execution and remote run polling.
//!
//! Tools are what a hosting agent runtime calls by name with structured
//! arguments. Every call resolves to text, errors included, so the
//! runtime can relay the outcome without any error-handling contract of
//! its own.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

pub mod poll;
pub mod tool;

pub use poll::{PollError, PollPolicy, Poller, Sleeper, TokioSleeper};
pub use tool::{Executor as ToolExecutor, Tool};
