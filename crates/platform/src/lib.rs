//! An abstraction layer for remote task-execution platforms.
//!
//! A task platform runs long-lived jobs (scrapers, crawlers, batch
//! exports) on behalf of the caller. A job is started with a JSON input,
//! reports its progress through a status string, and leaves its output
//! in a dataset that can be downloaded once the job has finished.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to. Polling and result
//! handling live in the crates that consume this one.

#![deny(missing_docs)]

mod error;
mod platform;
mod run;

pub use error::*;
pub use platform::*;
pub use run::*;
