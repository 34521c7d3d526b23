//! Travel tools for an assistant runtime: today's date, country facts and
//! accommodation search on a scraping platform.
//!
//! The crate includes a CLI tool for calling the tools from the terminal. And
//! you can also use it as a library to hand the tools to your own runtime.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

mod toolbox;
pub mod tools;

pub use toolbox::{Toolbox, ToolboxBuilder};

/// Re-exports of [`travel_agent_core`] crate.
pub mod core {
    pub use travel_agent_core::*;
}
