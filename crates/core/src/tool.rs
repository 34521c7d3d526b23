//! Tools that a hosting runtime calls by name.
//!
//! A tool declares a typed input and a JSON schema for it. The runtime
//! only ever hands over raw JSON, so [`Executor`] decodes the arguments
//! before the tool sees them and answers malformed ones on its behalf.

mod call;
mod erased;
mod error;
mod executor;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub use call::{ToolCallRequest, ToolCallResult, ToolDefinition};
pub use error::{Error, ErrorKind};
pub use executor::Executor;

/// The result of a tool call.
///
/// `Ok` carries the text for the runtime, whether the underlying lookup
/// went well or not. `Err` is reserved for calls that could not be
/// dispatched at all.
pub type ToolResult = Result<String, Error>;

/// A tool that can be called by the hosting runtime.
///
/// Tools hold only read-only state fixed at construction: a pinned date,
/// an HTTP client, a handle to a remote platform. Calls share nothing
/// else, so the runtime may run them in any order or concurrently.
pub trait Tool: Send + Sync + 'static {
    /// Arguments of the tool, decoded from the call's JSON.
    type Input: DeserializeOwned;

    /// Returns the name the runtime calls the tool by.
    fn name(&self) -> &str;

    /// Returns the description shown to the model. Leading and trailing
    /// whitespace is trimmed when the tool is advertised.
    fn description(&self) -> &str;

    /// Returns the JSON schema of [`Tool::Input`].
    fn parameter_schema(&self) -> &Value;

    /// Runs the tool.
    ///
    /// The returned future must not borrow `self`: clone whatever it needs
    /// before the `async` block.
    fn execute(
        &self,
        input: Self::Input,
    ) -> impl Future<Output = ToolResult> + Send + 'static;
}
