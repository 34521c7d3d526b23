use std::collections::BTreeMap;
use std::future::ready;

use serde_json::Value;

use super::erased::{BoxedCall, Erased, ErasedTool};
use super::{Error, Tool, ToolCallRequest, ToolCallResult, ToolDefinition};

/// An executor that handles tool call requests from the runtime.
///
/// Every request resolves to text. Unknown tools and malformed arguments
/// are reported through the result content instead of being dropped.
#[derive(Default)]
pub struct Executor {
    tools: BTreeMap<String, Box<dyn ErasedTool>>,
}

impl Executor {
    /// Registers a tool, replacing any tool with the same name.
    pub fn add_tool<T: Tool>(&mut self, tool: T) {
        let name = tool.name().to_owned();
        if self.tools.insert(name.clone(), Box::new(Erased(tool))).is_some() {
            warn!("tool registered twice, replacing: {name}");
        }
    }

    /// Returns the names of the registered tools, sorted.
    #[inline]
    pub fn tool_names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    /// Returns the definitions of the registered tools, sorted by name.
    #[inline]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|tool| tool.definition()).collect()
    }

    /// Dispatches one request, returning a future that is independent of
    /// the executor.
    pub fn call(
        &self,
        request: ToolCallRequest,
    ) -> impl Future<Output = ToolCallResult> + Send + 'static {
        let ToolCallRequest {
            id,
            name,
            arguments,
        } = request;
        trace!("calling `{name}` ({id}) with {arguments}");
        let fut = self.dispatch(&name, arguments);
        async move {
            let content = fut.await.unwrap_or_else(|err| err.to_string());
            ToolCallResult { id, content }
        }
    }

    fn dispatch(&self, name: &str, arguments: Value) -> BoxedCall {
        match self.tools.get(name) {
            Some(tool) => tool.call(arguments),
            None => {
                warn!("tool not found: {name}");
                let err = Error::not_found().with_reason(format!("`{name}`"));
                Box::pin(ready(Err(err)))
            }
        }
    }
}
