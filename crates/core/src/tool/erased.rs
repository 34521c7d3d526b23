use std::future::ready;
use std::pin::Pin;

use serde_json::Value;

use super::{Error, Tool, ToolDefinition, ToolResult};

pub(crate) type BoxedCall = Pin<Box<dyn Future<Output = ToolResult> + Send>>;

/// A [`Tool`] with its input type erased, so tools of different inputs can
/// share one registry.
pub(crate) trait ErasedTool: Send + Sync + 'static {
    fn definition(&self) -> ToolDefinition;

    fn call(&self, arguments: Value) -> BoxedCall;
}

pub(crate) struct Erased<T>(pub T);

impl<T: Tool> ErasedTool for Erased<T> {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.0.name().to_owned(),
            description: self.0.description().trim().to_owned(),
            parameters: self.0.parameter_schema().clone(),
        }
    }

    fn call(&self, arguments: Value) -> BoxedCall {
        match serde_json::from_value::<T::Input>(arguments) {
            Ok(input) => Box::pin(self.0.execute(input)),
            Err(err) => {
                debug!("rejected arguments for `{}`: {err}", self.0.name());
                let reason =
                    format!("arguments for `{}` rejected, {err}", self.0.name());
                Box::pin(ready(Err(Error::invalid_input().with_reason(reason))))
            }
        }
    }
}
