use chrono::NaiveDate;
use serde_json::Value;
use travel_agent_core::poll::Sleeper;
use travel_agent_core::tool::{
    Executor, ToolCallRequest, ToolCallResult, ToolDefinition,
};
use travel_agent_platform::TaskPlatform;

use crate::tools::accommodation::AccommodationSearch;
use crate::tools::*;

/// A toolbox builder.
///
/// See [`Toolbox`].
#[derive(Default)]
pub struct ToolboxBuilder {
    today: Option<NaiveDate>,
    country_base_url: Option<String>,
    executor: Executor,
}

impl ToolboxBuilder {
    /// Pins the date reported by the `today` tool. The current local date
    /// is used otherwise.
    #[inline]
    pub fn with_today(mut self, date: NaiveDate) -> Self {
        self.today = Some(date);
        self
    }

    /// Points the `destination_info` tool at a different endpoint.
    #[inline]
    pub fn with_country_base_url<S: Into<String>>(
        mut self,
        base_url: S,
    ) -> Self {
        self.country_base_url = Some(base_url.into());
        self
    }

    /// Enables the `search_accommodation` tool.
    ///
    /// Without it, calls to that tool are answered as unknown.
    pub fn with_accommodation_search<P, S>(
        mut self,
        search: AccommodationSearch<P, S>,
    ) -> Self
    where
        P: TaskPlatform + 'static,
        S: Sleeper,
    {
        self.executor.add_tool(AccommodationTool::new(search));
        self
    }

    /// Builds a new toolbox.
    pub fn build(self) -> Toolbox {
        let mut executor = self.executor;
        executor.add_tool(match self.today {
            Some(date) => TodayTool::with_date(date),
            None => TodayTool::new(),
        });
        executor.add_tool(match self.country_base_url {
            Some(base_url) => DestinationInfoTool::with_base_url(base_url),
            None => DestinationInfoTool::new(),
        });

        Toolbox { executor }
    }
}

/// The set of travel tools, ready to answer tool calls.
///
/// It is basically a wrapper around [`Executor`] with the built-in tools
/// registered.
pub struct Toolbox {
    executor: Executor,
}

impl Toolbox {
    /// Returns the tool definitions to advertise to a model.
    #[inline]
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.executor.definitions()
    }

    /// Returns the names of the available tools, sorted.
    #[inline]
    pub fn tool_names(&self) -> impl Iterator<Item = &str> {
        self.executor.tool_names()
    }

    /// Calls a tool by name and returns its text output.
    pub async fn call(&self, name: &str, arguments: Value) -> String {
        self.handle(ToolCallRequest {
            id: name.to_owned(),
            name: name.to_owned(),
            arguments,
        })
        .await
        .content
    }

    /// Handles a tool call request from the runtime.
    #[inline]
    pub fn handle(
        &self,
        request: ToolCallRequest,
    ) -> impl Future<Output = ToolCallResult> + Send + 'static {
        self.executor.call(request)
    }
}
