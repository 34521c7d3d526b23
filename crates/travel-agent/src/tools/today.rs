use std::future::ready;

use chrono::{Local, NaiveDate};
use schemars::{JsonSchema, schema_for};
use serde::Deserialize;
use serde_json::Value;
use travel_agent_core::tool::{Tool, ToolResult};

#[derive(Deserialize, JsonSchema)]
pub struct TodayToolParameters {}

/// A tool that tells the model what day it is.
///
/// The date is captured once when the tool is created and never changes
/// afterwards, so every call within a process agrees on "today".
pub struct TodayTool {
    today: String,
    parameter_schema: Value,
}

impl TodayTool {
    /// Creates a new today tool pinned to the current local date.
    #[inline]
    pub fn new() -> Self {
        Self::with_date(Local::now().date_naive())
    }

    /// Creates a new today tool pinned to `date`.
    #[inline]
    pub fn with_date(date: NaiveDate) -> Self {
        TodayTool {
            today: date.format("%Y-%m-%d").to_string(),
            parameter_schema: schema_for!(TodayToolParameters).to_value(),
        }
    }
}

impl Default for TodayTool {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Tool for TodayTool {
    type Input = TodayToolParameters;

    fn name(&self) -> &str {
        "today"
    }

    fn description(&self) -> &str {
        r#"
Returns today's date in ISO format (YYYY-MM-DD).
Use it to resolve relative dates and dates given without a year."#
    }

    fn parameter_schema(&self) -> &Value {
        &self.parameter_schema
    }

    fn execute(
        &self,
        _input: TodayToolParameters,
    ) -> impl Future<Output = ToolResult> + Send + 'static {
        ready(Ok(self.today.clone()))
    }
}
