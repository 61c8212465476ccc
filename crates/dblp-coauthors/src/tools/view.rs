//! View tool: update_view.

use serde_json::json;

use super::{McpTool, ToolContext, response_format_schema, view_option_properties};
use crate::error::ToolResult;
use crate::formatters;
use crate::models::UpdateViewInput;

/// Change filters on the held result without querying again.
pub struct UpdateViewTool;

#[async_trait::async_trait]
impl McpTool for UpdateViewTool {
    fn name(&self) -> &'static str {
        "update_view"
    }

    fn description(&self) -> &'static str {
        "Change view options (exclude self, prefilter, excluded types, explain) for the \
         last search. Omitted options keep their current value."
    }

    fn input_schema(&self) -> serde_json::Value {
        let mut properties = view_option_properties();
        properties.insert("responseFormat".into(), response_format_schema());
        json!({
            "type": "object",
            "properties": properties
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: UpdateViewInput = serde_json::from_value(input)?;
        let mut session = ctx.session.lock().await;
        let view = session.update_view(&params.view)?;
        Ok(formatters::format_view(params.response_format, view)?)
    }
}
