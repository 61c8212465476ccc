//! Tool implementations for the stdio protocol surface.
//!
//! Every tool works on the one [`SearchSession`] held by the [`ToolContext`].

mod dataset;
mod search;
mod view;

use std::sync::Arc;

use tokio::sync::Mutex;

pub use dataset::ReloadDatasetTool;
pub use search::{SearchCoauthorsTool, SeedPapersTool};
pub use view::UpdateViewTool;

use crate::error::ToolResult;
use crate::session::SearchSession;

/// Shared state handed to every tool call.
#[derive(Clone)]
pub struct ToolContext {
    /// The search session.
    pub session: Arc<Mutex<SearchSession>>,
}

impl ToolContext {
    /// Wrap a session for tool use.
    #[must_use]
    pub fn new(session: SearchSession) -> Self {
        Self { session: Arc::new(Mutex::new(session)) }
    }
}

impl std::fmt::Debug for ToolContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolContext").finish_non_exhaustive()
    }
}

/// A callable tool.
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name as listed.
    fn name(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// JSON Schema of the arguments.
    fn input_schema(&self) -> serde_json::Value;

    /// Run the tool.
    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String>;
}

/// All tools in listing order.
#[must_use]
pub fn register_all_tools() -> Vec<Box<dyn McpTool>> {
    vec![
        Box::new(SearchCoauthorsTool),
        Box::new(UpdateViewTool),
        Box::new(SeedPapersTool),
        Box::new(ReloadDatasetTool),
    ]
}

/// Schema fragment shared by tools that render output.
fn response_format_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "enum": ["html", "markdown", "json"],
        "default": "html"
    })
}

/// Schema properties for the view options.
fn view_option_properties() -> serde_json::Map<String, serde_json::Value> {
    let serde_json::Value::Object(map) = serde_json::json!({
        "excludeSelf": {
            "type": "boolean",
            "description": "Hide rows authored by the searched authors themselves"
        },
        "prefilter": {
            "type": "string",
            "description": "Semicolon separated author identifier URLs to keep; empty clears"
        },
        "excludedTypes": {
            "type": "array",
            "items": {
                "type": "string",
                "enum": ["invalid", "inproceedings", "incollection", "article",
                         "book", "part", "informal", "data"]
            },
            "description": "Publication types to hide"
        },
        "explain": {
            "type": "boolean",
            "description": "One row per joint paper instead of one per collaborator"
        }
    }) else {
        return serde_json::Map::new();
    };
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_are_unique() {
        let tools = register_all_tools();
        let mut names: Vec<&str> = tools.iter().map(|t| t.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), tools.len());
    }

    #[test]
    fn test_schemas_are_objects() {
        for tool in register_all_tools() {
            assert_eq!(tool.input_schema()["type"], "object", "{}", tool.name());
        }
    }
}
