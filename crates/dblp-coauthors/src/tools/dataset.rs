//! Dataset tool: reload_dataset.

use serde_json::json;

use super::{McpTool, ToolContext};
use crate::error::ToolResult;
use crate::models::ReloadDatasetInput;

/// Load the snapshot again, optionally from another directory.
pub struct ReloadDatasetTool;

#[async_trait::async_trait]
impl McpTool for ReloadDatasetTool {
    fn name(&self) -> &'static str {
        "reload_dataset"
    }

    fn description(&self) -> &'static str {
        "Reload the snapshot files and reset the search. On failure the current data stays loaded."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "snapshotDir": {
                    "type": "string",
                    "description": "Directory holding the three snapshot files"
                }
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: ReloadDatasetInput = serde_json::from_value(input)?;
        let mut session = ctx.session.lock().await;

        let config = params.snapshot_dir.map(|dir| session.config().with_snapshot_dir(dir));
        let stats = session.reload(config)?;

        Ok(format!(
            "Loaded {} authors, {} papers and {} links from {}",
            stats.authors,
            stats.papers,
            stats.links,
            session.config().snapshot_dir.display()
        ))
    }
}
