//! Tool server over stdio.
//!
//! A host UI drives the search session through JSON-RPC 2.0 requests, one per
//! line, and receives rendered tables back.

pub mod protocol;
pub mod stdio;

use crate::session::SearchSession;
use crate::tools::{self, McpTool, ToolContext};

/// Tool server owning the session.
pub struct ToolServer {
    ctx: ToolContext,
    tools: Vec<Box<dyn McpTool>>,
}

impl ToolServer {
    /// Create a server around a loaded session.
    #[must_use]
    pub fn new(session: SearchSession) -> Self {
        Self { ctx: ToolContext::new(session), tools: tools::register_all_tools() }
    }

    /// Serve on stdin/stdout until stdin closes.
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure.
    pub async fn run_stdio(self) -> anyhow::Result<()> {
        tracing::info!(tools = self.tools.len(), "Starting stdio server");
        stdio::run_stdio(self.tools, self.ctx).await
    }

    /// Registered tools.
    #[must_use]
    pub fn tools(&self) -> &[Box<dyn McpTool>] {
        &self.tools
    }

    /// Tool execution context.
    #[must_use]
    pub const fn context(&self) -> &ToolContext {
        &self.ctx
    }
}

impl std::fmt::Debug for ToolServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolServer").field("tools", &self.tools.len()).finish()
    }
}
