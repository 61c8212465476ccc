//! Search tools: search_coauthors, seed_papers.

use serde_json::json;

use super::{McpTool, ToolContext, response_format_schema, view_option_properties};
use crate::config::cutoff;
use crate::error::{ToolError, ToolResult};
use crate::formatters;
use crate::models::{SearchCoauthorsInput, SeedPapersInput};
use crate::session::{SearchOutcome, cutoff_year_from_now};

/// Resolve authors, find their collaborators and render the view.
pub struct SearchCoauthorsTool;

#[async_trait::async_trait]
impl McpTool for SearchCoauthorsTool {
    fn name(&self) -> &'static str {
        "search_coauthors"
    }

    fn description(&self) -> &'static str {
        "Find recent co-authors of one or more authors. Terms are separated by ';' and \
         may be names (\"Last, First\" is accepted) or dblp identifier URLs."
    }

    fn input_schema(&self) -> serde_json::Value {
        let mut properties = view_option_properties();
        properties.insert(
            "search".into(),
            json!({
                "type": "string",
                "description": "Names or identifier URLs separated by ';'"
            }),
        );
        properties.insert(
            "matcher".into(),
            json!({
                "type": "string",
                "enum": ["startswith", "like"],
                "description": "Name matching: case-insensitive prefix or pattern"
            }),
        );
        properties.insert(
            "cutoffYears".into(),
            json!({
                "type": "integer",
                "minimum": cutoff::MIN_YEARS,
                "maximum": cutoff::MAX_YEARS,
                "description": "Only papers from the last N years"
            }),
        );
        properties.insert(
            "ignoreCutoff".into(),
            json!({"type": "boolean", "default": false, "description": "Include every year"}),
        );
        properties.insert("responseFormat".into(), response_format_schema());

        json!({
            "type": "object",
            "properties": properties,
            "required": ["search"]
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: SearchCoauthorsInput = serde_json::from_value(input)?;

        if params.search.trim().is_empty() {
            return Err(ToolError::validation("search", "must not be empty"));
        }
        if let Some(years) = params.cutoff_years {
            if !(cutoff::MIN_YEARS..=cutoff::MAX_YEARS).contains(&years) {
                return Err(ToolError::validation(
                    "cutoffYears",
                    format!("must be between {} and {}", cutoff::MIN_YEARS, cutoff::MAX_YEARS),
                ));
            }
        }

        let mut session = ctx.session.lock().await;
        let matcher = params.matcher.unwrap_or(session.config().default_matcher);
        let years = params.cutoff_years.unwrap_or(session.config().default_cutoff_years);
        let min_year = cutoff_year_from_now(years, params.ignore_cutoff);

        session.apply_view(&params.view);
        match session.search(&params.search, matcher, min_year)? {
            SearchOutcome::NoMatches { message } => Ok(message),
            SearchOutcome::Found { hits, view } => {
                Ok(formatters::format_search(params.response_format, &hits, &view)?)
            }
        }
    }
}

/// List the seed authors' own papers for the last search.
pub struct SeedPapersTool;

#[async_trait::async_trait]
impl McpTool for SeedPapersTool {
    fn name(&self) -> &'static str {
        "seed_papers"
    }

    fn description(&self) -> &'static str {
        "List the papers of the authors matched by the last search, within its year cutoff."
    }

    fn input_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "responseFormat": response_format_schema()
            }
        })
    }

    async fn execute(&self, ctx: &ToolContext, input: serde_json::Value) -> ToolResult<String> {
        let params: SeedPapersInput = serde_json::from_value(input)?;
        let session = ctx.session.lock().await;
        let rows = session.seed_papers()?;
        Ok(formatters::format_seed_papers(params.response_format, &rows)?)
    }
}
