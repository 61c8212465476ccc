//! Output formatting for hits, shaped views and seed papers.

pub mod html;
pub mod json;
pub mod markdown;

use crate::models::{CollaborationRow, ResponseFormat, SearchResult};
use crate::shaper::ShapedView;

pub use html::escape_html;

/// Render the hits table followed by the shaped view.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_search(
    format: ResponseFormat,
    hits: &SearchResult,
    view: &ShapedView,
) -> serde_json::Result<String> {
    Ok(match format {
        ResponseFormat::Html => {
            format!("{}\n{}", html::format_hits_html(hits), html::format_view_html(view))
        }
        ResponseFormat::Markdown => format!(
            "{}\n{}",
            markdown::format_hits_markdown(hits),
            markdown::format_view_markdown(view)
        ),
        ResponseFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
            "hits": json::hits_json(hits),
            "view": json::view_json(view)?,
        }))?,
    })
}

/// Render a shaped view on its own.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_view(format: ResponseFormat, view: &ShapedView) -> serde_json::Result<String> {
    Ok(match format {
        ResponseFormat::Html => html::format_view_html(view),
        ResponseFormat::Markdown => markdown::format_view_markdown(view),
        ResponseFormat::Json => serde_json::to_string_pretty(&json::view_json(view)?)?,
    })
}

/// Render the seed authors' papers.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_seed_papers(
    format: ResponseFormat,
    rows: &[CollaborationRow],
) -> serde_json::Result<String> {
    Ok(match format {
        ResponseFormat::Html => html::format_seed_papers_html(rows),
        ResponseFormat::Markdown => markdown::format_seed_papers_markdown(rows),
        ResponseFormat::Json => serde_json::to_string_pretty(&json::seed_papers_json(rows))?,
    })
}
