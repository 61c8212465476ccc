//! Markdown output formatting.

use std::fmt::Write;

use crate::models::{CollaborationRow, SearchResult};
use crate::shaper::ShapedView;

/// Escape characters that break a table cell.
fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace(['\n', '\r'], " ")
}

fn link(url: Option<&str>) -> String {
    match url {
        Some(url) if !url.is_empty() => {
            let text = cell(url).replace('[', "\\[").replace(']', "\\]");
            let target = url.replace('(', "%28").replace(')', "%29").replace(' ', "%20");
            format!("[{text}]({target})")
        }
        _ => String::new(),
    }
}

fn table(headers: &[&str], rows: impl Iterator<Item = Vec<String>>) -> String {
    let mut out = format!("| {} |\n", headers.join(" | "));
    let _ = writeln!(out, "|{}", "---|".repeat(headers.len()));
    for row in rows {
        let _ = writeln!(out, "| {} |", row.join(" | "));
    }
    out
}

/// Resolved authors as a Markdown table.
#[must_use]
pub fn format_hits_markdown(hits: &SearchResult) -> String {
    let mut output = format!("# Authors ({} matches for \"{}\")\n\n", hits.authors.len(), hits.search);
    output.push_str(&table(
        &["ID", "Name", "DBLP", "ORCID"],
        hits.authors.iter().map(|a| {
            vec![a.numeric_id.to_string(), cell(&a.name), link(Some(&a.dblp)), link(a.orcid.as_deref())]
        }),
    ));
    output
}

/// Shaped view as a Markdown table.
#[must_use]
pub fn format_view_markdown(view: &ShapedView) -> String {
    if view.is_empty() {
        return "No collaborations found.\n".to_string();
    }

    let mut output = format!("# Collaborations ({} rows)\n\n", view.len());
    let body = match view {
        ShapedView::Explain(rows) => table(
            &["Paper", "Title", "Type", "Name", "DBLP", "ORCID", "Year"],
            rows.iter().map(|r| {
                vec![
                    link(r.paper_dblp.as_deref()),
                    cell(&r.title),
                    r.kind.label().to_string(),
                    cell(&r.name),
                    link(Some(&r.author_dblp)),
                    link(r.orcid.as_deref()),
                    r.year.to_string(),
                ]
            }),
        ),
        ShapedView::Summary(rows) => table(
            &["Name", "DBLP", "Year"],
            rows.iter()
                .map(|r| vec![cell(&r.name), link(Some(&r.author_dblp)), r.year.to_string()]),
        ),
    };
    output.push_str(&body);
    output
}

/// Seed authors' own papers as a Markdown table.
#[must_use]
pub fn format_seed_papers_markdown(rows: &[CollaborationRow]) -> String {
    if rows.is_empty() {
        return "No papers found.\n".to_string();
    }

    let mut output = format!("# Seed papers ({} rows)\n\n", rows.len());
    output.push_str(&table(
        &["Paper", "Title", "Type", "Author", "Year"],
        rows.iter().map(|r| {
            vec![
                link(r.paper.dblp.as_deref()),
                cell(&r.paper.title),
                r.paper.kind.label().to_string(),
                cell(&r.author.name),
                r.paper.year.to_string(),
            ]
        }),
    ));
    output
}
