//! HTML table output.
//!
//! Identifier columns become anchors. Names in the snapshot carry numeric
//! character references for non-ASCII characters, so escaping leaves those
//! intact.

use std::fmt::Write;

use crate::models::{CollaborationRow, SearchResult};
use crate::shaper::{ExplainRow, ShapedView, SummaryRow};

/// Escape HTML special characters, keeping `&#NNN;` and `&#xHH;` references.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.char_indices() {
        match c {
            '&' if is_numeric_reference(&s[i + 1..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Whether `rest` (the text after an `&`) starts with `#digits;` or `#xhex;`.
fn is_numeric_reference(rest: &str) -> bool {
    let Some(body) = rest.strip_prefix('#') else {
        return false;
    };
    let (digits, hex) = match body.strip_prefix(['x', 'X']) {
        Some(hex_body) => (hex_body, true),
        None => (body, false),
    };
    let Some(end) = digits.find(';') else {
        return false;
    };
    let number = &digits[..end];
    !number.is_empty()
        && number.chars().all(|c| if hex { c.is_ascii_hexdigit() } else { c.is_ascii_digit() })
}

/// Anchor for an identifier URL; empty for a missing one.
#[must_use]
pub fn link(url: Option<&str>) -> String {
    match url {
        Some(url) if !url.is_empty() => {
            let url = escape_html(url);
            format!(r#"<a href="{url}" target="_blank">{url}</a>"#)
        }
        _ => String::new(),
    }
}

fn table(headers: &[&str], rows: impl Iterator<Item = Vec<String>>) -> String {
    let mut out = String::from("<table>\n<thead><tr>");
    for header in headers {
        let _ = write!(out, "<th>{header}</th>");
    }
    out.push_str("</tr></thead>\n<tbody>\n");
    for row in rows {
        out.push_str("<tr>");
        for cell in row {
            let _ = write!(out, "<td>{cell}</td>");
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
    out
}

/// Resolved authors.
#[must_use]
pub fn format_hits_html(hits: &SearchResult) -> String {
    table(
        &["ID", "Name", "DBLP", "ORCID"],
        hits.authors.iter().map(|a| {
            vec![
                a.numeric_id.to_string(),
                escape_html(&a.name),
                link(Some(&a.dblp)),
                link(a.orcid.as_deref()),
            ]
        }),
    )
}

fn explain_cells(row: &ExplainRow) -> Vec<String> {
    vec![
        link(row.paper_dblp.as_deref()),
        escape_html(&row.title),
        row.kind.label().to_string(),
        escape_html(&row.name),
        link(Some(&row.author_dblp)),
        link(row.orcid.as_deref()),
        row.year.to_string(),
    ]
}

fn summary_cells(row: &SummaryRow) -> Vec<String> {
    vec![escape_html(&row.name), link(Some(&row.author_dblp)), row.year.to_string()]
}

/// Shaped collaboration view.
#[must_use]
pub fn format_view_html(view: &ShapedView) -> String {
    if view.is_empty() {
        return "<p>No collaborations found.</p>\n".to_string();
    }
    match view {
        ShapedView::Explain(rows) => table(
            &["Paper", "Title", "Type", "Name", "DBLP", "ORCID", "Year"],
            rows.iter().map(explain_cells),
        ),
        ShapedView::Summary(rows) => {
            table(&["Name", "DBLP", "Year"], rows.iter().map(summary_cells))
        }
    }
}

/// Seed authors' own papers.
#[must_use]
pub fn format_seed_papers_html(rows: &[CollaborationRow]) -> String {
    if rows.is_empty() {
        return "<p>No papers found.</p>\n".to_string();
    }
    table(
        &["Paper", "Title", "Type", "Author", "Year"],
        rows.iter().map(|r| {
            vec![
                link(r.paper.dblp.as_deref()),
                escape_html(&r.paper.title),
                r.paper.kind.label().to_string(),
                escape_html(&r.author.name),
                r.paper.year.to_string(),
            ]
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Author, PublicationType};

    #[test]
    fn test_escape_keeps_numeric_references() {
        assert_eq!(escape_html("Erd&#337;s & <b>"), "Erd&#337;s &amp; &lt;b&gt;");
        assert_eq!(escape_html("&#x151;"), "&#x151;");
        assert_eq!(escape_html("&#;"), "&amp;#;");
        assert_eq!(escape_html("&#12"), "&amp;#12");
        assert_eq!(escape_html("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_link() {
        assert_eq!(
            link(Some("https://dblp.org/pid/1")),
            r#"<a href="https://dblp.org/pid/1" target="_blank">https://dblp.org/pid/1</a>"#
        );
        assert_eq!(link(None), "");
        assert_eq!(link(Some("")), "");
    }

    #[test]
    fn test_hits_table() {
        let hits = SearchResult {
            search: "Ada".into(),
            authors: vec![Author {
                numeric_id: 1,
                name: "Ada <Lovelace>".into(),
                dblp: "https://dblp.org/pid/1".into(),
                orcid: None,
            }],
        };
        let html = format_hits_html(&hits);
        assert!(html.contains("<th>ORCID</th>"));
        assert!(html.contains("<td>Ada &lt;Lovelace&gt;</td>"));
        assert!(html.contains(r#"href="https://dblp.org/pid/1""#));
    }

    #[test]
    fn test_explain_uses_type_label() {
        let view = ShapedView::Explain(vec![ExplainRow {
            paper_id: 10,
            paper_dblp: None,
            title: "Notes".into(),
            kind: PublicationType::Article,
            name: "Ada".into(),
            author_dblp: "https://dblp.org/pid/1".into(),
            orcid: None,
            year: 1843,
        }]);
        let html = format_view_html(&view);
        assert!(html.contains("<td>Article</td>"));
        assert!(html.contains("<td>1843</td>"));
    }

    #[test]
    fn test_empty_view() {
        assert!(format_view_html(&ShapedView::Summary(vec![])).contains("No collaborations"));
    }
}
