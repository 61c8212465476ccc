//! Compact JSON output.

use serde_json::{Value, json};

use crate::models::{Author, CollaborationRow, SearchResult};
use crate::shaper::ShapedView;

/// Compact author representation; `orcid` only when present.
#[must_use]
pub fn compact_author(author: &Author) -> Value {
    let mut obj = json!({
        "id": author.numeric_id,
        "name": author.name,
        "dblp": author.dblp,
    });
    if let Some(orcid) = &author.orcid {
        obj["orcid"] = json!(orcid);
    }
    obj
}

/// Resolved authors.
#[must_use]
pub fn hits_json(hits: &SearchResult) -> Value {
    json!({
        "search": hits.search,
        "total": hits.authors.len(),
        "authors": hits.authors.iter().map(compact_author).collect::<Vec<_>>(),
    })
}

/// Shaped view with its mode and row count.
///
/// # Errors
///
/// Returns an error if the rows fail to serialize.
pub fn view_json(view: &ShapedView) -> serde_json::Result<Value> {
    let mut obj = serde_json::to_value(view)?;
    obj["total"] = json!(view.len());
    Ok(obj)
}

/// Seed authors' own papers.
#[must_use]
pub fn seed_papers_json(rows: &[CollaborationRow]) -> Value {
    let papers: Vec<Value> = rows
        .iter()
        .map(|r| {
            json!({
                "paperId": r.paper.numeric_id,
                "dblp": r.paper.dblp,
                "title": r.paper.title,
                "type": r.paper.kind.label(),
                "year": r.paper.year,
                "author": r.author.name,
            })
        })
        .collect();
    json!({ "total": papers.len(), "papers": papers })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_author_omits_missing_orcid() {
        let author = Author {
            numeric_id: 1,
            name: "Ada Lovelace".into(),
            dblp: "https://dblp.org/pid/1".into(),
            orcid: None,
        };
        let value = compact_author(&author);
        assert_eq!(value["id"], 1);
        assert!(value.get("orcid").is_none());
    }

    #[test]
    fn test_view_json_has_mode() {
        let value = view_json(&ShapedView::Summary(vec![])).unwrap();
        assert_eq!(value["mode"], "summary");
        assert_eq!(value["total"], 0);
        assert!(value["rows"].as_array().unwrap().is_empty());
    }
}
