//! View filtering and reshaping of a collaboration set.
//!
//! Shaping always starts from the untouched [`CollaborationSet`], so toggling
//! an option back restores exactly the rows it removed.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::{CollaborationRow, CollaborationSet, PublicationType, ViewOptionsInput};

/// Active view options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// Drop rows whose author is a seed author.
    pub exclude_self: bool,

    /// Identifier URLs to keep; empty keeps everyone.
    pub prefilter: Vec<String>,

    /// Publication types to drop.
    pub excluded_types: BTreeSet<PublicationType>,

    /// One row per authorship instead of one per collaborator.
    pub explain: bool,
}

impl ViewState {
    /// Apply the options present in `input`, keeping the others.
    pub fn apply(&mut self, input: &ViewOptionsInput) {
        if let Some(exclude_self) = input.exclude_self {
            self.exclude_self = exclude_self;
        }
        if let Some(prefilter) = &input.prefilter {
            self.prefilter = parse_prefilter(prefilter);
        }
        if let Some(types) = &input.excluded_types {
            self.excluded_types = types.iter().copied().collect();
        }
        if let Some(explain) = input.explain {
            self.explain = explain;
        }
    }
}

/// Split a semicolon separated identifier list, dropping blank entries.
#[must_use]
pub fn parse_prefilter(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// Explain-mode row: one per authorship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainRow {
    /// Paper id (sort key).
    pub paper_id: i64,
    /// Paper identifier URL.
    pub paper_dblp: Option<String>,
    /// Paper title.
    pub title: String,
    /// Publication type.
    #[serde(rename = "type")]
    pub kind: PublicationType,
    /// Collaborator name.
    pub name: String,
    /// Collaborator identifier URL.
    pub author_dblp: String,
    /// Collaborator ORCID URL.
    pub orcid: Option<String>,
    /// Publication year.
    pub year: i32,
}

/// Summary row: one per collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    /// Collaborator id.
    pub author_id: i64,
    /// Collaborator name.
    pub name: String,
    /// Collaborator identifier URL.
    pub author_dblp: String,
    /// Year of the first listed joint paper.
    pub year: i32,
}

/// Finalized rows ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "rows", rename_all = "lowercase")]
pub enum ShapedView {
    /// Paper-level rows.
    Explain(Vec<ExplainRow>),
    /// Collaborator-level rows.
    Summary(Vec<SummaryRow>),
}

impl ShapedView {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Explain(rows) => rows.len(),
            Self::Summary(rows) => rows.len(),
        }
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Filter and reshape `set` according to `view`. `set` is not modified.
#[must_use]
pub fn shape(set: &CollaborationSet, view: &ViewState) -> ShapedView {
    let prefilter: HashSet<&str> = view.prefilter.iter().map(String::as_str).collect();

    let mut rows: Vec<&CollaborationRow> = set
        .rows
        .iter()
        .filter(|row| !(view.exclude_self && set.is_seed(row.author_id())))
        .filter(|row| prefilter.is_empty() || prefilter.contains(row.author.dblp.as_str()))
        .filter(|row| !view.excluded_types.contains(&row.paper.kind))
        .collect();

    if view.explain {
        rows.sort_by_key(|row| row.paper_id());
        ShapedView::Explain(rows.into_iter().map(explain_row).collect())
    } else {
        rows.sort_by(|a, b| a.author.name.cmp(&b.author.name));
        let mut seen = HashSet::new();
        ShapedView::Summary(
            rows.into_iter()
                .filter(|row| seen.insert(row.author_id()))
                .map(summary_row)
                .collect(),
        )
    }
}

fn explain_row(row: &CollaborationRow) -> ExplainRow {
    ExplainRow {
        paper_id: row.paper_id(),
        paper_dblp: row.paper.dblp.clone(),
        title: row.paper.title.clone(),
        kind: row.paper.kind,
        name: row.author.name.clone(),
        author_dblp: row.author.dblp.clone(),
        orcid: row.author.orcid.clone(),
        year: row.paper.year,
    }
}

fn summary_row(row: &CollaborationRow) -> SummaryRow {
    SummaryRow {
        author_id: row.author_id(),
        name: row.author.name.clone(),
        author_dblp: row.author.dblp.clone(),
        year: row.paper.year,
    }
}
