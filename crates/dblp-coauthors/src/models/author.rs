//! Author record as loaded from the authors snapshot.

use serde::{Deserialize, Serialize};

/// An author from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Dense integer id assigned by the snapshot.
    pub numeric_id: i64,

    /// Display name (non-ASCII characters as numeric character references).
    pub name: String,

    /// Canonical identifier URL.
    pub dblp: String,

    /// ORCID URL, when known.
    #[serde(default)]
    pub orcid: Option<String>,
}

impl Author {
    /// ORCID URL or an empty string.
    #[must_use]
    pub fn orcid_or_empty(&self) -> &str {
        self.orcid.as_deref().unwrap_or("")
    }
}

/// Authors matched by a search string, in term order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The search string as the user typed it.
    pub search: String,

    /// Matched authors, concatenated per term.
    pub authors: Vec<Author>,
}

impl SearchResult {
    /// Ids of the matched authors, in match order (duplicates removed).
    #[must_use]
    pub fn author_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = Vec::with_capacity(self.authors.len());
        for author in &self.authors {
            if !ids.contains(&author.numeric_id) {
                ids.push(author.numeric_id);
            }
        }
        ids
    }

    /// Whether no author matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.authors.is_empty()
    }
}
