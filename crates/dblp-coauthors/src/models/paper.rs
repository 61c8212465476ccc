//! Paper records and the joined authorship rows built from them.

use serde::{Deserialize, Serialize};

use super::{Author, PublicationType};

/// A paper from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Dense integer id assigned by the snapshot.
    pub numeric_id: i64,

    /// Canonical identifier URL, when the snapshot carries one.
    #[serde(default)]
    pub dblp: Option<String>,

    /// Paper title.
    pub title: String,

    /// Publication year.
    pub year: i32,

    /// Publication type.
    #[serde(rename = "type")]
    pub kind: PublicationType,
}

/// An author-paper link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authorship {
    /// Linked paper id.
    pub paper_id: i64,

    /// Linked author id.
    pub author_id: i64,
}

/// One authorship joined with its paper and author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollaborationRow {
    /// The paper.
    pub paper: Paper,

    /// The author of this authorship (a collaborator or a seed author).
    pub author: Author,
}

impl CollaborationRow {
    /// Paper id of this authorship.
    #[must_use]
    pub const fn paper_id(&self) -> i64 {
        self.paper.numeric_id
    }

    /// Author id of this authorship.
    #[must_use]
    pub const fn author_id(&self) -> i64 {
        self.author.numeric_id
    }
}

/// Result of the collaboration query for one seed set and cutoff.
///
/// Held unchanged until the next search; view changes re-filter it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationSet {
    /// Seed author ids the query was anchored on.
    pub seed_ids: Vec<i64>,

    /// Minimum publication year (0 means no lower bound).
    pub cutoff_year: i32,

    /// Joined rows, ordered by author name.
    pub rows: Vec<CollaborationRow>,
}

impl CollaborationSet {
    /// Whether `author_id` belongs to the seed set.
    #[must_use]
    pub fn is_seed(&self, author_id: i64) -> bool {
        self.seed_ids.contains(&author_id)
    }
}
