//! Input models for tool parameters.

use serde::{Deserialize, Serialize};

use super::{Matcher, PublicationType, ResponseFormat};

/// Input for the co-author search.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCoauthorsInput {
    /// Semicolon separated names, "Last, First" names or identifier URLs.
    pub search: String,

    /// Name matcher; falls back to the configured default.
    #[serde(default)]
    pub matcher: Option<Matcher>,

    /// Years before the current year to include; falls back to the configured default.
    #[serde(default)]
    pub cutoff_years: Option<i32>,

    /// Include papers from every year.
    #[serde(default)]
    pub ignore_cutoff: bool,

    /// View options applied to the fresh result.
    #[serde(flatten)]
    pub view: ViewOptionsInput,

    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

/// View options. Omitted fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewOptionsInput {
    /// Drop rows authored by the seed authors themselves.
    #[serde(default)]
    pub exclude_self: Option<bool>,

    /// Semicolon separated identifier URLs to keep (empty clears the filter).
    #[serde(default)]
    pub prefilter: Option<String>,

    /// Publication types to drop.
    #[serde(default)]
    pub excluded_types: Option<Vec<PublicationType>>,

    /// One row per authorship instead of one row per collaborator.
    #[serde(default)]
    pub explain: Option<bool>,
}

/// Input for changing view options on the held result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateViewInput {
    /// Options to change.
    #[serde(flatten)]
    pub view: ViewOptionsInput,

    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

/// Input for listing the seed authors' own papers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedPapersInput {
    /// Output format.
    #[serde(default)]
    pub response_format: ResponseFormat,
}

/// Input for reloading the snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReloadDatasetInput {
    /// Directory to load from; defaults to the current snapshot directory.
    #[serde(default)]
    pub snapshot_dir: Option<String>,
}
