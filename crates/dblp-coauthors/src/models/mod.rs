//! Data models for snapshot records and tool inputs.
//!
//! Records use `#[serde(rename_all = "camelCase")]` for JSON output and
//! tool inputs accept camelCase keys.

mod author;
mod enums;
mod inputs;
mod paper;

pub use author::{Author, SearchResult};
pub use enums::{Matcher, ParseEnumError, PublicationType, ResponseFormat};
pub use inputs::*;
pub use paper::{Authorship, CollaborationRow, CollaborationSet, Paper};
