//! Enumeration types for store records and tool parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Failed to parse an enumeration from user input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct ParseEnumError {
    /// Which enumeration was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_string() }
    }
}

/// How free-text search terms are compared with author names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Matcher {
    /// Case-insensitive prefix match.
    #[default]
    StartsWith,
    /// Case-insensitive `ILIKE` pattern match.
    Like,
}

impl Matcher {
    /// Name as shown to users.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StartsWith => "startswith",
            Self::Like => "like",
        }
    }
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Matcher {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "startswith" => Ok(Self::StartsWith),
            "like" => Ok(Self::Like),
            _ => Err(ParseEnumError::new("matcher", s)),
        }
    }
}

/// Output format for rendered tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// HTML table with identifier links.
    #[default]
    Html,
    /// Markdown table.
    Markdown,
    /// Machine-readable JSON.
    Json,
}

impl FromStr for ResponseFormat {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(ParseEnumError::new("response format", s)),
        }
    }
}

/// Publication type of a paper, stored as its integer code.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PublicationType {
    /// Unknown or unsupported entry kind.
    #[default]
    Invalid = 0,
    /// Conference or workshop paper.
    Inproceedings = 1,
    /// Chapter in a collection.
    Incollection = 2,
    /// Journal article.
    Article = 3,
    /// Book or monograph.
    Book = 4,
    /// Part of a larger work.
    Part = 5,
    /// Informal publication (preprints and the like).
    Informal = 6,
    /// Dataset or artifact.
    Data = 7,
}

impl PublicationType {
    /// All types in code order.
    pub const ALL: [Self; 8] = [
        Self::Invalid,
        Self::Inproceedings,
        Self::Incollection,
        Self::Article,
        Self::Book,
        Self::Part,
        Self::Informal,
        Self::Data,
    ];

    /// Decode a stored type code. Unknown codes map to [`Self::Invalid`].
    #[must_use]
    pub fn from_code(code: i64) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.code() == code)
            .unwrap_or(Self::Invalid)
    }

    /// Integer code used in the snapshot.
    #[must_use]
    pub const fn code(self) -> i64 {
        self as i64
    }

    /// Human label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Invalid => "Invalid",
            Self::Inproceedings => "Inproceedings",
            Self::Incollection => "Incollection",
            Self::Article => "Article",
            Self::Book => "Book",
            Self::Part => "Part",
            Self::Informal => "Informal",
            Self::Data => "Data",
        }
    }
}

impl fmt::Display for PublicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PublicationType {
    type Err = ParseEnumError;

    /// Accepts a label (any case) or a numeric code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i64>() {
            return Self::ALL
                .into_iter()
                .find(|t| t.code() == code)
                .ok_or_else(|| ParseEnumError::new("publication type", s));
        }
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseEnumError::new("publication type", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matcher_default_and_parse() {
        assert_eq!(Matcher::default(), Matcher::StartsWith);
        assert_eq!("LIKE".parse::<Matcher>().unwrap(), Matcher::Like);
        assert!("fuzzy".parse::<Matcher>().is_err());
    }

    #[test]
    fn test_publication_type_codes() {
        assert_eq!(PublicationType::Article.code(), 3);
        assert_eq!(PublicationType::from_code(3), PublicationType::Article);
        assert_eq!(PublicationType::from_code(42), PublicationType::Invalid);
        assert_eq!(PublicationType::Data.label(), "Data");
    }

    #[test]
    fn test_publication_type_parse_label_or_code() {
        assert_eq!("article".parse::<PublicationType>().unwrap(), PublicationType::Article);
        assert_eq!("6".parse::<PublicationType>().unwrap(), PublicationType::Informal);
        assert!("8".parse::<PublicationType>().is_err());
        assert!("thesis".parse::<PublicationType>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&PublicationType::Inproceedings).unwrap();
        assert_eq!(json, r#""inproceedings""#);

        let parsed: Matcher = serde_json::from_str(r#""like""#).unwrap();
        assert_eq!(parsed, Matcher::Like);
    }
}
