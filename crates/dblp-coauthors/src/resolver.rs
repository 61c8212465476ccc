//! Resolve free-text search strings to author records.
//!
//! A search string holds semicolon separated terms. Each term is either a
//! canonical identifier URL (exact lookup) or a name fragment, optionally
//! written as "Last, First", matched with the selected [`Matcher`].

use std::fmt::Write;

use crate::config::snapshot::DBLP_PREFIX;
use crate::error::StoreResult;
use crate::models::{Matcher, SearchResult};
use crate::store::DblpStore;

/// One parsed search term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTerm {
    /// Canonical identifier URL, looked up exactly.
    Identifier(String),
    /// Name fragment, already normalized for matching.
    Name(String),
}

/// Outcome of resolving a search string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// At least one author matched.
    Matches(SearchResult),
    /// No term matched anything.
    NoMatches {
        /// The search string as typed.
        search: String,
    },
}

impl Resolution {
    /// User-facing message for an empty resolution.
    #[must_use]
    pub fn no_match_message(search: &str) -> String {
        format!("No authors found for {search}")
    }
}

/// Split a search string into terms. Blank terms are dropped.
#[must_use]
pub fn parse_terms(search: &str) -> Vec<SearchTerm> {
    search
        .split(';')
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(|term| {
            if term.starts_with(DBLP_PREFIX) {
                SearchTerm::Identifier(term.to_string())
            } else {
                SearchTerm::Name(normalize_name(term))
            }
        })
        .collect()
}

/// Rewrite "Last, First" as "First Last" and encode non-ASCII characters.
#[must_use]
pub fn normalize_name(term: &str) -> String {
    let swapped = match term.split_once(',') {
        Some((last, first)) => format!("{} {}", first.trim(), last.trim()),
        None => term.trim().to_string(),
    };
    encode_non_ascii(&swapped)
}

/// Replace every non-ASCII character with its decimal numeric character reference.
#[must_use]
pub fn encode_non_ascii(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c);
        } else {
            let _ = write!(out, "&#{};", u32::from(c));
        }
    }
    out
}

/// Turn a name fragment into an `ILIKE` pattern.
///
/// Fragments without wildcards become substring patterns.
#[must_use]
pub fn like_pattern(term: &str) -> String {
    if term.contains('%') || term.contains('_') {
        term.to_string()
    } else {
        format!("%{term}%")
    }
}

/// Resolve `search` against the store.
///
/// Per-term matches are concatenated in term order.
///
/// # Errors
///
/// Returns a store error if a lookup query fails.
pub fn resolve(store: &DblpStore, search: &str, matcher: Matcher) -> StoreResult<Resolution> {
    let mut authors = Vec::new();

    for term in parse_terms(search) {
        let hits = match &term {
            SearchTerm::Identifier(dblp) => store.find_authors_by_dblp(dblp)?,
            SearchTerm::Name(name) => match matcher {
                Matcher::StartsWith => store.find_authors_by_prefix(name)?,
                Matcher::Like => store.find_authors_like(&like_pattern(name))?,
            },
        };
        tracing::debug!(term = ?term, %matcher, hits = hits.len(), "Resolved search term");
        authors.extend(hits);
    }

    if authors.is_empty() {
        tracing::info!(search, "No authors matched");
        return Ok(Resolution::NoMatches { search: search.to_string() });
    }

    Ok(Resolution::Matches(SearchResult { search: search.to_string(), authors }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_first_is_swapped() {
        assert_eq!(normalize_name("Turing, Alan"), "Alan Turing");
        assert_eq!(normalize_name("  Alan Turing "), "Alan Turing");
        assert_eq!(normalize_name("Doe, Jane, Jr."), "Jane, Jr. Doe");
    }

    #[test]
    fn test_non_ascii_encoding() {
        assert_eq!(encode_non_ascii("Erdős"), "Erd&#337;s");
        assert_eq!(encode_non_ascii("Gödel, Kurt"), "G&#246;del, Kurt");
        assert_eq!(normalize_name("Gödel, Kurt"), "Kurt G&#246;del");
    }

    #[test]
    fn test_parse_terms() {
        let terms = parse_terms(" Turing, Alan ; https://dblp.org/pid/1 ;; Ada");
        assert_eq!(
            terms,
            vec![
                SearchTerm::Name("Alan Turing".to_string()),
                SearchTerm::Identifier("https://dblp.org/pid/1".to_string()),
                SearchTerm::Name("Ada".to_string()),
            ]
        );
    }

    #[test]
    fn test_identifier_terms_skip_rewriting() {
        let terms = parse_terms("https://dblp.org/pid/a,b");
        assert_eq!(terms, vec![SearchTerm::Identifier("https://dblp.org/pid/a,b".to_string())]);
    }

    #[test]
    fn test_like_pattern() {
        assert_eq!(like_pattern("Lovelace"), "%Lovelace%");
        assert_eq!(like_pattern("Ada%"), "Ada%");
    }

    #[test]
    fn test_no_match_message() {
        assert_eq!(Resolution::no_match_message("Nobody"), "No authors found for Nobody");
    }
}
