//! Loader and resolver tests against snapshot files on disk.

mod common;

use pretty_assertions::assert_eq;

use dblp_coauthors::config::snapshot::PAPERS_FILE;
use dblp_coauthors::models::{Matcher, PublicationType};
use dblp_coauthors::resolver::{Resolution, resolve};
use dblp_coauthors::{Config, DblpStore, StoreError};

fn matched_ids(store: &DblpStore, search: &str, matcher: Matcher) -> Vec<i64> {
    match resolve(store, search, matcher).unwrap() {
        Resolution::Matches(hits) => hits.authors.iter().map(|a| a.numeric_id).collect(),
        Resolution::NoMatches { .. } => vec![],
    }
}

// =============================================================================
// Loader
// =============================================================================

#[test]
fn test_load_counts_rows() {
    let (_dir, config) = common::snapshot_dir();
    let store = DblpStore::load(&config).unwrap();
    let stats = store.stats().unwrap();
    assert_eq!((stats.authors, stats.papers, stats.links), (5, 4, 8));
    assert_eq!(store.source(), Some(config.snapshot_dir.as_path()));
}

#[test]
fn test_missing_file_is_fatal() {
    let (dir, config) = common::snapshot_dir();
    std::fs::remove_file(dir.path().join(PAPERS_FILE)).unwrap();

    let err = DblpStore::load(&config).unwrap_err();
    assert!(matches!(err, StoreError::MissingSnapshot { .. }), "{err}");
}

#[test]
fn test_missing_column_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let links = "PaperID\tWho\n10\t1\n";
    common::write_files(dir.path(), common::AUTHORS, common::PAPERS, links);

    let err = DblpStore::load(&Config::for_testing(dir.path())).unwrap_err();
    assert!(
        matches!(err, StoreError::MissingColumn { table: "papers_authors", column: "AuthorID" }),
        "{err}"
    );
}

#[test]
fn test_paper_identifier_column_is_optional() {
    let dir = tempfile::tempdir().unwrap();
    common::write_files(dir.path(), common::AUTHORS, common::PAPERS_WITHOUT_DBLP, common::LINKS);

    let store = DblpStore::load(&Config::for_testing(dir.path())).unwrap();
    let rows = store.find_copapers(&[1], 0).unwrap();
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|r| r.paper.dblp.is_none()));
}

#[test]
fn test_reload_replaces_state() {
    let (dir, config) = common::snapshot_dir();
    let first = DblpStore::load(&config).unwrap();

    common::write_files(dir.path(), common::AUTHORS, common::PAPERS, "PaperID\tAuthorID\n10\t1\n");
    let second = DblpStore::load(&config).unwrap();

    assert_eq!(first.stats().unwrap().links, 8);
    assert_eq!(second.stats().unwrap().links, 1);
}

// =============================================================================
// Resolver
// =============================================================================

#[test]
fn test_last_first_matches_like_first_last() {
    let (_dir, config) = common::snapshot_dir();
    let store = DblpStore::load(&config).unwrap();

    for matcher in [Matcher::StartsWith, Matcher::Like] {
        assert_eq!(
            matched_ids(&store, "Turing, Alan", matcher),
            matched_ids(&store, "Alan Turing", matcher)
        );
    }
    assert_eq!(matched_ids(&store, "Turing, Alan", Matcher::StartsWith), vec![3]);
}

#[test]
fn test_identifier_lookup_ignores_matcher() {
    let (_dir, config) = common::snapshot_dir();
    let store = DblpStore::load(&config).unwrap();

    for matcher in [Matcher::StartsWith, Matcher::Like] {
        let Resolution::Matches(hits) = resolve(&store, "https://dblp.org/pid/1", matcher).unwrap()
        else {
            panic!("expected a match");
        };
        assert_eq!(hits.authors.len(), 1);
        assert_eq!(hits.authors[0].name, "Ada Lovelace");
        assert_eq!(hits.authors[0].orcid.as_deref(), Some("https://orcid.org/0000-0001"));
    }
}

#[test]
fn test_prefix_match_is_case_insensitive() {
    let (_dir, config) = common::snapshot_dir();
    let store = DblpStore::load(&config).unwrap();
    assert_eq!(matched_ids(&store, "alan", Matcher::StartsWith), vec![3, 4]);
    assert_eq!(matched_ids(&store, "turing", Matcher::StartsWith), Vec::<i64>::new());
    assert_eq!(matched_ids(&store, "turing", Matcher::Like), vec![3]);
}

#[test]
fn test_terms_are_concatenated_in_order() {
    let (_dir, config) = common::snapshot_dir();
    let store = DblpStore::load(&config).unwrap();
    assert_eq!(matched_ids(&store, "Charles; https://dblp.org/pid/1", Matcher::StartsWith), vec![2, 1]);
}

#[test]
fn test_non_ascii_search_matches_encoded_name() {
    let (_dir, config) = common::snapshot_dir();
    let store = DblpStore::load(&config).unwrap();
    assert_eq!(matched_ids(&store, "Gödel, Kurt", Matcher::StartsWith), vec![5]);
}

#[test]
fn test_no_match_is_distinct_outcome() {
    let (_dir, config) = common::snapshot_dir();
    let store = DblpStore::load(&config).unwrap();
    assert_eq!(
        resolve(&store, "Nobody", Matcher::Like).unwrap(),
        Resolution::NoMatches { search: "Nobody".to_string() }
    );
}

// =============================================================================
// Collaboration query
// =============================================================================

#[test]
fn test_copapers_ordered_by_name() {
    let (_dir, config) = common::snapshot_dir();
    let store = DblpStore::load(&config).unwrap();

    let rows = store.find_copapers(&[1], 2000).unwrap();
    let keys: Vec<(&str, i64)> = rows.iter().map(|r| (r.author.name.as_str(), r.paper_id())).collect();
    assert_eq!(
        keys,
        vec![("Ada Lovelace", 10), ("Ada Lovelace", 11), ("Alan Turing", 11), ("Charles Babbage", 10)]
    );
    assert_eq!(rows[0].paper.kind, PublicationType::Article);
}

#[test]
fn test_cutoff_filters_by_year() {
    let (_dir, config) = common::snapshot_dir();
    let store = DblpStore::load(&config).unwrap();

    let rows = store.find_copapers(&[2], 2000).unwrap();
    assert!(rows.iter().all(|r| r.paper.year >= 2000));
    assert_eq!(store.find_copapers(&[2], 0).unwrap().len(), 4);
}

#[test]
fn test_seed_authorships() {
    let (_dir, config) = common::snapshot_dir();
    let store = DblpStore::load(&config).unwrap();
    let rows = store.find_seed_authorships(&[3], 0).unwrap();
    let papers: Vec<i64> = rows.iter().map(|r| r.paper_id()).collect();
    assert_eq!(papers, vec![11, 13]);
}
