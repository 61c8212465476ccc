//! SQL for the snapshot tables and the five query templates.
//!
//! Column names follow the snapshot headers (`NumericID`, `DBLP`, ...).
//! Selected values are cast and null-coalesced so row mapping never depends
//! on the types `read_csv` inferred.

/// DDL used when building a store from in-memory records.
pub const CREATE_TABLES: &str = "
CREATE TABLE authors (
    NumericID BIGINT,
    DBLP VARCHAR,
    Name VARCHAR,
    ORCID VARCHAR
);
CREATE TABLE papers (
    NumericID BIGINT,
    DBLP VARCHAR,
    Title VARCHAR,
    Year INTEGER,
    Type BIGINT
);
CREATE TABLE papers_authors (
    PaperID BIGINT,
    AuthorID BIGINT
);
";

/// Author projection shared by the author lookups.
const AUTHOR_COLUMNS: &str = "CAST(NumericID AS BIGINT), \
    COALESCE(CAST(Name AS VARCHAR), ''), \
    COALESCE(CAST(DBLP AS VARCHAR), ''), \
    CAST(ORCID AS VARCHAR)";

/// Case-insensitive prefix match on `Name`.
pub fn find_author_prefix() -> String {
    format!(
        "SELECT {AUTHOR_COLUMNS} FROM authors \
         WHERE starts_with(upper(Name), upper(?)) \
         ORDER BY NumericID"
    )
}

/// Case-insensitive pattern match on `Name`.
pub fn find_author_like() -> String {
    format!("SELECT {AUTHOR_COLUMNS} FROM authors WHERE Name ILIKE ? ORDER BY NumericID")
}

/// Exact identifier lookup.
pub fn find_author_dblp() -> String {
    format!("SELECT {AUTHOR_COLUMNS} FROM authors WHERE DBLP = ? ORDER BY NumericID")
}

/// Joined authorship projection: paper columns 0..=4, author columns 5..=8.
const JOINED_SELECT: &str = "SELECT \
    CAST(p.NumericID AS BIGINT), \
    CAST(p.DBLP AS VARCHAR), \
    COALESCE(CAST(p.Title AS VARCHAR), ''), \
    CAST(COALESCE(p.Year, 0) AS INTEGER), \
    CAST(COALESCE(p.Type, 0) AS BIGINT), \
    CAST(a.NumericID AS BIGINT), \
    COALESCE(CAST(a.Name AS VARCHAR), ''), \
    COALESCE(CAST(a.DBLP AS VARCHAR), ''), \
    CAST(a.ORCID AS VARCHAR) \
    FROM papers_authors pa \
    JOIN papers p ON pa.PaperID = p.NumericID \
    JOIN authors a ON pa.AuthorID = a.NumericID";

/// `?, ?, ?` for an `IN` list of `n` values.
fn placeholders(n: usize) -> String {
    vec!["?"; n.max(1)].join(", ")
}

/// Authorship rows of the seed authors themselves.
///
/// Parameters: `n` author ids, then the year bound.
pub fn find_coauthors(n: usize) -> String {
    format!(
        "{JOINED_SELECT} \
         WHERE pa.AuthorID IN ({}) AND COALESCE(p.Year, 0) >= ? \
         ORDER BY p.NumericID, a.NumericID",
        placeholders(n)
    )
}

/// Every authorship row of every paper written by at least one seed author.
///
/// Parameters: `n` author ids, then the year bound. Ordered by author name;
/// ties fall back to paper id then author id so the order is stable.
pub fn find_copapers(n: usize) -> String {
    format!(
        "{JOINED_SELECT} \
         WHERE pa.PaperID IN (SELECT PaperID FROM papers_authors WHERE AuthorID IN ({})) \
         AND COALESCE(p.Year, 0) >= ? \
         ORDER BY a.Name, pa.PaperID, pa.AuthorID",
        placeholders(n)
    )
}

/// Column names of a loaded table.
pub const TABLE_COLUMNS: &str =
    "SELECT column_name FROM duckdb_columns() WHERE table_name = ? ORDER BY column_index";
