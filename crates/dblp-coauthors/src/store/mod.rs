//! In-memory `DuckDB` store over the three snapshot files.
//!
//! The store owns its connection. Loading builds a brand new in-memory
//! database, so a failed load never leaves a half-filled store behind and
//! callers replace their handle only on success.

mod queries;

use std::path::{Path, PathBuf};

use duckdb::{Connection, Row, params, params_from_iter};

use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use crate::models::{Author, Authorship, CollaborationRow, Paper, PublicationType};

/// Required columns per snapshot table.
const AUTHOR_COLUMNS: &[&str] = &["NumericID", "Name", "DBLP", "ORCID"];
const PAPER_COLUMNS: &[&str] = &["NumericID", "Title", "Year", "Type"];
const LINK_COLUMNS: &[&str] = &["PaperID", "AuthorID"];

/// Row counts of a loaded store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct StoreStats {
    /// Rows in `authors`.
    pub authors: i64,
    /// Rows in `papers`.
    pub papers: i64,
    /// Rows in `papers_authors`.
    pub links: i64,
}

/// Snapshot tables plus the registered query templates.
pub struct DblpStore {
    conn: Connection,
    source: Option<PathBuf>,
}

impl DblpStore {
    /// Load the three snapshot files named by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::MissingSnapshot`] when a file is absent,
    /// [`StoreError::MissingColumn`] when a header lacks a required column and
    /// [`StoreError::DuckDb`] when a file cannot be parsed.
    pub fn load(config: &Config) -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;

        load_table(&conn, "authors", &config.authors_path(), config.delimiter, AUTHOR_COLUMNS)?;
        load_table(&conn, "papers", &config.papers_path(), config.delimiter, PAPER_COLUMNS)?;
        load_table(&conn, "papers_authors", &config.links_path(), config.delimiter, LINK_COLUMNS)?;

        // Paper identifiers are optional in older snapshots.
        if !table_columns(&conn, "papers")?.iter().any(|c| c == "DBLP") {
            conn.execute_batch("ALTER TABLE papers ADD COLUMN DBLP VARCHAR")?;
        }

        let store = Self { conn, source: Some(config.snapshot_dir.clone()) };
        store.register_templates()?;

        let stats = store.stats()?;
        tracing::info!(
            dir = %config.snapshot_dir.display(),
            authors = stats.authors,
            papers = stats.papers,
            links = stats.links,
            "Loaded DBLP snapshot"
        );

        Ok(store)
    }

    /// Build a store from in-memory records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if table creation or appending fails.
    pub fn from_records(
        authors: &[Author],
        papers: &[Paper],
        links: &[Authorship],
    ) -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(queries::CREATE_TABLES)?;

        {
            let mut appender = conn.appender("authors")?;
            for a in authors {
                appender.append_row(params![a.numeric_id, a.dblp, a.name, a.orcid])?;
            }
            appender.flush()?;
        }
        {
            let mut appender = conn.appender("papers")?;
            for p in papers {
                appender.append_row(params![
                    p.numeric_id,
                    p.dblp,
                    p.title,
                    p.year,
                    p.kind.code()
                ])?;
            }
            appender.flush()?;
        }
        {
            let mut appender = conn.appender("papers_authors")?;
            for l in links {
                appender.append_row(params![l.paper_id, l.author_id])?;
            }
            appender.flush()?;
        }

        let store = Self { conn, source: None };
        store.register_templates()?;
        Ok(store)
    }

    /// Directory the store was loaded from (`None` for in-memory records).
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Row counts per table.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if a count fails.
    pub fn stats(&self) -> StoreResult<StoreStats> {
        let count = |table: &str| -> StoreResult<i64> {
            Ok(self.conn.query_row(&format!("SELECT count(*) FROM {table}"), [], |row| {
                row.get(0)
            })?)
        };
        Ok(StoreStats {
            authors: count("authors")?,
            papers: count("papers")?,
            links: count("papers_authors")?,
        })
    }

    /// Authors whose name starts with `name`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the query fails.
    pub fn find_authors_by_prefix(&self, name: &str) -> StoreResult<Vec<Author>> {
        self.query_authors(&queries::find_author_prefix(), name)
    }

    /// Authors whose name matches the `ILIKE` pattern.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the query fails.
    pub fn find_authors_like(&self, pattern: &str) -> StoreResult<Vec<Author>> {
        self.query_authors(&queries::find_author_like(), pattern)
    }

    /// The author with exactly this identifier URL.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the query fails.
    pub fn find_authors_by_dblp(&self, dblp: &str) -> StoreResult<Vec<Author>> {
        self.query_authors(&queries::find_author_dblp(), dblp)
    }

    /// Authorship rows of the seed authors themselves from `cutoff_year` on.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the query fails.
    pub fn find_seed_authorships(
        &self,
        seed_ids: &[i64],
        cutoff_year: i32,
    ) -> StoreResult<Vec<CollaborationRow>> {
        if seed_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.query_joined(&queries::find_coauthors(seed_ids.len()), seed_ids, cutoff_year)
    }

    /// Every authorship row of papers co-written by a seed author from
    /// `cutoff_year` on, seed authors included, ordered by author name.
    ///
    /// A cutoff of 0 includes every year.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DuckDb`] if the query fails.
    pub fn find_copapers(
        &self,
        seed_ids: &[i64],
        cutoff_year: i32,
    ) -> StoreResult<Vec<CollaborationRow>> {
        if seed_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows =
            self.query_joined(&queries::find_copapers(seed_ids.len()), seed_ids, cutoff_year)?;
        tracing::debug!(seeds = seed_ids.len(), cutoff_year, rows = rows.len(), "Co-paper query");
        Ok(rows)
    }

    #[cfg(test)]
    pub(crate) fn drop_table(&self, table: &str) -> StoreResult<()> {
        self.conn.execute_batch(&format!("DROP TABLE {table}"))?;
        Ok(())
    }

    /// Prepare every template once so a bad snapshot fails at load time.
    fn register_templates(&self) -> StoreResult<()> {
        self.conn.prepare_cached(&queries::find_author_prefix())?;
        self.conn.prepare_cached(&queries::find_author_like())?;
        self.conn.prepare_cached(&queries::find_author_dblp())?;
        self.conn.prepare_cached(&queries::find_coauthors(1))?;
        self.conn.prepare_cached(&queries::find_copapers(1))?;
        Ok(())
    }

    fn query_authors(&self, sql: &str, value: &str) -> StoreResult<Vec<Author>> {
        let mut stmt = self.conn.prepare_cached(sql)?;
        let authors = stmt
            .query_map(params![value], author_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(authors)
    }

    fn query_joined(
        &self,
        sql: &str,
        seed_ids: &[i64],
        cutoff_year: i32,
    ) -> StoreResult<Vec<CollaborationRow>> {
        let bound = if cutoff_year == 0 { i64::from(i32::MIN) } else { i64::from(cutoff_year) };
        let values: Vec<i64> = seed_ids.iter().copied().chain(std::iter::once(bound)).collect();

        let mut stmt = self.conn.prepare_cached(sql)?;
        let rows = stmt
            .query_map(params_from_iter(values), joined_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

impl std::fmt::Debug for DblpStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DblpStore").field("source", &self.source).finish_non_exhaustive()
    }
}

fn author_from_row(row: &Row<'_>) -> duckdb::Result<Author> {
    Ok(Author {
        numeric_id: row.get(0)?,
        name: row.get(1)?,
        dblp: row.get(2)?,
        orcid: row.get(3)?,
    })
}

fn joined_from_row(row: &Row<'_>) -> duckdb::Result<CollaborationRow> {
    Ok(CollaborationRow {
        paper: Paper {
            numeric_id: row.get(0)?,
            dblp: row.get(1)?,
            title: row.get(2)?,
            year: row.get(3)?,
            kind: PublicationType::from_code(row.get(4)?),
        },
        author: Author {
            numeric_id: row.get(5)?,
            name: row.get(6)?,
            dblp: row.get(7)?,
            orcid: row.get(8)?,
        },
    })
}

/// Quote a value as a SQL string literal.
fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn load_table(
    conn: &Connection,
    table: &'static str,
    path: &Path,
    delimiter: char,
    required: &[&'static str],
) -> StoreResult<()> {
    if !path.is_file() {
        return Err(StoreError::missing_snapshot(path));
    }

    let sql = format!(
        "CREATE TABLE {table} AS SELECT * FROM read_csv({}, header = true, delim = {})",
        sql_literal(&path.to_string_lossy()),
        sql_literal(&delimiter.to_string()),
    );
    conn.execute_batch(&sql)?;

    let columns = table_columns(conn, table)?;
    if let Some(missing) = required.iter().find(|c| !columns.iter().any(|have| have == *c)) {
        return Err(StoreError::MissingColumn { table, column: *missing });
    }

    tracing::debug!(table, path = %path.display(), "Loaded snapshot table");
    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> StoreResult<Vec<String>> {
    let mut stmt = conn.prepare(queries::TABLE_COLUMNS)?;
    let columns = stmt
        .query_map(params![table], |row| row.get(0))?
        .collect::<Result<Vec<String>, _>>()?;
    Ok(columns)
}
