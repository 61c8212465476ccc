//! Convert the gzipped RDF dump into the three snapshot files.
//!
//! The dump is streamed line by line. Publication entries are buffered from
//! their opening to their closing tag and parsed as a unit; everything outside
//! an entry is ignored. Numeric ids are dense, starting at 1, in first-seen
//! order.

mod entry;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use tempfile::NamedTempFile;

use crate::config::snapshot::{AUTHORS_FILE, LINKS_FILE, PAPERS_FILE};
use crate::error::ConvertError;
use crate::models::{Author, Authorship, Paper, PublicationType};
use crate::resolver::encode_non_ascii;

pub use entry::{RawEntry, Signature, closes, opening_kind};

/// Counts from one conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub papers: usize,
    pub authors: usize,
    pub links: usize,
    /// Entries whose authorship links were dropped.
    pub skipped_entries: usize,
}

/// Accumulates records while the dump is read.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    papers: Vec<Paper>,
    paper_ids: HashMap<String, i64>,
    authors: Vec<Author>,
    author_ids: HashMap<String, i64>,
    links: Vec<Authorship>,
    skipped_entries: usize,
}

fn next_id(len: usize) -> i64 {
    i64::try_from(len).unwrap_or(i64::MAX - 1) + 1
}

impl SnapshotBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Papers in id order.
    #[must_use]
    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    /// Authors in id order.
    #[must_use]
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Authorship links in discovery order.
    #[must_use]
    pub fn links(&self) -> &[Authorship] {
        &self.links
    }

    #[must_use]
    pub fn stats(&self) -> ConvertStats {
        ConvertStats {
            papers: self.papers.len(),
            authors: self.authors.len(),
            links: self.links.len(),
            skipped_entries: self.skipped_entries,
        }
    }

    fn author_id(&mut self, signature: &Signature) -> i64 {
        if let Some(&id) = self.author_ids.get(&signature.creator) {
            return id;
        }
        let id = next_id(self.authors.len());
        self.author_ids.insert(signature.creator.clone(), id);
        self.authors.push(Author {
            numeric_id: id,
            name: encode_non_ascii(&signature.name),
            dblp: signature.creator.clone(),
            orcid: signature.orcid.clone(),
        });
        id
    }

    /// Add one parsed entry.
    pub fn push(&mut self, entry: RawEntry) {
        let Some(about) = entry.about else {
            tracing::error!(kind = %entry.kind, title = %entry.title, "Entry without identifier skipped");
            return;
        };

        let paper_id = match self.paper_ids.get(&about) {
            Some(&id) => id,
            None => {
                let id = next_id(self.papers.len());
                self.paper_ids.insert(about.clone(), id);
                self.papers.push(Paper {
                    numeric_id: id,
                    dblp: Some(about.clone()),
                    title: String::new(),
                    year: 0,
                    kind: entry.kind,
                });
                id
            }
        };

        if let Some(paper) = usize::try_from(paper_id - 1).ok().and_then(|i| self.papers.get_mut(i)) {
            paper.title = entry.title;
            paper.year = entry.year;
            paper.kind = entry.kind;
        }

        if entry.authored_by.len() != entry.signatures.len() {
            tracing::warn!(
                paper = %about,
                authors = entry.authored_by.len(),
                signatures = entry.signatures.len(),
                "Author and signature counts differ, links skipped"
            );
            self.skipped_entries += 1;
            return;
        }

        for signature in &entry.signatures {
            let author_id = self.author_id(signature);
            self.links.push(Authorship { paper_id, author_id });
        }
    }

    /// Read a decompressed dump.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading fails.
    pub fn read<R: BufRead>(&mut self, mut reader: R) -> Result<(), ConvertError> {
        let mut raw = Vec::new();
        let mut current: Option<(PublicationType, Vec<String>)> = None;

        loop {
            raw.clear();
            if reader.read_until(b'\n', &mut raw)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&raw).trim_end_matches(['\n', '\r']).to_string();

            match current.as_mut() {
                None => {
                    if let Some(kind) = opening_kind(&line) {
                        current = Some((kind, vec![line]));
                    }
                }
                Some((kind, lines)) => {
                    let done = closes(&line, *kind);
                    lines.push(line);
                    if done {
                        if let Some((kind, lines)) = current.take() {
                            self.push(RawEntry::parse(kind, &lines));
                        }
                    }
                }
            }
        }

        if let Some((kind, lines)) = current {
            tracing::warn!(%kind, lines = lines.len(), "Dump ended inside an entry");
        }
        Ok(())
    }

    /// Write the three snapshot files into `dir`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a file cannot be written.
    pub fn write(&self, dir: &Path) -> Result<ConvertStats, ConvertError> {
        std::fs::create_dir_all(dir)?;

        write_atomic(&dir.join(PAPERS_FILE), |out| {
            writeln!(out, "NumericID\tDBLP\tTitle\tYear\tType")?;
            for p in &self.papers {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}\t{}",
                    p.numeric_id,
                    field(p.dblp.as_deref().unwrap_or_default()),
                    field(&p.title),
                    p.year,
                    p.kind.code()
                )?;
            }
            Ok(())
        })?;

        write_atomic(&dir.join(AUTHORS_FILE), |out| {
            writeln!(out, "NumericID\tDBLP\tName\tORCID")?;
            for a in &self.authors {
                writeln!(
                    out,
                    "{}\t{}\t{}\t{}",
                    a.numeric_id,
                    field(&a.dblp),
                    field(&a.name),
                    field(a.orcid_or_empty())
                )?;
            }
            Ok(())
        })?;

        write_atomic(&dir.join(LINKS_FILE), |out| {
            writeln!(out, "PaperID\tAuthorID")?;
            for link in &self.links {
                writeln!(out, "{}\t{}", link.paper_id, link.author_id)?;
            }
            Ok(())
        })?;

        Ok(self.stats())
    }
}

/// Value safe for a tab separated cell.
fn field(value: &str) -> String {
    value.replace(['\t', '\n', '\r'], " ")
}

fn write_atomic<F>(path: &Path, write_fn: F) -> Result<(), ConvertError>
where
    F: FnOnce(&mut BufWriter<&mut NamedTempFile>) -> std::io::Result<()>,
{
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let mut temp = NamedTempFile::new_in(parent)?;
    {
        let mut out = BufWriter::new(&mut temp);
        write_fn(&mut out)?;
        out.flush()?;
    }
    temp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

/// Convert `input` (gzipped RDF) into snapshot files under `output_dir`.
///
/// # Errors
///
/// Returns [`ConvertError::MissingDump`] if `input` does not exist, or an I/O error.
pub fn convert_dump(input: &Path, output_dir: &Path) -> Result<ConvertStats, ConvertError> {
    if !input.exists() {
        return Err(ConvertError::MissingDump(PathBuf::from(input)));
    }

    tracing::info!(input = %input.display(), "Processing dump");
    let reader = BufReader::new(MultiGzDecoder::new(File::open(input)?));
    let mut builder = SnapshotBuilder::new();
    builder.read(reader)?;

    let stats = builder.write(output_dir)?;
    tracing::info!(
        papers = stats.papers,
        authors = stats.authors,
        links = stats.links,
        skipped = stats.skipped_entries,
        dir = %output_dir.display(),
        "Snapshot written"
    );
    Ok(stats)
}
