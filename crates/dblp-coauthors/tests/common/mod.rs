//! Shared snapshot fixture.
#![allow(dead_code)]

use std::path::Path;

use dblp_coauthors::Config;
use dblp_coauthors::config::snapshot::{AUTHORS_FILE, LINKS_FILE, PAPERS_FILE};

pub const AUTHORS: &str = "NumericID\tDBLP\tName\tORCID
1\thttps://dblp.org/pid/1\tAda Lovelace\thttps://orcid.org/0000-0001
2\thttps://dblp.org/pid/2\tCharles Babbage\t
3\thttps://dblp.org/pid/3\tAlan Turing\t
4\thttps://dblp.org/pid/4\tAlan Perlis\t
5\thttps://dblp.org/pid/5\tKurt G&#246;del\t
";

pub const PAPERS: &str = "NumericID\tDBLP\tTitle\tYear\tType
10\thttps://dblp.org/rec/10\tAnalytical Engine Notes\t2015\t3
11\thttps://dblp.org/rec/11\tComputing Machinery\t2022\t1
12\thttps://dblp.org/rec/12\tOld Work\t1990\t3
13\thttps://dblp.org/rec/13\tPreprint\t2023\t6
";

pub const PAPERS_WITHOUT_DBLP: &str = "NumericID\tTitle\tYear\tType
10\tAnalytical Engine Notes\t2015\t3
11\tComputing Machinery\t2022\t1
12\tOld Work\t1990\t3
13\tPreprint\t2023\t6
";

pub const LINKS: &str = "PaperID\tAuthorID
10\t1
10\t2
11\t1
11\t3
12\t2
12\t5
13\t3
13\t4
";

/// Write the three snapshot files into `dir`.
pub fn write_snapshot(dir: &Path) {
    write_files(dir, AUTHORS, PAPERS, LINKS);
}

pub fn write_files(dir: &Path, authors: &str, papers: &str, links: &str) {
    std::fs::write(dir.join(AUTHORS_FILE), authors).unwrap();
    std::fs::write(dir.join(PAPERS_FILE), papers).unwrap();
    std::fs::write(dir.join(LINKS_FILE), links).unwrap();
}

/// Temporary directory holding the fixture snapshot.
pub fn snapshot_dir() -> (tempfile::TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path());
    let config = Config::for_testing(dir.path());
    (dir, config)
}
