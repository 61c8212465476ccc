//! Configuration for the co-author search tool and the snapshot refresher.

use std::path::PathBuf;
use std::time::Duration;

use crate::models::Matcher;

/// Snapshot layout constants.
pub mod snapshot {
    /// Authors file name.
    pub const AUTHORS_FILE: &str = "dblp_authors.csv";

    /// Papers file name.
    pub const PAPERS_FILE: &str = "dblp_papers.csv";

    /// Author-paper links file name.
    pub const LINKS_FILE: &str = "dblp_papers_authors.csv";

    /// Column delimiter used by the snapshot files.
    pub const DELIMITER: char = '\t';

    /// Host prefix of canonical identifier URLs.
    pub const DBLP_PREFIX: &str = "https://dblp.org";
}

/// Cutoff span constants (in years before the current year).
pub mod cutoff {
    /// Default span.
    pub const DEFAULT_YEARS: i32 = 5;

    /// Smallest selectable span.
    pub const MIN_YEARS: i32 = 1;

    /// Largest selectable span.
    pub const MAX_YEARS: i32 = 10;
}

/// Remote dump constants.
pub mod remote {
    use std::time::Duration;

    /// Local dump file name.
    pub const DUMP_FILE: &str = "dblp.rdf.gz";

    /// Remote directory that lists the dump.
    pub const DUMP_DIR: &str = "https://dblp.org/rdf/";

    /// Maximum tolerated age difference in days.
    pub const MAX_AGE_DAYS: i64 = 14;

    /// Request timeout (the dump is large).
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(3600);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
}

/// Search tool configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the three snapshot files.
    pub snapshot_dir: PathBuf,

    /// Authors file name inside `snapshot_dir`.
    pub authors_file: String,

    /// Papers file name inside `snapshot_dir`.
    pub papers_file: String,

    /// Links file name inside `snapshot_dir`.
    pub links_file: String,

    /// Column delimiter of the snapshot files.
    pub delimiter: char,

    /// Matcher used when a request does not name one.
    pub default_matcher: Matcher,

    /// Cutoff span used when a request does not name one.
    pub default_cutoff_years: i32,
}

impl Config {
    /// Create a configuration reading snapshots from `snapshot_dir`.
    #[must_use]
    pub fn new(snapshot_dir: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_dir: snapshot_dir.into(),
            authors_file: snapshot::AUTHORS_FILE.to_string(),
            papers_file: snapshot::PAPERS_FILE.to_string(),
            links_file: snapshot::LINKS_FILE.to_string(),
            delimiter: snapshot::DELIMITER,
            default_matcher: Matcher::default(),
            default_cutoff_years: cutoff::DEFAULT_YEARS,
        }
    }

    /// Create a test configuration pointing at a fixture directory.
    #[must_use]
    pub fn for_testing(snapshot_dir: impl Into<PathBuf>) -> Self {
        Self::new(snapshot_dir)
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `DBLP_SNAPSHOT_DIR` (default `.`), `DBLP_MATCHER` and
    /// `DBLP_CUTOFF_YEARS`. A `.env` file is honoured when present.
    ///
    /// # Errors
    ///
    /// Returns error if a variable holds an unparseable value.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let dir = std::env::var("DBLP_SNAPSHOT_DIR").unwrap_or_else(|_| ".".to_string());
        let mut config = Self::new(dir);

        if let Ok(matcher) = std::env::var("DBLP_MATCHER") {
            config.default_matcher = matcher.parse()?;
        }
        if let Ok(years) = std::env::var("DBLP_CUTOFF_YEARS") {
            config.default_cutoff_years = clamp_cutoff_years(years.trim().parse()?);
        }

        Ok(config)
    }

    /// Full path of the authors file.
    #[must_use]
    pub fn authors_path(&self) -> PathBuf {
        self.snapshot_dir.join(&self.authors_file)
    }

    /// Full path of the papers file.
    #[must_use]
    pub fn papers_path(&self) -> PathBuf {
        self.snapshot_dir.join(&self.papers_file)
    }

    /// Full path of the links file.
    #[must_use]
    pub fn links_path(&self) -> PathBuf {
        self.snapshot_dir.join(&self.links_file)
    }

    /// Same configuration reading from another directory.
    #[must_use]
    pub fn with_snapshot_dir(&self, snapshot_dir: impl Into<PathBuf>) -> Self {
        Self { snapshot_dir: snapshot_dir.into(), ..self.clone() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Clamp a cutoff span into the selectable range.
#[must_use]
pub fn clamp_cutoff_years(years: i32) -> i32 {
    years.clamp(cutoff::MIN_YEARS, cutoff::MAX_YEARS)
}

/// Snapshot refresher configuration.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Local dump file.
    pub local_file: PathBuf,

    /// Remote directory URL (with trailing slash).
    pub remote_dir: String,

    /// Maximum tolerated age difference in days.
    pub max_age_days: i64,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl RefreshConfig {
    /// Create a configuration with the default remote and threshold.
    #[must_use]
    pub fn new(local_file: impl Into<PathBuf>) -> Self {
        Self {
            local_file: local_file.into(),
            remote_dir: remote::DUMP_DIR.to_string(),
            max_age_days: remote::MAX_AGE_DAYS,
            request_timeout: remote::REQUEST_TIMEOUT,
            connect_timeout: remote::CONNECT_TIMEOUT,
        }
    }

    /// Create a test configuration against a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str, local_file: impl Into<PathBuf>) -> Self {
        Self {
            local_file: local_file.into(),
            remote_dir: format!("{}/rdf/", base_url.trim_end_matches('/')),
            max_age_days: remote::MAX_AGE_DAYS,
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `DBLP_DUMP_FILE`, `DBLP_DUMP_DIR` and `DBLP_MAX_AGE_DAYS`.
    ///
    /// # Errors
    ///
    /// Returns error if `DBLP_MAX_AGE_DAYS` is not an integer.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let file = std::env::var("DBLP_DUMP_FILE").unwrap_or_else(|_| remote::DUMP_FILE.to_string());
        let mut config = Self::new(file);

        if let Ok(dir) = std::env::var("DBLP_DUMP_DIR") {
            config.remote_dir = dir;
        }
        if let Ok(days) = std::env::var("DBLP_MAX_AGE_DAYS") {
            config.max_age_days = days.trim().parse()?;
        }

        Ok(config)
    }

    /// Name of the file as it appears in the remote listing.
    #[must_use]
    pub fn file_name(&self) -> String {
        self.local_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| remote::DUMP_FILE.to_string())
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self::new(remote::DUMP_FILE)
    }
}
