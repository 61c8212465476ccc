//! Keep the local dump file fresh.
//!
//! The remote directory listing is fetched, the dump's listed timestamp is
//! compared with the local file's modification time, and the dump is
//! downloaded again when the local file is missing or too old. Downloads
//! stream into a temporary sibling file that is renamed into place.

mod listing;

use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDateTime};
use reqwest::Client;
use tempfile::NamedTempFile;
use url::Url;

use crate::config::RefreshConfig;
use crate::error::{RefreshError, RefreshResult};

pub use listing::listed_timestamp;

/// Why a download happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadReason {
    /// No local file.
    Missing,
    /// The remote file is more than the allowed number of days newer.
    Stale {
        /// Whole days between the remote and local timestamps.
        age_days: i64,
    },
}

/// Decision reached before any download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    /// The local file must be (re)downloaded.
    NeedsDownload(DownloadReason),
    /// The local file is recent enough.
    UpToDate {
        /// Local modification time.
        local: NaiveDateTime,
        /// Listed remote time, if the listing had one.
        remote: Option<NaiveDateTime>,
    },
}

/// Result of a refresh run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new copy was written.
    Downloaded {
        /// Why it was fetched.
        reason: DownloadReason,
        /// Bytes written.
        bytes: u64,
    },
    /// Nothing to do.
    UpToDate {
        /// Local modification time.
        local: NaiveDateTime,
        /// Listed remote time, if any.
        remote: Option<NaiveDateTime>,
    },
}

/// Age decision for a local file against the listed remote timestamp.
///
/// Returns the reason to download, or `None` if the file is fresh enough. A
/// listing without a timestamp counts as fresh.
#[must_use]
pub fn stale_reason(
    local: NaiveDateTime,
    remote: Option<NaiveDateTime>,
    max_age_days: i64,
) -> Option<DownloadReason> {
    let age_days = (remote? - local).num_days();
    (age_days > max_age_days).then_some(DownloadReason::Stale { age_days })
}

/// Local wall-clock modification time of `path`.
///
/// # Errors
///
/// Returns an I/O error if the metadata cannot be read.
pub fn local_mtime(path: &Path) -> std::io::Result<NaiveDateTime> {
    let modified = std::fs::metadata(path)?.modified()?;
    Ok(DateTime::<Local>::from(modified).naive_local())
}

/// HTTP side of the freshness check.
#[derive(Debug, Clone)]
pub struct Refresher {
    client: Client,
    config: RefreshConfig,
}

impl Refresher {
    /// Create a refresher.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: RefreshConfig) -> RefreshResult<Self> {
        // Built without response decompression, so the dump is stored as served.
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        Ok(Self { client, config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &RefreshConfig {
        &self.config
    }

    fn dir_url(&self) -> RefreshResult<Url> {
        Ok(Url::parse(&self.config.remote_dir)?)
    }

    fn file_url(&self) -> RefreshResult<Url> {
        Ok(self.dir_url()?.join(&self.config.file_name())?)
    }

    async fn get(&self, url: Url) -> RefreshResult<reqwest::Response> {
        tracing::debug!(%url, "GET");
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RefreshError::UnexpectedStatus { status: status.as_u16(), url: url.to_string() });
        }
        Ok(response)
    }

    /// Decide whether the local file needs downloading.
    ///
    /// The listing is only fetched when a local file exists.
    ///
    /// # Errors
    ///
    /// Returns error if the listing cannot be fetched.
    pub async fn check(&self) -> RefreshResult<Freshness> {
        let path = &self.config.local_file;
        if !path.exists() {
            tracing::info!(path = %path.display(), "Local dump not found");
            return Ok(Freshness::NeedsDownload(DownloadReason::Missing));
        }

        let local = local_mtime(path)?;
        let listing = self.get(self.dir_url()?).await?.text().await?;
        let remote = listed_timestamp(&listing, &self.config.file_name());
        match remote {
            Some(remote) => tracing::info!(%remote, %local, "Compared dump timestamps"),
            None => tracing::warn!(file = %self.config.file_name(), "No timestamp in remote listing"),
        }

        Ok(match stale_reason(local, remote, self.config.max_age_days) {
            Some(reason) => Freshness::NeedsDownload(reason),
            None => Freshness::UpToDate { local, remote },
        })
    }

    /// Download the remote file into place.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-success status or I/O failure;
    /// the existing local file is left untouched in that case.
    pub async fn download(&self) -> RefreshResult<u64> {
        let path = &self.config.local_file;
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut response = self.get(self.file_url()?).await?;
        let mut temp = NamedTempFile::new_in(parent)?;
        let mut bytes = 0u64;
        while let Some(chunk) = response.chunk().await? {
            temp.write_all(&chunk)?;
            bytes += chunk.len() as u64;
        }
        temp.flush()?;
        temp.persist(path)
            .map_err(|err| RefreshError::Persist { path: path.clone(), source: err.error })?;

        tracing::info!(path = %path.display(), bytes, "Downloaded dump");
        Ok(bytes)
    }

    /// Check and download if needed.
    ///
    /// # Errors
    ///
    /// Returns error from either step.
    pub async fn run(&self) -> RefreshResult<RefreshOutcome> {
        match self.check().await? {
            Freshness::NeedsDownload(reason) => {
                if let DownloadReason::Stale { age_days } = reason {
                    tracing::info!(age_days, max = self.config.max_age_days, "Local dump is too old");
                }
                let bytes = self.download().await?;
                Ok(RefreshOutcome::Downloaded { reason, bytes })
            }
            Freshness::UpToDate { local, remote } => {
                tracing::info!(max_age_days = self.config.max_age_days, "Local dump is up to date");
                Ok(RefreshOutcome::UpToDate { local, remote })
            }
        }
    }
}
