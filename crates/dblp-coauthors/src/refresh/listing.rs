//! Timestamp extraction from a remote directory listing page.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r">(\d{4})-(\d{2})-(\d{2})\s+(\d{2}):(\d{2})\s*<").expect("valid timestamp regex")
});

/// Modification time of `file_name` as shown in an HTML directory listing.
///
/// Only the first line mentioning the file is considered. Returns `None` if
/// that line has no `>YYYY-MM-DD HH:MM<` cell or the file is not listed.
#[must_use]
pub fn listed_timestamp(listing: &str, file_name: &str) -> Option<NaiveDateTime> {
    let line = listing.lines().find(|line| line.contains(file_name))?;
    let caps = TIMESTAMP_RE.captures(line)?;
    let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

    let year = i32::try_from(field(1)?).ok()?;
    NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)?.and_hms_opt(field(4)?, field(5)?, 0)
}
