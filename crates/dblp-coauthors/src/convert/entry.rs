//! Line-level parsing of one publication entry of the RDF dump.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::PublicationType;

macro_rules! pattern {
    ($name:ident, $re:literal) => {
        static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($re).expect(concat!("valid regex ", stringify!($name))));
    };
}

pattern!(ABOUT_RE, r#"rdf:about="([^"]+)""#);
pattern!(TITLE_RE, r"<dblp:title>([^<]+)</dblp:title>");
pattern!(YEAR_RE, r"<dblp:yearOfPublication.*?>(\d+)</dblp:yearOfPublication>");
pattern!(AUTHORED_BY_RE, r#"<dblp:authoredBy rdf:resource="([^"]+)""#);
pattern!(CREATOR_RE, r#"<dblp:signatureCreator rdf:resource="([^"]+)""#);
pattern!(ORCID_RE, r#"<dblp:signatureOrcid rdf:resource="([^"]+)""#);
pattern!(NAME_RE, r"<dblp:signatureDblpName>([^<]+)</dblp:signatureDblpName>");

const SIGNATURE_OPEN: &str = "<dblp:AuthorSignature";
const SIGNATURE_CLOSE: &str = "</dblp:AuthorSignature";

fn capture(re: &Regex, line: &str) -> Option<String> {
    re.captures(line).and_then(|c| c.get(1)).map(|m| m.as_str().to_string())
}

/// Publication kinds that open an entry; `Invalid` never does.
fn entry_kinds() -> impl Iterator<Item = PublicationType> {
    PublicationType::ALL.into_iter().filter(|kind| *kind != PublicationType::Invalid)
}

/// Whether `line` contains `{prefix}{label}` followed by a tag boundary.
fn has_tag(line: &str, prefix: &str, label: &str) -> bool {
    let needle = format!("{prefix}{label}");
    line.match_indices(&needle).any(|(at, _)| {
        line[at + needle.len()..]
            .chars()
            .next()
            .is_none_or(|c| c.is_whitespace() || c == '>' || c == '/')
    })
}

/// Kind of the entry a line opens, if any.
#[must_use]
pub fn opening_kind(line: &str) -> Option<PublicationType> {
    entry_kinds().find(|kind| has_tag(line, "<dblp:", kind.label()))
}

/// Whether `line` closes an entry of `kind`.
#[must_use]
pub fn closes(line: &str, kind: PublicationType) -> bool {
    has_tag(line, "</dblp:", kind.label())
}

/// One author signature block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    /// Author identifier URL.
    pub creator: String,
    /// ORCID URL.
    pub orcid: Option<String>,
    /// Display name.
    pub name: String,
}

/// Fields collected from one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub kind: PublicationType,
    pub about: Option<String>,
    pub title: String,
    pub year: i32,
    pub authored_by: Vec<String>,
    pub signatures: Vec<Signature>,
}

impl RawEntry {
    /// Parse the buffered lines of one entry, opening and closing lines included.
    #[must_use]
    pub fn parse(kind: PublicationType, lines: &[String]) -> Self {
        let mut entry = Self { kind, ..Self::default() };
        let mut signature: Option<Signature> = None;

        for (i, line) in lines.iter().enumerate() {
            if i == 0 {
                entry.about = capture(&ABOUT_RE, line);
                continue;
            }

            if let Some(title) = capture(&TITLE_RE, line) {
                entry.title = title;
            } else if let Some(year) = capture(&YEAR_RE, line) {
                entry.year = year.parse().unwrap_or_default();
            } else if let Some(author) = capture(&AUTHORED_BY_RE, line) {
                entry.authored_by.push(author);
            } else if line.contains(SIGNATURE_OPEN) {
                signature = Some(Signature::default());
            }

            let Some(current) = signature.as_mut() else {
                continue;
            };
            if line.contains(SIGNATURE_CLOSE) {
                entry.signatures.extend(signature.take());
            } else if let Some(creator) = capture(&CREATOR_RE, line) {
                current.creator = creator;
            } else if let Some(orcid) = capture(&ORCID_RE, line) {
                current.orcid = Some(orcid);
            } else if let Some(name) = capture(&NAME_RE, line) {
                current.name = name;
            }
        }

        entry
    }
}
