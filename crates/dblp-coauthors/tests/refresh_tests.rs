//! Freshness checker tests against a mock remote directory.

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dblp_coauthors::refresh::{DownloadReason, Freshness, RefreshOutcome, Refresher};
use dblp_coauthors::{RefreshConfig, RefreshError};

const DUMP_BYTES: &[u8] = b"\x1f\x8b fake dump bytes";

fn listing(timestamp: &str) -> String {
    format!(
        "<html><body><table>\n\
         <tr><td><a href=\"dblp.dtd\">dblp.dtd</a></td><td align=\"right\">2001-01-01 00:00  </td></tr>\n\
         <tr><td><a href=\"dblp.rdf.gz\">dblp.rdf.gz</a></td><td align=\"right\">{timestamp}  </td><td>4.1G</td></tr>\n\
         </table></body></html>"
    )
}

async fn mount_listing(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/rdf/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_dump(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/rdf/dblp.rdf.gz"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(DUMP_BYTES.to_vec()))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn refresher(server: &MockServer, dir: &tempfile::TempDir) -> Refresher {
    let config = RefreshConfig::for_testing(&server.uri(), dir.path().join("dblp.rdf.gz"));
    Refresher::new(config).unwrap()
}

#[tokio::test]
async fn test_missing_file_is_downloaded() {
    let server = MockServer::start().await;
    mount_dump(&server, 1).await;
    let dir = tempfile::tempdir().unwrap();

    let outcome = refresher(&server, &dir).run().await.unwrap();

    assert_eq!(
        outcome,
        RefreshOutcome::Downloaded { reason: DownloadReason::Missing, bytes: DUMP_BYTES.len() as u64 }
    );
    assert_eq!(std::fs::read(dir.path().join("dblp.rdf.gz")).unwrap(), DUMP_BYTES);
}

#[tokio::test]
async fn test_gzip_encoded_dump_is_stored_as_served() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rdf/dblp.rdf.gz"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-encoding", "gzip")
                .set_body_bytes(DUMP_BYTES.to_vec()),
        )
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    refresher(&server, &dir).run().await.unwrap();
    assert_eq!(std::fs::read(dir.path().join("dblp.rdf.gz")).unwrap(), DUMP_BYTES);
}

#[tokio::test]
async fn test_stale_file_is_replaced() {
    let server = MockServer::start().await;
    mount_listing(&server, listing("2099-01-01 12:00")).await;
    mount_dump(&server, 1).await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("dblp.rdf.gz"), b"old").unwrap();

    let outcome = refresher(&server, &dir).run().await.unwrap();

    assert!(matches!(
        outcome,
        RefreshOutcome::Downloaded { reason: DownloadReason::Stale { age_days }, .. } if age_days > 14
    ));
    assert_eq!(std::fs::read(dir.path().join("dblp.rdf.gz")).unwrap(), DUMP_BYTES);
}

#[tokio::test]
async fn test_recent_file_is_kept() {
    let server = MockServer::start().await;
    mount_listing(&server, listing("2001-01-01 00:00")).await;
    mount_dump(&server, 0).await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("dblp.rdf.gz"), b"local").unwrap();

    let outcome = refresher(&server, &dir).run().await.unwrap();

    assert!(matches!(outcome, RefreshOutcome::UpToDate { remote: Some(_), .. }));
    assert_eq!(std::fs::read(dir.path().join("dblp.rdf.gz")).unwrap(), b"local");
}

#[tokio::test]
async fn test_listing_without_timestamp_counts_as_fresh() {
    let server = MockServer::start().await;
    mount_listing(&server, "<a href=\"other.gz\">other.gz</a> 2099-01-01 12:00".to_string()).await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("dblp.rdf.gz"), b"local").unwrap();

    let freshness = refresher(&server, &dir).check().await.unwrap();
    assert!(matches!(freshness, Freshness::UpToDate { remote: None, .. }));
}

#[tokio::test]
async fn test_listing_error_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rdf/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("dblp.rdf.gz"), b"local").unwrap();

    let err = refresher(&server, &dir).run().await.unwrap_err();
    assert!(matches!(err, RefreshError::UnexpectedStatus { status: 503, .. }), "{err}");
}

#[tokio::test]
async fn test_failed_download_leaves_no_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rdf/dblp.rdf.gz"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let dir = tempfile::tempdir().unwrap();

    let err = refresher(&server, &dir).run().await.unwrap_err();
    assert!(matches!(err, RefreshError::UnexpectedStatus { status: 404, .. }), "{err}");
    assert!(!dir.path().join("dblp.rdf.gz").exists());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
