use ferrous_failover_application::ports::CandidateFeed;
use ferrous_failover_domain::config::FeedConfig;
use ferrous_failover_domain::{CandidateSource, DomainError};
use ferrous_failover_infrastructure::feed::{is_zip, read_entries, HttpCandidateFeed};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod helpers;
use helpers::{zip_archive, zip_archive_bytes};

fn feed_for(server: &MockServer) -> HttpCandidateFeed {
    let config = FeedConfig {
        url: format!("{}/feed", server.uri()),
        timeout_secs: 5,
        default_tls: false,
        default_port: 8080,
    };
    HttpCandidateFeed::new(&config).unwrap()
}

#[test]
fn test_zip_magic_detection() {
    assert!(is_zip(&zip_archive(&[("31898-1-443.txt", "1.0.0.1\n")])));
    assert!(!is_zip(b"1.0.0.1\n1.0.0.2\n"));
    assert!(!is_zip(b""));
}

#[test]
fn test_read_entries_keeps_named_txt_files() {
    // Arrange
    let archive = zip_archive(&[
        ("lists/", ""),
        ("31898-1-443.txt", "1.0.0.1#US\n1.0.0.2#US\n"),
        ("lists/45102-0-80.txt", "1.0.0.3\n"),
        ("README.md", "ignore me"),
        ("not-a-source.txt", "1.0.0.4\n"),
    ]);

    // Act
    let entries = read_entries(&archive).unwrap();

    // Assert
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].source, CandidateSource::new("31898", true, 443));
    assert_eq!(entries[0].lines(), vec!["1.0.0.1#US", "1.0.0.2#US"]);
    assert_eq!(entries[1].source, CandidateSource::new("45102", false, 80));
}

#[test]
fn test_read_entries_tolerates_invalid_utf8() {
    let archive = zip_archive_bytes(&[("31898-1-443.txt", b"1.0.0.1#\xffUS\n1.0.0.2\n")]);

    let entries = read_entries(&archive).unwrap();

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].lines().len(), 2);
    assert!(entries[0].lines()[0].starts_with("1.0.0.1#"));
    assert_eq!(entries[0].lines()[1], "1.0.0.2");
}

#[test]
fn test_read_entries_rejects_corrupt_archive() {
    let mut archive = zip_archive(&[("31898-1-443.txt", "1.0.0.1\n")]);
    archive.truncate(10);

    let result = read_entries(&archive);

    assert!(matches!(result, Err(DomainError::FeedArchive(_))));
}

#[tokio::test]
async fn test_fetch_zip_feed() {
    // Arrange
    let server = MockServer::start().await;
    let archive = zip_archive(&[
        ("31898-1-443.txt", "1.0.0.1\n"),
        ("45102-0-80.txt", "1.0.0.2\n1.0.0.3\n"),
    ]);
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/zip")
                .set_body_bytes(archive),
        )
        .expect(1)
        .mount(&server)
        .await;

    // Act
    let entries = feed_for(&server).fetch().await.unwrap();

    // Assert
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].source.port, 80);
    assert_eq!(entries[1].lines().len(), 2);
}

#[tokio::test]
async fn test_fetch_plain_text_uses_default_source() {
    // Arrange
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(200).set_body_string("1.0.0.1#US\n\n1.0.0.2\n"))
        .mount(&server)
        .await;

    // Act
    let entries = feed_for(&server).fetch().await.unwrap();

    // Assert
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].source, CandidateSource::new("default", false, 8080));
    assert_eq!(entries[0].lines(), vec!["1.0.0.1#US", "1.0.0.2"]);
}

#[tokio::test]
async fn test_fetch_http_error_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let result = feed_for(&server).fetch().await;

    assert!(matches!(result, Err(DomainError::FeedUnavailable(_))));
}
