use staging_verifier::{FixtureSource, StagingError, StagingVerifier};
use wiremock::matchers::{body_bytes, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

#[tokio::test]
async fn test_feed_posts_every_fixture() {
    let server = MockServer::start().await;
    common::mount_document_api(&server, 200, 3).await;

    let fed = common::verifier_for(&server).feed().await.unwrap();
    assert_eq!(fed, 3);

    let requests = server.received_requests().await.unwrap();
    let paths: Vec<String> = requests.iter().map(|r| r.url.path().to_string()).collect();
    assert_eq!(
        paths,
        vec![
            "/document/v1/staging/music/docid/A-Head-Full-of-Dreams",
            "/document/v1/staging/music/docid/Hardwired...To-Self-Destruct",
            "/document/v1/staging/music/docid/Love-Is-Here-To-Stay",
        ]
    );
}

#[tokio::test]
async fn test_feed_sends_fixture_bytes_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/document/v1/staging/music/docid/Love-Is-Here-To-Stay"))
        .and(body_bytes(
            include_bytes!("../resources/Love-Is-Here-To-Stay.json").to_vec(),
        ))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;

    common::verifier_for(&server).feed().await.unwrap();
}

#[tokio::test]
async fn test_feed_rejected_document() {
    let server = MockServer::start().await;
    common::mount_document_api(&server, 400, 1).await;

    let err = common::verifier_for(&server).feed().await.unwrap_err();
    assert_eq!(
        err,
        StagingError::Verification {
            check: "feed /document/v1/staging/music/docid/A-Head-Full-of-Dreams".to_string(),
            expected: "200 OK".to_string(),
            actual: "400 Bad Request".to_string(),
        }
    );
}

#[tokio::test]
async fn test_feed_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    for name in staging_verifier::ALBUM_FIXTURES {
        std::fs::write(
            dir.path().join(format!("{}.json", name)),
            br#"{"fields": {"artist": "Unknown"}}"#,
        )
        .unwrap();
    }
    let server = MockServer::start().await;
    common::mount_document_api(&server, 200, 3).await;

    let verifier: StagingVerifier<_> = common::verifier_for(&server)
        .with_fixtures(FixtureSource::Directory(dir.path().to_path_buf()));
    assert_eq!(verifier.feed().await.unwrap(), 3);
}

#[tokio::test]
async fn test_setup_feeds_then_verifies() {
    let server = common::spawn_deployment().await;
    common::mount_document_api(&server, 200, 3).await;

    common::verifier_for(&server).setup().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 5);
    assert!(requests[..3].iter().all(|r| r.method.as_str() == "POST"));
    assert!(requests[3..].iter().all(|r| r.method.as_str() == "GET"));
}

#[tokio::test]
async fn test_setup_stops_when_feed_fails() {
    let server = MockServer::start().await;
    common::mount_document_api(&server, 500, 1).await;
    common::mount_warmup(&server, 200, common::warmup_result(), 0).await;
    common::mount_ranked(&server, 200, common::ranked_result(), 0).await;

    let err = common::verifier_for(&server).setup().await.unwrap_err();
    assert!(err.is_verification());
    assert!(err.to_string().contains("500"));
}
