use serde_json::{json, Value};
use staging_verifier::{RuntimeConfig, StagingVerifier, TestRuntime};
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const WARMUP_YQL: &str = "SELECT * FROM SOURCES * WHERE sddocname CONTAINS \"music\";";

pub fn album_hit(artist: &str, album: &str, year: i64, relevance: f64) -> Value {
    json!({
        "id": format!("id:staging:music::{}", album.replace(' ', "-")),
        "relevance": relevance,
        "source": "music",
        "fields": {
            "sddocname": "music",
            "artist": artist,
            "album": album,
            "year": year
        }
    })
}

pub fn search_result(total_count: u64, children: Vec<Value>) -> Value {
    json!({
        "root": {
            "id": "toplevel",
            "relevance": 1.0,
            "fields": {"totalCount": total_count},
            "coverage": {"coverage": 100, "documents": 3, "full": true, "nodes": 1},
            "children": children
        }
    })
}

/// What a correctly fed and ranked deployment answers to the ranked query.
pub fn ranked_result() -> Value {
    search_result(
        2,
        vec![
            album_hit("Diana Krall", "Love Is Here To Stay", 2018, 0.48),
            album_hit("Metallica", "Hardwired...To Self-Destruct", 2016, 0.2),
        ],
    )
}

pub fn warmup_result() -> Value {
    search_result(
        3,
        vec![
            album_hit("Coldplay", "A Head Full of Dreams", 2015, 0.0),
            album_hit("Metallica", "Hardwired...To Self-Destruct", 2016, 0.0),
            album_hit("Diana Krall", "Love Is Here To Stay", 2018, 0.0),
        ],
    )
}

pub fn verifier_for(server: &MockServer) -> StagingVerifier<TestRuntime> {
    let config = RuntimeConfig::single(server.uri()).unwrap();
    StagingVerifier::new(TestRuntime::new(config))
}

pub async fn mount_warmup(server: &MockServer, status: u16, body: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path("/search/"))
        .and(query_param("yql", WARMUP_YQL))
        .and(query_param("timeout", "5s"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

pub async fn mount_ranked(server: &MockServer, status: u16, body: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path("/search/"))
        .and(query_param("yql", "SELECT * FROM SOURCES * WHERE year > 2015;"))
        .and(query_param("ranking", "rank_albums"))
        .and(query_param(
            "ranking.features.query(user_profile)",
            "{{cat:pop}:0.8, {cat:rock}:0.2, {cat:jazz}:0.1}",
        ))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(times)
        .mount(server)
        .await;
}

#[allow(dead_code)]
pub async fn mount_document_api(server: &MockServer, status: u16, times: u64) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/document/v1/staging/music/docid/[^/]+$"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "pathId": "/document/v1/staging/music/docid/",
        })))
        .expect(times)
        .mount(server)
        .await;
}

/// A deployment that has all three albums and ranks them as expected.
#[allow(dead_code)]
pub async fn spawn_deployment() -> MockServer {
    let server = MockServer::start().await;
    mount_warmup(&server, 200, warmup_result(), 1).await;
    mount_ranked(&server, 200, ranked_result(), 1).await;
    server
}
