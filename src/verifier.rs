use crate::config::DEFAULT_ENDPOINT;
use crate::endpoint::{Endpoint, Response};
use crate::error::{Result, StagingError};
use crate::fixtures::{self, FixtureSource, ALBUM_FIXTURES};
use crate::query::{self, Query, SEARCH_PATH};
use crate::response::{Album, SearchResponse};
use crate::runtime::DeploymentRegistry;
use http::StatusCode;
use std::collections::BTreeMap;

/// Hits expected for [`query::ranked_query`], in rank order.
pub fn expected_ranked_albums() -> [Album; 2] {
    [
        Album::new("Diana Krall", "Love Is Here To Stay", 2018),
        Album::new("Metallica", "Hardwired...To Self-Destruct", 2016),
    ]
}

/// Feeds the static album corpus to a staging deployment and checks that it
/// is searchable and ranked as expected.
///
/// Every step is a single request awaited to completion. The first failed
/// check aborts the run; nothing is retried.
pub struct StagingVerifier<R> {
    registry: R,
    fixtures: FixtureSource,
}

impl<R: DeploymentRegistry> StagingVerifier<R> {
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            fixtures: FixtureSource::Bundled,
        }
    }

    /// Read fixtures from `source` instead of the bundled resources.
    pub fn with_fixtures(mut self, source: FixtureSource) -> Self {
        self.fixtures = source;
        self
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// The container endpoint to do requests against.
    pub fn resolve_endpoint(&self) -> Result<Endpoint> {
        self.registry.endpoint(DEFAULT_ENDPOINT)
    }

    pub fn document_path(name: &str) -> String {
        fixtures::document_path(name)
    }

    pub fn load_fixture(&self, name: &str) -> Result<Vec<u8>> {
        self.fixtures.load(name)
    }

    /// Document paths and bytes of the three staging albums.
    pub fn all_fixtures(&self) -> Result<BTreeMap<String, Vec<u8>>> {
        self.fixtures.documents_by_path(&ALBUM_FIXTURES)
    }

    pub fn warmup_query() -> Query {
        query::warmup_query()
    }

    pub fn ranked_query() -> Query {
        query::ranked_query()
    }

    /// Writes every fixture to its document path. Returns the number of
    /// documents written.
    pub async fn feed(&self) -> Result<usize> {
        let documents = self.all_fixtures()?;
        let endpoint = self.resolve_endpoint()?;

        for (path, bytes) in &documents {
            let response = endpoint
                .send(endpoint.request(path, Query::new()).post(bytes.clone()))
                .await?;
            expect_ok(&response, &format!("feed {}", path))?;
            tracing::debug!(%path, "Fed document");
        }

        tracing::info!(
            endpoint = endpoint.base_url(),
            documents = documents.len(),
            "Fed staging documents"
        );
        Ok(documents.len())
    }

    /// Verifies the static staging documents are searchable, ranked
    /// correctly, and render as expected.
    pub async fn verify(&self) -> Result<()> {
        let expected_documents = self.all_fixtures()?.len() as u64;
        let endpoint = self.resolve_endpoint()?;

        // The fed documents are all there and searchable.
        let response = endpoint
            .send(endpoint.request(SEARCH_PATH, Self::warmup_query()))
            .await?;
        expect_ok(&response, "warm-up query status")?;
        let warmup = SearchResponse::parse(&response.body)?;
        expect_eq(
            "warm-up totalCount",
            expected_documents,
            warmup.total_count()?,
        )?;
        tracing::info!(
            documents = expected_documents,
            "Warm-up query matched all documents"
        );

        // Filtering and ranking behave as expected.
        let response = endpoint
            .send(endpoint.request(SEARCH_PATH, Self::ranked_query()))
            .await?;
        expect_ok(&response, "ranked query status")?;
        let ranked = SearchResponse::parse(&response.body)?;
        let expected_albums = expected_ranked_albums();
        expect_eq(
            "ranked totalCount",
            expected_albums.len() as u64,
            ranked.total_count()?,
        )?;

        for (position, expected) in expected_albums.iter().enumerate() {
            let actual = ranked.album_at(position)?;
            let check = |field: &str| format!("ranked hit {} {}", position, field);
            expect_eq(&check("artist"), &expected.artist, &actual.artist)?;
            expect_eq(&check("album"), &expected.album, &actual.album)?;
            expect_eq(&check("year"), expected.year, actual.year)?;
            tracing::info!(position, album = %actual, "Ranked hit matches");
        }

        Ok(())
    }

    /// Feed the corpus, then verify it.
    pub async fn setup(&self) -> Result<()> {
        self.feed().await?;
        self.verify().await
    }
}

/// Longest response body prefix written to the log.
const LOGGED_BODY_LIMIT: usize = 512;

fn truncated(body: &str, limit: usize) -> &str {
    if body.len() <= limit {
        return body;
    }
    let mut end = limit;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

fn expect_ok(response: &Response, check: &str) -> Result<()> {
    if response.status != StatusCode::OK {
        tracing::warn!(
            check,
            status = response.status.as_u16(),
            bytes = response.body.len(),
            body = %truncated(&response.body, LOGGED_BODY_LIMIT),
            "Unexpected status"
        );
        return Err(StagingError::verification(check, StatusCode::OK, response.status));
    }
    Ok(())
}

fn expect_eq<T: PartialEq + ToString>(check: &str, expected: T, actual: T) -> Result<()> {
    if expected != actual {
        return Err(StagingError::verification(check, expected, actual));
    }
    Ok(())
}
