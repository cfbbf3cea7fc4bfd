//! # staging-verifier
//!
//! Checks that a staging deployment of the album recommendation search
//! application holds the bundled album corpus and ranks it as expected.
//!
//! The deployment is reached through a [`DeploymentRegistry`], which hands
//! out named [`Endpoint`]s. [`TestRuntime`] is the registry built from a
//! JSON deployment file or `STAGING_*` environment variables.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use staging_verifier::{RuntimeConfig, StagingVerifier, TestRuntime};
//!
//! # async fn run() -> staging_verifier::Result<()> {
//! let runtime = TestRuntime::new(RuntimeConfig::single("http://localhost:8080")?);
//! let verifier = StagingVerifier::new(runtime);
//!
//! // Write the three album documents, then check they are searchable and
//! // ranked Diana Krall first, Metallica second.
//! verifier.feed().await?;
//! verifier.verify().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `STAGING_CONFIG` | Path to a deployment JSON file; wins over the rest |
//! | `STAGING_ENDPOINT_URL` | Base URL of the `default` container endpoint |
//! | `STAGING_DEPLOYMENT` | Deployment name used in logs and errors |
//! | `STAGING_TIMEOUT_SECS` | Per-request client timeout (default 30) |
//! | `STAGING_AUTH_TOKEN` | Bearer token sent with every request |

pub mod config;
pub mod endpoint;
pub mod error;
pub mod fixtures;
pub mod query;
pub mod response;
pub mod runtime;
pub mod verifier;

pub use config::{RuntimeConfig, DEFAULT_ENDPOINT};
pub use endpoint::{Endpoint, Request, Response};
pub use error::{Result, StagingError};
pub use fixtures::{document_path, FixtureSource, ALBUM_FIXTURES};
pub use query::{ranked_query, warmup_query, Query};
pub use response::{Album, SearchResponse};
pub use runtime::{DeploymentRegistry, TestRuntime};
pub use verifier::{expected_ranked_albums, StagingVerifier};
