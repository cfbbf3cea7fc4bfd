use crate::error::{Result, StagingError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Name of the container endpoint the staging checks run against.
pub const DEFAULT_ENDPOINT: &str = "default";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_deployment")]
    pub deployment: String,
    pub endpoints: BTreeMap<String, String>, // name -> base URL, e.g. "http://localhost:8080"
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
}

fn default_deployment() -> String {
    "staging".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl RuntimeConfig {
    /// Config with a single `default` endpoint at `url`.
    pub fn single(url: impl Into<String>) -> Result<Self> {
        let config = RuntimeConfig {
            deployment: default_deployment(),
            endpoints: BTreeMap::from([(DEFAULT_ENDPOINT.to_string(), url.into())]),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            auth_token: None,
        };
        config.validated()
    }

    /// Load the deployment description from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            StagingError::Config(format!(
                "Failed to read deployment config {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: RuntimeConfig = serde_json::from_str(&content).map_err(|e| {
            StagingError::Config(format!(
                "Failed to parse deployment config {}: {}",
                path.display(),
                e
            ))
        })?;
        tracing::info!(
            "Loaded deployment config: deployment={}, endpoints={}",
            config.deployment,
            config.endpoints.len()
        );
        config.validated()
    }

    /// Resolve the deployment under test from the environment.
    ///
    /// `STAGING_CONFIG` points at a JSON file and wins when set. Otherwise
    /// `STAGING_ENDPOINT_URL` registers the `default` endpoint, tuned by
    /// `STAGING_DEPLOYMENT`, `STAGING_TIMEOUT_SECS` and `STAGING_AUTH_TOKEN`.
    pub fn from_env() -> Result<Self> {
        if let Some(path) = non_empty_var("STAGING_CONFIG") {
            return Self::load(Path::new(&path));
        }

        let url = non_empty_var("STAGING_ENDPOINT_URL").ok_or_else(|| {
            StagingError::Config(
                "no deployment registered: set STAGING_CONFIG or STAGING_ENDPOINT_URL".into(),
            )
        })?;

        let mut config = Self::single(url)?;
        if let Some(deployment) = non_empty_var("STAGING_DEPLOYMENT") {
            config.deployment = deployment;
        }
        if let Some(secs) = non_empty_var("STAGING_TIMEOUT_SECS") {
            config.timeout_secs = secs.parse().map_err(|_| {
                StagingError::Config(format!("Invalid STAGING_TIMEOUT_SECS: {}", secs))
            })?;
        }
        config.auth_token = non_empty_var("STAGING_AUTH_TOKEN");

        tracing::info!(
            "No STAGING_CONFIG set, using single endpoint deployment={}",
            config.deployment
        );
        config.validated()
    }

    fn validated(mut self) -> Result<Self> {
        if self.endpoints.is_empty() {
            return Err(StagingError::Config(format!(
                "no deployment registered: deployment '{}' has no endpoints",
                self.deployment
            )));
        }
        for (name, url) in self.endpoints.iter_mut() {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(StagingError::Config(format!(
                    "Endpoint '{}' must be an http(s) URL, got: {}",
                    name, url
                )));
            }
            while url.ends_with('/') {
                url.pop();
            }
        }
        if self.timeout_secs == 0 {
            tracing::warn!(
                "timeout_secs=0 is not a usable request timeout, using {}s",
                DEFAULT_TIMEOUT_SECS
            );
            self.timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
        Ok(self)
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
