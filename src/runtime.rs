use crate::config::RuntimeConfig;
use crate::endpoint::Endpoint;
use crate::error::{Result, StagingError};
use std::time::Duration;

/// Resolves named endpoints of the deployment under test.
pub trait DeploymentRegistry {
    fn endpoint(&self, name: &str) -> Result<Endpoint>;
}

/// Registry backed by a [`RuntimeConfig`].
#[derive(Debug, Clone)]
pub struct TestRuntime {
    config: RuntimeConfig,
}

impl TestRuntime {
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Result<Self> {
        RuntimeConfig::from_env().map(Self::new)
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }
}

impl DeploymentRegistry for TestRuntime {
    fn endpoint(&self, name: &str) -> Result<Endpoint> {
        let url = self.config.endpoints.get(name).ok_or_else(|| {
            let known: Vec<&str> = self.config.endpoints.keys().map(String::as_str).collect();
            StagingError::Config(format!(
                "Deployment '{}' has no endpoint '{}' (known: {})",
                self.config.deployment,
                name,
                known.join(", ")
            ))
        })?;

        Ok(Endpoint::new(
            name.to_string(),
            url.clone(),
            Duration::from_secs(self.config.timeout_secs),
            self.config.auth_token.clone(),
        ))
    }
}
