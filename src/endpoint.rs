use crate::error::{Result, StagingError};
use http::{header, Method, StatusCode};
use indexmap::IndexMap;
use std::time::Duration;

/// A request against one endpoint, relative to its base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    method: Method,
    path: String,
    params: IndexMap<String, String>,
    body: Option<Vec<u8>>,
}

impl Request {
    /// Turn this into a POST carrying a JSON body.
    pub fn post(mut self, body: Vec<u8>) -> Self {
        self.method = Method::POST;
        self.body = Some(body);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn params(&self) -> &IndexMap<String, String> {
        &self.params
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: StatusCode,
    pub body: String,
}

/// HTTP client for a single endpoint of the deployment under test
pub struct Endpoint {
    name: String,
    base_url: String,
    http_client: reqwest::Client,
    auth_token: Option<String>,
}

impl Endpoint {
    pub fn new(
        name: String,
        base_url: String,
        timeout: Duration,
        auth_token: Option<String>,
    ) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            name,
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
            auth_token,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a GET request for `path` with the given query parameters.
    pub fn request<I, K, V>(&self, path: &str, params: I) -> Request
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Request {
            method: Method::GET,
            path: path.to_string(),
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            body: None,
        }
    }

    /// Send one request and read the whole body. No retries.
    pub async fn send(&self, request: Request) -> Result<Response> {
        let url = format!("{}{}", self.base_url, request.path);
        tracing::debug!(
            endpoint = %self.name,
            method = %request.method,
            %url,
            "Sending request"
        );

        let mut builder = self.http_client.request(request.method, &url);
        if !request.params.is_empty() {
            builder = builder.query(&request.params);
        }
        if let Some(ref token) = self.auth_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body {
            builder = builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = builder.send().await.map_err(|e| {
            StagingError::Http(format!("Failed to send request to {}: {}", url, e))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            StagingError::Http(format!("Failed to read response from {}: {}", url, e))
        })?;

        tracing::debug!(
            endpoint = %self.name,
            status = status.as_u16(),
            bytes = body.len(),
            "Received response"
        );
        Ok(Response { status, body })
    }
}
