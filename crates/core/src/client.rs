//! HTTP client for the hosting provider API.

use crate::config::ApiConfig;
use crate::error::{ApiError, ApiResult};
use reqwest::{header, Client};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP methods used by the hosting provider API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Whether requests with this method may carry a JSON body.
    pub fn is_mutating(self) -> bool {
        !matches!(self, Self::Get)
    }

    fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// The hosting provider API as a single capability.
#[async_trait::async_trait]
pub trait HostingApi: Send + Sync {
    /// Call `method {base_url}{path}`, sending `body` as JSON when present.
    async fn invoke(&self, method: HttpMethod, path: &str, body: Option<Value>) -> ApiResult<Value>;
}

/// [`HostingApi`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpHostingApi {
    client: Client,
    config: Arc<ApiConfig>,
}

impl HttpHostingApi {
    /// Create a client that authenticates every request with the configured token.
    pub fn new(config: Arc<ApiConfig>) -> ApiResult<Self> {
        let mut headers = header::HeaderMap::new();

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| ApiError::Config("Invalid API token format".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .user_agent(concat!("hostmcp/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait::async_trait]
impl HostingApi for HttpHostingApi {
    async fn invoke(&self, method: HttpMethod, path: &str, body: Option<Value>) -> ApiResult<Value> {
        let url = self.config.endpoint(path)?;
        debug!(%method, url = %url, "API request");

        let mut request = self.client.request(method.as_reqwest(), url);
        if let Some(body) = body.filter(|_| method.is_mutating()) {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(%method, path, error = %e, "API request failed");
            ApiError::Http(e)
        })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(%method, path, status = status.as_u16(), "API returned error status");
            return Err(ApiError::from_response(status.as_u16(), text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&text)?)
    }
}
