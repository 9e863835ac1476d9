//! HTTP invoker
//!
//! Issues exactly one authenticated request per call and hands back the raw
//! body text. Non-success statuses are not errors here: ticket APIs put their
//! error envelope in the body, so the caller decides what the body means.

use super::redact::{redact_headers, redact_query};
use crate::auth::Credentials;
use crate::error::Result;
use crate::types::{Query, QueryValue};
use async_trait::async_trait;
use reqwest::{Client, Method};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for relative paths
    pub base_url: Option<String>,
    /// Request timeout (transport default when unset)
    pub timeout: Option<Duration>,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("Accept".to_string(), "application/json".to_string());
        Self {
            base_url: None,
            timeout: None,
            default_headers,
            user_agent: format!("ticketwalk/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set the request timeout if one is given
    pub fn maybe_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: Query,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a request config carrying the given query
    pub fn with_query(query: Query) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.set(key, value);
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Something that can make one HTTP call and return the body text
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Perform exactly one request
    async fn invoke(&self, method: Method, url: &str, request: &RequestConfig) -> Result<String>;

    /// Perform exactly one GET request
    async fn get(&self, url: &str, request: &RequestConfig) -> Result<String> {
        self.invoke(Method::GET, url, request).await
    }
}

/// HTTP client with basic authentication
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    credentials: Option<Credentials>,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;

        Ok(Self {
            client,
            config,
            credentials: None,
        })
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, credentials: Credentials) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.credentials = Some(credentials);
        Ok(client)
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }
}

#[async_trait]
impl Invoker for HttpClient {
    async fn invoke(&self, method: Method, url: &str, request: &RequestConfig) -> Result<String> {
        let full_url = self.build_url(url);

        let mut headers = self.config.default_headers.clone();
        headers.extend(request.headers.clone());

        info!(
            method = %method,
            url = %full_url,
            headers = ?redact_headers(&headers),
            query = ?redact_query(&request.query),
            credentials = ?self.credentials,
            "Invoking endpoint"
        );

        let mut req = self.client.request(method.clone(), &full_url);

        for (key, value) in &headers {
            req = req.header(key.as_str(), value.as_str());
        }

        let pairs = request.query.to_pairs();
        if !pairs.is_empty() {
            req = req.query(&pairs);
        }

        if let Some(timeout) = request.timeout.or(self.config.timeout) {
            req = req.timeout(timeout);
        }

        if let Some(ref credentials) = self.credentials {
            req = credentials.apply(req);
        }

        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            debug!(
                "Request succeeded: {} {} ({} bytes)",
                method,
                full_url,
                body.len()
            );
        } else {
            warn!(
                status = status.as_u16(),
                url = %full_url,
                "Endpoint answered with non-success status"
            );
        }

        Ok(body)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}
