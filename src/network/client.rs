//! HTTP client for making requests to the catalog service

use super::user_agent::{accept_json, generate_user_agent};
use crate::config::UpstreamSettings;
use anyhow::Result;
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;

/// A GET request to a catalog endpoint
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// URL to request
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: HashMap<String, String>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            params: HashMap::new(),
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// HTTP response from a catalog request
#[derive(Debug)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: HashMap<String, String>,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl ApiResponse {
    /// Parse response body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client wrapper with holocron-specific configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    default_timeout: Duration,
    user_agent: String,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&UpstreamSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &UpstreamSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs_f64(settings.request_timeout))
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            default_timeout: Duration::from_secs_f64(settings.request_timeout),
            user_agent: generate_user_agent(),
        })
    }

    /// Execute a catalog request
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.execute_with_timeout(request, self.default_timeout)
            .await
    }

    /// Execute a catalog request with custom timeout
    pub async fn execute_with_timeout(
        &self,
        request: ApiRequest,
        timeout: Duration,
    ) -> Result<ApiResponse> {
        let mut req_builder = self.client.get(&request.url).timeout(timeout);

        // Set default headers
        req_builder = req_builder
            .header("User-Agent", &self.user_agent)
            .header("Accept", accept_json())
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Connection", "keep-alive");

        // Add custom headers
        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        // Add query parameters
        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        // Execute request
        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    /// Simple GET request
    pub async fn get(&self, url: &str) -> Result<ApiResponse> {
        let request = ApiRequest::get(url);
        self.execute(request).await
    }

    /// GET request with parameters
    pub async fn get_with_params(
        &self,
        url: &str,
        params: HashMap<String, String>,
    ) -> Result<ApiResponse> {
        let mut request = ApiRequest::get(url);
        request.params = params;
        self.execute(request).await
    }

    /// Parse response into ApiResponse
    async fn parse_response(response: Response) -> Result<ApiResponse> {
        let status = response.status().as_u16();
        let url = response.url().to_string();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.to_string(), v.to_string());
            }
        }

        let text = response.text().await?;

        Ok(ApiResponse {
            status,
            headers,
            text,
            url,
        })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
