// src/api/client.rs
//! Thin wrapper over `reqwest` that owns the base URL and request defaults.

use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::FeedsConfig;
use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://redaktionen.innovationsarenan.dev/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    fn as_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One request against the newsroom API. `payload` is ignored for GET.
#[derive(Debug, Clone, Default)]
pub struct ApiRequest<'a> {
    pub endpoint: &'a str,
    pub method: HttpMethod,
    pub payload: Option<&'a serde_json::Value>,
    pub query: Vec<(&'static str, String)>,
}

impl<'a> ApiRequest<'a> {
    pub fn get(endpoint: &'a str) -> Self {
        Self {
            endpoint,
            ..Default::default()
        }
    }

    pub fn with_query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeouts(base_url, Duration::from_secs(4), Duration::from_secs(10))
    }

    pub fn from_config(cfg: &FeedsConfig) -> Result<Self, ApiError> {
        Self::with_timeouts(
            cfg.base_url.clone(),
            Duration::from_secs(cfg.connect_timeout_secs),
            Duration::from_secs(cfg.request_timeout_secs),
        )
    }

    fn with_timeouts(
        base_url: impl Into<String>,
        connect: Duration,
        total: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("newsroom-feeds/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(connect)
            .timeout(total)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute `http(s)://` endpoints are used as-is; anything else is joined to
    /// the base URL with exactly one slash.
    pub fn resolve_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_string();
        }
        let sep = if endpoint.starts_with('/') { "" } else { "/" };
        format!("{}{}{}", self.base_url, sep, endpoint)
    }

    /// Issue the request and decode the JSON body. Non-2xx responses become
    /// [`ApiError::Status`]; nothing is retried here.
    pub async fn request<T: DeserializeOwned>(&self, req: ApiRequest<'_>) -> Result<T, ApiError> {
        let url = self.resolve_url(req.endpoint);
        let mut builder = self.http.request(req.method.as_reqwest(), &url);
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(payload) = req.payload {
            if req.method != HttpMethod::Get {
                builder = builder.json(payload);
            }
        }

        tracing::debug!(target: "feeds", method = ?req.method, %url, query = ?req.query, "api request");

        let resp = builder.send().await.map_err(|source| ApiError::Network {
            url: url.clone(),
            source,
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let bytes = resp.bytes().await.map_err(|source| ApiError::Network {
            url: url.clone(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode { url, source })
    }
}
