pub mod endpoints;
pub mod error;

pub use endpoints::Endpoint;
pub use error::ApiError;

use crate::config::Settings;
use anyhow::Context;
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Unauthenticated HTTP access to the API. `Session` wraps it once a token is known.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.http_timeout_secs))
            .build()
            .context("failed to build API http client")?;

        Ok(Self::new(http, settings.api_url.clone()))
    }

    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: &Endpoint<'_>) -> String {
        endpoint.url(&self.base_url)
    }

    /// Sends one request and decodes a 2xx JSON body into `T`.
    ///
    /// Non-2xx responses become `ApiError::Http` with the body's `detail` extracted.
    /// An empty 2xx body decodes as JSON `null`.
    pub async fn send<T, B>(
        &self,
        endpoint: Endpoint<'_>,
        headers: &HeaderMap,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(&endpoint);
        let mut req = self
            .http
            .request(endpoint.method(), url.as_str())
            .headers(headers.clone());
        if let Some(body) = body {
            req = req.json(body);
        }

        tracing::debug!(method = %endpoint.method(), %url, "sending API request");

        let res = req.send().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        let status = res.status();
        let text = res.text().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(ApiError::Http {
                detail: error::extract_detail(&text),
                url,
                status,
                body: text,
            });
        }

        let json = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str::<T>(json).map_err(|source| ApiError::MalformedResponse {
            url,
            source,
            body: text.clone(),
        })
    }
}
