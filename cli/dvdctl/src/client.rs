//! HTTP client for API communication.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Url;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::config::Config;
use crate::error::CliError;

/// API client for communicating with the catalog.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new API client for the configured endpoint.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = Url::parse(config.api_url())
            .with_context(|| format!("Invalid API URL '{}'", config.api_url()))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API URL '{}' cannot carry a path", config.api_url());
        }

        Ok(Self { client, base_url })
    }

    /// Build a URL from percent-encoded path segments.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Make a GET request.
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, &str)],
    ) -> Result<T, CliError> {
        let response = self.client.get(url).query(query).send().await?;

        self.handle_response(response).await
    }

    /// Make a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, CliError> {
        let response = self.client.post(url).json(body).send().await?;

        self.handle_response(response).await
    }

    /// Make a PUT request with a JSON body.
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, CliError> {
        let response = self.client.put(url).json(body).send().await?;

        self.handle_response(response).await
    }

    /// Handle a successful or error response.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, CliError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| CliError::Other(anyhow::anyhow!("Failed to parse response: {}", e)))
        } else {
            self.handle_error(response).await
        }
    }

    /// Handle an error response.
    async fn handle_error<T>(&self, response: reqwest::Response) -> Result<T, CliError> {
        let status = response.status().as_u16();
        let fallback_reason = response
            .status()
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string();

        let problem: ProblemResponse =
            response.json().await.unwrap_or_else(|_| ProblemResponse {
                code: "unknown".to_string(),
                detail: fallback_reason,
                request_id: None,
                details: Vec::new(),
            });

        let fields = problem
            .details
            .into_iter()
            .map(|d| (d.field, d.message))
            .collect();

        Err(
            CliError::api(status, problem.code, problem.detail, problem.request_id)
                .with_details(fields),
        )
    }
}

/// Problem+json body returned by the catalog on errors.
#[derive(Debug, Deserialize)]
struct ProblemResponse {
    code: String,
    detail: String,
    #[serde(default)]
    request_id: Option<String>,
    #[serde(default)]
    details: Vec<ProblemField>,
}

#[derive(Debug, Deserialize)]
struct ProblemField {
    field: String,
    message: String,
}
