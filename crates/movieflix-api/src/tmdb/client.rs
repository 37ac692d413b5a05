//! `TmdbClient` - TMDB API client implementation.

use anyhow::{Context, Result, bail};
use reqwest::{Client, Request};
use tracing::instrument;
use url::Url;

use super::api::TmdbApi;
use super::request::MovieRequest;
use super::types::{Movie, MovieListResponse, TmdbErrorResponse};

/// Default base URL for TMDB API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Query parameter carrying the API key.
const API_KEY_PARAM: &str = "api_key";

/// TMDB API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Static v3 API key, appended to every request.
    api_key: String,
}

/// Builder for `TmdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct TmdbClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
}

impl TmdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the API key (required, contents are not validated).
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the User-Agent (required).
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<TmdbClient> {
        let api_key = self.api_key.context("api_key is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(TmdbClient {
            http_client,
            base_url,
            api_key,
        })
    }
}

impl TmdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> TmdbClientBuilder {
        TmdbClientBuilder::new()
    }

    /// Builds the GET request for an endpoint.
    ///
    /// The path is resolved relative to the base URL (a leading `/` is
    /// ignored so the `/3/` prefix survives). A query string embedded in the
    /// path comes first, then the request's extra parameters, then the API
    /// key, so the key is joined with `&` or `?` as appropriate.
    fn build_request(&self, request: &MovieRequest) -> Result<Request> {
        let relative = request.path.trim_start_matches('/');
        let url = self
            .base_url
            .join(relative)
            .with_context(|| format!("failed to join URL path: {}", request.path))?;

        self.http_client
            .get(url)
            .query(&request.query)
            .query(&[(API_KEY_PARAM, self.api_key.as_str())])
            .build()
            .with_context(|| format!("failed to build request: {}", request.path))
    }

    /// Sends the request and decodes a movie list response.
    ///
    /// Non-2xx statuses are errors; the TMDB error body is included in the
    /// message when it parses.
    async fn get_list(&self, request: &MovieRequest) -> Result<MovieListResponse> {
        let path = request.path.as_str();
        let http_request = self.build_request(request)?;

        // The full URL carries the API key, so only the path is logged.
        tracing::debug!(path, query = ?request.query, "TMDB API request");

        // reqwest errors embed the request URL, and with it the API key.
        let result = self.http_client.execute(http_request).await;
        let response = result
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("request failed: {path}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .map_err(reqwest::Error::without_url)
                .unwrap_or_else(|_| String::from("<failed to read body>"));
            if let Ok(error_response) = serde_json::from_str::<TmdbErrorResponse>(&body) {
                bail!(
                    "TMDB API error (HTTP {}): code={}, message={}",
                    status,
                    error_response.status_code,
                    error_response.status_message,
                );
            }
            bail!("TMDB API error (HTTP {status}): {body}");
        }

        let body = response
            .text()
            .await
            .map_err(reqwest::Error::without_url)
            .with_context(|| format!("failed to read response body: {path}"))?;
        let raw_result: std::result::Result<MovieListResponse, _> = serde_json::from_str(&body);
        let parsed =
            raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
        Ok(parsed)
    }
}

/// Emits the diagnostic for a failed fetch.
fn report_failure(path: &str, err: &anyhow::Error) {
    let message = format!("{err:#}");
    tracing::error!(path, error = %message, "Error fetching movies");
}

impl TmdbApi for TmdbClient {
    #[instrument(skip_all, fields(path = %request.path))]
    async fn fetch_movies(&self, request: &MovieRequest) -> Vec<Movie> {
        match self.get_list(request).await {
            Ok(response) => {
                tracing::debug!(count = response.results.len(), "TMDB API response");
                response.results
            }
            Err(err) => {
                report_failure(&request.path, &err);
                Vec::new()
            }
        }
    }
}
