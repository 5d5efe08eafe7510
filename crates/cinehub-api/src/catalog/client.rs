//! `CatalogClient` - catalog API client implementation.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::instrument;
use url::Url;

use super::api::LocalCatalogApi;
use super::normalize;
use super::rate_limiter::RateLimiter;
use super::types::{
    CastMember, CatalogDetail, CatalogErrorResponse, CatalogItem, Episode, MediaKind, RawDetail,
};

/// Default base URL for the catalog API v3.
const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3/";

/// Default response locale.
const DEFAULT_LANGUAGE: &str = "pt-BR";

/// Default per-request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Maximum number of retries for HTTP 429 responses.
const MAX_RETRIES: u32 = 3;

/// Backoff duration between retries.
const RETRY_BACKOFF: Duration = Duration::from_secs(1);

/// Number of cast members kept from the credits endpoint.
const CREDITS_LIMIT: usize = 10;

/// Catalog API client.
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClient {
    /// HTTP client.
    http_client: Client,
    /// Base URL for API requests.
    base_url: Url,
    /// Access key sent as the `api_key` query parameter.
    api_key: String,
    /// Response locale sent as the `language` query parameter.
    language: String,
    /// Rate limiter.
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.base_url.as_str())
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

/// Builder for `CatalogClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct CatalogClientBuilder {
    base_url: Option<Url>,
    api_key: Option<String>,
    user_agent: Option<String>,
    language: Option<String>,
    min_interval: Option<Duration>,
    timeout: Option<Duration>,
}

impl CatalogClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            user_agent: None,
            language: None,
            min_interval: None,
            timeout: None,
        }
    }

    /// Overrides the base URL (for wiremock in tests).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Sets the access key (required).
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

    /// Sets the response locale (default: `pt-BR`).
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Sets the minimum request interval (default: 25ms).
    #[must_use]
    pub const fn min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = Some(interval);
        self
    }

    /// Sets the per-request timeout (default: 15s).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - `api_key` is not set or blank.
    /// - `user_agent` is not set.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<CatalogClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .context("api_key is required")?;
        let user_agent = self.user_agent.context("user_agent is required")?;

        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            let result = Url::parse(DEFAULT_BASE_URL);
            result.context("invalid default base URL")?
        };

        let rate_limiter = self
            .min_interval
            .map_or_else(RateLimiter::default_interval, RateLimiter::new);

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .build()
            .context("failed to build HTTP client")?;

        Ok(CatalogClient {
            http_client,
            base_url,
            api_key,
            language: self
                .language
                .unwrap_or_else(|| String::from(DEFAULT_LANGUAGE)),
            rate_limiter: Arc::new(Mutex::new(rate_limiter)),
        })
    }
}

impl CatalogClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> CatalogClientBuilder {
        CatalogClientBuilder::new()
    }

    /// Sends a GET request with the access key, locale, extra query params,
    /// and rate limiting. Retries up to `MAX_RETRIES` times on HTTP 429.
    ///
    /// Returns the body as untyped JSON; shape checks happen in
    /// [`normalize`].
    #[instrument(skip_all)]
    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.rate_limiter.lock().await.wait().await;

        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("failed to join URL path: {path}"))?;

        let mut retries = 0u32;
        loop {
            let request = self
                .http_client
                .get(url.clone())
                .query(&[
                    ("api_key", self.api_key.as_str()),
                    ("language", self.language.as_str()),
                ])
                .query(query)
                .header(reqwest::header::ACCEPT, "application/json")
                .build()
                .with_context(|| format!("failed to build request: {path}"))?;

            tracing::debug!(path, "catalog API request");

            let result = self.http_client.execute(request).await;
            let response = result.with_context(|| format!("request failed: {path}"))?;

            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                retries = retries.saturating_add(1);
                if retries > MAX_RETRIES {
                    bail!("catalog API rate limit exceeded after {MAX_RETRIES} retries: {path}");
                }
                tracing::warn!(
                    retry = retries,
                    max_retries = MAX_RETRIES,
                    "catalog API rate limited (429). Retrying..."
                );
                tokio::time::sleep(RETRY_BACKOFF.saturating_mul(retries)).await;
                self.rate_limiter.lock().await.wait().await;
                continue;
            }

            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| String::from("<failed to read body>"));
                if let Ok(error_response) = serde_json::from_str::<CatalogErrorResponse>(&body) {
                    bail!(
                        "catalog API error (HTTP {}) on {path}: code={}, message={}",
                        status,
                        error_response.status_code,
                        error_response.status_message,
                    );
                }
                bail!("catalog API error (HTTP {status}) on {path}: {body}");
            }

            let body = response
                .text()
                .await
                .with_context(|| format!("failed to read response body: {path}"))?;
            let raw_result: std::result::Result<Value, _> = serde_json::from_str(&body);
            let parsed =
                raw_result.with_context(|| format!("failed to decode JSON response: {path}"))?;
            return Ok(parsed);
        }
    }
}

impl LocalCatalogApi for CatalogClient {
    #[instrument(skip_all, fields(kind = %kind))]
    async fn trending(&self, kind: MediaKind) -> Result<Vec<CatalogItem>> {
        let path = format!("trending/{}/week", kind.path_segment());
        let body = self.get_json(&path, &[]).await?;
        Ok(normalize::items(&body, kind))
    }

    #[instrument(skip_all, fields(kind = %kind))]
    async fn now_showing(&self, kind: MediaKind) -> Result<Vec<CatalogItem>> {
        let path = match kind {
            MediaKind::Movie => "movie/now_playing",
            MediaKind::Series => "tv/on_the_air",
        };
        let body = self.get_json(path, &[]).await?;
        Ok(normalize::items(&body, kind))
    }

    #[instrument(skip_all, fields(kind = %kind, genre_id = genre_id))]
    async fn discover_by_genre(
        &self,
        kind: MediaKind,
        genre_id: u32,
    ) -> Result<Vec<CatalogItem>> {
        let path = format!("discover/{}", kind.path_segment());
        let query = [
            ("with_genres", genre_id.to_string()),
            ("sort_by", String::from("popularity.desc")),
        ];
        let body = self.get_json(&path, &query).await?;
        Ok(normalize::items(&body, kind))
    }

    #[instrument(skip_all)]
    async fn search(&self, query: &str) -> Result<Vec<CatalogItem>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let body = self
            .get_json("search/multi", &[("query", String::from(query))])
            .await?;
        Ok(normalize::search_items(&body))
    }

    #[instrument(skip_all, fields(id = id, kind = %kind))]
    async fn details(&self, id: u64, kind: MediaKind) -> Result<CatalogDetail> {
        let path = format!("{}/{id}", kind.path_segment());
        let query = [("append_to_response", String::from("external_ids"))];
        let body = self.get_json(&path, &query).await?;
        let raw = RawDetail::deserialize(&body)
            .with_context(|| format!("unexpected detail payload: {path}"))?;
        raw.into_detail(kind)
            .with_context(|| format!("detail payload has no id: {path}"))
    }

    #[instrument(skip_all, fields(series_id = series_id, season = season))]
    async fn season_episodes(&self, series_id: u64, season: u32) -> Result<Vec<Episode>> {
        let path = format!("tv/{series_id}/season/{season}");
        let body = self.get_json(&path, &[]).await?;
        Ok(normalize::episodes(&body, season))
    }

    #[instrument(skip_all, fields(id = id, kind = %kind))]
    async fn credits(&self, id: u64, kind: MediaKind) -> Result<Vec<CastMember>> {
        let path = format!("{}/{id}/credits", kind.path_segment());
        let body = self.get_json(&path, &[]).await?;
        Ok(normalize::cast(&body, CREDITS_LIMIT))
    }
}
