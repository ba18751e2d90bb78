// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::{LastFmError, Result};
use crate::models::{TopAlbumsResponse, TopArtistsResponse, WeeklyArtistChartResponse};
use crate::rate_limiter::RateLimiter;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

const LASTFM_API_BASE: &str = "https://ws.audioscrobbler.com/2.0/";
const USER_AGENT: &str = concat!("needledrop/", env!("CARGO_PKG_VERSION"));

/// Chart period accepted by the `user.*` chart methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Overall,
    SevenDays,
    OneMonth,
    ThreeMonths,
    SixMonths,
    TwelveMonths,
}

impl Period {
    /// Wire value used in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Overall => "overall",
            Period::SevenDays => "7day",
            Period::OneMonth => "1month",
            Period::ThreeMonths => "3month",
            Period::SixMonths => "6month",
            Period::TwelveMonths => "12month",
        }
    }
}

/// Last.fm API client with rate limiting.
#[derive(Debug, Clone)]
pub struct LastFmClient {
    client: Client,
    base_url: String,
    api_key: String,
    rate_limiter: RateLimiter,
}

impl LastFmClient {
    /// Create a new client with default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder(api_key: impl Into<String>) -> LastFmClientBuilder {
        LastFmClientBuilder::new(api_key)
    }

    /// Fetch a user's top albums for one chart period.
    ///
    /// # Arguments
    /// * `user` - Last.fm username.
    /// * `period` - Chart period to aggregate over.
    /// * `limit` - Number of entries per page (Last.fm caps this at 1000).
    /// * `page` - 1-based page number.
    pub async fn user_top_albums(
        &self,
        user: &str,
        period: Period,
        limit: u32,
        page: u32,
    ) -> Result<TopAlbumsResponse> {
        self.get(
            "user.gettopalbums",
            &[
                ("user", user.to_string()),
                ("period", period.as_str().to_string()),
                ("limit", limit.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    /// Fetch a user's top artists for one chart period.
    pub async fn user_top_artists(
        &self,
        user: &str,
        period: Period,
        limit: u32,
        page: u32,
    ) -> Result<TopArtistsResponse> {
        self.get(
            "user.gettopartists",
            &[
                ("user", user.to_string()),
                ("period", period.as_str().to_string()),
                ("limit", limit.to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    /// Fetch a user's weekly artist chart.
    ///
    /// When `window` is given, both bounds are sent as Unix timestamps;
    /// without it Last.fm returns the most recent week.
    pub async fn user_weekly_artist_chart(
        &self,
        user: &str,
        window: Option<(DateTime<Utc>, DateTime<Utc>)>,
    ) -> Result<WeeklyArtistChartResponse> {
        let mut params = vec![("user", user.to_string())];
        if let Some((from, to)) = window {
            params.push(("from", from.timestamp().to_string()));
            params.push(("to", to.timestamp().to_string()));
        }
        self.get("user.getweeklyartistchart", &params).await
    }

    /// Internal method to perform rate-limited GET requests.
    async fn get<T: DeserializeOwned>(&self, method: &str, params: &[(&str, String)]) -> Result<T> {
        self.rate_limiter.acquire().await;

        let mut url = Url::parse(&self.base_url)
            .map_err(|e| LastFmError::InvalidResponse(e.to_string()))?;

        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("method", method)
                .append_pair("format", "json")
                .append_pair("api_key", &self.api_key);
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }

        trace!(target: "lastfm", "GET {}", method);

        let response = self
            .client
            .get(url.as_str())
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        debug!(target: "lastfm", "response status: {}", status);

        if status == 429 || status == 503 {
            return Err(LastFmError::RateLimitExceeded);
        }

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LastFmError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        trace!(target: "lastfm", "response body: {}", body);

        serde_json::from_str(&body)
            .map_err(|e| LastFmError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }
}

/// Builder for configuring a Last.fm client.
#[derive(Debug)]
pub struct LastFmClientBuilder {
    api_key: String,
    base_url: String,
    timeout: Duration,
    rate_limit_interval: Duration,
}

impl LastFmClientBuilder {
    fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: LASTFM_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
            rate_limit_interval: Duration::from_millis(250),
        }
    }

    /// Set a custom base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set rate limit interval between requests.
    pub fn rate_limit_interval(mut self, interval: Duration) -> Self {
        self.rate_limit_interval = interval;
        self
    }

    /// Build the Last.fm client.
    pub fn build(self) -> Result<LastFmClient> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let rate_limiter = RateLimiter::new(self.rate_limit_interval);

        Ok(LastFmClient {
            client,
            base_url: self.base_url,
            api_key: self.api_key,
            rate_limiter,
        })
    }
}
