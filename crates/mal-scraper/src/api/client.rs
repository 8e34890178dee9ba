//! MAL API v2 client.
//!
//! One GET per call, no retries: a non-success status is turned into an
//! error and handed back to the caller.

use super::types::*;
use anyhow::{anyhow, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde_json::Value;
use shared::Season;
use std::time::Duration;
use tracing::{debug, warn};

/// Header carrying the application's client id
const CLIENT_ID_HEADER: &str = "x-mal-client-id";

/// MAL API v2 client
pub struct MalClient {
    /// HTTP client
    client: Client,
    /// Base URL for the MAL API
    base_url: String,
}

impl MalClient {
    /// Create a new MAL client authenticated with `client_id`
    pub fn new(base_url: String, client_id: &str, timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(client_id).context("MAL client id is not a valid header value")?;
        headers.insert(CLIENT_ID_HEADER, value);

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .user_agent("fal-scraper/0.1.0")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Make a single GET request and decode the JSON body
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        debug!(url = %url, "Making API request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<MalError>(&body)
                .map(|e| match e.message {
                    Some(message) if !message.is_empty() => format!("{}: {}", e.error, message),
                    _ => e.error,
                })
                .unwrap_or(body);

            warn!(url = %url, status = %status, error = %message, "Request failed");
            return Err(anyhow!("Request to {} failed with status {}: {}", url, status, message));
        }

        let data = response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))?;

        debug!(url = %url, "Request successful");
        Ok(data)
    }

    /// Fetch the raw record of an anime
    pub async fn get_anime(&self, anime_id: u32, fields: &str) -> Result<Value> {
        debug!(mal_id = anime_id, "Fetching anime");
        self.get(&format!("/anime/{}?fields={}", anime_id, fields)).await
    }

    /// Fetch the raw record of a manga
    pub async fn get_manga(&self, manga_id: u32, fields: &str) -> Result<Value> {
        debug!(manga_id = manga_id, "Fetching manga");
        self.get(&format!("/manga/{}?fields={}", manga_id, fields)).await
    }

    /// List the anime of a broadcast season (first page only)
    pub async fn get_season(&self, year: i32, season: Season, limit: u32) -> Result<SeasonListResponse> {
        debug!(year = year, season = %season, limit = limit, "Fetching season listing");
        self.get(&format!("/anime/season/{}/{}?limit={}", year, season, limit)).await
    }
}
