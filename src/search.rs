//! Thin client for the Google Custom Search JSON API.
//!
//! Docs: https://developers.google.com/custom-search/v1/overview
//! Only the official API is used; nothing here scrapes result pages.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::data_models::{SearchQuery, SearchResultItem, clamp_result_count};
use crate::error::SearchError;

const COUNTRY_PREFIX: &str = "country";

/// Arguments of a single search call, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    /// Free-form language code; only en/ru/uk bias the results.
    pub language: Option<String>,
    pub country: Option<String>,
    pub country_restrict: Option<String>,
    pub result_count: u32,
    pub start_index: u32,
}

impl SearchParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            result_count: 10,
            start_index: 1,
            ..Default::default()
        }
    }

    /// Query-string pairs sent upstream, credentials included.
    pub fn to_query_pairs(&self, api_key: &str, engine_id: &str) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("key", api_key.to_string()),
            ("cx", engine_id.to_string()),
            ("q", self.query.clone()),
            ("num", clamp_result_count(self.result_count).to_string()),
            ("start", self.start_index.max(1).to_string()),
        ];
        if let Some(country) = non_empty(&self.country) {
            pairs.push(("gl", country.to_uppercase()));
        }
        if let Some(restrict) = non_empty(&self.country_restrict) {
            pairs.push(("cr", normalize_country_restrict(restrict)));
        }
        if let Some(lr) = non_empty(&self.language).and_then(language_restrict) {
            pairs.push(("lr", lr.to_string()));
        }
        pairs
    }
}

impl From<&SearchQuery> for SearchParams {
    fn from(query: &SearchQuery) -> Self {
        let country = query.country.clone();
        let country_restrict = query.country_restrict.clone().or_else(|| country.clone());
        SearchParams {
            query: query.text.clone(),
            language: Some(query.language.code().to_string()),
            country,
            country_restrict,
            result_count: query.result_count(),
            start_index: query.start_index(),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// "US" -> "countryUS"; values already carrying the prefix pass through untouched.
pub fn normalize_country_restrict(restrict: &str) -> String {
    let has_prefix = restrict
        .get(..COUNTRY_PREFIX.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(COUNTRY_PREFIX));
    if has_prefix {
        restrict.to_string()
    } else {
        format!("{COUNTRY_PREFIX}{}", restrict.to_uppercase())
    }
}

/// Maps a language code to the `lr` results restriction.
pub fn language_restrict(language: &str) -> Option<&'static str> {
    match language.to_lowercase().as_str() {
        "en" => Some("lang_en"),
        "ru" => Some("lang_ru"),
        "uk" => Some("lang_uk"),
        _ => None,
    }
}

#[derive(Deserialize, Default)]
struct RawItem {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

/// Pulls result items out of a raw API response; a missing `items` field means no results.
pub fn parse_items(raw: &Value) -> Vec<SearchResultItem> {
    raw.get("items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| RawItem::deserialize(item).unwrap_or_default())
                .map(|item| SearchResultItem {
                    title: item.title.unwrap_or_default(),
                    snippet: item.snippet.unwrap_or_default(),
                    link: item.link,
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn titles_of(items: &[SearchResultItem]) -> Vec<String> {
    collect_trimmed(items.iter().map(|i| i.title.as_str()))
}

pub fn snippets_of(items: &[SearchResultItem]) -> Vec<String> {
    collect_trimmed(items.iter().map(|i| i.snippet.as_str()))
}

fn collect_trimmed<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

pub struct SearchClient {
    client: Client,
    api_key: String,
    engine_id: String,
    base_url: String,
    timeout: Duration,
}

impl SearchClient {
    pub fn new(config: &Config) -> Result<Self, SearchError> {
        Self::with_credentials(
            &config.google_api_key,
            &config.google_cse_id,
            &config.search_api_url,
            config.search_timeout,
        )
    }

    pub fn with_credentials(
        api_key: &str,
        engine_id: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        if api_key.trim().is_empty() {
            return Err(SearchError::MissingCredentials("api key"));
        }
        if engine_id.trim().is_empty() {
            return Err(SearchError::MissingCredentials("search engine id"));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(SearchError::Transport)?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            engine_id: engine_id.to_string(),
            base_url: base_url.to_string(),
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs one search. Returns the normalized items plus the untouched response body.
    pub async fn search(
        &self,
        params: &SearchParams,
    ) -> Result<(Vec<SearchResultItem>, Value), SearchError> {
        let pairs = params.to_query_pairs(&self.api_key, &self.engine_id);
        debug!(
            query = %params.query,
            num = clamp_result_count(params.result_count),
            start = params.start_index.max(1),
            "calling search API"
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&pairs)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "search API returned an error");
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => SearchError::Unauthorized {
                    status: status.as_u16(),
                    message,
                },
                _ => SearchError::Upstream {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let raw: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                self.classify(e)
            } else {
                SearchError::Decode(e.without_url())
            }
        })?;
        let items = parse_items(&raw);
        debug!(items = items.len(), "search API answered");
        Ok((items, raw))
    }

    pub async fn search_query(
        &self,
        query: &SearchQuery,
    ) -> Result<(Vec<SearchResultItem>, Value), SearchError> {
        self.search(&SearchParams::from(query)).await
    }

    /// The request URL carries the API key, so it is stripped before the error
    /// reaches logs or callers.
    fn classify(&self, e: reqwest::Error) -> SearchError {
        let e = e.without_url();
        if e.is_timeout() {
            warn!(timeout_secs = self.timeout.as_secs(), "search API timed out");
            SearchError::Timeout(self.timeout.as_secs())
        } else {
            warn!(error = %e, "search API request failed");
            SearchError::Transport(e)
        }
    }
}
