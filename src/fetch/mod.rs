//! Upstream game-data API client.
//!
//! Resolves Riot IDs to PUUIDs, looks up live games and pulls match
//! history. All network I/O, retry and caching lives here; the analyzer
//! only ever sees the finished `MatchSummary` values.

pub mod dto;
pub mod mock;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::HttpConfig;
use crate::models::{LiveGame, MatchId, MatchSummary, Puuid, Region};

use self::dto::{AccountDto, ActiveGameDto, MatchDto};

pub use self::mock::MockRiotApi;

/// Upper bound the match-id endpoint accepts for `count`.
pub const MAX_MATCH_COUNT: u32 = 100;

/// Distinct Riot IDs remembered before the PUUID cache starts over.
pub const PUUID_CACHE_CAPACITY: usize = 1024;

const API_DOMAIN: &str = "api.riotgames.com";
const TOKEN_HEADER: &str = "x-riot-token";

/// Errors that can occur while talking to the upstream API.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid API key header value")]
    InvalidApiKey,

    #[error("Rate limited by {host}, gave up after {attempts} attempts")]
    RateLimited { host: String, attempts: u32 },

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// The lookups the sniper check needs from the upstream API.
#[async_trait]
pub trait RiotApi: Send + Sync {
    /// Resolve `gameName#tagLine` to a PUUID. `Ok(None)` if no such account.
    async fn resolve_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
        region: Region,
    ) -> Result<Option<Puuid>, FetchError>;

    /// The game `puuid` is currently playing, if any.
    async fn active_game(&self, puuid: &Puuid, region: Region)
        -> Result<Option<LiveGame>, FetchError>;

    /// Most recent match ids, newest first.
    async fn match_ids(
        &self,
        puuid: &Puuid,
        region: Region,
        count: u32,
    ) -> Result<Vec<MatchId>, FetchError>;

    /// Full detail for one match. `Ok(None)` if missing or unusable.
    async fn match_summary(
        &self,
        match_id: &MatchId,
        region: Region,
    ) -> Result<Option<MatchSummary>, FetchError>;
}

/// Number of matches to request, kept within `1..=MAX_MATCH_COUNT`.
pub fn clamp_match_count(count: u32) -> u32 {
    count.clamp(1, MAX_MATCH_COUNT)
}

/// HTTP client for the Riot REST API.
pub struct RiotClient {
    client: Client,
    config: HttpConfig,
    /// Replaces `https://{host}.api.riotgames.com` when set.
    base_url: Option<Url>,
    /// `name#tag#region` -> PUUID. Holds at most `cache_capacity` entries;
    /// a full cache is cleared before the next insert.
    puuid_cache: RwLock<HashMap<String, Puuid>>,
    cache_capacity: usize,
}

impl RiotClient {
    /// Create a new client authenticated with `api_key`.
    pub fn new(api_key: &str, config: HttpConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            TOKEN_HEADER,
            HeaderValue::from_str(api_key).map_err(|_| FetchError::InvalidApiKey)?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("sniped/0.1.0")),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            config,
            base_url: None,
            puuid_cache: RwLock::new(HashMap::new()),
            cache_capacity: PUUID_CACHE_CAPACITY,
        })
    }

    /// Send every request to `base_url` instead of the routed Riot hosts.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }

    fn endpoint(&self, host: &str, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = match &self.base_url {
            Some(base) => base.clone(),
            None => Url::parse(&format!("https://{}.{}", host, API_DOMAIN))?,
        };
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn remember(&self, key: String, puuid: Puuid) {
        let mut cache = self.puuid_cache.write().await;
        if cache.len() >= self.cache_capacity && !cache.contains_key(&key) {
            debug!("PUUID cache full ({} entries), clearing", cache.len());
            cache.clear();
        }
        cache.insert(key, puuid);
    }

    fn cache_key(game_name: &str, tag_line: &str, region: Region) -> String {
        format!("{}#{}#{}", game_name, tag_line, region)
    }

    /// GET a JSON document. 404 maps to `Ok(None)`; 429 waits out
    /// `Retry-After` and retries up to `max_retries` times.
    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<Option<T>, FetchError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            debug!("GET {}", url);
            let response = self.client.get(url.as_str()).send().await?;
            let status = response.status();

            if status == StatusCode::NOT_FOUND {
                return Ok(None);
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                if attempts > self.config.max_retries {
                    return Err(FetchError::RateLimited {
                        host: url.host_str().unwrap_or("unknown").to_string(),
                        attempts,
                    });
                }
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1);
                warn!("Rate limited, retrying in {}s", retry_after);
                tokio::time::sleep(Duration::from_secs(retry_after)).await;
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(FetchError::HttpStatus {
                    status: status.as_u16(),
                    message: if message.is_empty() {
                        status.canonical_reason().unwrap_or("Unknown").to_string()
                    } else {
                        message
                    },
                });
            }

            let bytes = response.bytes().await?;
            return Ok(Some(serde_json::from_slice(&bytes)?));
        }
    }
}

#[async_trait]
impl RiotApi for RiotClient {
    async fn resolve_riot_id(
        &self,
        game_name: &str,
        tag_line: &str,
        region: Region,
    ) -> Result<Option<Puuid>, FetchError> {
        let key = Self::cache_key(game_name, tag_line, region);
        if let Some(puuid) = self.puuid_cache.read().await.get(&key) {
            debug!("PUUID for {} served from cache", key);
            return Ok(Some(puuid.clone()));
        }

        let url = self.endpoint(
            region.regional().host(),
            &[
                "riot",
                "account",
                "v1",
                "accounts",
                "by-riot-id",
                game_name,
                tag_line,
            ],
        )?;

        let account: Option<AccountDto> = self.get_json(&url).await?;
        let Some(puuid) = account.and_then(|a| a.puuid).map(Puuid::from) else {
            return Ok(None);
        };

        info!("Resolved {}#{} to {}", game_name, tag_line, puuid.short(10));
        self.remember(key, puuid.clone()).await;
        Ok(Some(puuid))
    }

    async fn active_game(
        &self,
        puuid: &Puuid,
        region: Region,
    ) -> Result<Option<LiveGame>, FetchError> {
        let url = self.endpoint(
            &region.platform_host(),
            &[
                "lol",
                "spectator",
                "v5",
                "active-games",
                "by-summoner",
                puuid.as_str(),
            ],
        )?;

        let game: Option<ActiveGameDto> = self.get_json(&url).await?;
        Ok(game.map(LiveGame::from))
    }

    async fn match_ids(
        &self,
        puuid: &Puuid,
        region: Region,
        count: u32,
    ) -> Result<Vec<MatchId>, FetchError> {
        let mut url = self.endpoint(
            region.regional().host(),
            &["lol", "match", "v5", "matches", "by-puuid", puuid.as_str(), "ids"],
        )?;
        url.query_pairs_mut()
            .append_pair("start", "0")
            .append_pair("count", &clamp_match_count(count).to_string());

        let ids: Option<Vec<String>> = self.get_json(&url).await?;
        Ok(ids
            .unwrap_or_default()
            .into_iter()
            .map(MatchId::from)
            .collect())
    }

    async fn match_summary(
        &self,
        match_id: &MatchId,
        region: Region,
    ) -> Result<Option<MatchSummary>, FetchError> {
        let url = self.endpoint(
            region.regional().host(),
            &["lol", "match", "v5", "matches", match_id.as_str()],
        )?;

        let dto: Option<MatchDto> = self.get_json(&url).await?;
        Ok(dto.and_then(|d| d.into_summary(match_id)))
    }
}
