//! HTTP live-log source
//!
//! `GET {base_url}{path}?admin=<bool>` returning a JSON array of entries.
//! ureq is blocking, so every request runs inside `spawn_blocking`.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, trace, warn};
use ureq::Agent;
use url::Url;

use super::LogSource;
use crate::config::SourceConfig;
use crate::config::validators::validate_base_url;
use crate::errors::{LiveLogError, Result};
use crate::models::LogEntry;

/// 错误响应体最多保留的字符数
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Clone)]
pub struct HttpLogSource {
    endpoint: Url,
    cookie: Option<String>,
    bearer_token: Option<String>,
    agent: Agent,
}

impl HttpLogSource {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let base = validate_base_url(&config.base_url)?;
        let endpoint = base.join(&config.path).map_err(|e| {
            LiveLogError::validation(format!("Invalid source.path '{}': {}", config.path, e))
        })?;

        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs.max(1))))
            .http_status_as_error(false)
            .build()
            .into();

        debug!("Live-log endpoint: {}", endpoint);

        Ok(Self {
            endpoint,
            cookie: config.cookie.clone().filter(|c| !c.is_empty()),
            bearer_token: config.bearer_token.clone().filter(|t| !t.is_empty()),
            agent,
        })
    }

    /// Full request URL for one poll
    pub fn url_for(&self, admin: bool) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("admin", if admin { "true" } else { "false" });
        url
    }

    fn fetch_sync(&self, url: Url) -> Result<Vec<LogEntry>> {
        let mut request = self
            .agent
            .get(url.as_str())
            .header("Accept", "application/json");
        if let Some(cookie) = &self.cookie {
            request = request.header("Cookie", cookie.as_str());
        }
        if let Some(token) = &self.bearer_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let mut response = request.call().map_err(|e| {
            warn!("Live-log request to \"{}\" failed: {}", url, e);
            LiveLogError::source_request(format!("{}: {}", url, e))
        })?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| LiveLogError::source_request(format!("Failed to read body: {}", e)))?;

        if !(200..300).contains(&status) {
            let snippet: String = body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect();
            return Err(LiveLogError::source_status(status, snippet));
        }

        let entries: Vec<LogEntry> = serde_json::from_str(&body).map_err(|e| {
            LiveLogError::serialization(format!("Live-log response is not a log array: {}", e))
        })?;
        trace!("Fetched {} live-log entries", entries.len());
        Ok(entries)
    }
}

#[async_trait]
impl LogSource for HttpLogSource {
    async fn fetch(&self, admin: bool) -> Result<Vec<LogEntry>> {
        let url = self.url_for(admin);
        let this = self.clone();

        tokio::task::spawn_blocking(move || this.fetch_sync(url))
            .await
            .map_err(|e| LiveLogError::source_request(format!("fetch task failed: {}", e)))?
    }

    fn name(&self) -> &'static str {
        "HTTP"
    }
}
