//! 配置值验证模块
//!
//! 加载完成后统一校验，失败时返回 `LiveLogError::Validation`。

use url::Url;

use super::StaticConfig;
use crate::errors::{LiveLogError, Result};

impl StaticConfig {
    pub fn validate(&self) -> Result<()> {
        validate_base_url(&self.source.base_url)?;

        if !self.source.path.starts_with('/') {
            return Err(LiveLogError::validation(format!(
                "source.path must start with '/': '{}'",
                self.source.path
            )));
        }

        if self.poll.interval_ms == 0 {
            return Err(LiveLogError::validation("poll.interval_ms must be positive"));
        }

        if self.display.default_limit == 0 {
            return Err(LiveLogError::validation(
                "display.default_limit must be positive",
            ));
        }

        if self.display.limit_options.is_empty() {
            return Err(LiveLogError::validation(
                "display.limit_options must not be empty",
            ));
        }

        if let Some(bad) = self.display.limit_options.iter().find(|o| o.value == 0) {
            return Err(LiveLogError::validation(format!(
                "display.limit_options contains zero value (label '{}')",
                bad.label
            )));
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(LiveLogError::validation(format!(
                "logging.format must be 'text' or 'json', got '{}'",
                self.logging.format
            )));
        }

        Ok(())
    }
}

/// 只接受 http/https 地址
pub fn validate_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| LiveLogError::validation(format!("Invalid source.base_url '{}': {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(LiveLogError::validation(format!(
            "Unsupported scheme '{}' in source.base_url",
            other
        ))),
    }
}
