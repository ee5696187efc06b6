use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::models::{DEFAULT_DISPLAY_LIMIT, LimitOption, default_limit_options};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "livelog.toml";

/// 环境变量前缀，示例：LIVELOG__SOURCE__BASE_URL
pub const ENV_PREFIX: &str = "LIVELOG";

/// 静态配置（从 TOML 与环境变量加载，启动时使用）
///
/// - source: live-log 接口地址与认证
/// - poll: 轮询间隔与去重窗口
/// - display: 显示上限与高亮时长
/// - logging: 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub poll: PollConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// 优先级：ENV > 配置文件 > 默认值
    /// 指定的文件不存在时视为可选，仅使用默认值与环境变量。
    pub fn load(path: Option<&str>) -> Result<Self> {
        use config::{Config, Environment, File};

        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let settings = Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: StaticConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> Result<String> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// live-log 数据源配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_live_log_path")]
    pub path: String,
    /// 以管理员身份查询（决定可见记录范围，由服务端判定）
    #[serde(default)]
    pub admin: bool,
    /// 原样转发的会话 Cookie
    #[serde(default)]
    pub cookie: Option<String>,
    #[serde(default)]
    pub bearer_token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// 轮询配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_dedup_interval_ms")]
    pub dedup_interval_ms: u64,
}

impl PollConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn dedup_interval(&self) -> Duration {
        Duration::from_millis(self.dedup_interval_ms)
    }
}

/// 显示配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_display_limit")]
    pub default_limit: usize,
    #[serde(default = "default_limit_options")]
    pub limit_options: Vec<LimitOption>,
    #[serde(default = "default_highlight_ms")]
    pub highlight_ms: u64,
}

impl DisplayConfig {
    pub fn highlight(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions
// ============================================================

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_live_log_path() -> String {
    "/api/url/admin/live-log".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_poll_interval_ms() -> u64 {
    5000
}

fn default_dedup_interval_ms() -> u64 {
    2000
}

fn default_display_limit() -> usize {
    DEFAULT_DISPLAY_LIMIT
}

fn default_highlight_ms() -> u64 {
    2000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            path: default_live_log_path(),
            admin: false,
            cookie: None,
            bearer_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_poll_interval_ms(),
            dedup_interval_ms: default_dedup_interval_ms(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_limit: default_display_limit(),
            limit_options: default_limit_options(),
            highlight_ms: default_highlight_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
