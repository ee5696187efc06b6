use std::fmt;

#[derive(Debug, Clone)]
pub enum LiveLogError {
    Config(String),
    Validation(String),
    SourceRequest(String),
    SourceStatus { status: u16, body: String },
    Serialization(String),
    TimestampParse(String),
    Terminal(String),
    ChannelClosed(String),
    FileOperation(String),
}

impl LiveLogError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            LiveLogError::Config(_) => "E001",
            LiveLogError::Validation(_) => "E002",
            LiveLogError::SourceRequest(_) => "E003",
            LiveLogError::SourceStatus { .. } => "E004",
            LiveLogError::Serialization(_) => "E005",
            LiveLogError::TimestampParse(_) => "E006",
            LiveLogError::Terminal(_) => "E007",
            LiveLogError::ChannelClosed(_) => "E008",
            LiveLogError::FileOperation(_) => "E009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            LiveLogError::Config(_) => "Configuration Error",
            LiveLogError::Validation(_) => "Validation Error",
            LiveLogError::SourceRequest(_) => "Log Source Request Error",
            LiveLogError::SourceStatus { .. } => "Log Source Status Error",
            LiveLogError::Serialization(_) => "Serialization Error",
            LiveLogError::TimestampParse(_) => "Timestamp Parse Error",
            LiveLogError::Terminal(_) => "Terminal Error",
            LiveLogError::ChannelClosed(_) => "Channel Closed",
            LiveLogError::FileOperation(_) => "File Operation Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> String {
        match self {
            LiveLogError::SourceStatus { status, body } => {
                if body.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    format!("HTTP {}: {}", status, body)
                }
            }
            LiveLogError::Config(msg)
            | LiveLogError::Validation(msg)
            | LiveLogError::SourceRequest(msg)
            | LiveLogError::Serialization(msg)
            | LiveLogError::TimestampParse(msg)
            | LiveLogError::Terminal(msg)
            | LiveLogError::ChannelClosed(msg)
            | LiveLogError::FileOperation(msg) => msg.clone(),
        }
    }

    /// 格式化为彩色输出（用于 tail 模式与启动失败）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 TUI 状态栏）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for LiveLogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for LiveLogError {}

// 便捷的构造函数
impl LiveLogError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        LiveLogError::Config(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        LiveLogError::Validation(msg.into())
    }

    pub fn source_request<T: Into<String>>(msg: T) -> Self {
        LiveLogError::SourceRequest(msg.into())
    }

    pub fn source_status<T: Into<String>>(status: u16, body: T) -> Self {
        LiveLogError::SourceStatus {
            status,
            body: body.into(),
        }
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        LiveLogError::Serialization(msg.into())
    }

    pub fn timestamp_parse<T: Into<String>>(msg: T) -> Self {
        LiveLogError::TimestampParse(msg.into())
    }

    pub fn terminal<T: Into<String>>(msg: T) -> Self {
        LiveLogError::Terminal(msg.into())
    }

    pub fn channel_closed<T: Into<String>>(msg: T) -> Self {
        LiveLogError::ChannelClosed(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        LiveLogError::FileOperation(msg.into())
    }
}

impl From<std::io::Error> for LiveLogError {
    fn from(err: std::io::Error) -> Self {
        LiveLogError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for LiveLogError {
    fn from(err: serde_json::Error) -> Self {
        LiveLogError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for LiveLogError {
    fn from(err: chrono::ParseError) -> Self {
        LiveLogError::TimestampParse(err.to_string())
    }
}

impl From<config::ConfigError> for LiveLogError {
    fn from(err: config::ConfigError) -> Self {
        LiveLogError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for LiveLogError {
    fn from(err: toml::ser::Error) -> Self {
        LiveLogError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LiveLogError>;
