//! Live-log record types

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// 单条短链访问记录
///
/// 字段名与 live-log 接口的 JSON 保持一致（camelCase）。
/// 缺失或为 null 的字段使用默认值，渲染层负责显示占位符。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogEntry {
    /// 跳转目标 URL
    #[serde(deserialize_with = "null_as_default")]
    pub target: String,
    /// 短链标识
    #[serde(deserialize_with = "null_as_default")]
    pub slug: String,
    /// 客户端 IP
    #[serde(deserialize_with = "null_as_default")]
    pub ip: String,
    /// 累计点击次数
    #[serde(deserialize_with = "null_as_default")]
    pub click: u64,
    pub city: Option<String>,
    pub country: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,
    /// 最近一次合并中新增或更新，仅用于展示，不参与身份判定
    #[serde(skip)]
    pub is_new: bool,
}

impl LogEntry {
    /// 身份键：同一客户端访问同一短链只保留一行
    pub fn key(&self) -> LogKey {
        LogKey::new(&self.ip, &self.slug)
    }
}

/// Identity of a row across updates: the `(ip, slug)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogKey {
    pub ip: String,
    pub slug: String,
}

impl LogKey {
    pub fn new(ip: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            slug: slug.into(),
        }
    }
}

impl fmt::Display for LogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.ip, self.slug)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
