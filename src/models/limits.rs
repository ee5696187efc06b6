//! Display limit options
//!
//! The selectable caps on how many rows the live view retains.

use serde::{Deserialize, Serialize};

use crate::errors::{LiveLogError, Result};

/// 默认显示条数
pub const DEFAULT_DISPLAY_LIMIT: usize = 100;

/// 可选的显示上限（value/label 对）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitOption {
    pub value: usize,
    pub label: String,
}

impl LimitOption {
    pub fn new(value: usize, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// 默认选项列表
pub fn default_limit_options() -> Vec<LimitOption> {
    [50, 100, 200, 500, 1000]
        .into_iter()
        .map(|v| LimitOption::new(v, v.to_string()))
        .collect()
}

/// Current display limit plus the enumerated options it can step through.
#[derive(Debug, Clone)]
pub struct DisplayLimit {
    options: Vec<LimitOption>,
    value: usize,
}

impl DisplayLimit {
    /// Options are sorted by value; zero-valued options are rejected.
    pub fn new(mut options: Vec<LimitOption>, default: usize) -> Result<Self> {
        if options.is_empty() {
            return Err(LiveLogError::validation("limit options must not be empty"));
        }
        if options.iter().any(|o| o.value == 0) {
            return Err(LiveLogError::validation("limit options must be positive"));
        }
        if default == 0 {
            return Err(LiveLogError::validation("default limit must be positive"));
        }
        options.sort_by_key(|o| o.value);
        options.dedup_by_key(|o| o.value);
        Ok(Self {
            options,
            value: default,
        })
    }

    pub fn value(&self) -> usize {
        self.value
    }

    pub fn options(&self) -> &[LimitOption] {
        &self.options
    }

    /// Label of the current value, falling back to the number itself.
    pub fn label(&self) -> String {
        self.options
            .iter()
            .find(|o| o.value == self.value)
            .map(|o| o.label.clone())
            .unwrap_or_else(|| self.value.to_string())
    }

    pub fn set(&mut self, value: usize) -> Result<()> {
        if value == 0 {
            return Err(LiveLogError::validation("display limit must be positive"));
        }
        self.value = value;
        Ok(())
    }

    /// Step to the smallest option above the current value.
    pub fn next(&mut self) -> usize {
        if let Some(opt) = self.options.iter().find(|o| o.value > self.value) {
            self.value = opt.value;
        }
        self.value
    }

    /// Step to the largest option below the current value.
    pub fn prev(&mut self) -> usize {
        if let Some(opt) = self.options.iter().rev().find(|o| o.value < self.value) {
            self.value = opt.value;
        }
        self.value
    }
}

impl Default for DisplayLimit {
    fn default() -> Self {
        Self {
            options: default_limit_options(),
            value: DEFAULT_DISPLAY_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_100() {
        let limit = DisplayLimit::default();
        assert_eq!(limit.value(), 100);
        assert_eq!(limit.label(), "100");
    }

    #[test]
    fn test_step_through_options() {
        let mut limit = DisplayLimit::default();
        assert_eq!(limit.next(), 200);
        assert_eq!(limit.next(), 500);
        assert_eq!(limit.next(), 1000);
        assert_eq!(limit.next(), 1000);
        assert_eq!(limit.prev(), 500);

        limit.set(75).unwrap();
        assert_eq!(limit.label(), "75");
        assert_eq!(limit.prev(), 50);
        assert_eq!(limit.prev(), 50);
    }

    #[test]
    fn test_rejects_zero_and_empty() {
        assert!(DisplayLimit::new(vec![], 100).is_err());
        assert!(DisplayLimit::new(vec![LimitOption::new(0, "0")], 100).is_err());
        assert!(DisplayLimit::new(default_limit_options(), 0).is_err());
        assert!(DisplayLimit::default().set(0).is_err());
    }

    #[test]
    fn test_custom_labels_are_sorted() {
        let limit = DisplayLimit::new(
            vec![LimitOption::new(500, "Max"), LimitOption::new(10, "Few")],
            10,
        )
        .unwrap();
        assert_eq!(limit.options()[0].label, "Few");
        assert_eq!(limit.label(), "Few");
    }
}
