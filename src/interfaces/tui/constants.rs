//! TUI 常量定义
//!
//! 集中管理所有 UI 相关的常量，避免魔法数字分散在代码各处

use std::time::Duration;

/// 目标 URL 显示截断长度
pub const URL_TRUNCATE_LENGTH: usize = 50;

/// 翻页滚动步长
pub const PAGE_SCROLL_STEP: usize = 10;

/// 事件轮询间隔（同时也是重绘间隔）
pub const TICK_RATE: Duration = Duration::from_millis(100);

/// 弹窗尺寸配置
#[derive(Debug, Clone, Copy)]
pub struct PopupSize {
    /// 宽度百分比 (0-100)
    pub width: u16,
    /// 高度百分比 (0-100)
    pub height: u16,
}

impl PopupSize {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// 各弹窗的尺寸配置
pub mod popup {
    use super::PopupSize;

    /// 帮助弹窗
    pub const HELP: PopupSize = PopupSize::new(70, 80);
}

/// 颜色主题
pub mod colors {
    use ratatui::style::Color;

    /// 主色调
    pub const PRIMARY: Color = Color::Cyan;
    /// 成功色 / Live
    pub const SUCCESS: Color = Color::Green;
    /// 警告色
    pub const WARNING: Color = Color::Yellow;
    /// 错误色 / Stop
    pub const ERROR: Color = Color::Red;
    /// 次要文本色
    pub const MUTED: Color = Color::DarkGray;
    /// 新增/更新行背景
    pub const NEW_ROW_BG: Color = Color::Rgb(20, 83, 45);
    /// 偶数行背景
    pub const EVEN_ROW_BG: Color = Color::Reset;
    /// 奇数行背景
    pub const ODD_ROW_BG: Color = Color::Rgb(28, 28, 32);
}
