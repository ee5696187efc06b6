//! Action 系统
//!
//! 按键先映射为 Action，再由 App 处理；会话相关的 Action 转换为驱动命令

use crate::session::Command;

/// TUI 动作枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    // ========== 导航 ==========
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    JumpTop,
    JumpBottom,

    // ========== 会话 ==========
    /// 切换 Live / Stop
    ToggleLive,
    /// 手动刷新（仅 Live 时有效）
    Refresh,
    /// 清空列表
    Clear,
    /// 增大显示上限
    NextLimit,
    /// 减小显示上限
    PrevLimit,

    // ========== 屏幕切换 ==========
    ShowHelp,
    GoBack,

    // ========== 系统 ==========
    Quit,
    /// 无操作
    #[default]
    Noop,
}

impl Action {
    /// 判断是否是无操作
    pub fn is_noop(&self) -> bool {
        matches!(self, Action::Noop)
    }

    /// 判断是否应该导致程序退出
    pub fn should_quit(&self) -> bool {
        matches!(self, Action::Quit)
    }

    /// 需要发送给会话驱动的命令
    pub fn command(&self) -> Option<Command> {
        match self {
            Action::ToggleLive => Some(Command::ToggleLive),
            Action::Refresh => Some(Command::Refresh),
            Action::Clear => Some(Command::Clear),
            Action::NextLimit => Some(Command::NextLimit),
            Action::PrevLimit => Some(Command::PrevLimit),
            _ => None,
        }
    }
}
