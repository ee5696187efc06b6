//! App state and navigation
//!
//! The App only mirrors the latest `ViewSnapshot`; all session state lives
//! in the driver. Selection follows the row identity across merges.

use crate::interfaces::tui::action::Action;
use crate::interfaces::tui::constants::PAGE_SCROLL_STEP;
use crate::models::{LogEntry, LogKey};
use crate::session::{Command, ViewSnapshot};

/// 当前屏幕
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentScreen {
    Main,
    Help,
}

pub struct App {
    pub view: ViewSnapshot,
    pub current_screen: CurrentScreen,
    /// Shown in the title bar
    pub source_label: String,

    pub selected_index: usize,
    selected_key: Option<LogKey>,
    pub scroll_offset: usize,
    /// 上次渲染时表格可见行数
    pub last_visible_height: usize,

    pub status_message: String,
}

impl App {
    pub fn new(source_label: impl Into<String>, view: ViewSnapshot) -> Self {
        Self {
            view,
            current_screen: CurrentScreen::Main,
            source_label: source_label.into(),
            selected_index: 0,
            selected_key: None,
            scroll_offset: 0,
            last_visible_height: 1,
            status_message: String::new(),
        }
    }

    /// Replace the mirrored view, keeping the selection on the same row when
    /// it survived the merge.
    pub fn sync(&mut self, view: ViewSnapshot) {
        self.view = view;
        let len = self.display_count();
        if let Some(key) = &self.selected_key
            && let Some(idx) = self.view.rows.iter().position(|e| &e.key() == key)
        {
            self.selected_index = idx;
        } else if len == 0 {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(len - 1);
        }
        self.remember_selection();
        self.adjust_scroll_offset();
    }

    pub fn display_count(&self) -> usize {
        self.view.rows.len()
    }

    pub fn selected_entry(&self) -> Option<&LogEntry> {
        self.view.rows.get(self.selected_index)
    }

    /// Apply a UI action. Returns the command to forward to the driver.
    pub fn update(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::MoveUp => self.move_selection_up(),
            Action::MoveDown => self.move_selection_down(),
            Action::PageUp => self.page_up(),
            Action::PageDown => self.page_down(),
            Action::JumpTop => self.jump_to_top(),
            Action::JumpBottom => self.jump_to_bottom(),
            Action::ShowHelp => self.current_screen = CurrentScreen::Help,
            Action::GoBack => self.current_screen = CurrentScreen::Main,
            Action::Refresh if !self.view.is_live() => {
                self.status_message = "Refresh is only available in live mode".to_string();
            }
            Action::Clear if self.view.total == 0 => {}
            Action::Clear => {
                self.status_message = format!("Cleared {} entries", self.view.total);
            }
            Action::ToggleLive
            | Action::Refresh
            | Action::NextLimit
            | Action::PrevLimit
            | Action::Quit
            | Action::Noop => {}
        }

        let command = match action {
            Action::Clear if self.view.total == 0 => None,
            Action::Refresh if !self.view.is_live() => None,
            other => other.command(),
        };
        if matches!(command, Some(Command::ToggleLive)) {
            self.status_message.clear();
        }
        command
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
        self.after_move();
    }

    pub fn move_selection_down(&mut self) {
        let max_index = self.display_count().saturating_sub(1);
        if self.selected_index < max_index {
            self.selected_index += 1;
        }
        self.after_move();
    }

    pub fn jump_to_top(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.after_move();
    }

    pub fn jump_to_bottom(&mut self) {
        self.selected_index = self.display_count().saturating_sub(1);
        self.after_move();
    }

    pub fn page_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(PAGE_SCROLL_STEP);
        self.after_move();
    }

    pub fn page_down(&mut self) {
        let max_index = self.display_count().saturating_sub(1);
        self.selected_index = (self.selected_index + PAGE_SCROLL_STEP).min(max_index);
        self.after_move();
    }

    /// 调整 scroll_offset 确保 selected_index 在可见窗口内
    pub fn adjust_scroll_offset(&mut self) {
        let vh = self.last_visible_height.max(1);
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        }
        if self.selected_index >= self.scroll_offset + vh {
            self.scroll_offset = self.selected_index - vh + 1;
        }
    }

    fn after_move(&mut self) {
        self.remember_selection();
        self.adjust_scroll_offset();
    }

    fn remember_selection(&mut self) {
        self.selected_key = self.selected_entry().map(LogEntry::key);
    }
}
