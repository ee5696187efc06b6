//! User interfaces: the interactive TUI and the non-interactive CLI

#[cfg(feature = "cli")]
pub mod cli;

#[cfg(feature = "tui")]
pub mod tui;
