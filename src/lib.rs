//! livelog - live access-log viewer for a short-link service
//!
//! Polls the service's live-log endpoint, reconciles each snapshot into a
//! bounded, deduplicated, newest-first list and highlights what changed.
//!
//! # Features
//! - **cli**: `tail` and `config` commands (default)
//! - **tui**: Terminal user interface (default)
//! - **full**: All features enabled
//!
//! # Architecture
//! - `models`: Log entries and display-limit options
//! - `reconcile`: Snapshot merge, ordering, truncation and highlight timing
//! - `source`: Polling state machine and the HTTP data source
//! - `session`: Session state and the single-task driver
//! - `interfaces`: User interfaces (CLI, TUI)
//! - `config`: Configuration loading and validation
//! - `runtime`: Startup and execution modes
//! - `system`: Logging and panic handling

pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod models;
pub mod reconcile;
pub mod runtime;
pub mod session;
pub mod source;
pub mod system;
pub mod utils;
