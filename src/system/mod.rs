//! System-level modules
//!
//! - Logging initialization
//! - Panic handling (crash.log, terminal restore)

pub mod logging;
pub mod panic_handler;
