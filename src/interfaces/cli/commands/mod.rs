//! CLI command implementations

mod config_gen;
pub mod tail;

pub use config_gen::config_generate;
pub use tail::{follow, format_tail_line, run_tail};
