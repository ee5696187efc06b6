mod limits;
mod log_entry;

pub use limits::{DEFAULT_DISPLAY_LIMIT, DisplayLimit, LimitOption, default_limit_options};
pub use log_entry::{LogEntry, LogKey};
