pub mod format;

pub use format::{PLACEHOLDER, format_local_time, format_location, percent_decode, truncate_display};
