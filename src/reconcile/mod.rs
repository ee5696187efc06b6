//! Snapshot reconciliation
//!
//! - `collection`: merge/clear over the `(ip, slug)`-keyed row set
//! - `highlight`: the single highlight-clear deadline
//! - `timestamp`: fail-closed `updatedAt` comparison

mod collection;
mod highlight;
mod timestamp;

pub use collection::{HIGHLIGHT_DURATION, LogCollection, MergeOutcome};
pub use highlight::HighlightTimer;
pub use timestamp::{TimestampError, is_newer, parse_timestamp};
