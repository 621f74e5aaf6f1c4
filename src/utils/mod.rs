//! Shared helpers: Arrow extraction and logging.

pub mod arrow;
pub mod logging;

/// Default batch size for dataset reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;
