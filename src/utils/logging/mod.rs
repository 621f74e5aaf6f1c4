//! Logging utilities for output and progress tracking

pub mod log;
pub mod progress;

pub use self::log::{
    log_artifact_failure, log_artifacts_written, log_read_complete, log_read_start,
    log_render_start, log_warning,
};
pub use progress::{create_main_progress_bar, finish_progress_bar};
