//! Log lines for the survey pipeline
//!
//! Reading the dataset, dropping rows during recoding and writing chart
//! artifacts each get one helper so that every run reports them the same way.

use std::path::Path;
use std::time::Duration;

/// Log the start of a dataset read
pub fn log_read_start(path: &Path) {
    log::info!("Reading dataset {}", path.display());
}

/// Log a finished dataset read with its row count
pub fn log_read_complete(path: &Path, rows: usize, elapsed: Duration) {
    log::info!("{}", read_complete_message(path, rows, elapsed));
}

/// Log the start of a chart run
pub fn log_render_start(output_dir: &Path, artifacts: usize) {
    log::info!("Rendering {artifacts} artifacts into {}", output_dir.display());
}

/// Log the outcome of a chart run
///
/// Logged at `warn` when some artifacts failed, `info` otherwise.
pub fn log_artifacts_written(output_dir: &Path, written: usize, failed: usize, elapsed: Duration) {
    let message = artifacts_written_message(output_dir, written, failed, elapsed);
    if failed > 0 {
        log::warn!("{message}");
    } else {
        log::info!("{message}");
    }
}

/// Log a warning, optionally naming the file it concerns
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}

/// Log a failed artifact; the run carries on with the next one
pub fn log_artifact_failure(artifact: &str, error: &dyn std::error::Error) {
    log::error!("Failed to produce {artifact}: {error}");
}

fn read_complete_message(path: &Path, rows: usize, elapsed: Duration) -> String {
    format!("Read {rows} rows from {} in {elapsed:?}", path.display())
}

fn artifacts_written_message(
    output_dir: &Path,
    written: usize,
    failed: usize,
    elapsed: Duration,
) -> String {
    let mut message = format!(
        "Wrote {written} {} to {} in {elapsed:?}",
        if written == 1 { "file" } else { "files" },
        output_dir.display()
    );
    if failed > 0 {
        message.push_str(&format!(", {failed} failed"));
    }
    message
}
