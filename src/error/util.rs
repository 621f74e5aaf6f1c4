//! Utility functions for error handling
//!
//! File system helpers that attach the offending path to the error message.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, SurveyError};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(io_error(
            io::ErrorKind::NotFound,
            format!("File not found: {} (needed for: {purpose})", path.display()),
        ));
    }

    if !path.is_file() {
        return Err(io_error(
            io::ErrorKind::InvalidInput,
            format!(
                "Path is not a file: {} (expected a file for: {purpose})",
                path.display()
            ),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => "Permission denied - check file permissions",
            _ => "Failed to open file",
        };
        io_error(e.kind(), format!("{context}: {} ({e})", path.display()))
    })
}

/// Make sure an output directory exists, creating it if necessary
pub fn ensure_output_directory(path: &Path) -> Result<()> {
    if path.exists() && !path.is_dir() {
        return Err(io_error(
            io::ErrorKind::InvalidInput,
            format!("Output path is not a directory: {}", path.display()),
        ));
    }

    fs::create_dir_all(path).map_err(|e| {
        io_error(
            e.kind(),
            format!("Failed to create output directory {}: {e}", path.display()),
        )
    })
}

fn io_error(kind: io::ErrorKind, message: String) -> SurveyError {
    SurveyError::Io(io::Error::new(kind, message))
}
