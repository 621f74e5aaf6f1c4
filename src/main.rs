use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use carbon_survey::pipeline::{
    CONFIG_FILE, DEFAULT_DATASET, load_config, prepare_dataset, run_statistics,
};
use log::info;

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dataset_path = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_DATASET), PathBuf::from);

    let config = load_config(Path::new(CONFIG_FILE)).context("Failed to load configuration")?;
    let dataset = prepare_dataset(&dataset_path, &config)
        .with_context(|| format!("Failed to prepare {}", dataset_path.display()))?;
    info!("Running tests on {} respondents", dataset.len());

    let report = run_statistics(&dataset);
    print!("{report}");

    let failures = report.failures();
    if failures > 0 {
        bail!("{failures} statistical tests could not be computed");
    }
    Ok(())
}
