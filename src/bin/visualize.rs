use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use carbon_survey::pipeline::{
    CONFIG_FILE, DEFAULT_DATASET, DEFAULT_OUTPUT_DIR, default_chart_plan, load_config,
    prepare_dataset, run_visualizations,
};
use log::info;

fn main() -> Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args_os().skip(1);
    let dataset_path = args
        .next()
        .map_or_else(|| PathBuf::from(DEFAULT_DATASET), PathBuf::from);
    let output_dir = args
        .next()
        .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from);

    let config = load_config(Path::new(CONFIG_FILE)).context("Failed to load configuration")?;
    let dataset = prepare_dataset(&dataset_path, &config)
        .with_context(|| format!("Failed to prepare {}", dataset_path.display()))?;

    let summary = run_visualizations(&dataset, &config, &default_chart_plan(), &output_dir)
        .with_context(|| format!("Failed to render into {}", output_dir.display()))?;
    for path in &summary.written {
        info!("Wrote {}", path.display());
    }

    if !summary.is_complete() {
        let names: Vec<&str> = summary.failed.iter().map(|(name, _)| name.as_str()).collect();
        bail!("Failed to produce {}", names.join(", "));
    }
    Ok(())
}
