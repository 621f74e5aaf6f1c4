//! The two end-to-end runs: the statistics report and the chart set.
//!
//! Both start from the same [`RecodedDataset`]. Every test and every chart is
//! attempted on its own; a failure is logged and recorded, and the run moves
//! on to the next artifact.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::algorithm::aggregate;
use crate::algorithm::statistics::{StatisticalTestRunner, TestReport, default_plan};
use crate::config::SurveyConfig;
use crate::error::util::ensure_output_directory;
use crate::error::{Result, SurveyError};
use crate::models::{Covariate, RecodedDataset};
use crate::reader::read_dataset;
use crate::recode::{recode, recode_values};
use crate::render::{
    Annotation, DivergingBarRenderer, LayoutStyle, LayoutVariant, TickLabels, render_legend,
};
use crate::utils::logging::{
    create_main_progress_bar, finish_progress_bar, log_artifact_failure, log_artifacts_written,
    log_render_start, log_warning,
};

/// Dataset read when no path is given
pub const DEFAULT_DATASET: &str = "data/ds_final.parquet";
/// Directory charts are written to when none is given
pub const DEFAULT_OUTPUT_DIR: &str = "figures";
/// Optional configuration file looked up in the working directory
pub const CONFIG_FILE: &str = "survey.json";

/// Standalone legend file name and size
const LEGEND_FILE: &str = "legend.svg";
const LEGEND_SIZE: (u32, u32) = (400, 200);

/// Load `path` if it exists, otherwise use the default configuration
pub fn load_config(path: &Path) -> Result<SurveyConfig> {
    if path.exists() {
        SurveyConfig::from_json_file(path)
    } else {
        log::debug!("No configuration at {}, using defaults", path.display());
        Ok(SurveyConfig::default())
    }
}

/// Read and recode a dataset file
pub fn prepare_dataset(path: &Path, config: &SurveyConfig) -> Result<RecodedDataset> {
    let table = read_dataset(path)?;
    recode(&table, config)
}

/// Run the fixed test plan
#[must_use]
pub fn run_statistics(dataset: &RecodedDataset) -> TestReport {
    StatisticalTestRunner::new(dataset).run_all(&default_plan())
}

/// One chart of the visualization run
#[derive(Debug, Clone)]
pub struct ChartJob {
    pub covariate: Covariate,
    /// Name used in the title instead of the field's display name
    pub title_name: Option<String>,
    pub file_name: String,
    pub style: LayoutStyle,
    /// Where the test summary goes, as fractions of the plotting area
    pub annotation_position: (f64, f64),
}

impl ChartJob {
    #[must_use]
    pub fn new(
        covariate: Covariate,
        file_name: &str,
        style: LayoutStyle,
        annotation_position: (f64, f64),
    ) -> Self {
        Self {
            covariate,
            title_name: None,
            file_name: file_name.to_string(),
            style,
            annotation_position,
        }
    }

    #[must_use]
    pub fn with_title_name(mut self, name: &str) -> Self {
        self.title_name = Some(name.to_string());
        self
    }

    /// "Support for Raising Carbon Tax by ..."
    #[must_use]
    pub fn title(&self, dataset: &RecodedDataset) -> String {
        let name = self
            .title_name
            .as_deref()
            .unwrap_or_else(|| dataset.field_name(self.covariate));
        format!("Support for Raising Carbon Tax by {name}")
    }
}

/// The published chart set
#[must_use]
pub fn default_chart_plan() -> Vec<ChartJob> {
    vec![
        ChartJob::new(
            Covariate::PoliticalOrientation,
            "conservative.svg",
            LayoutStyle::new(LayoutVariant::Main, (1200, 600))
                .with_tick_labels(TickLabels::political_scale()),
            (0.25, 0.08),
        ),
        ChartJob::new(
            Covariate::Age,
            "age.png",
            LayoutStyle::new(LayoutVariant::Side, (1200, 600)),
            (0.22, 0.06),
        )
        .with_title_name("Age Range"),
        ChartJob::new(
            Covariate::LivingArea,
            "urban.png",
            LayoutStyle::new(LayoutVariant::Side, (600, 600)),
            (0.3, 0.95),
        ),
        ChartJob::new(
            Covariate::Education,
            "education.png",
            LayoutStyle::new(LayoutVariant::Side, (1200, 600)),
            (0.25, 0.96),
        ),
    ]
}

/// What a visualization run produced
#[derive(Debug, Default)]
pub struct VisualizationSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(String, SurveyError)>,
}

impl VisualizationSummary {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    fn record(&mut self, artifact: &str, outcome: Result<PathBuf>) {
        match outcome {
            Ok(path) => self.written.push(path),
            Err(e) => {
                log_artifact_failure(artifact, &e);
                self.failed.push((artifact.to_string(), e));
            }
        }
    }
}

/// Render every chart of `plan` plus the legend into `output_dir`
///
/// # Errors
///
/// Only fails if the output directory cannot be created; chart failures are
/// collected in the returned summary.
pub fn run_visualizations(
    dataset: &RecodedDataset,
    config: &SurveyConfig,
    plan: &[ChartJob],
    output_dir: &Path,
) -> Result<VisualizationSummary> {
    let start = Instant::now();
    log_render_start(output_dir, plan.len() + 1);
    ensure_output_directory(output_dir)?;

    let labelled = recode_values(dataset, &config.value_maps);
    let runner = StatisticalTestRunner::new(dataset);
    let mut summary = VisualizationSummary::default();

    let pb = create_main_progress_bar(plan.len() as u64 + 1, Some("Rendering charts"));
    for job in plan {
        pb.set_message(job.file_name.clone());
        let outcome = render_chart(&labelled, &runner, job, output_dir);
        summary.record(&job.file_name, outcome);
        pb.inc(1);
    }

    pb.set_message(LEGEND_FILE);
    let legend_path = output_dir.join(LEGEND_FILE);
    let outcome = render_legend(&legend_path, LEGEND_SIZE).map(|()| legend_path);
    summary.record(LEGEND_FILE, outcome);
    pb.inc(1);
    finish_progress_bar(&pb, Some("Charts complete"));

    log_artifacts_written(
        output_dir,
        summary.written.len(),
        summary.failed.len(),
        start.elapsed(),
    );
    Ok(summary)
}

fn render_chart(
    labelled: &RecodedDataset,
    runner: &StatisticalTestRunner<'_>,
    job: &ChartJob,
    output_dir: &Path,
) -> Result<PathBuf> {
    let counts = aggregate(labelled, job.covariate)?;
    let percentages = counts.percentages();

    let annotation = match runner.annotation_for(job.covariate) {
        Ok(outcome) => Some(Annotation::new(outcome.summary(), job.annotation_position)),
        Err(e) => {
            log_warning(
                &format!("Drawing {} without a test annotation: {e}", job.file_name),
                None,
            );
            None
        }
    };

    let path = output_dir.join(&job.file_name);
    DivergingBarRenderer::new(job.style.clone()).render(
        &percentages,
        &counts,
        &job.title(labelled),
        annotation.as_ref(),
        &path,
    )?;
    Ok(path)
}
