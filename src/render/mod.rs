//! Diverging stacked percentage bar charts
//!
//! [`layout_bars`] computes the geometry, [`DivergingBarRenderer`] draws it
//! with plotters. The output format follows the file extension: `.png` for a
//! bitmap, `.svg` for a vector image (the only one that keeps a transparent
//! background).

pub mod layout;
pub mod legend;
pub mod style;

use std::path::Path;

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::algorithm::{ContingencyTable, PercentageTable};
use crate::error::{Result, SurveyError};
use crate::models::Support;

pub use layout::{BarLayout, ChartLayout, Segment, layout_bars};
pub use legend::{draw_legend, render_legend};
pub use style::{Annotation, LayoutStyle, LayoutVariant, TickLabels, support_color};

/// Bars are half as wide as the slot they sit in
const HALF_BAR_WIDTH: f64 = 0.25;
/// Vertical distance between the two lines of a tick label
const TICK_LINE_HEIGHT: i32 = 18;

/// Convert a plotters failure into the crate error
pub(crate) fn plot_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> SurveyError {
    SurveyError::Plot(e.to_string())
}

/// Image formats the renderer can write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("svg") => Ok(Self::Svg),
            _ => Err(SurveyError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn bar_x(index: usize) -> f64 {
    index as f64
}

/// Draws one diverging stacked bar chart per call
#[derive(Debug, Clone)]
pub struct DivergingBarRenderer {
    style: LayoutStyle,
}

impl DivergingBarRenderer {
    #[must_use]
    pub fn new(style: LayoutStyle) -> Self {
        Self { style }
    }

    #[must_use]
    pub fn style(&self) -> &LayoutStyle {
        &self.style
    }

    /// Lay out and write a chart
    ///
    /// The annotation is caller-supplied text, typically a test summary.
    /// Nothing is written when the layout fails.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyError::Render`] if a share is missing,
    /// [`SurveyError::UnsupportedFormat`] for an unknown extension and
    /// [`SurveyError::Plot`] if drawing fails.
    pub fn render(
        &self,
        percentages: &PercentageTable,
        counts: &ContingencyTable,
        title: &str,
        annotation: Option<&Annotation>,
        output: &Path,
    ) -> Result<()> {
        let format = ImageFormat::from_path(output)?;
        let layout = layout_bars(percentages, counts)?;
        if layout.bars.is_empty() {
            return Err(SurveyError::empty_group(percentages.field()));
        }

        match format {
            ImageFormat::Png => {
                let root = BitMapBackend::new(output, self.style.size).into_drawing_area();
                self.draw(&root, &layout, title, annotation)?;
                root.present().map_err(plot_err)?;
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(output, self.style.size).into_drawing_area();
                self.draw(&root, &layout, title, annotation)?;
                root.present().map_err(plot_err)?;
            }
        }

        log::info!("Chart saved: {}", output.display());
        Ok(())
    }

    /// Draw a laid out chart onto any plotters backend
    pub fn draw<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        layout: &ChartLayout,
        title: &str,
        annotation: Option<&Annotation>,
    ) -> Result<()> {
        let text_color = self.style.text_color();
        if let Some(background) = self.style.background() {
            root.fill(&background).map_err(plot_err)?;
        }

        let x_range = -0.5..(bar_x(layout.bars.len()) - 0.5);
        let (y_min, y_max) = layout.y_range;

        let mut chart = ChartBuilder::on(root)
            .margin(20)
            .caption(title, ("sans-serif", 24).into_font().color(&text_color))
            .x_label_area_size(2 * TICK_LINE_HEIGHT + 12)
            .y_label_area_size(4)
            .build_cartesian_2d(x_range.clone(), y_min..y_max)
            .map_err(plot_err)?;

        // Axes: bottom and left spines only
        chart
            .draw_series(LineSeries::new(
                vec![(x_range.start, y_min), (x_range.end, y_min)],
                &text_color,
            ))
            .map_err(plot_err)?;
        chart
            .draw_series(LineSeries::new(
                vec![(x_range.start, y_min), (x_range.start, y_max)],
                &text_color,
            ))
            .map_err(plot_err)?;
        chart
            .draw_series(LineSeries::new(
                vec![(x_range.start, 0.0), (x_range.end, 0.0)],
                &style::BASELINE_COLOR,
            ))
            .map_err(plot_err)?;

        for support in Support::ALL {
            let color = support_color(support);
            chart
                .draw_series(layout.bars.iter().enumerate().map(|(i, bar)| {
                    let segment = bar.segments[support.index()];
                    let x = bar_x(i);
                    Rectangle::new(
                        [
                            (x - HALF_BAR_WIDTH, segment.bottom),
                            (x + HALF_BAR_WIDTH, segment.top()),
                        ],
                        color.filled(),
                    )
                }))
                .map_err(plot_err)?;
        }

        let centered = Pos::new(HPos::Center, VPos::Center);
        let segment_style = ("sans-serif", 14).into_font().color(&BLACK).pos(centered);
        let segment_labels: Vec<(f64, f64, String)> = layout
            .bars
            .iter()
            .enumerate()
            .flat_map(|(i, bar)| {
                bar.segments
                    .iter()
                    .map(move |segment| (bar_x(i), segment.center(), segment.label()))
            })
            .collect();
        chart
            .draw_series(
                segment_labels
                    .into_iter()
                    .map(|(x, y, text)| Text::new(text, (x, y), segment_style.clone())),
            )
            .map_err(plot_err)?;

        let tick_style = ("sans-serif", 14)
            .into_font()
            .color(&text_color)
            .pos(Pos::new(HPos::Center, VPos::Top));
        for (i, bar) in layout.bars.iter().enumerate() {
            let (px, py) = chart.backend_coord(&(bar_x(i), y_min));
            let [group, count] = bar.tick_label();
            let name = self.style.tick_labels.name(i, layout.bars.len(), &group);
            root.draw(&Text::new(name.to_string(), (px, py + 6), tick_style.clone()))
                .map_err(plot_err)?;
            root.draw(&Text::new(
                count,
                (px, py + 6 + TICK_LINE_HEIGHT),
                tick_style.clone(),
            ))
            .map_err(plot_err)?;
        }

        let (x_pixels, y_pixels) = chart.plotting_area().get_pixel_range();
        if let Some(annotation) = annotation {
            let (fx, fy) = annotation.position;
            let width = f64::from(x_pixels.end - x_pixels.start);
            let height = f64::from(y_pixels.end - y_pixels.start);
            #[allow(clippy::cast_possible_truncation)]
            let position = (
                x_pixels.start + (fx * width).round() as i32,
                y_pixels.end - (fy * height).round() as i32,
            );
            let annotation_style = ("sans-serif", 14)
                .into_font()
                .color(&text_color)
                .pos(centered);
            root.draw(&Text::new(
                annotation.text.as_str(),
                position,
                annotation_style,
            ))
            .map_err(plot_err)?;
        }

        if self.style.shows_legend() {
            let origin = (
                x_pixels.end - legend::LEGEND_SIZE.0 - 10,
                y_pixels.start + 10,
            );
            draw_legend(root, origin, text_color)?;
        }

        Ok(())
    }
}
