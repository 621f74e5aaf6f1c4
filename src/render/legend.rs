//! The support legend, drawn inside the main chart or as its own image.

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::style::{LEGEND_TITLE, support_color};
use super::{ImageFormat, plot_err};
use crate::error::Result;
use crate::models::Support;

/// Width and height of a drawn legend in pixels
pub const LEGEND_SIZE: (i32, i32) = (260, 110);

const SWATCH: i32 = 16;
const ROW_HEIGHT: i32 = 24;

/// Draw the legend with its top left corner at `origin`
///
/// Entries run from "Very much" down to "Not at all", matching the stacking
/// order as seen from the top of a bar.
pub fn draw_legend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    origin: (i32, i32),
    text_color: RGBColor,
) -> Result<()> {
    let (x, y) = origin;
    let title_style = ("sans-serif", 16)
        .into_font()
        .color(&text_color)
        .pos(Pos::new(HPos::Left, VPos::Top));
    area.draw(&Text::new(LEGEND_TITLE, (x, y), title_style))
        .map_err(plot_err)?;

    let label_style = ("sans-serif", 14)
        .into_font()
        .color(&text_color)
        .pos(Pos::new(HPos::Left, VPos::Center));

    for (row, support) in (1..).zip(Support::ALL.into_iter().rev()) {
        let top = y + row * ROW_HEIGHT;
        area.draw(&Rectangle::new(
            [(x, top), (x + SWATCH, top + SWATCH)],
            support_color(support).filled(),
        ))
        .map_err(plot_err)?;
        area.draw(&Text::new(
            support.label(),
            (x + SWATCH + 8, top + SWATCH / 2),
            label_style.clone(),
        ))
        .map_err(plot_err)?;
    }

    Ok(())
}

/// Write the legend on a transparent canvas of `size` pixels
pub fn render_legend(output: &Path, size: (u32, u32)) -> Result<()> {
    let (width, height) = (
        i32::try_from(size.0).unwrap_or(i32::MAX),
        i32::try_from(size.1).unwrap_or(i32::MAX),
    );
    let origin = (
        ((width - LEGEND_SIZE.0) / 2).max(0),
        ((height - LEGEND_SIZE.1) / 2).max(0),
    );

    match ImageFormat::from_path(output)? {
        ImageFormat::Png => {
            let root = BitMapBackend::new(output, size).into_drawing_area();
            draw_legend(&root, origin, BLACK)?;
            root.present().map_err(plot_err)?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(output, size).into_drawing_area();
            draw_legend(&root, origin, BLACK)?;
            root.present().map_err(plot_err)?;
        }
    }

    log::info!("Legend saved: {}", output.display());
    Ok(())
}
