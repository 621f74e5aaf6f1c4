//! Bar geometry for diverging stacked charts, independent of any backend.

use crate::algorithm::{ContingencyTable, PercentageTable};
use crate::error::{Result, SurveyError};
use crate::models::{Category, Support};

/// Padding added above and below the tallest stacks, in percentage points
pub const Y_PADDING: f64 = 5.0;

/// One coloured piece of a bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub support: Support,
    pub bottom: f64,
    pub height: f64,
}

impl Segment {
    #[must_use]
    pub fn top(&self) -> f64 {
        self.bottom + self.height
    }

    /// Vertical centre, where the percentage label goes
    #[must_use]
    pub fn center(&self) -> f64 {
        self.bottom + self.height / 2.0
    }

    /// The share rounded to a whole percent, e.g. "42%"
    #[must_use]
    pub fn label(&self) -> String {
        format!("{:.0}%", self.height)
    }
}

/// The stacked bar of one group
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    pub category: Category,
    /// Respondents in the group before normalization
    pub count: usize,
    /// Bottom of the first segment; puts the middle of "Moderately" on zero
    pub offset: f64,
    /// Not at all, Moderately, Very much, bottom to top
    pub segments: [Segment; 3],
}

impl BarLayout {
    /// Top of the stack, `offset + 100` for a complete row
    #[must_use]
    pub fn top(&self) -> f64 {
        self.segments[2].top()
    }

    /// Tick label lines: the group and its size
    #[must_use]
    pub fn tick_label(&self) -> [String; 2] {
        [self.category.label().to_string(), format!("N = {}", self.count)]
    }
}

/// Every bar of a chart plus the vertical extent to show
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub bars: Vec<BarLayout>,
    pub y_range: (f64, f64),
}

/// Lay out one bar per row of `percentages`
///
/// `counts` supplies the respondent count shown under each bar.
///
/// # Errors
///
/// Returns [`SurveyError::Render`] if a row lacks a share for one of the
/// support levels.
pub fn layout_bars(percentages: &PercentageTable, counts: &ContingencyTable) -> Result<ChartLayout> {
    let mut bars = Vec::with_capacity(percentages.len());
    let mut lowest = f64::NEG_INFINITY;
    let mut highest = f64::NEG_INFINITY;

    for (category, shares) in percentages.rows() {
        let mut heights = [0.0; 3];
        for support in Support::ALL {
            heights[support.index()] =
                *shares.get(&support).ok_or_else(|| SurveyError::Render {
                    group: category.label().to_string(),
                    category: support.label().to_string(),
                })?;
        }
        let [not_at_all, moderately, very_much] = heights;

        let offset = -(not_at_all + moderately / 2.0);
        lowest = lowest.max(not_at_all + moderately / 2.0);
        highest = highest.max(very_much + moderately / 2.0);

        let mut bottom = offset;
        let segments = Support::ALL.map(|support| {
            let height = heights[support.index()];
            let segment = Segment {
                support,
                bottom,
                height,
            };
            bottom += height;
            segment
        });

        bars.push(BarLayout {
            category: category.clone(),
            count: counts.row_total(category),
            offset,
            segments,
        });
    }

    let y_range = if bars.is_empty() {
        (-Y_PADDING, Y_PADDING)
    } else {
        (-lowest - Y_PADDING, highest + Y_PADDING)
    };

    Ok(ChartLayout { bars, y_range })
}
