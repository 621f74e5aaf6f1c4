//! Cosmetic configuration of the two chart layouts.

use plotters::style::{BLACK, RGBColor, WHITE};

use crate::models::Support;

/// Orange used for "Not at all"
pub const NOT_AT_ALL_COLOR: RGBColor = RGBColor(0xFA, 0x89, 0x33);
/// Light grey used for "Moderately"
pub const MODERATELY_COLOR: RGBColor = RGBColor(0xD3, 0xD3, 0xD3);
/// Cyan used for "Very much"
pub const VERY_MUCH_COLOR: RGBColor = RGBColor(0x73, 0xEA, 0xFA);
/// Colour of the zero baseline
pub const BASELINE_COLOR: RGBColor = RGBColor(0x80, 0x80, 0x80);

/// Title drawn above the legend entries
pub const LEGEND_TITLE: &str = "Support for raising carbon taxes";

#[must_use]
pub fn support_color(support: Support) -> RGBColor {
    match support {
        Support::NotAtAll => NOT_AT_ALL_COLOR,
        Support::Moderately => MODERATELY_COLOR,
        Support::VeryMuch => VERY_MUCH_COLOR,
    }
}

/// The two chart layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutVariant {
    /// Black on white with group tick labels
    Side,
    /// White on a transparent background with an in-chart legend
    Main,
}

/// How the groups are named under the bars
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickLabels {
    /// The group label of each bar
    Groups,
    /// Fixed names for the first and last bar, `middle` for the rest
    Endpoints {
        first: String,
        middle: String,
        last: String,
    },
}

impl TickLabels {
    /// The liberal to conservative scale of the political orientation chart
    #[must_use]
    pub fn political_scale() -> Self {
        Self::Endpoints {
            first: "Strongly Liberal".to_string(),
            middle: "-".to_string(),
            last: "Strongly Conservative".to_string(),
        }
    }

    /// Name of bar `index` out of `len`, given its own group label
    #[must_use]
    pub fn name<'a>(&'a self, index: usize, len: usize, group: &'a str) -> &'a str {
        match self {
            Self::Groups => group,
            Self::Endpoints { first, middle, last } => {
                if index == 0 {
                    first.as_str()
                } else if index + 1 == len {
                    last.as_str()
                } else {
                    middle.as_str()
                }
            }
        }
    }
}

/// A text placed at a fraction of the plotting area, origin bottom left
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub text: String,
    pub position: (f64, f64),
}

impl Annotation {
    #[must_use]
    pub fn new(text: impl Into<String>, position: (f64, f64)) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }
}

/// Everything about a chart that is not data
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutStyle {
    pub variant: LayoutVariant,
    /// Figure size in pixels
    pub size: (u32, u32),
    pub tick_labels: TickLabels,
}

impl LayoutStyle {
    #[must_use]
    pub fn new(variant: LayoutVariant, size: (u32, u32)) -> Self {
        Self {
            variant,
            size,
            tick_labels: TickLabels::Groups,
        }
    }

    #[must_use]
    pub fn with_tick_labels(mut self, tick_labels: TickLabels) -> Self {
        self.tick_labels = tick_labels;
        self
    }

    /// Colour of titles, labels and axes
    #[must_use]
    pub fn text_color(&self) -> RGBColor {
        match self.variant {
            LayoutVariant::Side => BLACK,
            LayoutVariant::Main => WHITE,
        }
    }

    /// Background fill; `None` leaves the canvas transparent
    #[must_use]
    pub fn background(&self) -> Option<RGBColor> {
        match self.variant {
            LayoutVariant::Side => Some(WHITE),
            LayoutVariant::Main => None,
        }
    }

    #[must_use]
    pub fn shows_legend(&self) -> bool {
        self.variant == LayoutVariant::Main
    }
}
