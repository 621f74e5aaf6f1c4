//! Covariate values and their natural ordering.

use std::cmp::Ordering;
use std::fmt;

/// The raw value a respondent gave for a covariate
#[derive(Debug, Clone)]
pub enum Level {
    /// A point on a numeric or ordinal scale (age group, religiosity, ...)
    Numeric(f64),
    /// A categorical code such as `"0"`/`"1"`
    Text(String),
    /// Index of a bucket produced by binning a continuous field
    Ordinal(usize),
}

impl Level {
    /// The code as it appears in the dataset, used as the key for value maps
    #[must_use]
    pub fn code(&self) -> String {
        match self {
            Self::Numeric(value) => format_number(*value),
            Self::Text(code) => code.clone(),
            Self::Ordinal(index) => index.to_string(),
        }
    }

    fn variant_rank(&self) -> u8 {
        match self {
            Self::Numeric(_) => 0,
            Self::Ordinal(_) => 1,
            Self::Text(_) => 2,
        }
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Numeric(a), Self::Numeric(b)) => a.total_cmp(b),
            (Self::Ordinal(a), Self::Ordinal(b)) => a.cmp(b),
            // Codes like "2" and "10" sort by the number they spell
            (Self::Text(a), Self::Text(b)) => match (a.parse::<f64>(), b.parse::<f64>()) {
                (Ok(x), Ok(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
                _ => a.cmp(b),
            },
            _ => self.variant_rank().cmp(&other.variant_rank()),
        }
    }
}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Level {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Level {}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

/// A covariate value together with the label shown in charts
///
/// Ordering and equality only consider the level, so relabelling never
/// changes where a group sits on the axis.
#[derive(Debug, Clone)]
pub struct Category {
    level: Level,
    label: String,
}

impl Category {
    /// A category labelled with its own code
    #[must_use]
    pub fn new(level: Level) -> Self {
        let label = level.code();
        Self { level, label }
    }

    #[must_use]
    pub fn with_label(level: Level, label: impl Into<String>) -> Self {
        Self {
            level,
            label: label.into(),
        }
    }

    #[must_use]
    pub fn level(&self) -> &Level {
        &self.level
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The raw code, independent of any relabelling
    #[must_use]
    pub fn code(&self) -> String {
        self.level.code()
    }

    pub(crate) fn set_label(&mut self, label: &str) {
        label.clone_into(&mut self.label);
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.level.cmp(&other.level)
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.level == other.level
    }
}

impl Eq for Category {}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Render a number without a trailing `.0` when it is integral
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        #[allow(clippy::cast_possible_truncation)]
        let integral = value as i64;
        integral.to_string()
    } else {
        value.to_string()
    }
}
