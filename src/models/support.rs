//! The ordinal response: support for raising a carbon tax.

use std::fmt;

/// Answer to "do you support raising the carbon tax?"
///
/// The "no answer" sentinel never reaches this type; rows carrying it are
/// removed by the population filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Support {
    NotAtAll = 1,
    Moderately = 2,
    VeryMuch = 3,
}

impl Support {
    /// All categories in stacking order (bottom to top)
    pub const ALL: [Self; 3] = [Self::NotAtAll, Self::Moderately, Self::VeryMuch];

    /// Parse a raw survey code
    #[must_use]
    pub fn from_code(code: f64) -> Option<Self> {
        match code {
            c if c == 1.0 => Some(Self::NotAtAll),
            c if c == 2.0 => Some(Self::Moderately),
            c if c == 3.0 => Some(Self::VeryMuch),
            _ => None,
        }
    }

    /// The raw survey code
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Position in [`Support::ALL`]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize - 1
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NotAtAll => "Not at all",
            Self::Moderately => "Moderately",
            Self::VeryMuch => "Very much",
        }
    }
}

impl fmt::Display for Support {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
