//! A single survey respondent after recoding.

use std::fmt;

use crate::models::{Category, Support};

/// The demographic covariates analysed against support
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Covariate {
    Sex,
    LivingArea,
    Religiosity,
    Education,
    PoliticalOrientation,
    Age,
    Income,
}

impl Covariate {
    pub const ALL: [Self; 7] = [
        Self::Sex,
        Self::LivingArea,
        Self::Religiosity,
        Self::Education,
        Self::PoliticalOrientation,
        Self::Age,
        Self::Income,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Covariate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sex => "sex",
            Self::LivingArea => "living area",
            Self::Religiosity => "religiosity",
            Self::Education => "education",
            Self::PoliticalOrientation => "political orientation",
            Self::Age => "age",
            Self::Income => "income",
        };
        f.write_str(name)
    }
}

/// One respondent of the filtered population
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyRecord {
    country: String,
    support: Support,
    covariates: [Option<Category>; 7],
}

impl SurveyRecord {
    #[must_use]
    pub fn new(country: impl Into<String>, support: Support) -> Self {
        Self {
            country: country.into(),
            support,
            covariates: Default::default(),
        }
    }

    /// Builder-style setter for one covariate
    #[must_use]
    pub fn with(mut self, covariate: Covariate, value: Option<Category>) -> Self {
        self.covariates[covariate.index()] = value;
        self
    }

    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    #[must_use]
    pub fn support(&self) -> Support {
        self.support
    }

    #[must_use]
    pub fn covariate(&self, covariate: Covariate) -> Option<&Category> {
        self.covariates[covariate.index()].as_ref()
    }

    pub(crate) fn covariate_mut(&mut self, covariate: Covariate) -> Option<&mut Category> {
        self.covariates[covariate.index()].as_mut()
    }

    #[must_use]
    pub fn sex(&self) -> Option<&Category> {
        self.covariate(Covariate::Sex)
    }

    #[must_use]
    pub fn living_area(&self) -> Option<&Category> {
        self.covariate(Covariate::LivingArea)
    }

    #[must_use]
    pub fn religiosity(&self) -> Option<&Category> {
        self.covariate(Covariate::Religiosity)
    }

    #[must_use]
    pub fn education(&self) -> Option<&Category> {
        self.covariate(Covariate::Education)
    }

    #[must_use]
    pub fn political_orientation(&self) -> Option<&Category> {
        self.covariate(Covariate::PoliticalOrientation)
    }

    #[must_use]
    pub fn age(&self) -> Option<&Category> {
        self.covariate(Covariate::Age)
    }

    /// The income bucket, if income was reported and non-negative
    #[must_use]
    pub fn income(&self) -> Option<&Category> {
        self.covariate(Covariate::Income)
    }
}
