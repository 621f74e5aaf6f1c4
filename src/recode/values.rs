//! Display labels for categorical codes.

use crate::config::ValueMaps;
use crate::models::{Covariate, RecodedDataset};

/// Replaces raw codes with the labels configured in [`ValueMaps`]
///
/// Lookups are keyed by the raw code kept inside each category, so applying
/// the same maps twice gives the same labels as applying them once. Codes
/// without an entry keep their current label.
#[derive(Debug, Clone, Copy)]
pub struct ValueRecoder<'a> {
    maps: &'a ValueMaps,
}

impl<'a> ValueRecoder<'a> {
    #[must_use]
    pub fn new(maps: &'a ValueMaps) -> Self {
        Self { maps }
    }

    /// Return a relabelled copy of `dataset`
    #[must_use]
    pub fn apply(&self, dataset: &RecodedDataset) -> RecodedDataset {
        let mut recoded = dataset.clone();

        for covariate in Covariate::ALL {
            let field = dataset.field_name(covariate);
            let Some(mapping) = self.maps.get(field) else {
                continue;
            };

            let mut relabelled = 0usize;
            for record in recoded.records_mut() {
                if let Some(category) = record.covariate_mut(covariate) {
                    if let Some(label) = mapping.get(&category.code()) {
                        category.set_label(label);
                        relabelled += 1;
                    }
                }
            }
            log::debug!("Relabelled {relabelled} values of '{field}'");
        }

        recoded
    }
}

/// Relabel a dataset with the given value maps
#[must_use]
pub fn recode_values(dataset: &RecodedDataset, maps: &ValueMaps) -> RecodedDataset {
    ValueRecoder::new(maps).apply(dataset)
}
