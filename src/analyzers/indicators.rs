use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{CombinedSet, ReferenceRecord};
use crate::utils::constants::{DATE_DISPLAY_FORMAT, UNAVAILABLE_LABEL};
use crate::utils::SpeciesKey;

/// Earliest and latest successfully parsed observation dates in a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// `DD/MM/YYYY a DD/MM/YYYY`, the presentation layer's period label.
    pub fn label(&self) -> String {
        format!(
            "{} a {}",
            self.start.format(DATE_DISPLAY_FORMAT),
            self.end.format(DATE_DISPLAY_FORMAT)
        )
    }
}

/// The eleven indicators computed from one filtered view.
///
/// `None` means the backing column is absent from the source, which is a
/// different fact from a zero count and is reported as "unavailable".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSet {
    pub total_records: usize,
    pub distinct_species: usize,
    pub distinct_locations: Option<usize>,
    pub distinct_checklists: Option<usize>,
    pub date_range: Option<DateRange>,
    pub threatened_iucn: Option<usize>,
    pub threatened_national: Option<usize>,
    pub threatened_state: Option<usize>,
    pub national_endemics: Option<usize>,
    pub atlantic_forest_endemics: Option<usize>,
    pub migratory_species: Option<usize>,
}

impl IndicatorSet {
    pub fn date_range_label(&self) -> String {
        match &self.date_range {
            Some(range) => range.label(),
            None => UNAVAILABLE_LABEL.to_string(),
        }
    }
}

/// Computes the indicator battery. Pure function of the view: same input,
/// same output, nothing cached or mutated.
pub struct IndicatorCalculator;

impl IndicatorCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(&self, view: &CombinedSet) -> IndicatorSet {
        let columns = &view.columns;

        let mut species = HashSet::new();
        let mut locations = HashSet::new();
        let mut checklists = HashSet::new();
        let mut date_range: Option<DateRange> = None;

        for record in &view.records {
            if let Some(key) = &record.species_key {
                species.insert(key);
            }
            if let Some(location) = &record.observation.location {
                locations.insert(location.as_str());
            }
            if let Some(list_id) = &record.observation.list_id {
                checklists.insert(list_id.as_str());
            }
            if let Some(date) = record.observation.date {
                date_range = Some(match date_range {
                    None => DateRange {
                        start: date,
                        end: date,
                    },
                    Some(range) => DateRange {
                        start: range.start.min(date),
                        end: range.end.max(date),
                    },
                });
            }
        }

        IndicatorSet {
            total_records: view.len(),
            distinct_species: species.len(),
            distinct_locations: columns.observation.location.then_some(locations.len()),
            distinct_checklists: columns.observation.list_id.then_some(checklists.len()),
            date_range,
            threatened_iucn: columns
                .reference
                .iucn
                .then(|| count_species(view, ReferenceRecord::is_threatened_iucn)),
            threatened_national: columns
                .reference
                .national
                .then(|| count_species(view, ReferenceRecord::is_threatened_national)),
            threatened_state: columns
                .reference
                .state
                .then(|| count_species(view, ReferenceRecord::is_threatened_state)),
            national_endemics: columns
                .reference
                .national_endemic
                .then(|| count_species(view, |r| r.national_endemic == Some(true))),
            atlantic_forest_endemics: columns
                .reference
                .atlantic_forest_endemic
                .then(|| count_species(view, |r| r.atlantic_forest_endemic == Some(true))),
            migratory_species: columns
                .reference
                .migratory
                .then(|| count_species(view, ReferenceRecord::is_migratory)),
        }
    }
}

impl Default for IndicatorCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Distinct species (by join key) whose reference row satisfies the predicate.
fn count_species<P>(view: &CombinedSet, predicate: P) -> usize
where
    P: Fn(&ReferenceRecord) -> bool,
{
    let mut species: HashSet<&SpeciesKey> = HashSet::new();
    for record in &view.records {
        if let (Some(key), Some(reference)) = (&record.species_key, &record.reference) {
            if predicate(reference) {
                species.insert(key);
            }
        }
    }
    species.len()
}
