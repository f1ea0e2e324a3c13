use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::models::CombinedSet;
use crate::utils::constants::{MARKER_RADIUS_SCALE, MONTHS_PER_YEAR, RANKING_TOP_N};
use crate::utils::SpeciesKey;

/// One group of a ranking: a label and its count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedEntry {
    pub label: String,
    pub value: usize,
}

/// Sighting counts per calendar month for one species, January first.
/// Always dense: months without data are zero, so chart axes stay stable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySeries {
    pub counts: [usize; MONTHS_PER_YEAR],
}

impl MonthlySeries {
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Distinct-species richness at one observation site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichnessSite {
    pub latitude: f64,
    pub longitude: f64,
    pub location: String,
    pub species_count: usize,
}

impl RichnessSite {
    /// Map marker radius, proportional to richness.
    pub fn marker_radius(&self) -> f64 {
        self.species_count as f64 * MARKER_RADIUS_SCALE
    }
}

/// The seven grouped aggregations over a filtered view.
///
/// Each operation is pure and returns `None` when the columns it depends on
/// are absent from the source, mirroring the indicator availability rules.
pub struct Aggregator;

impl Aggregator {
    pub fn new() -> Self {
        Self
    }

    /// Distinct-species count per family, descending, top 10.
    pub fn species_by_family(&self, view: &CombinedSet) -> Option<Vec<RankedEntry>> {
        if !view.columns.reference.family {
            return None;
        }
        let mut ranking =
            rank_distinct_species(view, |record| record.family().map(str::to_string));
        ranking.truncate(RANKING_TOP_N);
        Some(ranking)
    }

    /// Raw sighting count per species, descending, top 10.
    pub fn sightings_by_species(&self, view: &CombinedSet) -> Option<Vec<RankedEntry>> {
        if !view.columns.observation.scientific_name {
            return None;
        }

        // Counted by join key, labelled with the first spelling seen.
        let mut counts: HashMap<&SpeciesKey, (String, usize)> = HashMap::new();
        for record in &view.records {
            let Some(key) = &record.species_key else {
                continue;
            };
            let entry = counts.entry(key).or_insert_with(|| {
                let label = record
                    .observation
                    .scientific_name
                    .as_deref()
                    .unwrap_or(key.as_str())
                    .trim()
                    .to_string();
                (label, 0)
            });
            entry.1 += 1;
        }

        let mut ranking = counts
            .into_values()
            .map(|(label, value)| RankedEntry { label, value })
            .collect::<Vec<_>>();
        sort_ranking(&mut ranking);
        ranking.truncate(RANKING_TOP_N);
        Some(ranking)
    }

    /// Distinct-species count per habitat category, descending, all groups.
    pub fn species_by_habitat(&self, view: &CombinedSet) -> Option<Vec<RankedEntry>> {
        if !view.columns.reference.habitat {
            return None;
        }
        Some(rank_distinct_species(view, |record| {
            record.habitat().map(str::to_string)
        }))
    }

    /// Distinct-species count per trophic niche, all groups, no truncation.
    pub fn species_by_trophic_niche(&self, view: &CombinedSet) -> Option<Vec<RankedEntry>> {
        if !view.columns.reference.trophic_niche {
            return None;
        }
        Some(rank_distinct_species(view, |record| {
            record.trophic_niche().map(str::to_string)
        }))
    }

    /// Dense monthly sighting series for one species. Rows whose date failed
    /// to parse are excluded from the series but not from raw totals.
    pub fn seasonality(&self, view: &CombinedSet, species: &SpeciesKey) -> Option<MonthlySeries> {
        if !view.columns.observation.date {
            return None;
        }

        let mut counts = [0usize; MONTHS_PER_YEAR];
        for record in &view.records {
            if record.species_key.as_ref() != Some(species) {
                continue;
            }
            if let Some(month) = record.observation.month() {
                counts[(month - 1) as usize] += 1;
            }
        }
        Some(MonthlySeries { counts })
    }

    /// Distinct-species richness per (latitude, longitude, location) site.
    pub fn richness_by_site(&self, view: &CombinedSet) -> Option<Vec<RichnessSite>> {
        if !view.columns.observation.coordinates || !view.columns.observation.location {
            return None;
        }

        // f64 grouping keyed on the bit pattern; sites differing in any of
        // the three key fields are distinct markers.
        let mut sites: HashMap<(u64, u64, &str), (f64, f64, HashSet<&SpeciesKey>)> =
            HashMap::new();
        for record in &view.records {
            let (Some(latitude), Some(longitude), Some(location), Some(key)) = (
                record.observation.latitude,
                record.observation.longitude,
                record.observation.location.as_deref(),
                record.species_key.as_ref(),
            ) else {
                continue;
            };
            let entry = sites
                .entry((latitude.to_bits(), longitude.to_bits(), location))
                .or_insert_with(|| (latitude, longitude, HashSet::new()));
            entry.2.insert(key);
        }

        let mut result = sites
            .into_iter()
            .map(|((_, _, location), (latitude, longitude, species))| RichnessSite {
                latitude,
                longitude,
                location: location.to_string(),
                species_count: species.len(),
            })
            .collect::<Vec<_>>();
        result.sort_by(|a, b| {
            a.location
                .cmp(&b.location)
                .then(a.latitude.total_cmp(&b.latitude))
                .then(a.longitude.total_cmp(&b.longitude))
        });
        Some(result)
    }

    /// Richness per site restricted to species threatened under any of the
    /// three jurisdictions. Unavailable when none of the status columns is.
    pub fn threatened_richness_by_site(&self, view: &CombinedSet) -> Option<Vec<RichnessSite>> {
        let reference = &view.columns.reference;
        if !reference.iucn && !reference.national && !reference.state {
            return None;
        }

        let threatened = CombinedSet {
            records: view
                .records
                .iter()
                .filter(|record| record.is_threatened())
                .cloned()
                .collect(),
            columns: view.columns,
            unmatched: 0,
        };
        self.richness_by_site(&threatened)
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// Group distinct species by a label derived from each record; records whose
/// label or key is missing are excluded (an undefined category cannot be
/// charted).
fn rank_distinct_species<F>(view: &CombinedSet, label_of: F) -> Vec<RankedEntry>
where
    F: Fn(&crate::models::CombinedRecord) -> Option<String>,
{
    let mut groups: HashMap<String, HashSet<&SpeciesKey>> = HashMap::new();
    for record in &view.records {
        let (Some(label), Some(key)) = (label_of(record), record.species_key.as_ref()) else {
            continue;
        };
        groups.entry(label).or_default().insert(key);
    }

    let mut ranking = groups
        .into_iter()
        .map(|(label, species)| RankedEntry {
            label,
            value: species.len(),
        })
        .collect::<Vec<_>>();
    sort_ranking(&mut ranking);
    ranking
}

/// Value descending, label ascending as the deterministic tie-break.
fn sort_ranking(ranking: &mut [RankedEntry]) {
    ranking.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.label.cmp(&b.label)));
}
