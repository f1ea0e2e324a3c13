use std::fmt;

use serde::Serialize;

use crate::error::{EngineError, Result};
use crate::models::{CombinedSet, ConservationStatus};
use crate::utils::constants::{RARE_MAX_SIGHTINGS, UNCOMMON_MAX_SIGHTINGS};
use crate::utils::SpeciesKey;

/// Three-tier abundance classification from a sighting count within a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Abundance {
    Rare,
    Uncommon,
    Common,
}

impl Abundance {
    pub fn classify(sightings: usize) -> Self {
        if sightings > UNCOMMON_MAX_SIGHTINGS {
            Self::Common
        } else if sightings > RARE_MAX_SIGHTINGS {
            Self::Uncommon
        } else {
            Self::Rare
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Rare => "rare",
            Self::Uncommon => "uncommon",
            Self::Common => "common",
        }
    }
}

impl fmt::Display for Abundance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Attributes and abundance of one species within a filtered view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesProfile {
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub iucn_status: String,
    pub national_status: String,
    pub sighting_count: usize,
    pub abundance: Abundance,
}

/// Resolve one species' profile from a filtered view.
///
/// Fails with `SpeciesNotFound` when the normalized name has zero rows in the
/// view; callers should only offer species present in the current selection.
pub fn lookup_species(view: &CombinedSet, species: &str) -> Result<SpeciesProfile> {
    let not_found = || EngineError::SpeciesNotFound {
        name: species.trim().to_string(),
    };

    let key = SpeciesKey::normalize(species).ok_or_else(not_found)?;

    let rows: Vec<_> = view
        .records
        .iter()
        .filter(|record| record.species_key.as_ref() == Some(&key))
        .collect();
    let first = rows.first().ok_or_else(not_found)?;

    let reference = first.reference.as_ref();
    let scientific_name = reference
        .map(|r| r.scientific_name.clone())
        .or_else(|| {
            first
                .observation
                .scientific_name
                .as_ref()
                .map(|n| n.trim().to_string())
        })
        .unwrap_or_else(|| key.to_string());

    let status_label = |status: Option<&ConservationStatus>| {
        status
            .unwrap_or(&ConservationStatus::NotEvaluated)
            .label()
            .to_string()
    };

    let sighting_count = rows.len();
    Ok(SpeciesProfile {
        scientific_name,
        common_name: reference.and_then(|r| r.common_name.clone()),
        iucn_status: status_label(reference.and_then(|r| r.iucn.as_ref())),
        national_status: status_label(reference.and_then(|r| r.national.as_ref())),
        sighting_count,
        abundance: Abundance::classify(sighting_count),
    })
}
