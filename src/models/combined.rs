use serde::Serialize;

use crate::models::observation::{ObservationColumns, ObservationRecord};
use crate::models::reference::{ReferenceColumns, ReferenceRecord};
use crate::utils::SpeciesKey;

/// One observation joined with its reference row, when the normalized
/// scientific name matched.
///
/// Both sources are kept whole, so colliding columns (each table carries a
/// scientific name) stay queryable on their own side of the record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinedRecord {
    pub observation: ObservationRecord,
    pub species_key: Option<SpeciesKey>,
    pub reference: Option<ReferenceRecord>,
}

impl CombinedRecord {
    pub fn habitat(&self) -> Option<&str> {
        self.reference.as_ref()?.habitat.as_deref()
    }

    pub fn family(&self) -> Option<&str> {
        self.reference.as_ref()?.family.as_deref()
    }

    pub fn trophic_niche(&self) -> Option<&str> {
        self.reference.as_ref()?.trophic_niche.as_deref()
    }

    /// Threatened under any of the three jurisdictions (IUCN, national, state).
    pub fn is_threatened(&self) -> bool {
        self.reference.as_ref().is_some_and(|r| {
            r.is_threatened_iucn() || r.is_threatened_national() || r.is_threatened_state()
        })
    }
}

/// Column coverage carried over from both source tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ColumnCoverage {
    pub observation: ObservationColumns,
    pub reference: ReferenceColumns,
}

/// The reconciled join of observation and reference data.
///
/// Derived and immutable: filters and aggregations never mutate it, they
/// produce fresh views of the same shape.
#[derive(Debug, Clone, PartialEq)]
pub struct CombinedSet {
    pub records: Vec<CombinedRecord>,
    pub columns: ColumnCoverage,
    /// Observations whose normalized key matched no reference row.
    pub unmatched: usize,
}

impl CombinedSet {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
