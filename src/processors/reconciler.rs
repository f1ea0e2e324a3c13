use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{EngineError, Result, SourceTable};
use crate::models::{
    ColumnCoverage, CombinedRecord, CombinedSet, ObservationTable, ReferenceRecord, ReferenceTable,
};
use crate::utils::SpeciesKey;

/// Left-joins the observation log onto the reference table by normalized
/// scientific name.
///
/// Every observation appears exactly once in the result, in input order;
/// reference fields are absent when the key matched nothing. When two
/// reference rows normalize to the same key, the first one wins.
pub struct Reconciler;

impl Reconciler {
    pub fn new() -> Self {
        Self
    }

    pub fn reconcile(
        &self,
        reference: &ReferenceTable,
        observations: &ObservationTable,
    ) -> Result<CombinedSet> {
        if reference.is_empty() {
            return Err(EngineError::MissingSource {
                source_table: SourceTable::Reference,
            });
        }
        if observations.is_empty() {
            return Err(EngineError::MissingSource {
                source_table: SourceTable::Observations,
            });
        }

        let index = self.index_reference(reference);

        let mut records = Vec::with_capacity(observations.rows.len());
        let mut unmatched = 0usize;

        for observation in &observations.rows {
            let species_key = observation
                .scientific_name
                .as_deref()
                .and_then(SpeciesKey::normalize);

            let matched = species_key
                .as_ref()
                .and_then(|key| index.get(key))
                .map(|reference_row| (*reference_row).clone());

            if matched.is_none() {
                unmatched += 1;
            }

            records.push(CombinedRecord {
                observation: observation.clone(),
                species_key,
                reference: matched,
            });
        }

        if unmatched > 0 {
            warn!(
                unmatched,
                total = records.len(),
                "observations without a matching reference row"
            );
        }
        debug!(records = records.len(), "combined set built");

        Ok(CombinedSet {
            records,
            columns: ColumnCoverage {
                observation: observations.columns,
                reference: reference.columns,
            },
            unmatched,
        })
    }

    fn index_reference<'a>(
        &self,
        reference: &'a ReferenceTable,
    ) -> HashMap<SpeciesKey, &'a ReferenceRecord> {
        let mut index = HashMap::with_capacity(reference.rows.len());
        for row in &reference.rows {
            if let Some(key) = SpeciesKey::normalize(&row.scientific_name) {
                index.entry(key).or_insert(row);
            }
        }
        index
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}
