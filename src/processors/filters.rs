use serde::{Deserialize, Serialize};

use crate::models::CombinedSet;

/// Filter selection over the combined set. `None` means "all" for that
/// option; active options compose with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub year: Option<i32>,
    pub habitat: Option<String>,
    pub location: Option<String>,
}

impl FilterSpec {
    /// The no-op selection: every option set to "all".
    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_unfiltered(&self) -> bool {
        self.year.is_none() && self.habitat.is_none() && self.location.is_none()
    }
}

/// Narrow the combined set to rows matching every active filter option.
///
/// Returns a fresh view; the input is never mutated. An active option whose
/// backing column is absent from the source is a no-op. Matching is exact and
/// case-sensitive; a year filter excludes rows whose date failed to parse.
pub fn apply_filters(set: &CombinedSet, spec: &FilterSpec) -> CombinedSet {
    let year = spec.year.filter(|_| set.columns.observation.date);
    let habitat = spec
        .habitat
        .as_deref()
        .filter(|_| set.columns.reference.habitat);
    let location = spec
        .location
        .as_deref()
        .filter(|_| set.columns.observation.location);

    let records = set
        .records
        .iter()
        .filter(|record| year.map_or(true, |y| record.observation.year() == Some(y)))
        .filter(|record| habitat.map_or(true, |h| record.habitat() == Some(h)))
        .filter(|record| {
            location.map_or(true, |l| record.observation.location.as_deref() == Some(l))
        })
        .cloned()
        .collect::<Vec<_>>();

    let unmatched = records.iter().filter(|r| r.reference.is_none()).count();

    CombinedSet {
        records,
        columns: set.columns,
        unmatched,
    }
}
