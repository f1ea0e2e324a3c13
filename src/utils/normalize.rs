use std::fmt;

use serde::Serialize;

/// Normalized join key derived from a scientific name.
///
/// Lowercased, trimmed, with internal whitespace runs collapsed to a single
/// space. An empty or whitespace-only name has no key (`normalize` returns
/// `None`), so such rows never match anything during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SpeciesKey(String);

impl SpeciesKey {
    pub fn normalize(raw: &str) -> Option<Self> {
        let mut key = String::with_capacity(raw.len());
        for word in raw.split_whitespace() {
            if !key.is_empty() {
                key.push(' ');
            }
            key.push_str(&word.to_lowercase());
        }
        if key.is_empty() {
            None
        } else {
            Some(Self(key))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpeciesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
