use std::fmt;

use serde::{Deserialize, Serialize};

/// Conservation status under the IUCN or national (MMA) classification.
///
/// The source spreadsheets carry Portuguese labels and standard abbreviations
/// interchangeably; `parse` folds both spellings into one category so that
/// threat membership is judged on the category, not the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConservationStatus {
    LeastConcern,
    NearThreatened,
    Vulnerable,
    Endangered,
    CriticallyEndangered,
    DataDeficient,
    NotEvaluated,
    Other(String),
}

impl ConservationStatus {
    /// Parse a status cell. Returns `None` for blank cells.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        let status = match trimmed.to_lowercase().as_str() {
            "vulnerável" | "vulneravel" | "vulnerable" | "vu" => Self::Vulnerable,
            "em perigo" | "endangered" | "en" => Self::Endangered,
            "criticamente ameaçada" | "criticamente ameacada" | "critically endangered"
            | "cr" => Self::CriticallyEndangered,
            "quase ameaçada" | "quase ameacada" | "near threatened" | "nt" => {
                Self::NearThreatened
            }
            "pouco preocupante" | "least concern" | "lc" => Self::LeastConcern,
            "dados insuficientes" | "data deficient" | "dd" => Self::DataDeficient,
            "não avaliada" | "nao avaliada" | "not evaluated" | "ne" => Self::NotEvaluated,
            _ => Self::Other(trimmed.to_string()),
        };
        Some(status)
    }

    /// Membership in the fixed threatened set: NT, VU, EN, CR.
    pub fn is_threatened(&self) -> bool {
        matches!(
            self,
            Self::NearThreatened | Self::Vulnerable | Self::Endangered | Self::CriticallyEndangered
        )
    }

    pub fn label(&self) -> &str {
        match self {
            Self::LeastConcern => "Least Concern",
            Self::NearThreatened => "Near Threatened",
            Self::Vulnerable => "Vulnerable",
            Self::Endangered => "Endangered",
            Self::CriticallyEndangered => "Critically Endangered",
            Self::DataDeficient => "Data Deficient",
            Self::NotEvaluated => "Not evaluated",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ConservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One row of the taxonomic/ecological reference table (one per species).
///
/// Every attribute except the scientific name is optional: the corresponding
/// column may be absent from the source, or the cell may be blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    pub scientific_name: String,
    pub common_name: Option<String>,
    pub order: Option<String>,
    pub family: Option<String>,
    pub habitat: Option<String>,
    pub trophic_niche: Option<String>,
    pub iucn: Option<ConservationStatus>,
    pub national: Option<ConservationStatus>,
    /// State-level threat listing is free text, not a controlled vocabulary;
    /// any non-empty value counts as threatened at that jurisdiction.
    pub state: Option<String>,
    pub national_endemic: Option<bool>,
    pub atlantic_forest_endemic: Option<bool>,
    /// Narrative migratory classification; presence is the signal.
    pub migratory: Option<String>,
}

impl ReferenceRecord {
    pub fn is_threatened_iucn(&self) -> bool {
        self.iucn.as_ref().is_some_and(|s| s.is_threatened())
    }

    pub fn is_threatened_national(&self) -> bool {
        self.national.as_ref().is_some_and(|s| s.is_threatened())
    }

    pub fn is_threatened_state(&self) -> bool {
        self.state.as_ref().is_some_and(|s| !s.trim().is_empty())
    }

    pub fn is_migratory(&self) -> bool {
        self.migratory.as_ref().is_some_and(|s| !s.trim().is_empty())
    }
}

/// Column coverage of a loaded reference table. A `false` flag means the
/// column was absent from the source, which downstream consumers must treat
/// as "unavailable" rather than zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceColumns {
    pub scientific_name: bool,
    pub common_name: bool,
    pub order: bool,
    pub family: bool,
    pub habitat: bool,
    pub trophic_niche: bool,
    pub iucn: bool,
    pub national: bool,
    pub state: bool,
    pub national_endemic: bool,
    pub atlantic_forest_endemic: bool,
    pub migratory: bool,
}

impl ReferenceColumns {
    /// Coverage for tables built in memory, where every field is queryable.
    pub fn full() -> Self {
        Self {
            scientific_name: true,
            common_name: true,
            order: true,
            family: true,
            habitat: true,
            trophic_niche: true,
            iucn: true,
            national: true,
            state: true,
            national_endemic: true,
            atlantic_forest_endemic: true,
            migratory: true,
        }
    }
}

/// The reference table: rows plus which columns the source actually carried.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    pub rows: Vec<ReferenceRecord>,
    pub columns: ReferenceColumns,
}

impl ReferenceTable {
    pub fn new(rows: Vec<ReferenceRecord>) -> Self {
        Self {
            rows,
            columns: ReferenceColumns::full(),
        }
    }

    pub fn with_columns(rows: Vec<ReferenceRecord>, columns: ReferenceColumns) -> Self {
        Self { rows, columns }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_portuguese_and_abbreviations() {
        assert_eq!(
            ConservationStatus::parse("Vulnerável"),
            Some(ConservationStatus::Vulnerable)
        );
        assert_eq!(
            ConservationStatus::parse("VU"),
            Some(ConservationStatus::Vulnerable)
        );
        assert_eq!(
            ConservationStatus::parse("Quase ameaçada"),
            Some(ConservationStatus::NearThreatened)
        );
        assert_eq!(
            ConservationStatus::parse("Não avaliada"),
            Some(ConservationStatus::NotEvaluated)
        );
        assert_eq!(ConservationStatus::parse("  "), None);
    }

    #[test]
    fn test_threatened_membership() {
        for raw in ["VU", "EN", "CR", "NT", "Em perigo", "Criticamente ameaçada"] {
            assert!(
                ConservationStatus::parse(raw).unwrap().is_threatened(),
                "{raw} should be threatened"
            );
        }
        for raw in ["LC", "Não avaliada", "DD", "Extinta"] {
            assert!(
                !ConservationStatus::parse(raw).unwrap().is_threatened(),
                "{raw} should not be threatened"
            );
        }
    }

    #[test]
    fn test_unknown_label_is_preserved() {
        let status = ConservationStatus::parse("Extinta").unwrap();
        assert_eq!(status, ConservationStatus::Other("Extinta".to_string()));
        assert_eq!(status.label(), "Extinta");
    }

    #[test]
    fn test_state_threat_is_presence_of_text() {
        let mut record = ReferenceRecord {
            scientific_name: "Turdus rufiventris".to_string(),
            ..Default::default()
        };
        assert!(!record.is_threatened_state());

        record.state = Some("  ".to_string());
        assert!(!record.is_threatened_state());

        record.state = Some("Vulnerável".to_string());
        assert!(record.is_threatened_state());
    }
}
