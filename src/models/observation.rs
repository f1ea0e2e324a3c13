use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One row of the field-observation log (one per sighting event).
///
/// A timestamp that failed to parse is `None`: the row is excluded from any
/// year/month-derived indicator or aggregate but still counts in raw totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ObservationRecord {
    pub scientific_name: Option<String>,
    pub location: Option<String>,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,

    pub date: Option<NaiveDate>,
    pub list_id: Option<String>,
}

impl ObservationRecord {
    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }

    /// Calendar month, 1 = January.
    pub fn month(&self) -> Option<u32> {
        self.date.map(|d| d.month())
    }
}

/// Column coverage of a loaded observation table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationColumns {
    pub scientific_name: bool,
    pub location: bool,
    pub coordinates: bool,
    pub date: bool,
    pub list_id: bool,
}

impl ObservationColumns {
    pub fn full() -> Self {
        Self {
            scientific_name: true,
            location: true,
            coordinates: true,
            date: true,
            list_id: true,
        }
    }
}

/// The observation table: rows plus which columns the source actually carried.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTable {
    pub rows: Vec<ObservationRecord>,
    pub columns: ObservationColumns,
}

impl ObservationTable {
    pub fn new(rows: Vec<ObservationRecord>) -> Self {
        Self {
            rows,
            columns: ObservationColumns::full(),
        }
    }

    pub fn with_columns(rows: Vec<ObservationRecord>, columns: ObservationColumns) -> Self {
        Self { rows, columns }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Validate every row's coordinate ranges. Tables loaded through the
    /// reader always pass; tables built programmatically may not.
    pub fn validate(&self) -> crate::error::Result<()> {
        for row in &self.rows {
            row.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_and_month_follow_the_date() {
        let record = ObservationRecord {
            scientific_name: Some("Turdus rufiventris".to_string()),
            date: NaiveDate::from_ymd_opt(2025, 2, 3),
            ..Default::default()
        };
        assert_eq!(record.year(), Some(2025));
        assert_eq!(record.month(), Some(2));

        let undated = ObservationRecord::default();
        assert_eq!(undated.year(), None);
        assert_eq!(undated.month(), None);
    }

    #[test]
    fn test_coordinate_validation() {
        let record = ObservationRecord {
            latitude: Some(-16.38),
            longitude: Some(-39.17),
            ..Default::default()
        };
        assert!(record.validate().is_ok());

        let invalid = ObservationRecord {
            latitude: Some(91.0),
            ..Default::default()
        };
        assert!(invalid.validate().is_err());
    }
}
