use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, warn};
use validator::Validate;

use crate::error::Result;
use crate::models::{ObservationColumns, ObservationRecord, ObservationTable};
use crate::readers::{cell, column_index};
use crate::utils::constants::{
    DATETIME_FORMATS, DATE_FORMATS, OBS_DATE, OBS_LATITUDE, OBS_LIST_ID, OBS_LOCATION,
    OBS_LONGITUDE, OBS_SCIENTIFIC_NAME,
};

/// Reads the field-observation log from CSV.
///
/// Unparseable timestamps and out-of-range coordinates are nulled, logged and
/// counted; the rows themselves are kept so raw totals stay accurate.
pub struct ObservationReader;

impl ObservationReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read(&self, path: &Path) -> Result<ObservationTable> {
        self.read_from(File::open(path)?)
    }

    pub fn read_from<R: Read>(&self, input: R) -> Result<ObservationTable> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
        let headers = reader.headers()?.clone();

        let scientific_name = column_index(&headers, OBS_SCIENTIFIC_NAME);
        let location = column_index(&headers, OBS_LOCATION);
        let latitude = column_index(&headers, OBS_LATITUDE);
        let longitude = column_index(&headers, OBS_LONGITUDE);
        let date = column_index(&headers, OBS_DATE);
        let list_id = column_index(&headers, OBS_LIST_ID);

        let columns = ObservationColumns {
            scientific_name: scientific_name.is_some(),
            location: location.is_some(),
            coordinates: latitude.is_some() && longitude.is_some(),
            date: date.is_some(),
            list_id: list_id.is_some(),
        };

        let mut rows = Vec::new();
        let mut bad_dates = 0usize;
        let mut bad_coordinates = 0usize;

        for row_result in reader.records() {
            let row = row_result?;

            let parsed_date = match cell(&row, date) {
                Some(raw) => {
                    let parsed = parse_date(raw);
                    if parsed.is_none() {
                        bad_dates += 1;
                    }
                    parsed
                }
                None => None,
            };

            let mut record = ObservationRecord {
                scientific_name: cell(&row, scientific_name).map(str::to_string),
                location: cell(&row, location).map(str::to_string),
                latitude: cell(&row, latitude).and_then(parse_coordinate),
                longitude: cell(&row, longitude).and_then(parse_coordinate),
                date: parsed_date,
                list_id: cell(&row, list_id).map(str::to_string),
            };

            // Coordinates outside the valid ranges are as unusable as
            // unparseable ones; null them and keep the row.
            if record.validate().is_err() {
                record.latitude = None;
                record.longitude = None;
                bad_coordinates += 1;
            }

            rows.push(record);
        }

        if bad_dates > 0 {
            warn!(
                count = bad_dates,
                "observations with unparseable dates; excluded from date-derived figures"
            );
        }
        if bad_coordinates > 0 {
            warn!(count = bad_coordinates, "observations with invalid coordinates dropped from maps");
        }
        debug!(rows = rows.len(), "loaded observation table");

        Ok(ObservationTable::with_columns(rows, columns))
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Try the accepted date and datetime formats in order.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(datetime.date());
        }
    }
    None
}

/// Coordinates may use a decimal comma in the source spreadsheets.
fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.parse::<f64>()
        .or_else(|_| raw.replace(',', ".").parse::<f64>())
        .ok()
}
