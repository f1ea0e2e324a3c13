use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{ConservationStatus, ReferenceColumns, ReferenceRecord, ReferenceTable};
use crate::readers::{cell, column_index};
use crate::utils::constants::{
    REF_AF_ENDEMIC, REF_COMMON_NAME, REF_FAMILY, REF_HABITAT, REF_IUCN, REF_MIGRATORY,
    REF_NATIONAL, REF_NATIONAL_ENDEMIC, REF_ORDER, REF_SCIENTIFIC_NAME, REF_STATE,
    REF_TROPHIC_NICHE,
};

/// Reads the taxonomic/ecological reference table from CSV.
///
/// Columns are resolved by header name; a missing column is recorded in the
/// table's coverage flags rather than treated as an error.
pub struct ReferenceReader;

impl ReferenceReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read(&self, path: &Path) -> Result<ReferenceTable> {
        self.read_from(File::open(path)?)
    }

    pub fn read_from<R: Read>(&self, input: R) -> Result<ReferenceTable> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
        let headers = reader.headers()?.clone();

        let scientific_name = column_index(&headers, REF_SCIENTIFIC_NAME);
        let common_name = column_index(&headers, REF_COMMON_NAME);
        let order = column_index(&headers, REF_ORDER);
        let family = column_index(&headers, REF_FAMILY);
        let habitat = column_index(&headers, REF_HABITAT);
        let trophic_niche = column_index(&headers, REF_TROPHIC_NICHE);
        let iucn = column_index(&headers, REF_IUCN);
        let national = column_index(&headers, REF_NATIONAL);
        let state = column_index(&headers, REF_STATE);
        let national_endemic = column_index(&headers, REF_NATIONAL_ENDEMIC);
        let af_endemic = column_index(&headers, REF_AF_ENDEMIC);
        let migratory = column_index(&headers, REF_MIGRATORY);

        let columns = ReferenceColumns {
            scientific_name: scientific_name.is_some(),
            common_name: common_name.is_some(),
            order: order.is_some(),
            family: family.is_some(),
            habitat: habitat.is_some(),
            trophic_niche: trophic_niche.is_some(),
            iucn: iucn.is_some(),
            national: national.is_some(),
            state: state.is_some(),
            national_endemic: national_endemic.is_some(),
            atlantic_forest_endemic: af_endemic.is_some(),
            migratory: migratory.is_some(),
        };

        if !columns.scientific_name {
            warn!(
                column = REF_SCIENTIFIC_NAME,
                "reference table lacks the scientific-name column; no observation will match"
            );
        }

        let mut rows = Vec::new();
        for row_result in reader.records() {
            let row = row_result?;
            rows.push(ReferenceRecord {
                scientific_name: cell(&row, scientific_name).unwrap_or_default().to_string(),
                common_name: cell(&row, common_name).map(str::to_string),
                order: cell(&row, order).map(str::to_string),
                family: cell(&row, family).map(str::to_string),
                habitat: cell(&row, habitat).map(str::to_string),
                trophic_niche: cell(&row, trophic_niche).map(str::to_string),
                iucn: cell(&row, iucn).and_then(ConservationStatus::parse),
                national: cell(&row, national).and_then(ConservationStatus::parse),
                state: cell(&row, state).map(str::to_string),
                national_endemic: cell(&row, national_endemic).map(parse_flag),
                atlantic_forest_endemic: cell(&row, af_endemic).map(parse_flag),
                migratory: cell(&row, migratory).map(str::to_string),
            });
        }

        debug!(rows = rows.len(), "loaded reference table");
        Ok(ReferenceTable::with_columns(rows, columns))
    }
}

impl Default for ReferenceReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Endemism flags are truthy when the cell equals 1.
fn parse_flag(raw: &str) -> bool {
    matches!(raw, "1" | "1.0")
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV_FULL: &str = "\
Nome científico,Nomes em Português,Nome da Família,Habitat (AVONET),Nicho trófico (AVONET),IUCN 2021,MMA 2022,Ameaçadas Bahia 2017,Endêmicas do Brasil (CBRO 2021),Espécies Endêmicas da Mata Atlântica,Migratórias Somenzari et al. 2017
Turdus rufiventris,Sabiá-laranjeira,Turdidae,Forest,Omnivore,Vulnerável,VU,Vulnerável,1,0,
Sporophila frontalis,Pixoxó,Thraupidae,Forest,Granivore,Não avaliada,,,0,1,Migratória parcial
";

    #[test]
    fn test_read_full_table() {
        let table = ReferenceReader::new()
            .read_from(CSV_FULL.as_bytes())
            .unwrap();

        assert_eq!(table.rows.len(), 2);
        assert!(table.columns.iucn);
        assert!(table.columns.migratory);
        assert!(!table.columns.order);

        let turdus = &table.rows[0];
        assert_eq!(turdus.scientific_name, "Turdus rufiventris");
        assert_eq!(turdus.iucn, Some(ConservationStatus::Vulnerable));
        assert_eq!(turdus.national, Some(ConservationStatus::Vulnerable));
        assert_eq!(turdus.national_endemic, Some(true));
        assert_eq!(turdus.atlantic_forest_endemic, Some(false));
        assert_eq!(turdus.migratory, None);

        let sporophila = &table.rows[1];
        assert_eq!(sporophila.iucn, Some(ConservationStatus::NotEvaluated));
        assert_eq!(sporophila.national, None);
        assert!(sporophila.is_migratory());
    }

    #[test]
    fn test_missing_columns_are_recorded_not_fatal() {
        let csv = "Nome científico,Nome da Família\nTurdus rufiventris,Turdidae\n";
        let table = ReferenceReader::new().read_from(csv.as_bytes()).unwrap();

        assert_eq!(table.rows.len(), 1);
        assert!(table.columns.family);
        assert!(!table.columns.iucn);
        assert!(!table.columns.habitat);
        assert_eq!(table.rows[0].iucn, None);
    }
}
