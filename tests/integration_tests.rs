use std::io::Write;

use pretty_assertions::assert_eq;
use tempfile::NamedTempFile;

use avifauna_engine::analyzers::{lookup_species, Abundance, Aggregator, IndicatorCalculator};
use avifauna_engine::models::{CombinedSet, ObservationTable, ReferenceTable};
use avifauna_engine::processors::{apply_filters, FilterSpec, Reconciler};
use avifauna_engine::readers::{ObservationReader, ReferenceReader};
use avifauna_engine::utils::SpeciesKey;

const REFERENCE_CSV: &str = "\
Nome científico,Nomes em Português,Nome da Família,Habitat (AVONET),Nicho trófico (AVONET),IUCN 2021,MMA 2022,Ameaçadas Bahia 2017,Endêmicas do Brasil (CBRO 2021),Espécies Endêmicas da Mata Atlântica,Migratórias Somenzari et al. 2017
Turdus rufiventris,Sabiá-laranjeira,Turdidae,Forest,Omnivore,Vulnerável,,,1,0,
Sporophila frontalis,Pixoxó,Thraupidae,Grassland,Granivore,Não avaliada,VU,Vulnerável,0,1,Migratória parcial
";

const OBSERVATION_CSV: &str = "\
Scientific Name,Location,Latitude,Longitude,Date,ListID
Turdus Rufiventris ,Trilha Norte,-16.38,-39.17,2025-01-05,L001
turdus rufiventris,Trilha Norte,-16.38,-39.17,2025-01-18,L001
Turdus rufiventris,Lagoa,-16.40,-39.20,2025-03-02,L002
Sporophila frontalis,Lagoa,-16.40,-39.20,2025-05-12,L003
";

fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write csv");
    file
}

fn load_tables() -> (ReferenceTable, ObservationTable) {
    let reference_file = write_csv(REFERENCE_CSV);
    let observation_file = write_csv(OBSERVATION_CSV);

    let reference = ReferenceReader::new().read(reference_file.path()).unwrap();
    let observations = ObservationReader::new()
        .read(observation_file.path())
        .unwrap();
    (reference, observations)
}

fn combined() -> CombinedSet {
    let (reference, observations) = load_tables();
    Reconciler::new().reconcile(&reference, &observations).unwrap()
}

#[test]
fn reconcile_preserves_observation_cardinality() {
    let (reference, observations) = load_tables();
    let combined = Reconciler::new()
        .reconcile(&reference, &observations)
        .unwrap();

    assert_eq!(combined.len(), observations.rows.len());
    assert_eq!(combined.unmatched, 0);
}

#[test]
fn unfiltered_spec_returns_the_same_view() {
    let combined = combined();
    let view = apply_filters(&combined, &FilterSpec::all());
    assert_eq!(view, combined);
}

#[test]
fn filtering_twice_equals_filtering_once() {
    let combined = combined();
    let spec = FilterSpec {
        location: Some("Lagoa".to_string()),
        ..Default::default()
    };

    let once = apply_filters(&combined, &spec);
    let twice = apply_filters(&once, &spec);
    assert_eq!(once, twice);
    assert_eq!(once.len(), 2);
}

#[test]
fn worked_example_indicator_battery() {
    let view = apply_filters(&combined(), &FilterSpec::all());
    let indicators = IndicatorCalculator::new().compute(&view);

    assert_eq!(indicators.total_records, 4);
    assert_eq!(indicators.distinct_species, 2);
    assert_eq!(indicators.distinct_locations, Some(2));
    assert_eq!(indicators.distinct_checklists, Some(3));
    assert_eq!(indicators.threatened_iucn, Some(1));
    assert_eq!(indicators.threatened_national, Some(1));
    assert_eq!(indicators.threatened_state, Some(1));
    assert_eq!(indicators.national_endemics, Some(1));
    assert_eq!(indicators.atlantic_forest_endemics, Some(1));
    assert_eq!(indicators.migratory_species, Some(1));
    assert_eq!(indicators.date_range_label(), "05/01/2025 a 12/05/2025");
    assert!(indicators.distinct_species <= indicators.total_records);
}

#[test]
fn seasonality_is_dense_and_consistent_with_totals() {
    let view = combined();
    let key = SpeciesKey::normalize("Turdus rufiventris").unwrap();

    let series = Aggregator::new().seasonality(&view, &key).unwrap();
    assert_eq!(series.counts.len(), 12);
    assert_eq!(series.counts[0], 2);
    assert_eq!(series.counts[2], 1);
    assert_eq!(series.total(), 3);

    let profile = lookup_species(&view, "Turdus rufiventris").unwrap();
    assert_eq!(profile.sighting_count, series.total());
}

#[test]
fn zero_match_location_yields_empty_view_with_zero_indicators() {
    let spec = FilterSpec {
        location: Some("Restinga".to_string()),
        ..Default::default()
    };
    let view = apply_filters(&combined(), &spec);
    assert!(view.is_empty());

    let indicators = IndicatorCalculator::new().compute(&view);
    assert_eq!(indicators.total_records, 0);
    assert_eq!(indicators.distinct_species, 0);
    assert_eq!(indicators.distinct_locations, Some(0));
    assert_eq!(indicators.threatened_iucn, Some(0));
    assert_eq!(indicators.date_range_label(), "unavailable");
}

#[test]
fn species_profile_from_filtered_view() {
    let spec = FilterSpec {
        location: Some("Lagoa".to_string()),
        ..Default::default()
    };
    let view = apply_filters(&combined(), &spec);

    let profile = lookup_species(&view, "Sporophila frontalis").unwrap();
    assert_eq!(profile.common_name.as_deref(), Some("Pixoxó"));
    assert_eq!(profile.iucn_status, "Not evaluated");
    assert_eq!(profile.national_status, "Vulnerable");
    assert_eq!(profile.sighting_count, 1);
    assert_eq!(profile.abundance, Abundance::Rare);

    // Only one Turdus sighting remains at the lagoon.
    let profile = lookup_species(&view, "turdus rufiventris").unwrap();
    assert_eq!(profile.sighting_count, 1);
}

#[test]
fn richness_sites_and_threatened_restriction() {
    let view = combined();
    let aggregator = Aggregator::new();

    let sites = aggregator.richness_by_site(&view).unwrap();
    assert_eq!(sites.len(), 2);
    let lagoon = sites.iter().find(|s| s.location == "Lagoa").unwrap();
    assert_eq!(lagoon.species_count, 2);

    // Sporophila frontalis is threatened nationally and at state level;
    // Turdus rufiventris via IUCN. Both survive the restriction.
    let threatened = aggregator.threatened_richness_by_site(&view).unwrap();
    let lagoon = threatened.iter().find(|s| s.location == "Lagoa").unwrap();
    assert_eq!(lagoon.species_count, 2);
}

#[test]
fn habitat_filter_follows_reference_side() {
    let spec = FilterSpec {
        habitat: Some("Grassland".to_string()),
        ..Default::default()
    };
    let view = apply_filters(&combined(), &spec);

    assert_eq!(view.len(), 1);
    assert_eq!(
        view.records[0].observation.scientific_name.as_deref(),
        Some("Sporophila frontalis")
    );
}
