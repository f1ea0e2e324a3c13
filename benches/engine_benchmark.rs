use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use avifauna_engine::analyzers::{Aggregator, IndicatorCalculator};
use avifauna_engine::models::{
    ObservationRecord, ObservationTable, ReferenceRecord, ReferenceTable,
};
use avifauna_engine::processors::Reconciler;

fn create_test_tables(species_count: usize, sightings_each: usize) -> (ReferenceTable, ObservationTable) {
    let mut reference_rows = Vec::with_capacity(species_count);
    let mut observation_rows = Vec::with_capacity(species_count * sightings_each);

    for s in 0..species_count {
        let name = format!("Species number{s}");
        reference_rows.push(ReferenceRecord {
            scientific_name: name.clone(),
            family: Some(format!("Family{}", s % 20)),
            habitat: Some(format!("Habitat{}", s % 5)),
            trophic_niche: Some(format!("Niche{}", s % 7)),
            ..Default::default()
        });

        for i in 0..sightings_each {
            observation_rows.push(ObservationRecord {
                scientific_name: Some(name.clone()),
                location: Some(format!("Site{}", i % 10)),
                latitude: Some(-16.0 - (i % 10) as f64 * 0.01),
                longitude: Some(-39.0 - (i % 10) as f64 * 0.01),
                date: NaiveDate::from_ymd_opt(2025, (i % 12 + 1) as u32, 10),
                list_id: Some(format!("L{:04}", i)),
            });
        }
    }

    (
        ReferenceTable::new(reference_rows),
        ObservationTable::new(observation_rows),
    )
}

fn benchmark_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");
    for &species in &[50, 200, 500] {
        let (reference, observations) = create_test_tables(species, 20);
        group.bench_with_input(BenchmarkId::new("species", species), &species, |b, _| {
            b.iter(|| {
                let combined = Reconciler::new()
                    .reconcile(&reference, &observations)
                    .unwrap();
                black_box(combined.len())
            })
        });
    }
    group.finish();
}

fn benchmark_indicators(c: &mut Criterion) {
    let (reference, observations) = create_test_tables(200, 20);
    let combined = Reconciler::new()
        .reconcile(&reference, &observations)
        .unwrap();

    c.bench_function("indicators", |b| {
        b.iter(|| {
            let indicators = IndicatorCalculator::new().compute(&combined);
            black_box(indicators.distinct_species)
        })
    });
}

fn benchmark_aggregates(c: &mut Criterion) {
    let (reference, observations) = create_test_tables(200, 20);
    let combined = Reconciler::new()
        .reconcile(&reference, &observations)
        .unwrap();

    c.bench_function("richness_by_site", |b| {
        b.iter(|| {
            let sites = Aggregator::new().richness_by_site(&combined).unwrap();
            black_box(sites.len())
        })
    });
}

criterion_group!(
    benches,
    benchmark_reconcile,
    benchmark_indicators,
    benchmark_aggregates
);
criterion_main!(benches);
