use tracing::Level;

use crate::analyzers::{lookup_species, Aggregator, IndicatorCalculator, IndicatorSet};
use crate::cli::args::{Cli, Commands, FilterArgs, InputArgs, RankingDimension};
use crate::error::{EngineError, Result};
use crate::models::CombinedSet;
use crate::processors::{apply_filters, Reconciler};
use crate::readers::{ObservationReader, ReferenceReader};
use crate::utils::constants::UNAVAILABLE_LABEL;
use crate::utils::{ProgressReporter, SpeciesKey};

pub fn run(cli: Cli) -> Result<()> {
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Indicators {
            inputs,
            filters,
            json,
        } => {
            let view = build_view(&inputs, &filters, cli.quiet)?;
            let indicators = IndicatorCalculator::new().compute(&view);
            if json {
                println!("{}", serde_json::to_string_pretty(&indicators)?);
            } else {
                print_indicators(&indicators);
            }
        }

        Commands::Rankings {
            inputs,
            filters,
            dimension,
            json,
        } => {
            let view = build_view(&inputs, &filters, cli.quiet)?;
            let aggregator = Aggregator::new();
            let ranking = match dimension {
                RankingDimension::Family => aggregator.species_by_family(&view),
                RankingDimension::Species => aggregator.sightings_by_species(&view),
                RankingDimension::Habitat => aggregator.species_by_habitat(&view),
                RankingDimension::TrophicNiche => aggregator.species_by_trophic_niche(&view),
            };
            match ranking {
                None => println!("{UNAVAILABLE_LABEL}: the source lacks the required column"),
                Some(ranking) if json => println!("{}", serde_json::to_string_pretty(&ranking)?),
                Some(ranking) => {
                    for entry in ranking {
                        println!("{:>6}  {}", entry.value, entry.label);
                    }
                }
            }
        }

        Commands::Seasonality {
            inputs,
            filters,
            species,
        } => {
            let view = build_view(&inputs, &filters, cli.quiet)?;
            let key = SpeciesKey::normalize(&species).ok_or_else(|| {
                EngineError::SpeciesNotFound {
                    name: species.clone(),
                }
            })?;
            match Aggregator::new().seasonality(&view, &key) {
                None => println!("{UNAVAILABLE_LABEL}: the observation log has no date column"),
                Some(series) => {
                    const MONTHS: [&str; 12] = [
                        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct",
                        "Nov", "Dec",
                    ];
                    println!("Seasonality: {species}");
                    for (month, count) in MONTHS.iter().zip(series.counts) {
                        println!("{month}  {count}");
                    }
                    println!("Total: {}", series.total());
                }
            }
        }

        Commands::Richness {
            inputs,
            filters,
            threatened,
        } => {
            let view = build_view(&inputs, &filters, cli.quiet)?;
            let aggregator = Aggregator::new();
            let sites = if threatened {
                aggregator.threatened_richness_by_site(&view)
            } else {
                aggregator.richness_by_site(&view)
            };
            match sites {
                None => println!("{UNAVAILABLE_LABEL}: the source lacks the required columns"),
                Some(sites) => {
                    for site in sites {
                        println!(
                            "{:>4} species  ({:.5}, {:.5})  {}",
                            site.species_count, site.latitude, site.longitude, site.location
                        );
                    }
                }
            }
        }

        Commands::Species {
            inputs,
            filters,
            name,
        } => {
            let view = build_view(&inputs, &filters, cli.quiet)?;
            let profile = lookup_species(&view, &name)?;
            println!("Scientific name: {}", profile.scientific_name);
            println!(
                "Common name:     {}",
                profile.common_name.as_deref().unwrap_or(UNAVAILABLE_LABEL)
            );
            println!("IUCN status:     {}", profile.iucn_status);
            println!("National status: {}", profile.national_status);
            println!("Sightings:       {}", profile.sighting_count);
            println!("Abundance:       {}", profile.abundance);
        }

        Commands::Validate { inputs } => validate(&inputs, cli.quiet)?,
    }

    Ok(())
}

fn build_view(inputs: &InputArgs, filters: &FilterArgs, quiet: bool) -> Result<CombinedSet> {
    let progress = ProgressReporter::new_spinner("Loading source tables...", quiet);

    let reference = ReferenceReader::new().read(&inputs.reference)?;
    let observations = ObservationReader::new().read(&inputs.observations)?;

    progress.set_message("Reconciling...");
    let combined = Reconciler::new().reconcile(&reference, &observations)?;
    progress.finish_with_message(&format!("Combined {} observations", combined.len()));

    Ok(apply_filters(&combined, &filters.to_spec()))
}

fn validate(inputs: &InputArgs, quiet: bool) -> Result<()> {
    let progress = ProgressReporter::new_spinner("Loading source tables...", quiet);

    let reference = ReferenceReader::new().read(&inputs.reference)?;
    let observations = ObservationReader::new().read(&inputs.observations)?;
    observations.validate()?;
    progress.finish_with_message("Tables loaded");

    println!("Reference rows:   {}", reference.rows.len());
    println!("Observation rows: {}", observations.rows.len());

    let undated = observations.rows.iter().filter(|r| r.date.is_none()).count();
    if observations.columns.date {
        println!("Rows without a parseable date: {undated}");
    } else {
        println!("Date column: absent");
    }
    if !observations.columns.list_id {
        println!("Checklist column: absent");
    }
    if !reference.columns.iucn {
        println!("IUCN status column: absent");
    }
    if !reference.columns.national {
        println!("National status column: absent");
    }

    let combined = Reconciler::new().reconcile(&reference, &observations)?;
    println!(
        "Unmatched observations: {} of {}",
        combined.unmatched,
        combined.len()
    );

    Ok(())
}

fn print_indicators(indicators: &IndicatorSet) {
    let count = |value: Option<usize>| match value {
        Some(v) => v.to_string(),
        None => UNAVAILABLE_LABEL.to_string(),
    };

    println!("Total records:            {}", indicators.total_records);
    println!("Distinct species:         {}", indicators.distinct_species);
    println!("Distinct locations:       {}", count(indicators.distinct_locations));
    println!("Distinct checklists:      {}", count(indicators.distinct_checklists));
    println!("Period:                   {}", indicators.date_range_label());
    println!("Threatened (IUCN):        {}", count(indicators.threatened_iucn));
    println!("Threatened (national):    {}", count(indicators.threatened_national));
    println!("Threatened (state):       {}", count(indicators.threatened_state));
    println!("National endemics:        {}", count(indicators.national_endemics));
    println!("Atlantic Forest endemics: {}", count(indicators.atlantic_forest_endemics));
    println!("Migratory species:        {}", count(indicators.migratory_species));
}
