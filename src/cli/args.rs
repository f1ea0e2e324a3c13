use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::processors::FilterSpec;

#[derive(Parser)]
#[command(name = "avifauna-engine")]
#[command(about = "Reconciles bird observation logs with a taxonomic reference table and derives biodiversity indicators")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Suppress the progress spinner")]
    pub quiet: bool,
}

/// The two source tables every analysis starts from.
#[derive(Args)]
pub struct InputArgs {
    #[arg(short, long, help = "Reference table CSV (one row per species)")]
    pub reference: PathBuf,

    #[arg(short, long, help = "Observation log CSV (one row per sighting)")]
    pub observations: PathBuf,
}

/// Filter selection; omitted options mean "all".
#[derive(Args)]
pub struct FilterArgs {
    #[arg(long, help = "Restrict to one year")]
    pub year: Option<i32>,

    #[arg(long, help = "Restrict to one habitat category (exact match)")]
    pub habitat: Option<String>,

    #[arg(long, help = "Restrict to one location label (exact match)")]
    pub location: Option<String>,
}

impl FilterArgs {
    pub fn to_spec(&self) -> FilterSpec {
        FilterSpec {
            year: self.year,
            habitat: self.habitat.clone(),
            location: self.location.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RankingDimension {
    Family,
    Species,
    Habitat,
    TrophicNiche,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the indicator battery over the filtered view
    Indicators {
        #[command(flatten)]
        inputs: InputArgs,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, help = "Emit the indicator set as JSON")]
        json: bool,
    },

    /// Rank groups along one dimension
    Rankings {
        #[command(flatten)]
        inputs: InputArgs,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(short, long, value_enum)]
        dimension: RankingDimension,

        #[arg(long, help = "Emit the ranking as JSON")]
        json: bool,
    },

    /// Monthly sighting series for one species
    Seasonality {
        #[command(flatten)]
        inputs: InputArgs,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(short, long, help = "Scientific name of the species")]
        species: String,
    },

    /// Distinct-species richness per observation site
    Richness {
        #[command(flatten)]
        inputs: InputArgs,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, help = "Restrict to threatened species")]
        threatened: bool,
    },

    /// Profile of one species within the filtered view
    Species {
        #[command(flatten)]
        inputs: InputArgs,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(short, long, help = "Scientific name of the species")]
        name: String,
    },

    /// Check the two source tables without producing analytical output
    Validate {
        #[command(flatten)]
        inputs: InputArgs,
    },
}
