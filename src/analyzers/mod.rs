pub mod aggregates;
pub mod indicators;
pub mod species;

pub use aggregates::{Aggregator, MonthlySeries, RankedEntry, RichnessSite};
pub use indicators::{DateRange, IndicatorCalculator, IndicatorSet};
pub use species::{lookup_species, Abundance, SpeciesProfile};
