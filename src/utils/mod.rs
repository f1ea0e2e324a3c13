pub mod constants;
pub mod normalize;
pub mod progress;

pub use normalize::SpeciesKey;
pub use progress::ProgressReporter;
