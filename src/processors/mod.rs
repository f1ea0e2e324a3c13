pub mod filters;
pub mod reconciler;

pub use filters::{apply_filters, FilterSpec};
pub use reconciler::Reconciler;
