pub mod combined;
pub mod observation;
pub mod reference;

pub use combined::{ColumnCoverage, CombinedRecord, CombinedSet};
pub use observation::{ObservationColumns, ObservationRecord, ObservationTable};
pub use reference::{ConservationStatus, ReferenceColumns, ReferenceRecord, ReferenceTable};
