// Schedule Ingestion - Raw Descriptor Validation & Indexing
//
// Turns one schedule's relational arrays into ordered lookup tables:
// - hierarchy map: id → {children, parents}
// - name tables: id → qualified name, separately for systems and sets
//
// ## Architecture
// - Domain: descriptor wire types, `ScheduleIndex`, `IngestError`
// - Infrastructure: `ScheduleIndexer`

pub mod domain;
pub mod infrastructure;

pub use domain::{
    DependencyRelation, HierarchyEntry, HierarchyRelation, IngestError, IngestResult,
    ScheduleDescriptor, ScheduleIndex, SetInfo, SystemInfo,
};
pub use infrastructure::{index_schedule, ScheduleIndexer};
