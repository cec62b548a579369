// Schedule Ingestion Infrastructure

pub mod indexer;

pub use indexer::{index_schedule, ScheduleIndexer};
