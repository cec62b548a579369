//! Snapshot decoding
//!
//! Maps the schedule-list payload pushed by the inspected application onto
//! [`ScheduleDescriptor`](crate::features::schedule_ingest::ScheduleDescriptor)s.
//! Transport is not handled here; callers hand over an already received
//! JSON text.

pub mod decoder;

pub use decoder::{decode_schedules, decode_schedules_value, DecodeError, DecodeResult};
