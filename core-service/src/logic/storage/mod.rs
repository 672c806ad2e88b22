//! Storage Module - flat-file JSON documents
//!
//! Patient profile, reading log, attack log and alert log, each one JSON
//! file in the data directory.

pub mod records;
pub mod store;


pub use records::{parse_timestamp, timestamp_now, AlertRecord, AttackRecord, ReadingRecord};
pub use store::{Document, JsonStore, StorageError};
