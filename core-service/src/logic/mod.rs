//! Logic Module
//!
//! Scoring core (features + model) and the service operations built on it
//! (ingest, views) over the JSON document store.

pub mod features;
pub mod ingest;
pub mod model;
pub mod patient;
pub mod reading;
pub mod storage;
pub mod views;
