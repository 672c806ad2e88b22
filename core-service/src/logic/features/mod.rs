//! Features Module - Feature derivation and layout
//!
//! Turns a sensor reading plus a patient profile into the numeric vector the
//! classifier expects, in the column order the model's schema declares.

pub mod layout;
pub mod schema;
pub mod vector;


// Re-export common types
pub use layout::{FeatureName, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT};
pub use schema::{FeatureSchema, SchemaError};
pub use vector::{FeatureMap, FeatureVector};
