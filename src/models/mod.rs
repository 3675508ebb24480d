//! Domain models for the water quality service.

pub mod analysis;
pub mod measurement;

pub use analysis::{analysis_error_result, parse_fallback_result, AnalysisResult};
pub use measurement::{MeasurementRecord, REQUIRED_FIELDS};
