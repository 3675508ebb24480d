//! HTTP handlers for the water quality service.

pub mod analyze;
pub mod health;

pub use analyze::analyze_water;
pub use health::{health_check, index};
