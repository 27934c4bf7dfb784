//! Domain models for unified trip records

pub mod trip;

// Re-export commonly used types
pub use trip::{TripRecord, TripType};
