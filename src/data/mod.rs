//! Input data: synthetic demand observations and neighborhood projections.

/// Neighborhood projection table loaded from CSV.
pub mod neighborhood;
/// Synthetic daily demand generator.
pub mod synth;

pub use neighborhood::{NeighborhoodProjection, load_neighborhoods};
pub use synth::{DemandSynthesizer, Observation};
