//! Geographic primitives for zone monitoring.
//!
//! - [`coordinate`]: `Coordinate` and `LocationSample` with range validation
//! - [`distance`]: great-circle distance on a spherical Earth

pub mod coordinate;
pub mod distance;

pub use coordinate::{Coordinate, LocationSample};
pub use distance::distance;
