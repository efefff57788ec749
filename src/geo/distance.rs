//! Great-circle distance using the haversine formula.

use super::Coordinate;
use crate::common::constants::EARTH_RADIUS_METERS;

/// Surface distance in meters between two coordinates on a spherical Earth
/// of radius [`EARTH_RADIUS_METERS`].
///
/// Symmetric, zero for identical points and monotonically increasing with
/// the angular separation of `a` and `b`.
pub fn distance(a: &Coordinate, b: &Coordinate) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let delta_phi = (b.latitude - a.latitude).to_radians();
    let delta_lambda = (b.longitude - a.longitude).to_radians();

    let h = (delta_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (delta_lambda / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1.0 for antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_METERS * c
}
