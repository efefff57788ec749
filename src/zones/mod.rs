//! Red zone model and generation.
//!
//! Zones are circles derived once per session from the first successful
//! location fix. They are never mutated afterwards; the monitor only reads
//! them, in declaration order.

use serde::{Deserialize, Serialize};

use crate::common::constants::RED_ZONE_LAYOUT;
use crate::geo::{Coordinate, distance};

/// A circular red zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    /// Unique within a session
    pub id: u32,
    pub center: Coordinate,
    /// Radius in meters, always positive
    pub radius: f64,
    pub name: String,
}

impl Zone {
    /// Distance in meters from `point` to the zone center.
    pub fn distance_to(&self, point: &Coordinate) -> f64 {
        distance(point, &self.center)
    }

    /// Containment check, inclusive of the boundary.
    ///
    /// Returns the distance to the center when `point` lies inside.
    pub fn contains(&self, point: &Coordinate) -> Option<f64> {
        let d = self.distance_to(point);
        (d <= self.radius).then_some(d)
    }
}

/// Derive the session's red zones from the first location fix.
///
/// Always yields the three zones of [`RED_ZONE_LAYOUT`], in layout order,
/// at fixed offsets from `origin`. Pure and deterministic: the same origin
/// produces the same zones bit for bit. Guarding against regeneration is the
/// caller's job (see [`crate::core::session::Session::initialize_zones`]).
pub fn make_zones(origin: &Coordinate) -> Vec<Zone> {
    RED_ZONE_LAYOUT
        .iter()
        .map(|&(id, delta_latitude, delta_longitude, radius, name)| Zone {
            id,
            center: origin.offset(delta_latitude, delta_longitude),
            radius,
            name: name.to_string(),
        })
        .collect()
}
