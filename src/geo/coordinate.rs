//! Coordinates and location samples.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::constants::*;
use crate::error::LocationError;

/// A point on the Earth's surface in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that latitude is within [-90, 90] and longitude within [-180, 180].
    ///
    /// NaN and infinite values fail the range check as well.
    pub fn validate(&self) -> Result<(), LocationError> {
        let lat_ok = (MINIMUM_LATITUDE..=MAXIMUM_LATITUDE).contains(&self.latitude);
        let lon_ok = (MINIMUM_LONGITUDE..=MAXIMUM_LONGITUDE).contains(&self.longitude);
        if lat_ok && lon_ok {
            Ok(())
        } else {
            Err(LocationError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }

    /// Shift this coordinate by the given degree offsets.
    pub fn offset(&self, delta_latitude: f64, delta_longitude: f64) -> Self {
        Self::new(
            self.latitude + delta_latitude,
            self.longitude + delta_longitude,
        )
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lat: {:.6}, Lng: {:.6}", self.latitude, self.longitude)
    }
}

/// A single resolved position reading delivered by the location source.
///
/// In the JSON-lines feed `timestamp` and `accuracy` are optional; a missing
/// timestamp defaults to the moment the line was parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Reported horizontal accuracy in meters, display only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl LocationSample {
    pub fn new(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
            accuracy: None,
        }
    }

    /// Sample stamped with the current time.
    pub fn now(latitude: f64, longitude: f64) -> Self {
        Self::new(latitude, longitude, Utc::now())
    }

    pub fn at(coordinate: Coordinate, timestamp: DateTime<Utc>) -> Self {
        Self::new(coordinate.latitude, coordinate.longitude, timestamp)
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
