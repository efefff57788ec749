//! Implementation of the zones command.
//!
//! Prints the red zones that a monitoring run would generate if its first fix
//! landed on the given origin.

use anyhow::{Context, Result};

use crate::geo::Coordinate;
use crate::zones::{Zone, make_zones};

/// Validate the origin and derive its zones.
pub fn zones_around(latitude: f64, longitude: f64) -> Result<Vec<Zone>> {
    let origin = Coordinate::new(latitude, longitude);
    origin.validate().context("Invalid origin")?;
    Ok(make_zones(&origin))
}

/// Handle the zones command
pub fn handle_zones_command(latitude: f64, longitude: f64) -> Result<()> {
    let zones = zones_around(latitude, longitude)?;

    log_version!();
    log_block_start!("Red zones around {}", Coordinate::new(latitude, longitude));
    for zone in &zones {
        log_pipe!();
        log_decorated!("#{} {}", zone.id, zone.name);
        log_indented!("Center: {}", zone.center);
        log_indented!("Radius: {} m", zone.radius);
    }
    log_end!();
    Ok(())
}
