//! Implementation of the distance command.

use anyhow::{Context, Result};

use crate::geo::{Coordinate, distance};

/// Great-circle distance in meters between two validated points.
pub fn distance_between(from: (f64, f64), to: (f64, f64)) -> Result<f64> {
    let a = Coordinate::new(from.0, from.1);
    let b = Coordinate::new(to.0, to.1);
    a.validate().context("Invalid first point")?;
    b.validate().context("Invalid second point")?;
    Ok(distance(&a, &b))
}

/// Handle the distance command
pub fn handle_distance_command(from: (f64, f64), to: (f64, f64)) -> Result<()> {
    let meters = distance_between(from, to)?;

    log_version!();
    log_block_start!(
        "From {} to {}",
        Coordinate::new(from.0, from.1),
        Coordinate::new(to.0, to.1)
    );
    log_indented!("Distance: {:.2} meters", meters);
    log_end!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_between_cities() {
        let meters = distance_between((28.6139, 77.2090), (19.0760, 72.8777)).unwrap();
        assert!((meters - 1_148_094.0).abs() < 1_000.0, "got {meters}");
    }

    #[test]
    fn test_distance_rejects_invalid_longitude() {
        let err = distance_between((28.6139, 77.2090), (19.0760, 181.0)).unwrap_err();
        assert!(err.to_string().contains("second point"));
    }
}
