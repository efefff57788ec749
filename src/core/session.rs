//! Monitoring session: zones plus the single `MonitoringState`.
//!
//! A session lives as long as the application does. Zones are derived from
//! the first valid fix and never regenerated; every sample after that runs
//! through `evaluate` and then `on_event` to completion before the next one
//! is accepted. Failed samples are skipped and leave the state untouched.

use once_cell::sync::OnceCell;
use std::fmt;

use super::alert::{SideEffect, on_event};
use super::monitor::{MonitoringState, TransitionEvent, evaluate};
use crate::error::LocationError;
use crate::geo::{Coordinate, LocationSample};
use crate::zones::{Zone, make_zones};

/// What one accepted sample produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub event: TransitionEvent,
    pub effects: Vec<SideEffect>,
}

/// Coarse safety status shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SafetyStatus {
    Safe,
    InRedZone(String),
}

impl fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafetyStatus::Safe => write!(f, "You are in a safe area"),
            SafetyStatus::InRedZone(name) => write!(f, "IN RED ZONE: {name}"),
        }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    zones: OnceCell<Vec<Zone>>,
    state: MonitoringState,
    last_sample: Option<LocationSample>,
    last_error: Option<LocationError>,
    debug_enabled: bool,
}

/// Build the zones for a new session and announce them.
fn create_zones(origin: &Coordinate) -> Vec<Zone> {
    let zones = make_zones(origin);
    log_block_start!("Red zones created around initial location");
    log_indented!("Origin: {}", origin);
    for zone in &zones {
        log_indented!(
            "#{} {}: {} (radius {} m)",
            zone.id,
            zone.name,
            zone.center,
            zone.radius
        );
    }
    zones
}

impl Session {
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            ..Self::default()
        }
    }

    /// Derive zones from `origin` unless they already exist.
    ///
    /// Only the first call has any effect; later calls return the zones the
    /// session already holds.
    pub fn initialize_zones(&self, origin: &Coordinate) -> &[Zone] {
        self.zones.get_or_init(|| create_zones(origin))
    }

    /// Zones of this session, once the first fix has arrived.
    pub fn zones(&self) -> Option<&[Zone]> {
        self.zones.get().map(Vec::as_slice)
    }

    pub fn state(&self) -> &MonitoringState {
        &self.state
    }

    pub fn last_sample(&self) -> Option<&LocationSample> {
        self.last_sample.as_ref()
    }

    pub fn last_error(&self) -> Option<&LocationError> {
        self.last_error.as_ref()
    }

    pub fn status(&self) -> SafetyStatus {
        match self.state.current_zone() {
            Some(zone) => SafetyStatus::InRedZone(zone.name.clone()),
            None => SafetyStatus::Safe,
        }
    }

    /// Run one sample through the state machine and the alert dispatcher.
    ///
    /// An out-of-range sample is rejected with `InvalidCoordinate` before it
    /// can initialize zones or move the state.
    pub fn process(&mut self, sample: &LocationSample) -> Result<Outcome, LocationError> {
        let point = sample.coordinate();
        if let Err(e) = point.validate() {
            log_warning!("Skipping sample: {e}");
            self.last_error = Some(e.clone());
            return Err(e);
        }

        let zones = self.zones.get_or_init(|| create_zones(&point));

        if self.debug_enabled {
            for zone in zones {
                log_debug!(
                    "Distance to zone {}: {:.2} meters",
                    zone.name,
                    zone.distance_to(&point)
                );
            }
        }

        let (next, event) = evaluate(sample, zones, &self.state);
        let (next, effects) = on_event(&event, &next);

        self.state = next;
        self.last_sample = Some(sample.clone());
        self.last_error = None;

        Ok(Outcome { event, effects })
    }

    /// Record that the location source failed to produce a fix.
    pub fn location_unavailable(&mut self, error: LocationError) {
        log_warning!("{error}");
        self.last_error = Some(error);
    }

    /// Re-check the last accepted sample, e.g. after returning to the foreground.
    pub fn resume(&mut self) -> Option<Outcome> {
        let sample = self.last_sample.clone()?;
        self.process(&sample).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::test_constants::*;

    fn origin() -> Coordinate {
        Coordinate::new(TEST_ORIGIN_LATITUDE, TEST_ORIGIN_LONGITUDE)
    }

    fn sample_at(coordinate: Coordinate) -> LocationSample {
        LocationSample::now(coordinate.latitude, coordinate.longitude)
    }

    fn quiet_session() -> Session {
        crate::logger::Log::set_enabled(false);
        Session::new(false)
    }

    #[test]
    fn test_zones_created_from_first_fix_only() {
        let mut session = quiet_session();
        assert!(session.zones().is_none());

        session.process(&sample_at(origin())).unwrap();
        let first = session.zones().unwrap().to_vec();
        assert_eq!(first, make_zones(&origin()));

        session
            .process(&sample_at(origin().offset(0.01, 0.01)))
            .unwrap();
        assert_eq!(session.zones().unwrap(), first.as_slice());
    }

    #[test]
    fn test_initialize_zones_is_guarded() {
        let session = quiet_session();
        let first = session.initialize_zones(&origin()).to_vec();
        let second = session.initialize_zones(&origin().offset(1.0, 1.0));
        assert_eq!(second, first.as_slice());
    }

    #[test]
    fn test_invalid_sample_leaves_state_untouched() {
        let mut session = quiet_session();
        let result = session.process(&LocationSample::now(91.0, 0.0));
        assert!(matches!(
            result,
            Err(LocationError::InvalidCoordinate { .. })
        ));
        assert!(session.zones().is_none());
        assert!(session.last_sample().is_none());
        assert_eq!(session.state(), &MonitoringState::new());
    }

    #[test]
    fn test_invalid_sample_inside_zone_keeps_containment() {
        let mut session = quiet_session();
        session.process(&sample_at(origin())).unwrap();
        let zone = session.zones().unwrap()[0].clone();
        session.process(&sample_at(zone.center)).unwrap();
        let before = session.state().clone();

        assert!(session.process(&LocationSample::now(0.0, 200.0)).is_err());
        assert_eq!(session.state(), &before);
        assert!(session.state().alert_fired());
    }

    #[test]
    fn test_first_fix_inside_zone_alerts_immediately() {
        // The first fix creates zones around itself, so it can never be inside
        // one; a pre-initialized session models a fix landing inside right away
        let mut session = quiet_session();
        let zone = session.initialize_zones(&origin())[2].clone();

        let outcome = session.process(&sample_at(zone.center)).unwrap();
        assert!(matches!(outcome.event, TransitionEvent::Entered { .. }));
        assert_eq!(outcome.effects.len(), 3);
    }

    #[test]
    fn test_location_unavailable_keeps_state() {
        let mut session = quiet_session();
        let zone = session.initialize_zones(&origin())[0].clone();
        session.process(&sample_at(zone.center)).unwrap();
        let before = session.state().clone();

        session.location_unavailable(LocationError::unavailable("timeout"));
        assert_eq!(session.state(), &before);
        assert_eq!(
            session.last_error(),
            Some(&LocationError::unavailable("timeout"))
        );
    }

    #[test]
    fn test_resume_re_evaluates_last_sample() {
        let mut session = quiet_session();
        assert!(session.resume().is_none());

        let zone = session.initialize_zones(&origin())[0].clone();
        session.process(&sample_at(zone.center)).unwrap();

        let outcome = session.resume().unwrap();
        assert!(outcome.event.is_none());
        assert!(outcome.effects.is_empty());
    }

    #[test]
    fn test_status_follows_containment() {
        let mut session = quiet_session();
        assert_eq!(session.status(), SafetyStatus::Safe);

        let zone = session.initialize_zones(&origin())[1].clone();
        session.process(&sample_at(zone.center)).unwrap();
        assert_eq!(
            session.status(),
            SafetyStatus::InRedZone("Restricted Area 2".to_string())
        );
        assert_eq!(session.status().to_string(), "IN RED ZONE: Restricted Area 2");

        session.process(&sample_at(origin())).unwrap();
        assert_eq!(session.status().to_string(), "You are in a safe area");
    }
}
