//! Geofence containment state machine.
//!
//! The monitor has two states, `Outside` and `Inside(zone)`, and moves
//! between them on every location sample:
//!
//! - Zones are checked in declaration order and the first zone containing
//!   the sample wins. Overlapping zones therefore resolve to whichever zone
//!   was declared earlier, consistently across evaluations.
//! - Containment is inclusive: a sample exactly `radius` meters from the
//!   center is inside.
//! - Staying inside the same zone produces no event, so repeated samples
//!   are idempotent.
//! - Moving directly from one zone to another is a fresh entry.
//! - An exit is reported only when no zone contains the sample. Moving from
//!   zone A into an overlap of A and B keeps A when A is declared first.

use serde::{Deserialize, Serialize};

use crate::geo::LocationSample;
use crate::zones::Zone;

/// Mutable monitoring state, owned by one session.
///
/// `alert_fired` can only be true while `current_zone` is set; both reset
/// together when the user leaves the zone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonitoringState {
    current_zone: Option<Zone>,
    alert_fired: bool,
}

impl MonitoringState {
    /// Initial `Outside` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// `Inside(zone)` with the entry alert still pending.
    pub fn inside(zone: Zone) -> Self {
        Self {
            current_zone: Some(zone),
            alert_fired: false,
        }
    }

    /// `Inside(zone)` with the entry alert already dispatched.
    pub(crate) fn alerted(zone: Zone) -> Self {
        Self {
            current_zone: Some(zone),
            alert_fired: true,
        }
    }

    /// Same containment, alert flag cleared.
    pub(crate) fn without_alert(&self) -> Self {
        Self {
            current_zone: self.current_zone.clone(),
            alert_fired: false,
        }
    }

    pub fn current_zone(&self) -> Option<&Zone> {
        self.current_zone.as_ref()
    }

    pub fn alert_fired(&self) -> bool {
        self.alert_fired
    }

    pub fn is_inside(&self) -> bool {
        self.current_zone.is_some()
    }

    fn is_inside_zone(&self, zone: &Zone) -> bool {
        self.current_zone.as_ref().is_some_and(|z| z.id == zone.id)
    }
}

/// Result of evaluating one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TransitionEvent {
    /// No state change.
    None,
    /// The sample lies in `zone`, which the user was not in before.
    Entered {
        zone: Zone,
        /// Distance from the sample to the zone center, in meters
        distance: f64,
    },
    /// No zone contains the sample any more; `zone` is the one just left.
    Exited { zone: Zone },
}

impl TransitionEvent {
    pub fn is_none(&self) -> bool {
        matches!(self, TransitionEvent::None)
    }

    /// The zone this event refers to, if any.
    pub fn zone(&self) -> Option<&Zone> {
        match self {
            TransitionEvent::None => None,
            TransitionEvent::Entered { zone, .. } | TransitionEvent::Exited { zone } => Some(zone),
        }
    }
}

/// First zone in `zones` containing `sample`, with its distance.
pub fn containment<'a>(sample: &LocationSample, zones: &'a [Zone]) -> Option<(&'a Zone, f64)> {
    let point = sample.coordinate();
    zones
        .iter()
        .find_map(|zone| zone.contains(&point).map(|distance| (zone, distance)))
}

/// Advance the state machine by one sample.
///
/// Pure: returns the next state and the transition it produced without
/// touching `state`. Callers feed every sample through this, including the
/// very first fix, so a user who starts inside a zone gets an entry event
/// immediately.
pub fn evaluate(
    sample: &LocationSample,
    zones: &[Zone],
    state: &MonitoringState,
) -> (MonitoringState, TransitionEvent) {
    match containment(sample, zones) {
        Some((zone, _)) if state.is_inside_zone(zone) => (state.clone(), TransitionEvent::None),
        Some((zone, distance)) => (
            MonitoringState::inside(zone.clone()),
            TransitionEvent::Entered {
                zone: zone.clone(),
                distance,
            },
        ),
        None => match state.current_zone() {
            Some(previous) => (
                MonitoringState::new(),
                TransitionEvent::Exited {
                    zone: previous.clone(),
                },
            ),
            None => (state.clone(), TransitionEvent::None),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::constants::test_constants::*;
    use crate::geo::{Coordinate, distance};
    use crate::zones::make_zones;

    fn origin() -> Coordinate {
        Coordinate::new(TEST_ORIGIN_LATITUDE, TEST_ORIGIN_LONGITUDE)
    }

    fn sample_at(coordinate: Coordinate) -> LocationSample {
        LocationSample::now(coordinate.latitude, coordinate.longitude)
    }

    fn circle(id: u32, center: Coordinate, radius: f64) -> Zone {
        Zone {
            id,
            center,
            radius,
            name: format!("Zone {id}"),
        }
    }

    #[test]
    fn test_initial_state_is_outside() {
        let state = MonitoringState::new();
        assert!(!state.is_inside());
        assert!(!state.alert_fired());
    }

    #[test]
    fn test_outside_stays_outside() {
        let zones = make_zones(&origin());
        let (next, event) = evaluate(&sample_at(origin()), &zones, &MonitoringState::new());
        assert_eq!(event, TransitionEvent::None);
        assert_eq!(next, MonitoringState::new());
    }

    #[test]
    fn test_first_sample_inside_zone_enters() {
        let zones = make_zones(&origin());
        let sample = sample_at(zones[1].center);
        let (next, event) = evaluate(&sample, &zones, &MonitoringState::new());

        assert_eq!(
            event,
            TransitionEvent::Entered {
                zone: zones[1].clone(),
                distance: 0.0
            }
        );
        assert_eq!(next.current_zone(), Some(&zones[1]));
        assert!(!next.alert_fired());
    }

    #[test]
    fn test_repeated_sample_is_idempotent() {
        let zones = make_zones(&origin());
        let sample = sample_at(zones[0].center.offset(0.0001, 0.0));

        let (mut state, first) = evaluate(&sample, &zones, &MonitoringState::new());
        assert!(matches!(first, TransitionEvent::Entered { .. }));

        for _ in 0..5 {
            let (next, event) = evaluate(&sample, &zones, &state);
            assert_eq!(event, TransitionEvent::None);
            assert_eq!(next, state);
            state = next;
        }
    }

    #[test]
    fn test_idempotence_preserves_alert_flag() {
        let zones = make_zones(&origin());
        let state = MonitoringState::alerted(zones[0].clone());
        let (next, event) = evaluate(&sample_at(zones[0].center), &zones, &state);
        assert!(event.is_none());
        assert!(next.alert_fired());
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let center = origin();
        // 50 m due north along the meridian
        let delta = (50.0 / 6_371_000.0_f64).to_degrees();
        let edge = center.offset(delta, 0.0);
        let d = distance(&edge, &center);
        assert!((d - 50.0).abs() < 1e-6, "edge placed at {d} m");

        // The degree offset above lands at 50.00000000012554 m, a hair past a
        // literal 50.0 radius, so a 50.0 zone would report this point outside.
        let literal = vec![circle(1, center, 50.0)];
        let (_, event) = evaluate(&sample_at(edge), &literal, &MonitoringState::new());
        assert!(d > 50.0 && event.is_none());

        // Radius equal to the exact computed distance puts the sample on the boundary
        let zones = vec![circle(1, center, d)];
        let (_, event) = evaluate(&sample_at(edge), &zones, &MonitoringState::new());
        assert!(matches!(event, TransitionEvent::Entered { ref zone, .. } if zone.id == 1));

        // Just past the boundary stays outside
        let zones = vec![circle(1, center, d - 1e-6)];
        let (_, event) = evaluate(&sample_at(edge), &zones, &MonitoringState::new());
        assert!(event.is_none());
    }

    #[test]
    fn test_exit_reports_previous_zone() {
        let zones = make_zones(&origin());
        let state = MonitoringState::alerted(zones[2].clone());
        let (next, event) = evaluate(&sample_at(origin()), &zones, &state);

        assert_eq!(
            event,
            TransitionEvent::Exited {
                zone: zones[2].clone()
            }
        );
        assert!(!next.is_inside());
        assert!(!next.alert_fired());
    }

    #[test]
    fn test_zone_jump_is_fresh_entry() {
        let zones = make_zones(&origin());
        let state = MonitoringState::alerted(zones[0].clone());
        let (next, event) = evaluate(&sample_at(zones[1].center), &zones, &state);

        assert!(matches!(event, TransitionEvent::Entered { ref zone, .. } if zone.id == 2));
        assert_eq!(next.current_zone().map(|z| z.id), Some(2));
        assert!(!next.alert_fired());
    }

    #[test]
    fn test_overlap_first_declared_wins() {
        let center = origin();
        let zones = vec![
            circle(7, center.offset(0.0002, 0.0), 100.0),
            circle(3, center.offset(-0.0002, 0.0), 100.0),
        ];
        let sample = sample_at(center);

        let mut state = MonitoringState::new();
        for _ in 0..3 {
            let (next, _) = evaluate(&sample, &zones, &state);
            assert_eq!(next.current_zone().map(|z| z.id), Some(7));
            state = next;
        }
    }

    #[test]
    fn test_moving_into_overlap_keeps_earlier_zone() {
        let center = origin();
        let zones = vec![
            circle(1, center.offset(0.0002, 0.0), 100.0),
            circle(2, center.offset(-0.0002, 0.0), 100.0),
        ];

        // Only zone 1 contains this point
        let (state, event) = evaluate(
            &sample_at(center.offset(0.001, 0.0)),
            &zones,
            &MonitoringState::new(),
        );
        assert!(matches!(event, TransitionEvent::Entered { ref zone, .. } if zone.id == 1));

        // Overlap of 1 and 2: no exit, no entry into 2
        let (state, event) = evaluate(&sample_at(center), &zones, &state);
        assert!(event.is_none());
        assert_eq!(state.current_zone().map(|z| z.id), Some(1));
    }

    #[test]
    fn test_empty_zone_list() {
        let (next, event) = evaluate(&sample_at(origin()), &[], &MonitoringState::new());
        assert!(event.is_none());
        assert!(!next.is_inside());
    }

    #[test]
    fn test_event_serialization() {
        let zone = circle(1, origin(), 50.0);
        let json = serde_json::to_string(&TransitionEvent::Exited { zone }).unwrap();
        assert!(json.contains("\"event\":\"exited\""));
        assert!(json.contains("\"radius\":50.0"));
    }
}
