//! Alert dispatch: turns zone transitions into user-facing side effects.
//!
//! Side effects are plain instructions for whoever renders the alert; the
//! dispatcher itself performs no I/O. Each zone entry yields at most one
//! alert sequence, guarded by `MonitoringState::alert_fired`.

use serde::{Deserialize, Serialize};

use super::monitor::{MonitoringState, TransitionEvent};
use crate::common::constants::ALERT_VIBRATION_PATTERN;
use crate::zones::Zone;

/// An instruction for the UI, haptics or audio collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum SideEffect {
    /// Show the red zone alert for `zone`, `distance` meters from its center.
    ShowAlert { zone: Zone, distance: f64 },
    /// Vibrate with the given on/off pattern in milliseconds.
    Vibrate { pattern: Vec<u64> },
    PlaySound,
}

impl SideEffect {
    /// The standard alert sequence fired on a zone entry.
    pub fn alert_sequence(zone: &Zone, distance: f64) -> Vec<SideEffect> {
        vec![
            SideEffect::ShowAlert {
                zone: zone.clone(),
                distance,
            },
            SideEffect::Vibrate {
                pattern: ALERT_VIBRATION_PATTERN.to_vec(),
            },
            SideEffect::PlaySound,
        ]
    }
}

/// React to a transition event.
///
/// - `Entered`: fire the alert sequence once and mark the alert as fired.
///   An entry arriving while the alert is already marked fires nothing.
/// - `Exited`: clear the alert flag.
/// - `None`: nothing changes.
pub fn on_event(
    event: &TransitionEvent,
    state: &MonitoringState,
) -> (MonitoringState, Vec<SideEffect>) {
    match event {
        TransitionEvent::Entered { zone, distance } => {
            if state.alert_fired() {
                (state.clone(), Vec::new())
            } else {
                (
                    MonitoringState::alerted(zone.clone()),
                    SideEffect::alert_sequence(zone, *distance),
                )
            }
        }
        TransitionEvent::Exited { .. } => (state.without_alert(), Vec::new()),
        TransitionEvent::None => (state.clone(), Vec::new()),
    }
}
