//! Side-effect execution.
//!
//! The alert dispatcher only describes what should happen; an [`AlertSink`]
//! makes it happen. A sink failure is reported by the caller and never feeds
//! back into the monitoring state.

pub mod json;
pub mod terminal;

use anyhow::Result;

use crate::core::alert::SideEffect;
use crate::core::session::SafetyStatus;
use crate::zones::Zone;

pub use json::JsonSink;
pub use terminal::TerminalSink;

#[cfg_attr(test, mockall::automock)]
pub trait AlertSink {
    /// Carry out one side effect.
    fn execute(&mut self, effect: &SideEffect) -> Result<()>;

    /// The safety status changed after a zone entry or exit.
    fn status_changed(&mut self, status: &SafetyStatus) -> Result<()>;
}

/// Body text of the entry alert.
pub fn alert_message(zone: &Zone, distance: f64) -> String {
    format!(
        "You have entered {}! Distance: {:.2} meters",
        zone.name, distance
    )
}

/// Run every effect through `sink`, logging failures instead of propagating them.
pub fn execute_all(sink: &mut dyn AlertSink, effects: &[SideEffect]) {
    for effect in effects {
        if let Err(e) = sink.execute(effect) {
            log_warning!("Failed to execute {effect:?}: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;

    fn zone() -> Zone {
        Zone {
            id: 2,
            center: Coordinate::new(28.6129, 77.2085),
            radius: 60.0,
            name: "Restricted Area 2".to_string(),
        }
    }

    #[test]
    fn test_alert_message() {
        assert_eq!(
            alert_message(&zone(), 12.346),
            "You have entered Restricted Area 2! Distance: 12.35 meters"
        );
    }

    #[test]
    fn test_execute_all_continues_after_failure() {
        crate::logger::Log::set_enabled(false);
        let mut sink = MockAlertSink::new();
        let mut seq = mockall::Sequence::new();
        sink.expect_execute()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(anyhow::anyhow!("no display")));
        sink.expect_execute()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        execute_all(&mut sink, &SideEffect::alert_sequence(&zone(), 3.0));
    }
}
