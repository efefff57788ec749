//! Terminal sink: renders alerts through the structured logger.

use anyhow::Result;

use super::{AlertSink, alert_message};
use crate::common::constants::ALERT_TITLE;
use crate::config::Config;
use crate::core::alert::SideEffect;
use crate::core::session::SafetyStatus;

pub struct TerminalSink {
    vibration_cancel_ms: u64,
    alert_sound: String,
}

impl TerminalSink {
    pub fn new(config: &Config) -> Self {
        Self {
            vibration_cancel_ms: config.vibration_cancel_ms(),
            alert_sound: config.alert_sound().to_string(),
        }
    }
}

impl AlertSink for TerminalSink {
    fn execute(&mut self, effect: &SideEffect) -> Result<()> {
        match effect {
            SideEffect::ShowAlert { zone, distance } => {
                log_block_start!("🚨 {ALERT_TITLE} 🚨");
                log_indented!("{}", alert_message(zone, *distance));
            }
            SideEffect::Vibrate { pattern } => {
                let steps: Vec<String> = pattern.iter().map(u64::to_string).collect();
                log_decorated!(
                    "Vibrating [{}] ms, cancelled after {} ms",
                    steps.join(", "),
                    self.vibration_cancel_ms
                );
            }
            SideEffect::PlaySound => {
                log_decorated!("Playing {}", self.alert_sound);
            }
        }
        Ok(())
    }

    fn status_changed(&mut self, status: &SafetyStatus) -> Result<()> {
        match status {
            SafetyStatus::Safe => log_info!("✅ {status}"),
            SafetyStatus::InRedZone(_) => log_critical!("{status}"),
        }
        Ok(())
    }
}
