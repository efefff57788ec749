//! JSON-lines sink for external UI, haptics and audio collaborators.
//!
//! Every side effect becomes one line:
//!
//! ```text
//! {"effect":"show_alert","zone":{...},"distance":12.3}
//! {"effect":"vibrate","pattern":[0,1000,500,1000,500,1000]}
//! {"effect":"play_sound"}
//! {"status":"IN RED ZONE: Restricted Area 1"}
//! ```

use anyhow::{Context, Result};
use std::io::Write;

use super::AlertSink;
use crate::core::alert::SideEffect;
use crate::core::session::SafetyStatus;

pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, value: &impl serde::Serialize) -> Result<()> {
        serde_json::to_writer(&mut self.writer, value).context("Failed to encode side effect")?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> AlertSink for JsonSink<W> {
    fn execute(&mut self, effect: &SideEffect) -> Result<()> {
        self.write_line(effect)
    }

    fn status_changed(&mut self, status: &SafetyStatus) -> Result<()> {
        self.write_line(&serde_json::json!({ "status": status.to_string() }))
    }
}
