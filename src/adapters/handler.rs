use crate::core::{Flow, SignalEvent, SignalHandler};
use crate::domain::model::{Action, OutputFormat};
use crate::domain::signal::Signal;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;

/// Applies the configured [`Action`] for each signal and writes events in
/// the chosen [`OutputFormat`].
pub struct ActionHandler<W: Write + Send> {
    actions: HashMap<Signal, Action>,
    format: OutputFormat,
    out: Mutex<W>,
}

impl<W: Write + Send> ActionHandler<W> {
    pub fn new<I>(actions: I, format: OutputFormat, out: W) -> Self
    where
        I: IntoIterator<Item = (Signal, Action)>,
    {
        Self {
            actions: actions.into_iter().collect(),
            format,
            out: Mutex::new(out),
        }
    }

    pub fn action_for(&self, signal: Signal) -> Action {
        self.actions
            .get(&signal)
            .copied()
            .unwrap_or_else(|| Action::default_for(signal))
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_event(&self, event: &SignalEvent) -> Result<()> {
        let line = format_event(event, self.format)?;
        // A panic mid-write only risks a torn line; keep writing.
        let mut out = self
            .out
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        writeln!(out, "{}", line)?;
        out.flush()?;
        Ok(())
    }
}

#[async_trait]
impl<W: Write + Send> SignalHandler for ActionHandler<W> {
    async fn handle(&self, event: &SignalEvent) -> Result<Flow> {
        match self.action_for(event.signal) {
            Action::Ignore => {
                tracing::debug!("Ignoring {}", event.signal);
                Ok(Flow::Continue)
            }
            Action::Log => {
                self.write_event(event)?;
                Ok(Flow::Continue)
            }
            Action::Exit { code } => {
                self.write_event(event)?;
                Ok(Flow::Stop { exit_code: code })
            }
        }
    }
}

pub fn format_event(event: &SignalEvent, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(format!(
            "{} #{} {}",
            event.received_at.to_rfc3339(),
            event.sequence,
            event.signal
        )),
        OutputFormat::Json => Ok(serde_json::to_string(event)?),
    }
}
