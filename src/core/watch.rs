use crate::core::{Flow, SignalEvent, SignalHandler, SignalSource};
use crate::domain::model::{StopReason, WatchSummary};
use crate::utils::error::Result;
use std::collections::BTreeMap;

pub struct WatchEngine<H: SignalHandler> {
    handler: H,
    max_signals: Option<u64>,
}

impl<H: SignalHandler> WatchEngine<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler,
            max_signals: None,
        }
    }

    /// Stops the run after `max` signals. `None` keeps watching until the
    /// handler stops it.
    pub fn with_max_signals(mut self, max: Option<u64>) -> Self {
        self.max_signals = max;
        self
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub async fn run<S: SignalSource>(&self, source: &mut S) -> Result<WatchSummary> {
        let mut received = 0u64;
        let mut per_signal = BTreeMap::new();

        loop {
            let signal = source.next_signal().await?;
            received += 1;
            *per_signal.entry(signal).or_insert(0u64) += 1;

            let event = SignalEvent::new(received, signal);
            tracing::debug!(sequence = event.sequence, signal = %signal, "dispatching signal");

            if let Flow::Stop { exit_code } = self.handler.handle(&event).await? {
                tracing::info!("Stopping after {} ({} signals received)", signal, received);
                return Ok(WatchSummary {
                    received,
                    per_signal,
                    exit_code,
                    stop_reason: StopReason::Handler,
                });
            }

            if self.max_signals.is_some_and(|max| received >= max) {
                tracing::info!("Signal limit of {} reached", received);
                return Ok(WatchSummary {
                    received,
                    per_signal,
                    exit_code: 0,
                    stop_reason: StopReason::Limit,
                });
            }
        }
    }
}
