use crate::domain::model::{Action, Flow, OutputFormat, SignalEvent};
use crate::domain::signal::Signal;
use crate::domain::set::SignalSet;
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SignalSource: Send {
    /// Waits for the next signal.
    async fn next_signal(&mut self) -> Result<Signal>;
}

#[async_trait]
pub trait SignalHandler: Send + Sync {
    async fn handle(&self, event: &SignalEvent) -> Result<Flow>;
}

pub trait ConfigProvider: Send + Sync {
    fn signals(&self) -> Result<SignalSet>;
    fn output_format(&self) -> OutputFormat;
    fn actions(&self) -> Vec<(Signal, Action)>;
    fn max_signals(&self) -> Option<u64>;
}
