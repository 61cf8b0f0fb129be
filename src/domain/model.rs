use crate::domain::signal::Signal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One received signal, numbered in the order it was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalEvent {
    pub sequence: u64,
    pub signal: Signal,
    pub received_at: DateTime<Utc>,
}

impl SignalEvent {
    pub fn new(sequence: u64, signal: Signal) -> Self {
        Self {
            sequence,
            signal,
            received_at: Utc::now(),
        }
    }
}

/// What the watcher does when a signal arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Log,
    Ignore,
    Exit { code: i32 },
}

impl Action {
    /// Fallback for signals without a configured rule.
    pub fn default_for(signal: Signal) -> Action {
        match signal {
            Signal::Interrupt | Signal::Quit | Signal::Terminate => Action::Exit {
                code: 128 + signal.as_raw(),
            },
            Signal::User1 | Signal::User2 => Action::Log,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop { exit_code: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A handler returned [`Flow::Stop`].
    Handler,
    /// The configured signal limit was reached.
    Limit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchSummary {
    pub received: u64,
    pub per_signal: BTreeMap<Signal, u64>,
    pub exit_code: i32,
    pub stop_reason: StopReason,
}
