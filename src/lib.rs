//! Receive Unix process signals through a [mio] event source.
//!
//! [`Signals`] turns the delivery of a [`SignalSet`] into readable readiness
//! on a file descriptor, so signals can be handled in the same event loop as
//! sockets: register it with a `mio::Poll` and call [`Signals::receive`]
//! whenever it becomes readable. [`AsyncSignals`] does the same on top of
//! the tokio reactor.
//!
//! Linux and Android use `signalfd(2)`; macOS, iOS and the BSDs use
//! `kqueue(2)`.
//!
//! [mio]: https://docs.rs/mio

pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{async_signals::AsyncSignals, handler::ActionHandler};
pub use self::core::{
    signals::{send_signal, Signals},
    watch::WatchEngine,
};
pub use domain::{
    set::{SignalSet, SignalSetIter},
    signal::Signal,
};
pub use utils::error::{Result, SignalError};
