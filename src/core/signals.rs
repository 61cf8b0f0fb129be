use crate::core::sys;
use crate::domain::set::SignalSet;
use crate::domain::signal::Signal;
use crate::utils::error::Result;
use mio::event::Source;
use mio::unix::SourceFd;
use mio::{Interest, Registry, Token};
use std::io;
use std::os::fd::{AsRawFd, RawFd};

/// Receives process signals as readiness events.
///
/// Signals in the set are no longer delivered to their handlers (or default
/// actions); instead they queue up and become readable here. Register with a
/// [`mio::Poll`] for [`Interest::READABLE`] and call [`Signals::receive`]
/// until it returns `Ok(None)` after every event.
///
/// # Threads
///
/// On Linux the signals are blocked only for the thread calling
/// [`Signals::new`], and threads inherit the mask of the thread that spawns
/// them. Create `Signals` on the main thread before spawning any other thread
/// (including async runtime workers), otherwise a signal may be delivered to
/// a thread that doesn't block it and run its default action.
///
/// # Examples
///
/// ```no_run
/// use mio::{Events, Interest, Poll, Token};
/// use mio_signals::{Signal, SignalSet, Signals};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut poll = Poll::new()?;
/// let mut events = Events::with_capacity(8);
///
/// let mut signals = Signals::new(SignalSet::all())?;
/// poll.registry().register(&mut signals, Token(0), Interest::READABLE)?;
///
/// loop {
///     poll.poll(&mut events, None)?;
///     for _ in events.iter() {
///         while let Some(signal) = signals.receive()? {
///             if signal == Signal::Terminate {
///                 return Ok(());
///             }
///         }
///     }
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct Signals {
    inner: sys::Signals,
    set: SignalSet,
}

impl Signals {
    /// Starts handling `signals`.
    pub fn new(signals: SignalSet) -> Result<Signals> {
        let inner = sys::Signals::new(signals)?;
        tracing::debug!(signals = ?signals, fd = inner.as_raw_fd(), "handling signals");
        Ok(Signals {
            inner,
            set: signals,
        })
    }

    /// The signals handled by this instance.
    pub fn signals(&self) -> SignalSet {
        self.set
    }

    /// Receives the next pending signal, `Ok(None)` if none is pending.
    pub fn receive(&mut self) -> Result<Option<Signal>> {
        let signal = self.inner.receive()?;
        if let Some(signal) = signal {
            tracing::debug!(signal = %signal, "received signal");
        }
        Ok(signal)
    }
}

impl Source for Signals {
    fn register(&mut self, registry: &Registry, token: Token, interests: Interest) -> io::Result<()> {
        SourceFd(&self.inner.as_raw_fd()).register(registry, token, interests)
    }

    fn reregister(
        &mut self,
        registry: &Registry,
        token: Token,
        interests: Interest,
    ) -> io::Result<()> {
        SourceFd(&self.inner.as_raw_fd()).reregister(registry, token, interests)
    }

    fn deregister(&mut self, registry: &Registry) -> io::Result<()> {
        SourceFd(&self.inner.as_raw_fd()).deregister(registry)
    }
}

impl AsRawFd for Signals {
    fn as_raw_fd(&self) -> RawFd {
        self.inner.as_raw_fd()
    }
}

/// Sends `signal` to the process with id `pid`.
pub fn send_signal(pid: u32, signal: Signal) -> Result<()> {
    tracing::debug!(pid, signal = %signal, "sending signal");
    sys::send_signal(pid, signal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mio::{Events, Poll};
    use std::time::Duration;

    #[test]
    fn test_nothing_pending() {
        let mut signals = Signals::new(Signal::User2.into()).unwrap();
        assert_eq!(signals.signals(), SignalSet::from(Signal::User2));
        assert_eq!(signals.receive().unwrap(), None);
    }

    #[test]
    fn test_register_with_poll() {
        let mut poll = Poll::new().unwrap();
        let mut events = Events::with_capacity(4);
        let mut signals = Signals::new(Signal::User1 | Signal::User2).unwrap();

        poll.registry()
            .register(&mut signals, Token(7), Interest::READABLE)
            .unwrap();
        poll.poll(&mut events, Some(Duration::from_millis(10)))
            .unwrap();
        assert!(events.is_empty());

        poll.registry().deregister(&mut signals).unwrap();
    }

    #[test]
    fn test_send_signal_to_missing_process() {
        // Pid values are capped well below this on every supported platform.
        let err = send_signal(i32::MAX as u32, Signal::User1).unwrap_err();
        match err {
            crate::SignalError::IoError(e) => assert_eq!(e.raw_os_error(), Some(libc::ESRCH)),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_send_signal_rejects_group_pids() {
        // 0 is the caller's group; values past i32::MAX would wrap to
        // negative group ids, u32::MAX to -1 (every process).
        for pid in [0, i32::MAX as u32 + 1, u32::MAX - 4096, u32::MAX] {
            match send_signal(pid, Signal::Terminate).unwrap_err() {
                crate::SignalError::IoError(e) => {
                    assert_eq!(e.kind(), io::ErrorKind::InvalidInput, "pid {}", pid)
                }
                other => panic!("unexpected error for pid {}: {:?}", pid, other),
            }
        }
    }
}
