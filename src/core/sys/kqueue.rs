use crate::domain::set::SignalSet;
use crate::domain::signal::Signal;
use std::fmt;
use std::io;
use std::mem;
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd, RawFd};
use std::ptr;

/// Signal handling backed by a `kqueue(2)` with one `EVFILT_SIGNAL` filter
/// per signal.
///
/// kqueue records signal delivery attempts even for ignored signals, so the
/// signals are set to `SIG_IGN` to stop their default action from running.
/// The previous dispositions are put back on drop.
pub struct Signals {
    kq: OwnedFd,
    previous: Vec<(libc::c_int, libc::sigaction)>,
}

impl Signals {
    pub fn new(signals: SignalSet) -> io::Result<Signals> {
        let raw = unsafe { libc::kqueue() };
        if raw == -1 {
            return Err(io::Error::last_os_error());
        }
        let kq = unsafe { OwnedFd::from_raw_fd(raw) };
        if unsafe { libc::fcntl(kq.as_raw_fd(), libc::F_SETFD, libc::FD_CLOEXEC) } == -1 {
            return Err(io::Error::last_os_error());
        }

        let changes: Vec<libc::kevent> = signals
            .into_iter()
            .map(|signal| {
                let mut event: libc::kevent = unsafe { mem::zeroed() };
                event.ident = signal.as_raw() as _;
                event.filter = libc::EVFILT_SIGNAL as _;
                event.flags = libc::EV_ADD as _;
                event
            })
            .collect();
        let n = unsafe {
            libc::kevent(
                kq.as_raw_fd(),
                changes.as_ptr(),
                changes.len() as libc::c_int,
                ptr::null_mut(),
                0,
                ptr::null(),
            )
        };
        if n == -1 {
            return Err(io::Error::last_os_error());
        }

        let raw_signals: Vec<libc::c_int> = signals.into_iter().map(Signal::as_raw).collect();
        let previous = ignore_signals(&raw_signals)?;

        Ok(Signals { kq, previous })
    }

    pub fn receive(&mut self) -> io::Result<Option<Signal>> {
        let mut event: libc::kevent = unsafe { mem::zeroed() };
        let timeout = libc::timespec {
            tv_sec: 0,
            tv_nsec: 0,
        };
        loop {
            let n = unsafe {
                libc::kevent(
                    self.kq.as_raw_fd(),
                    ptr::null(),
                    0,
                    &mut event,
                    1,
                    &timeout,
                )
            };
            match n {
                -1 => {
                    let err = io::Error::last_os_error();
                    if err.kind() == io::ErrorKind::Interrupted {
                        continue;
                    }
                    return Err(err);
                }
                0 => return Ok(None),
                _ => {
                    if event.filter == libc::EVFILT_SIGNAL as _ {
                        if let Some(signal) = Signal::from_raw(event.ident as libc::c_int) {
                            return Ok(Some(signal));
                        }
                    }
                    tracing::debug!(ident = event.ident as u64, "skipping unexpected kevent");
                }
            }
        }
    }
}

impl fmt::Debug for Signals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let signals: Vec<libc::c_int> = self.previous.iter().map(|(raw, _)| *raw).collect();
        f.debug_struct("Signals")
            .field("kq", &self.kq)
            .field("signals", &signals)
            .finish()
    }
}

impl AsRawFd for Signals {
    fn as_raw_fd(&self) -> RawFd {
        self.kq.as_raw_fd()
    }
}

impl Drop for Signals {
    fn drop(&mut self) {
        match restore_signals(&self.previous) {
            Ok(()) => tracing::debug!(kq = self.kq.as_raw_fd(), "restored signal handlers"),
            Err(err) => tracing::warn!("failed to restore signal handlers: {}", err),
        }
    }
}

/// Sets every signal to `SIG_IGN`, returning the dispositions it replaced.
/// On failure the signals changed so far are restored first.
fn ignore_signals(signals: &[libc::c_int]) -> io::Result<Vec<(libc::c_int, libc::sigaction)>> {
    let mut ignore: libc::sigaction = unsafe { mem::zeroed() };
    ignore.sa_sigaction = libc::SIG_IGN;
    if unsafe { libc::sigemptyset(&mut ignore.sa_mask) } == -1 {
        return Err(io::Error::last_os_error());
    }

    let mut previous = Vec::with_capacity(signals.len());
    for &raw in signals {
        let mut old: libc::sigaction = unsafe { mem::zeroed() };
        if unsafe { libc::sigaction(raw, &ignore, &mut old) } == -1 {
            let err = io::Error::last_os_error();
            if let Err(restore_err) = restore_signals(&previous) {
                tracing::warn!("failed to roll back signal handlers: {}", restore_err);
            }
            return Err(err);
        }
        previous.push((raw, old));
    }
    Ok(previous)
}

fn restore_signals(previous: &[(libc::c_int, libc::sigaction)]) -> io::Result<()> {
    let mut result = Ok(());
    for (raw, action) in previous.iter().rev() {
        if unsafe { libc::sigaction(*raw, action, ptr::null_mut()) } == -1 {
            result = Err(io::Error::last_os_error());
        }
    }
    result
}
