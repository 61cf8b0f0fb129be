use crate::domain::set::SignalSet;
use crate::domain::signal::Signal;
use std::fmt;
use std::io;
use std::mem::{size_of, MaybeUninit};
use std::os::fd::{AsRawFd, FromRawFd, OwnedFd, RawFd};
use std::ptr;

/// Signal handling backed by `signalfd(2)`.
///
/// The signals are blocked for the creating thread, which makes the kernel
/// queue them on the descriptor instead of running their handlers. Drop
/// unblocks only the signals that weren't blocked before.
pub struct Signals {
    fd: OwnedFd,
    unblock: libc::sigset_t,
}

impl Signals {
    pub fn new(signals: SignalSet) -> io::Result<Signals> {
        let mask = create_sigset(signals)?;

        let raw = unsafe { libc::signalfd(-1, &mask, libc::SFD_CLOEXEC | libc::SFD_NONBLOCK) };
        if raw == -1 {
            return Err(io::Error::last_os_error());
        }
        let fd = unsafe { OwnedFd::from_raw_fd(raw) };

        // Only after the descriptor exists, so a failure above leaves the
        // signal mask untouched.
        let previous = set_mask(libc::SIG_BLOCK, &mask)?;
        let mut unblock = create_sigset(Vec::new())?;
        for signal in signals {
            if !is_member(&previous, signal) {
                add_signal(&mut unblock, signal)?;
            }
        }

        Ok(Signals { fd, unblock })
    }

    pub fn receive(&mut self) -> io::Result<Option<Signal>> {
        let mut info = MaybeUninit::<libc::signalfd_siginfo>::uninit();
        loop {
            let n = unsafe {
                libc::read(
                    self.fd.as_raw_fd(),
                    info.as_mut_ptr().cast(),
                    size_of::<libc::signalfd_siginfo>(),
                )
            };
            if n == -1 {
                let err = io::Error::last_os_error();
                match err.kind() {
                    io::ErrorKind::WouldBlock => return Ok(None),
                    io::ErrorKind::Interrupted => continue,
                    _ => return Err(err),
                }
            }
            if n as usize != size_of::<libc::signalfd_siginfo>() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "short read from signalfd",
                ));
            }

            let info = unsafe { info.assume_init_ref() };
            match Signal::from_raw(info.ssi_signo as libc::c_int) {
                Some(signal) => return Ok(Some(signal)),
                None => {
                    tracing::debug!(signo = info.ssi_signo, "skipping unsupported signal");
                    continue;
                }
            }
        }
    }
}

impl fmt::Debug for Signals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signals").field("fd", &self.fd).finish()
    }
}

impl AsRawFd for Signals {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}

impl Drop for Signals {
    fn drop(&mut self) {
        match set_mask(libc::SIG_UNBLOCK, &self.unblock) {
            Ok(_) => tracing::debug!(fd = self.fd.as_raw_fd(), "released signals"),
            Err(err) => tracing::warn!("failed to unblock signals: {}", err),
        }
    }
}

fn create_sigset<I>(signals: I) -> io::Result<libc::sigset_t>
where
    I: IntoIterator<Item = Signal>,
{
    let mut set = MaybeUninit::<libc::sigset_t>::uninit();
    if unsafe { libc::sigemptyset(set.as_mut_ptr()) } == -1 {
        return Err(io::Error::last_os_error());
    }
    let mut set = unsafe { set.assume_init() };
    for signal in signals {
        add_signal(&mut set, signal)?;
    }
    Ok(set)
}

fn add_signal(set: &mut libc::sigset_t, signal: Signal) -> io::Result<()> {
    if unsafe { libc::sigaddset(set, signal.as_raw()) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

fn is_member(set: &libc::sigset_t, signal: Signal) -> bool {
    unsafe { libc::sigismember(set, signal.as_raw()) == 1 }
}

/// Changes the calling thread's mask and returns the previous one.
/// `pthread_sigmask` returns the error number rather than setting `errno`.
fn set_mask(how: libc::c_int, set: &libc::sigset_t) -> io::Result<libc::sigset_t> {
    let mut previous = MaybeUninit::<libc::sigset_t>::uninit();
    match unsafe { libc::pthread_sigmask(how, set, previous.as_mut_ptr()) } {
        0 => Ok(unsafe { previous.assume_init() }),
        errno => Err(io::Error::from_raw_os_error(errno)),
    }
}
