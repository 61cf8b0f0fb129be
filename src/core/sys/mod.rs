#[cfg(any(target_os = "linux", target_os = "android"))]
mod signalfd;
#[cfg(any(target_os = "linux", target_os = "android"))]
pub use self::signalfd::Signals;

#[cfg(any(
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "ios",
    target_os = "macos",
    target_os = "netbsd",
    target_os = "openbsd",
))]
mod kqueue;
#[cfg(any(
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "ios",
    target_os = "macos",
    target_os = "netbsd",
    target_os = "openbsd",
))]
pub use self::kqueue::Signals;

#[cfg(not(any(
    target_os = "android",
    target_os = "dragonfly",
    target_os = "freebsd",
    target_os = "ios",
    target_os = "linux",
    target_os = "macos",
    target_os = "netbsd",
    target_os = "openbsd",
)))]
compile_error!("mio-signals supports Linux, Android, macOS, iOS and the BSDs only");

use crate::domain::signal::Signal;
use std::io;

/// Only positive pids are accepted; `kill(2)` treats zero and negative
/// values as process groups.
pub fn send_signal(pid: u32, signal: Signal) -> io::Result<()> {
    let pid = match libc::pid_t::try_from(pid) {
        Ok(pid) if pid > 0 => pid,
        _ => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid process id {}", pid),
            ))
        }
    };
    if unsafe { libc::kill(pid, signal.as_raw()) } == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}
