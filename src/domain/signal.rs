use crate::utils::error::SignalError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A process signal that can be handled by [`Signals`].
///
/// [`Signals`]: crate::Signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Signal {
    /// `SIGINT`, sent when the user presses Ctrl+C in a terminal.
    Interrupt,
    /// `SIGQUIT`, usually Ctrl+\. The process should exit and may dump core.
    Quit,
    /// `SIGTERM`, a polite request to terminate.
    Terminate,
    /// `SIGUSR1`, user-defined.
    User1,
    /// `SIGUSR2`, user-defined.
    User2,
}

impl Signal {
    pub(crate) const ALL: [Signal; 5] = [
        Signal::Interrupt,
        Signal::Quit,
        Signal::Terminate,
        Signal::User1,
        Signal::User2,
    ];

    /// The raw signal number on this platform.
    pub fn as_raw(self) -> libc::c_int {
        match self {
            Signal::Interrupt => libc::SIGINT,
            Signal::Quit => libc::SIGQUIT,
            Signal::Terminate => libc::SIGTERM,
            Signal::User1 => libc::SIGUSR1,
            Signal::User2 => libc::SIGUSR2,
        }
    }

    /// Maps a raw signal number back, `None` for signals this crate doesn't handle.
    pub fn from_raw(raw: libc::c_int) -> Option<Signal> {
        match raw {
            libc::SIGINT => Some(Signal::Interrupt),
            libc::SIGQUIT => Some(Signal::Quit),
            libc::SIGTERM => Some(Signal::Terminate),
            libc::SIGUSR1 => Some(Signal::User1),
            libc::SIGUSR2 => Some(Signal::User2),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Signal::Interrupt => "SIGINT",
            Signal::Quit => "SIGQUIT",
            Signal::Terminate => "SIGTERM",
            Signal::User1 => "SIGUSR1",
            Signal::User2 => "SIGUSR2",
        }
    }

    pub(crate) fn bit(self) -> u8 {
        match self {
            Signal::Interrupt => 1 << 0,
            Signal::Quit => 1 << 1,
            Signal::Terminate => 1 << 2,
            Signal::User1 => 1 << 3,
            Signal::User2 => 1 << 4,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Signal {
    type Err = SignalError;

    /// Accepts `SIGINT`, `INT` or `interrupt`, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let short = upper.strip_prefix("SIG").unwrap_or(&upper);
        match short {
            "INT" | "INTERRUPT" => Ok(Signal::Interrupt),
            "QUIT" => Ok(Signal::Quit),
            "TERM" | "TERMINATE" => Ok(Signal::Terminate),
            "USR1" | "USER1" => Ok(Signal::User1),
            "USR2" | "USER2" => Ok(Signal::User2),
            _ => Err(SignalError::UnknownSignalError {
                name: s.to_string(),
            }),
        }
    }
}

impl Serialize for Signal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Signal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}
