use crate::domain::signal::Signal;
use std::fmt;
use std::iter::FusedIterator;
use std::num::NonZeroU8;
use std::ops::BitOr;

/// A non-empty set of [`Signal`]s.
///
/// Built from a single signal with `From`, or by combining signals and sets
/// with `|`:
///
/// ```
/// use mio_signals::{Signal, SignalSet};
///
/// let set = Signal::Interrupt | Signal::Terminate;
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(Signal::Terminate));
/// assert!(!set.contains(Signal::Quit));
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct SignalSet(NonZeroU8);

const ALL_BITS: u8 = 0b1_1111;

impl SignalSet {
    /// Every signal this crate supports.
    pub fn all() -> SignalSet {
        SignalSet(NonZeroU8::new(ALL_BITS).unwrap_or(NonZeroU8::MIN))
    }

    /// Builds a set from an iterator, `None` if it yields nothing.
    pub fn from_signals<I>(signals: I) -> Option<SignalSet>
    where
        I: IntoIterator<Item = Signal>,
    {
        let bits = signals.into_iter().fold(0, |bits, s| bits | s.bit());
        NonZeroU8::new(bits).map(SignalSet)
    }

    /// Number of signals in the set, always at least one.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(self) -> usize {
        self.0.get().count_ones() as usize
    }

    /// Whether every signal in `other` is also in `self`.
    pub fn contains<S>(self, other: S) -> bool
    where
        S: Into<SignalSet>,
    {
        let other = other.into().0.get();
        self.0.get() & other == other
    }
}

impl From<Signal> for SignalSet {
    fn from(signal: Signal) -> Self {
        // Every signal maps to a single non-zero bit.
        SignalSet(NonZeroU8::new(signal.bit()).unwrap_or(NonZeroU8::MIN))
    }
}

impl BitOr for Signal {
    type Output = SignalSet;

    fn bitor(self, rhs: Self) -> SignalSet {
        SignalSet::from(self) | rhs
    }
}

impl BitOr<SignalSet> for Signal {
    type Output = SignalSet;

    fn bitor(self, rhs: SignalSet) -> SignalSet {
        rhs | self
    }
}

impl BitOr<Signal> for SignalSet {
    type Output = SignalSet;

    fn bitor(self, rhs: Signal) -> SignalSet {
        self | SignalSet::from(rhs)
    }
}

impl BitOr for SignalSet {
    type Output = SignalSet;

    fn bitor(self, rhs: SignalSet) -> SignalSet {
        SignalSet(self.0 | rhs.0)
    }
}

impl IntoIterator for SignalSet {
    type Item = Signal;
    type IntoIter = SignalSetIter;

    fn into_iter(self) -> SignalSetIter {
        SignalSetIter(self.0.get())
    }
}

impl fmt::Debug for SignalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&(*self).into_iter(), f)
    }
}

/// Iterator over the signals of a [`SignalSet`], in `Interrupt`, `Quit`,
/// `Terminate`, `User1`, `User2` order.
#[derive(Clone)]
pub struct SignalSetIter(u8);

impl Iterator for SignalSetIter {
    type Item = Signal;

    fn next(&mut self) -> Option<Signal> {
        let signal = Signal::ALL.into_iter().find(|s| self.0 & s.bit() != 0)?;
        self.0 &= !signal.bit();
        Some(signal)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len();
        (len, Some(len))
    }

    fn count(self) -> usize {
        self.len()
    }
}

impl ExactSizeIterator for SignalSetIter {
    fn len(&self) -> usize {
        self.0.count_ones() as usize
    }
}

impl FusedIterator for SignalSetIter {}

impl fmt::Debug for SignalSetIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, signal) in self.clone().enumerate() {
            if i != 0 {
                f.write_str("|")?;
            }
            fmt::Debug::fmt(&signal, f)?;
        }
        Ok(())
    }
}
