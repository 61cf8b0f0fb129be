use crate::core::signals::Signals;
use crate::core::SignalSource;
use crate::domain::signal::Signal;
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::io::unix::AsyncFd;

/// [`Signals`] driven by the tokio reactor.
///
/// The same threading rule applies as for [`Signals`]: create the `Signals`
/// before the runtime starts its worker threads, then wrap it here from
/// inside the runtime.
#[derive(Debug)]
pub struct AsyncSignals {
    inner: AsyncFd<Signals>,
}

impl AsyncSignals {
    /// Must be called from within a tokio runtime.
    pub fn new(signals: Signals) -> Result<Self> {
        Ok(Self {
            inner: AsyncFd::new(signals)?,
        })
    }

    /// Waits until a signal arrives.
    pub async fn recv(&mut self) -> Result<Signal> {
        loop {
            let mut guard = self.inner.readable_mut().await?;
            match guard.get_inner_mut().receive()? {
                Some(signal) => return Ok(signal),
                None => guard.clear_ready(),
            }
        }
    }

    pub fn try_recv(&mut self) -> Result<Option<Signal>> {
        self.inner.get_mut().receive()
    }

    pub fn get_ref(&self) -> &Signals {
        self.inner.get_ref()
    }

    pub fn into_inner(self) -> Signals {
        self.inner.into_inner()
    }
}

#[async_trait]
impl SignalSource for AsyncSignals {
    async fn next_signal(&mut self) -> Result<Signal> {
        self.recv().await
    }
}
