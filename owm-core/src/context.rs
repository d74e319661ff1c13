//! Per-call options: deadline, cancellation and observer.

use std::{fmt, future::Future, sync::Arc, time::Duration};

use tokio::sync::watch;

use crate::{
    error::TransportError,
    observer::{NoopObserver, Observer},
};

/// Cancels in-flight calls that were given a clone of this token.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self { tx: Arc::new(tx), rx }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once [`CancelToken::cancel`] has been called on any clone.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            // The sender lives as long as `self`, so this only fails if the
            // token is being torn down; never resolve in that case.
            if rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Options threaded through one call of the pipeline.
#[derive(Clone)]
pub struct CallContext {
    timeout: Option<Duration>,
    cancel: Option<CancelToken>,
    observer: Arc<dyn Observer>,
}

impl CallContext {
    pub fn new() -> Self {
        Self {
            timeout: None,
            cancel: None,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Upper bound on the transport step (request and body read).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = observer;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn observer(&self) -> &dyn Observer {
        self.observer.as_ref()
    }

    /// Drive `fut` under this context's deadline and cancellation token.
    pub(crate) async fn run<F, T>(&self, fut: F) -> Result<T, TransportError>
    where
        F: Future<Output = Result<T, TransportError>>,
    {
        let bounded = async {
            match self.timeout {
                Some(limit) => tokio::time::timeout(limit, fut)
                    .await
                    .unwrap_or_else(|_| Err(TransportError::TimedOut(limit))),
                None => fut.await,
            }
        };

        match &self.cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    () = token.cancelled() => Err(TransportError::Cancelled),
                    res = bounded => res,
                }
            }
            None => bounded.await,
        }
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CallContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallContext")
            .field("timeout", &self.timeout)
            .field("cancel", &self.cancel)
            .finish_non_exhaustive()
    }
}
