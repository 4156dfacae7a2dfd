//! Debounced callbacks.
//!
//! [`debounce`] wraps a callback so that a burst of calls collapses into a
//! single invocation, made once the wrapper has been quiet for `wait`. The
//! invocation receives the arguments of the last call in the burst.
//!
//! Each wrapper owns at most one pending timer. Calling the wrapper cancels
//! that timer and schedules a new one; there is no explicit cancel API.
//! Dropping the last clone of a wrapper cancels whatever is still pending.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Wrap `callback` so that bursts of calls fire it once, `wait` after the
/// last call.
///
/// Timers are spawned on the Tokio runtime that is current when this is
/// called.
///
/// # Panics
///
/// Panics when called outside of a Tokio runtime, like `tokio::spawn`. Use
/// [`Debounced::on`] to pass a runtime handle explicitly.
pub fn debounce<A, F>(callback: F, wait: Duration) -> Debounced<A>
where
    A: Send + 'static,
    F: Fn(A) + Send + Sync + 'static,
{
    Debounced::on(Handle::current(), callback, wait)
}

/// A debounced callback. Cloning shares the pending timer.
pub struct Debounced<A> {
    inner: Arc<Inner<A>>,
}

struct Inner<A> {
    callback: Box<dyn Fn(A) + Send + Sync>,
    wait: Duration,
    runtime: Handle,
    pending: Mutex<Pending>,
}

#[derive(Default)]
struct Pending {
    /// Bumped on every call; a timer only fires if it still owns the latest
    /// generation when it wakes.
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl<A> Debounced<A>
where
    A: Send + 'static,
{
    /// Like [`debounce`], spawning timers on `runtime`.
    pub fn on<F>(runtime: Handle, callback: F, wait: Duration) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                callback: Box::new(callback),
                wait,
                runtime,
                pending: Mutex::new(Pending::default()),
            }),
        }
    }

    /// Restart the quiet window with `args`.
    ///
    /// Cancels the pending invocation, if any. The callback runs with `args`
    /// once `wait` elapses without another call.
    pub fn call(&self, args: A) {
        let mut pending = lock(&self.inner.pending);
        if let Some(timer) = pending.timer.take() {
            timer.abort();
        }
        pending.generation = pending.generation.wrapping_add(1);
        let generation = pending.generation;

        let wait = self.inner.wait;
        tracing::trace!(
            generation,
            wait_ms = wait.as_millis() as u64,
            "debounce rescheduled"
        );

        let weak = Arc::downgrade(&self.inner);
        let timer = self.inner.runtime.spawn(fire(weak, generation, wait, args));
        pending.timer = Some(timer);
    }

    /// Whether an invocation is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        lock(&self.inner.pending).timer.is_some()
    }

    /// Quiet period each call waits for.
    pub fn wait(&self) -> Duration {
        self.inner.wait
    }
}

async fn fire<A>(weak: Weak<Inner<A>>, generation: u64, wait: Duration, args: A) {
    tokio::time::sleep(wait).await;

    let Some(inner) = weak.upgrade() else {
        return;
    };
    {
        let mut pending = lock(&inner.pending);
        if pending.generation != generation {
            return;
        }
        pending.timer = None;
    }

    tracing::debug!(generation, "debounced callback firing");
    (inner.callback)(args);
}

fn lock(pending: &Mutex<Pending>) -> MutexGuard<'_, Pending> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<A> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A> fmt::Debug for Debounced<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pending = lock(&self.inner.pending);
        f.debug_struct("Debounced")
            .field("wait", &self.inner.wait)
            .field("generation", &pending.generation)
            .field("pending", &pending.timer.is_some())
            .finish()
    }
}

impl<A> Drop for Inner<A> {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(timer) = pending.timer.take() {
            timer.abort();
        }
    }
}
