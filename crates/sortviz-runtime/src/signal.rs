#![forbid(unsafe_code)]

//! Shared running flag with interruptible waits.
//!
//! [`RunSignal`] is the cancellation flag observed by every suspend point.
//! Waits go through a condition variable so a [`stop`](RunSignal::stop) from
//! another thread wakes a pending pause immediately instead of letting it run
//! out.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use sortviz_core::Controls;

/// Running flag shared between a controller, its drivers and any handles.
#[derive(Debug, Clone, Default)]
pub struct RunSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl RunSignal {
    /// Create an idle signal.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        let (lock, _) = &*self.inner;
        lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark a run as started.
    ///
    /// Returns `false` without changing anything if a run is already active.
    pub(crate) fn begin(&self) -> bool {
        let mut running = self.lock();
        if *running {
            return false;
        }
        *running = true;
        true
    }

    /// Clear the running flag and wake any waiter.
    ///
    /// Returns whether a run was active. Calling it while idle is a no-op.
    pub fn stop(&self) -> bool {
        let (_, cvar) = &*self.inner;
        let was_running = {
            let mut running = self.lock();
            std::mem::replace(&mut *running, false)
        };
        cvar.notify_all();
        was_running
    }

    /// Whether a run is active.
    pub fn is_running(&self) -> bool {
        *self.lock()
    }

    /// Control enablement for the current state.
    pub fn controls(&self) -> Controls {
        Controls::for_running(self.is_running())
    }

    /// Wait until the timeout elapses or the run is stopped.
    ///
    /// Returns `true` if the run is (or became) stopped, `false` on timeout.
    /// Loops over spurious wakeups until the full duration has passed.
    pub fn wait_timeout(&self, duration: Duration) -> bool {
        let (_, cvar) = &*self.inner;
        let mut running = self.lock();
        if !*running {
            return true;
        }
        if duration.is_zero() {
            return false;
        }

        let start = Instant::now();
        let mut remaining = duration;

        loop {
            let (guard, result) = cvar
                .wait_timeout(running, remaining)
                .unwrap_or_else(PoisonError::into_inner);
            running = guard;
            if !*running {
                return true;
            }
            if result.timed_out() {
                return false;
            }
            let elapsed = start.elapsed();
            if elapsed >= duration {
                return false;
            }
            remaining = duration - elapsed;
        }
    }
}
