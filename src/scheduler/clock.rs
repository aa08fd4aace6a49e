use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::foundation::error::ReelResult;

/// Cancellation token shared between the scheduler, signal handlers and tests.
#[derive(Clone, Debug, Default)]
pub struct Shutdown {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl Shutdown {
    /// Untriggered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request shutdown and wake every waiter.
    pub fn trigger(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
    }

    /// `true` once [`Shutdown::trigger`] has been called.
    pub fn is_triggered(&self) -> bool {
        *self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block for up to `timeout`. Returns `true` if shutdown was requested.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = cvar
            .wait_timeout_while(guard, timeout, |triggered| !*triggered)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

/// Source of wall-clock time and of the single suspension point.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Suspend until `deadline`. Returns `false` if `shutdown` fired first.
    fn sleep_until(&self, deadline: DateTime<Utc>, shutdown: &Shutdown) -> bool;
}

/// Real time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sleep_until(&self, deadline: DateTime<Utc>, shutdown: &Shutdown) -> bool {
        loop {
            if shutdown.is_triggered() {
                return false;
            }
            let remaining = deadline - Utc::now();
            let Ok(remaining) = remaining.to_std() else {
                return true;
            };
            if remaining.is_zero() {
                return true;
            }
            // Re-read the wall clock at least once a minute so suspend/resume and clock
            // adjustments do not overshoot the deadline.
            if shutdown.wait_timeout(remaining.min(Duration::from_secs(60))) {
                return false;
            }
        }
    }
}

/// Hand-driven clock for tests: sleeping jumps straight to the deadline.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
    sleeps: Arc<Mutex<Vec<DateTime<Utc>>>>,
}

impl ManualClock {
    /// Clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
            sleeps: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Move time forward.
    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }

    /// Set the current instant.
    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = to;
    }

    /// Deadlines passed to `sleep_until`, in call order.
    pub fn sleeps(&self) -> Vec<DateTime<Utc>> {
        self.sleeps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn sleep_until(&self, deadline: DateTime<Utc>, shutdown: &Shutdown) -> bool {
        self.sleeps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(deadline);
        if shutdown.is_triggered() {
            return false;
        }
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        if deadline > *now {
            *now = deadline;
        }
        true
    }
}

/// Trip `shutdown` on SIGINT/SIGTERM. A second signal exits immediately.
#[cfg(unix)]
pub fn install_signal_handler(shutdown: Shutdown) -> ReelResult<()> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    use crate::foundation::error::ReelError;

    let mut signals = Signals::new([SIGINT, SIGTERM])
        .map_err(|e| ReelError::Other(anyhow::anyhow!("failed to install signal handler: {e}")))?;
    std::thread::spawn(move || {
        for signal in signals.forever() {
            if shutdown.is_triggered() {
                tracing::warn!(signal, "second termination signal, exiting now");
                std::process::exit(128 + signal);
            }
            tracing::warn!(signal, "termination signal received, stopping after current step");
            shutdown.trigger();
        }
    });
    Ok(())
}

/// Signals are not hooked on this platform; shutdown is only programmatic.
#[cfg(not(unix))]
pub fn install_signal_handler(_shutdown: Shutdown) -> ReelResult<()> {
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scheduler/clock.rs"]
mod tests;
