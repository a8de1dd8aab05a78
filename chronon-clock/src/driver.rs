// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Deadline-coalescing timer driver.
//!
//! One dedicated thread services all sleepers registered through a driver.
//! The thread parks until the earliest *upper* band edge among pending
//! sleepers - `min(deadline + tolerance)` - and on every wake-up at time
//! `t` fires all sleepers whose deadline has passed. Any sleeper fired
//! this way lands inside its own band: for every pending entry,
//! `deadline + tolerance >= t` (the park target minimizes that edge), and
//! firing requires `deadline <= t`. Nearby deadlines therefore batch into
//! a single wake-up without ever resuming a sleeper early.
//!
//! Suspension is cooperative: only the registered future suspends, on its
//! own executor; the driver thread is shared across all sleepers of the
//! driver and parks on a condvar between wake-ups.

use crate::source::{ClockFamily, SystemTimeSource, TimeSource};
use chronon_core::{CancellationToken, CancellationWatch, ChrononError, Duration};
use core::future::Future;
use core::pin::Pin;
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::{Context, Poll, Waker};
use parking_lot::{Condvar, Mutex};
use std::sync::{Arc, OnceLock};
use tracing::{debug, trace};

/// Ceiling applied by the default tolerance policy.
const DEFAULT_TOLERANCE_CAP: Duration = Duration::seconds(1);

/// Default tolerance divisor: leeway proportional to the remaining time.
const DEFAULT_TOLERANCE_DIVISOR: i32 = 16;

/// Shared timer servicing the sleepers of one time source.
///
/// Dropping the last handle shuts the thread down and cancels whatever is
/// still pending; the process-wide driver behind [`shared_driver`] is
/// never dropped.
pub(crate) struct TimerDriver {
    shared: Arc<DriverShared>,
}

struct DriverShared {
    source: Arc<dyn TimeSource>,
    state: Mutex<DriverState>,
    wakeups: Condvar,
}

#[derive(Default)]
struct DriverState {
    sleepers: Vec<Arc<SleepEntry>>,
    next_id: u64,
    shutdown: bool,
}

struct SleepEntry {
    id: u64,
    family: ClockFamily,
    deadline: Duration,
    fire_by: Duration,
    completed: AtomicBool,
    cancelled: AtomicBool,
    waker: Mutex<Option<Waker>>,
}

impl SleepEntry {
    fn take_waker(&self) -> Option<Waker> {
        self.waker.lock().take()
    }

    fn store_waker(&self, waker: &Waker) {
        let mut slot = self.waker.lock();
        if slot.as_ref().is_some_and(|existing| existing.will_wake(waker)) {
            return;
        }
        *slot = Some(waker.clone());
    }
}

impl TimerDriver {
    pub(crate) fn new(source: Arc<dyn TimeSource>) -> Self {
        let shared = Arc::new(DriverShared {
            source,
            state: Mutex::new(DriverState::default()),
            wakeups: Condvar::new(),
        });
        let serviced = Arc::clone(&shared);
        std::thread::spawn(move || run(serviced));
        Self { shared }
    }

    /// Current offset of `family`'s clock from its epoch.
    pub(crate) fn now(&self, family: ClockFamily) -> Duration {
        self.shared.source.current(family).to_duration()
    }

    /// Minimum resolution of `family`'s clock.
    pub(crate) fn resolution(&self, family: ClockFamily) -> Duration {
        self.shared.source.resolution(family).to_duration()
    }

    /// Register a sleeper and return the future that waits for it.
    ///
    /// `deadline` is an epoch offset of `family`'s clock. `None`
    /// tolerance resolves here, at registration, to the default policy:
    /// `remaining / 16`, floored at the family's resolution and capped at
    /// one second.
    pub(crate) fn sleep(
        &self,
        family: ClockFamily,
        deadline: Duration,
        tolerance: Option<Duration>,
        token: &CancellationToken,
    ) -> DriverSleep {
        let remaining = deadline - self.now(family);
        let tolerance = match tolerance {
            Some(tolerance) => tolerance.max(Duration::ZERO),
            None => self.default_tolerance(family, remaining),
        };

        let mut state = self.shared.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        let entry = Arc::new(SleepEntry {
            id,
            family,
            deadline,
            fire_by: deadline.saturating_add(tolerance),
            completed: AtomicBool::new(false),
            cancelled: AtomicBool::new(state.shutdown),
            waker: Mutex::new(None),
        });
        if !state.shutdown {
            state.sleepers.push(Arc::clone(&entry));
        }
        drop(state);

        trace!(id, ?family, remaining = %remaining, tolerance = %tolerance, "registered sleeper");
        // The new entry may carry the earliest band edge.
        self.shared.wakeups.notify_one();

        DriverSleep {
            shared: Arc::clone(&self.shared),
            entry,
            watch: token.watch(),
        }
    }

    fn default_tolerance(&self, family: ClockFamily, remaining: Duration) -> Duration {
        if !remaining.is_positive() {
            return Duration::ZERO;
        }
        (remaining / DEFAULT_TOLERANCE_DIVISOR)
            .clamp(self.resolution(family), DEFAULT_TOLERANCE_CAP)
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        state.shutdown = true;
        self.shared.wakeups.notify_one();
    }
}

/// The process-wide driver over [`SystemTimeSource`], started on first
/// use and shared by every system-backed clock.
pub(crate) fn shared_driver() -> Arc<TimerDriver> {
    static SHARED: OnceLock<Arc<TimerDriver>> = OnceLock::new();
    Arc::clone(
        SHARED.get_or_init(|| Arc::new(TimerDriver::new(Arc::new(SystemTimeSource::new())))),
    )
}

/// Timer thread body.
fn run(shared: Arc<DriverShared>) {
    let mut state = shared.state.lock();
    loop {
        if state.shutdown {
            let leftovers = core::mem::take(&mut state.sleepers);
            drop(state);
            debug!(pending = leftovers.len(), "timer driver shutting down");
            for entry in leftovers {
                entry.cancelled.store(true, Ordering::Release);
                if let Some(waker) = entry.take_waker() {
                    waker.wake();
                }
            }
            return;
        }

        // Sweep entries deregistered by dropped or cancelled futures.
        state.sleepers.retain(|entry| !entry.cancelled.load(Ordering::Acquire));

        let mut due = Vec::new();
        let mut park: Option<Duration> = None;

        if !state.sleepers.is_empty() {
            let now_continuous = shared.source.current(ClockFamily::Continuous).to_duration();
            let now_suspending = shared.source.current(ClockFamily::Suspending).to_duration();
            let now_of = |family: ClockFamily| match family {
                ClockFamily::Continuous => now_continuous,
                ClockFamily::Suspending => now_suspending,
            };

            state.sleepers.retain(|entry| {
                if now_of(entry.family) >= entry.deadline {
                    entry.completed.store(true, Ordering::Release);
                    if let Some(waker) = entry.take_waker() {
                        due.push(waker);
                    }
                    false
                } else {
                    true
                }
            });

            park = state
                .sleepers
                .iter()
                .map(|entry| entry.fire_by - now_of(entry.family))
                .min();
        }

        if !due.is_empty() {
            trace!(count = due.len(), "waking coalesced sleepers");
            // Resume outside the lock, then re-evaluate the schedule.
            parking_lot::MutexGuard::unlocked(&mut state, || {
                for waker in due {
                    waker.wake();
                }
            });
            continue;
        }

        match park {
            // Idle until a registration or shutdown arrives.
            None => shared.wakeups.wait(&mut state),
            // Park until the earliest band edge; firing happens on the
            // next pass, against a fresh reading.
            Some(until) => {
                let timeout = until.to_std().unwrap_or(core::time::Duration::ZERO);
                let _ = shared.wakeups.wait_for(&mut state, timeout);
            }
        }
    }
}

/// Future returned by the concrete clocks' `sleep_until`.
///
/// Resolves to `Ok(())` once the driver fires the entry, or to
/// [`ChrononError::Cancelled`] as soon as the caller's token fires.
/// Dropping it deregisters the sleeper, leaving no pending state behind.
pub(crate) struct DriverSleep {
    shared: Arc<DriverShared>,
    entry: Arc<SleepEntry>,
    watch: CancellationWatch,
}

impl DriverSleep {
    fn deregister(&self) {
        self.entry.cancelled.store(true, Ordering::Release);
        self.entry.take_waker();
        let mut state = self.shared.state.lock();
        state.sleepers.retain(|entry| entry.id != self.entry.id);
    }
}

impl Future for DriverSleep {
    type Output = Result<(), ChrononError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if this.entry.completed.load(Ordering::Acquire) {
            return Poll::Ready(Ok(()));
        }
        // Set when the driver shut down underneath us or a previous poll
        // observed the token.
        if this.entry.cancelled.load(Ordering::Acquire) {
            return Poll::Ready(Err(ChrononError::Cancelled));
        }
        if this.watch.is_cancelled() {
            trace!(id = this.entry.id, "sleeper cancelled");
            this.deregister();
            return Poll::Ready(Err(ChrononError::Cancelled));
        }

        this.entry.store_waker(cx.waker());
        // The driver may have fired between the check above and the waker
        // store; re-check so that wake-up is not lost.
        if this.entry.completed.load(Ordering::Acquire) {
            return Poll::Ready(Ok(()));
        }

        match Pin::new(&mut this.watch).poll(cx) {
            Poll::Ready(()) => {
                if this.entry.completed.load(Ordering::Acquire) {
                    Poll::Ready(Ok(()))
                } else {
                    trace!(id = this.entry.id, "sleeper cancelled");
                    this.deregister();
                    Poll::Ready(Err(ChrononError::Cancelled))
                }
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for DriverSleep {
    fn drop(&mut self) {
        if !self.entry.completed.load(Ordering::Acquire) {
            self.deregister();
        }
    }
}
