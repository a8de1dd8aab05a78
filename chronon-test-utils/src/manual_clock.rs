// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A manually advanced clock for deterministic tests.
//!
//! [`ManualClock`] implements the full
//! [`Clock`](chronon_clock::Clock) capability without touching real
//! time: readings move only when the test calls
//! [`advance`](ManualClock::advance), and every sleeper whose deadline is
//! reached by the advance wakes immediately, in registration order. That
//! makes wake-up sequences around deadlines and tolerance bands exactly
//! reproducible.
//!
//! The clock has its own instant family, [`ManualInstant`], so manual
//! readings cannot be mixed with the system-backed families - the same
//! compile-time separation the real clocks get.
//!
//! # Example
//!
//! ```
//! use chronon_clock::{Clock, ClockInstant};
//! use chronon_core::Duration;
//! use chronon_test_utils::ManualClock;
//!
//! let clock = ManualClock::new();
//! let before = clock.now();
//! clock.advance(Duration::milliseconds(5));
//! assert_eq!(before.duration_to(clock.now()), Duration::milliseconds(5));
//! ```

use chronon_clock::{Clock, ClockInstant, Sleep};
use chronon_core::{CancellationToken, CancellationWatch, ChrononError, Duration};
use core::future::Future;
use core::ops::{Add, Sub};
use core::pin::Pin;
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::{Context, Poll, Waker};
use parking_lot::Mutex;
use std::sync::Arc;

/// A reading of a [`ManualClock`].
///
/// Distinct from the system instant families; only comparable and
/// subtractable against other manual readings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ManualInstant {
    since_start: Duration,
}

impl ManualInstant {
    const fn from_offset(since_start: Duration) -> Self {
        Self { since_start }
    }
}

impl ClockInstant for ManualInstant {
    fn duration_to(&self, other: Self) -> Duration {
        other.since_start - self.since_start
    }

    fn checked_add(&self, duration: Duration) -> Option<Self> {
        self.since_start.checked_add(duration).map(Self::from_offset)
    }
}

impl Add<Duration> for ManualInstant {
    type Output = Self;

    fn add(self, duration: Duration) -> Self {
        Self::from_offset(self.since_start.saturating_add(duration))
    }
}

impl Sub<Duration> for ManualInstant {
    type Output = Self;

    fn sub(self, duration: Duration) -> Self {
        Self::from_offset(self.since_start.saturating_sub(duration))
    }
}

impl Sub for ManualInstant {
    type Output = Duration;

    fn sub(self, earlier: Self) -> Duration {
        earlier.duration_to(self)
    }
}

/// A clock driven entirely by the test.
///
/// Clones share state: advancing through any handle wakes sleepers
/// registered through every handle.
#[derive(Clone, Debug)]
pub struct ManualClock {
    inner: Arc<ManualClockInner>,
}

#[derive(Debug)]
struct ManualClockInner {
    resolution: Duration,
    state: Mutex<ManualState>,
}

#[derive(Debug, Default)]
struct ManualState {
    elapsed: Duration,
    sleepers: Vec<Arc<ManualSleeper>>,
    next_id: u64,
}

#[derive(Debug)]
struct ManualSleeper {
    id: u64,
    deadline: Duration,
    completed: AtomicBool,
    cancelled: AtomicBool,
    waker: Mutex<Option<Waker>>,
}

impl ManualSleeper {
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

impl ManualClock {
    /// A clock starting at zero with nanosecond resolution.
    #[must_use]
    pub fn new() -> Self {
        Self::with_resolution(Duration::nanoseconds(1))
    }

    /// A clock starting at zero reporting the given minimum resolution.
    #[must_use]
    pub fn with_resolution(resolution: Duration) -> Self {
        Self {
            inner: Arc::new(ManualClockInner {
                resolution,
                state: Mutex::new(ManualState::default()),
            }),
        }
    }

    /// Advance the clock, waking every sleeper whose deadline is reached.
    ///
    /// Due sleepers wake in registration order, before this returns.
    /// Non-positive deltas are ignored.
    pub fn advance(&self, delta: Duration) {
        if !delta.is_positive() {
            return;
        }

        let mut due = Vec::new();
        let mut state = self.inner.state.lock();
        state.elapsed = state.elapsed.saturating_add(delta);
        let elapsed = state.elapsed;
        state.sleepers.retain(|sleeper| {
            if sleeper.cancelled.load(Ordering::Acquire) {
                return false;
            }
            if elapsed >= sleeper.deadline {
                sleeper.completed.store(true, Ordering::Release);
                if let Some(waker) = sleeper.take_waker() {
                    due.push(waker);
                }
                false
            } else {
                true
            }
        });
        drop(state);

        for waker in due {
            waker.wake();
        }
    }

    /// Total time advanced since construction.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.inner.state.lock().elapsed
    }

    /// Number of sleepers currently registered.
    #[must_use]
    pub fn pending_sleepers(&self) -> usize {
        self.inner.state.lock().sleepers.len()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    type Instant = ManualInstant;

    fn now(&self) -> ManualInstant {
        ManualInstant::from_offset(self.inner.state.lock().elapsed)
    }

    fn minimum_resolution(&self) -> Duration {
        self.inner.resolution
    }

    /// Tolerance is accepted but never shifts a manual wake-up: firing
    /// happens exactly at the `advance` call that reaches the deadline,
    /// which is always inside `[deadline, deadline + tolerance]` from the
    /// sleeper's point of view and never before the deadline.
    fn sleep_until(
        &self,
        deadline: ManualInstant,
        _tolerance: Option<Duration>,
        token: &CancellationToken,
    ) -> Sleep {
        let sleeper = {
            let mut state = self.inner.state.lock();
            let id = state.next_id;
            state.next_id += 1;
            let sleeper = Arc::new(ManualSleeper {
                id,
                deadline: deadline.since_start,
                completed: AtomicBool::new(false),
                cancelled: AtomicBool::new(false),
                waker: Mutex::new(None),
            });
            state.sleepers.push(Arc::clone(&sleeper));
            sleeper
        };

        Box::pin(ManualSleep {
            inner: Arc::clone(&self.inner),
            sleeper,
            watch: token.watch(),
        })
    }
}

struct ManualSleep {
    inner: Arc<ManualClockInner>,
    sleeper: Arc<ManualSleeper>,
    watch: CancellationWatch,
}

impl ManualSleep {
    fn deregister(&self) {
        self.sleeper.cancelled.store(true, Ordering::Release);
        self.sleeper.take_waker();
        let mut state = self.inner.state.lock();
        state.sleepers.retain(|sleeper| sleeper.id != self.sleeper.id);
    }
}

impl Future for ManualSleep {
    type Output = Result<(), ChrononError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();

        if this.sleeper.completed.load(Ordering::Acquire) {
            return Poll::Ready(Ok(()));
        }
        if this.watch.is_cancelled() {
            this.deregister();
            return Poll::Ready(Err(ChrononError::Cancelled));
        }

        // A sleeper registered at or behind the current reading is
        // already due; completes without requiring a further advance.
        {
            let mut state = this.inner.state.lock();
            if state.elapsed >= this.sleeper.deadline {
                this.sleeper.completed.store(true, Ordering::Release);
                state.sleepers.retain(|sleeper| sleeper.id != this.sleeper.id);
                return Poll::Ready(Ok(()));
            }
        }

        this.sleeper.store_waker(cx.waker());
        if this.sleeper.completed.load(Ordering::Acquire) {
            return Poll::Ready(Ok(()));
        }

        match Pin::new(&mut this.watch).poll(cx) {
            Poll::Ready(()) => {
                if this.sleeper.completed.load(Ordering::Acquire) {
                    Poll::Ready(Ok(()))
                } else {
                    this.deregister();
                    Poll::Ready(Err(ChrononError::Cancelled))
                }
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for ManualSleep {
    fn drop(&mut self) {
        if !self.sleeper.completed.load(Ordering::Acquire) {
            self.deregister();
        }
    }
}
