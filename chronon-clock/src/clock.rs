// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The clock capability trait.
//!
//! A [`Clock`] is a mechanism to measure time and to delay work until a
//! given point in time. Every implementation defines a concept of `now`;
//! any pair of readings may be separated by at least the clock's
//! [`minimum_resolution`](Clock::minimum_resolution), which tells callers
//! the granularity below which distinctions between readings stop being
//! meaningful.
//!
//! The primary scheduling use is task sleeping: [`sleep_until`]
//! resumes the calling task once a deadline has been met or passed, with a
//! tolerance acting as leeway after the deadline. The clock may reschedule
//! wake-ups inside the tolerance band to coalesce nearby resumptions and
//! reduce wake-up frequency, but it never resumes a sleeper early. Passing
//! `None` selects the default tolerance policy: one sixteenth of the
//! remaining time, floored at the clock's minimum resolution and capped at
//! one second.
//!
//! [`sleep_until`]: Clock::sleep_until
//!
//! # Example
//!
//! ```no_run
//! use chronon_clock::{Clock, ContinuousClock};
//! use chronon_core::{CancellationToken, Duration};
//!
//! # async fn example() -> chronon_core::Result<()> {
//! let clock = ContinuousClock::new();
//! let token = CancellationToken::new();
//!
//! let deadline = clock.now() + Duration::milliseconds(50);
//! clock
//!     .sleep_until(deadline, Some(Duration::milliseconds(5)), &token)
//!     .await?;
//! # Ok(())
//! # }
//! ```

use crate::instant::ClockInstant;
use crate::measure::{Measure, TryMeasure};
use chronon_core::{CancellationToken, ChrononError, Duration};
use core::future::Future;
use core::pin::Pin;

/// Unified sleep future type returned by every clock.
///
/// Boxing keeps the trait object-safe and stops concrete driver types
/// from leaking into signatures. The future resolves to `Ok(())` once the
/// deadline has passed, or to [`ChrononError::Cancelled`] when the
/// caller's token fires first; lateness is never reported as an error.
pub type Sleep = Pin<Box<dyn Future<Output = Result<(), ChrononError>> + Send + 'static>>;

/// A mechanism to measure time and to delay work until a deadline.
///
/// The associated [`Instant`](Clock::Instant) ties every reading to this
/// clock's family, so deadlines computed from one clock cannot be handed
/// to another family's clock by mistake.
pub trait Clock: Send + Sync + 'static {
    /// The reading type of this clock's family.
    type Instant: ClockInstant;

    /// The current reading.
    ///
    /// Successive readings never decrease, though two readings taken
    /// closer together than [`minimum_resolution`](Self::minimum_resolution)
    /// may be equal.
    fn now(&self) -> Self::Instant;

    /// A near-constant lower bound on the granularity of
    /// [`now`](Self::now).
    fn minimum_resolution(&self) -> Duration;

    /// Suspend the calling task until at least `deadline`.
    ///
    /// The wake-up lands inside `[deadline, deadline + tolerance]`: the
    /// scheduler may delay it within the band to coalesce with other
    /// pending wake-ups, and never resumes the sleeper before `deadline`.
    /// `None` tolerance selects the default policy (one sixteenth of the
    /// remaining time, floored at the minimum resolution, capped at one
    /// second). A deadline already in the past resumes promptly.
    ///
    /// Firing `token` while suspended resolves the future promptly to
    /// [`ChrononError::Cancelled`], however far away the deadline is.
    /// Dropping the future deregisters the sleeper.
    fn sleep_until(
        &self,
        deadline: Self::Instant,
        tolerance: Option<Duration>,
        token: &CancellationToken,
    ) -> Sleep;

    /// Suspend the calling task for `duration` from the current reading.
    ///
    /// Equivalent to [`sleep_until`](Self::sleep_until) with a deadline of
    /// `now() + duration`.
    fn sleep_for(
        &self,
        duration: Duration,
        tolerance: Option<Duration>,
        token: &CancellationToken,
    ) -> Sleep
    where
        Self: Sized,
    {
        self.sleep_until(self.now() + duration, tolerance, token)
    }

    /// Measure the elapsed time to execute a closure.
    ///
    /// Takes exactly two readings, one on either side of `work`.
    ///
    /// ```no_run
    /// use chronon_clock::{Clock, ContinuousClock};
    ///
    /// let clock = ContinuousClock::new();
    /// let elapsed = clock.measure(|| {
    ///     // some work
    /// });
    /// assert!(!elapsed.is_negative());
    /// ```
    fn measure<F>(&self, work: F) -> Duration
    where
        F: FnOnce(),
        Self: Sized,
    {
        let start = self.now();
        work();
        start.duration_to(self.now())
    }

    /// Measure the elapsed time to execute a fallible closure.
    ///
    /// A failure propagates unchanged and yields no duration.
    fn try_measure<F, E>(&self, work: F) -> Result<Duration, E>
    where
        F: FnOnce() -> Result<(), E>,
        Self: Sized,
    {
        let start = self.now();
        work()?;
        Ok(start.duration_to(self.now()))
    }

    /// Measure the elapsed time to await a future.
    ///
    /// The measurement spans the whole suspend/resume lifecycle of
    /// `work`, not just its time on a CPU: the first reading is taken at
    /// the first poll and the second when `work` completes.
    ///
    /// ```no_run
    /// use chronon_clock::{Clock, ContinuousClock};
    ///
    /// # async fn example() {
    /// let clock = ContinuousClock::new();
    /// let elapsed = clock
    ///     .measure_future(async {
    ///         // some suspendable work
    ///     })
    ///     .await;
    /// assert!(!elapsed.is_negative());
    /// # }
    /// ```
    fn measure_future<F>(&self, work: F) -> Measure<'_, Self, F>
    where
        F: Future<Output = ()>,
        Self: Sized,
    {
        Measure::new(self, work)
    }

    /// Measure the elapsed time to await a fallible future.
    ///
    /// A failure propagates unchanged and yields no duration.
    fn try_measure_future<F, E>(&self, work: F) -> TryMeasure<'_, Self, F>
    where
        F: Future<Output = Result<(), E>>,
        Self: Sized,
    {
        TryMeasure::new(self, work)
    }
}
