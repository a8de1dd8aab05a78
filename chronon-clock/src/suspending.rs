// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The suspending clock: monotonic time that pauses with the system.

use crate::clock::{Clock, Sleep};
use crate::driver::{shared_driver, TimerDriver};
use crate::instant::SuspendingInstant;
use crate::source::{ClockFamily, TimeSource};
use chronon_core::{CancellationToken, Duration};
use core::fmt;
use std::sync::Arc;

/// A clock whose readings advance monotonically while the system runs and
/// pause while it is suspended.
///
/// Over any wall interval, elapsed suspending time never exceeds elapsed
/// continuous time. The variant of choice for scheduling work that should
/// not "catch up" on time spent asleep.
///
/// Handles are cheap to clone and share one timer driver.
#[derive(Clone)]
pub struct SuspendingClock {
    driver: Arc<TimerDriver>,
}

impl SuspendingClock {
    /// A clock over the process-wide system time source.
    #[must_use]
    pub fn new() -> Self {
        Self {
            driver: shared_driver(),
        }
    }

    /// A clock over an injected time source, with its own timer driver.
    ///
    /// Intended for tests and for platforms where the suspend-aware
    /// distinction needs a dedicated OS clock. Dropping the last handle
    /// shuts the driver down and cancels its pending sleeps.
    #[must_use]
    pub fn with_source(source: Arc<dyn TimeSource>) -> Self {
        Self {
            driver: Arc::new(TimerDriver::new(source)),
        }
    }
}

impl Default for SuspendingClock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SuspendingClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SuspendingClock").finish_non_exhaustive()
    }
}

impl Clock for SuspendingClock {
    type Instant = SuspendingInstant;

    fn now(&self) -> SuspendingInstant {
        SuspendingInstant::from_offset(self.driver.now(ClockFamily::Suspending))
    }

    fn minimum_resolution(&self) -> Duration {
        self.driver.resolution(ClockFamily::Suspending)
    }

    fn sleep_until(
        &self,
        deadline: SuspendingInstant,
        tolerance: Option<Duration>,
        token: &CancellationToken,
    ) -> Sleep {
        Box::pin(
            self.driver
                .sleep(ClockFamily::Suspending, deadline.offset(), tolerance, token),
        )
    }
}
