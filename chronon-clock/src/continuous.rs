// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The continuous clock: monotonic time that never stops.

use crate::clock::{Clock, Sleep};
use crate::driver::{shared_driver, TimerDriver};
use crate::instant::ContinuousInstant;
use crate::source::{ClockFamily, TimeSource};
use chronon_core::{CancellationToken, Duration};
use core::fmt;
use std::sync::Arc;

/// A clock whose readings advance monotonically, unaffected by wall-clock
/// adjustment and - source permitting - across system suspend.
///
/// The variant of choice for measuring elapsed intervals that must stay
/// immune to NTP steps and clock skew.
///
/// Handles are cheap to clone and share one timer driver.
#[derive(Clone)]
pub struct ContinuousClock {
    driver: Arc<TimerDriver>,
}

impl ContinuousClock {
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

impl Default for ContinuousClock {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ContinuousClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContinuousClock").finish_non_exhaustive()
    }
}

impl Clock for ContinuousClock {
    type Instant = ContinuousInstant;

    fn now(&self) -> ContinuousInstant {
        ContinuousInstant::from_offset(self.driver.now(ClockFamily::Continuous))
    }

    fn minimum_resolution(&self) -> Duration {
        self.driver.resolution(ClockFamily::Continuous)
    }

    fn sleep_until(
        &self,
        deadline: ContinuousInstant,
        tolerance: Option<Duration>,
        token: &CancellationToken,
    ) -> Sleep {
        Box::pin(
            self.driver
                .sleep(ClockFamily::Continuous, deadline.offset(), tolerance, token),
        )
    }
}
