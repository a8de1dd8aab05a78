// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A deterministic time source stepping a fixed amount per reading.
//!
//! Useful for driving the real clock types through their
//! [`TimeSource`](chronon_clock::TimeSource) boundary: every `current`
//! call moves the family's reading forward by the configured step, so
//! reading sequences and measured spans are exact.
//!
//! The two families advance independently, each on its own counter, and a
//! per-family scale lets a test make suspending time lag continuous time
//! the way a real suspend period would.

use chronon_clock::{ClockFamily, RawTime, TimeSource};
use chronon_core::Duration;
use parking_lot::Mutex;

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// A [`TimeSource`] whose readings advance `step` per `current` call.
#[derive(Debug)]
pub struct FixedStepTimeSource {
    step: Duration,
    resolution: Duration,
    /// Suspending readings advance `numerator / denominator` of the step.
    suspending_scale: (u32, u32),
    counters: Mutex<[Duration; 2]>,
}

impl FixedStepTimeSource {
    /// A source stepping `step` per reading, reporting `step` as its
    /// resolution for both families.
    #[must_use]
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            resolution: step,
            suspending_scale: (1, 1),
            counters: Mutex::new([Duration::ZERO; 2]),
        }
    }

    /// Make suspending readings advance `numerator / denominator` of the
    /// continuous step, emulating time lost to system suspend.
    #[must_use]
    pub fn with_suspending_scale(mut self, numerator: u32, denominator: u32) -> Self {
        self.suspending_scale = (numerator, denominator);
        self
    }

    fn index(family: ClockFamily) -> usize {
        match family {
            ClockFamily::Continuous => 0,
            ClockFamily::Suspending => 1,
        }
    }

    fn to_raw(offset: Duration) -> RawTime {
        let nanos = offset.whole_nanoseconds().max(0);
        RawTime::new(
            (nanos / NANOS_PER_SECOND) as i64,
            (nanos % NANOS_PER_SECOND) as u32,
        )
    }
}

impl TimeSource for FixedStepTimeSource {
    fn current(&self, family: ClockFamily) -> RawTime {
        let step = match family {
            ClockFamily::Continuous => self.step,
            ClockFamily::Suspending => {
                let (numerator, denominator) = self.suspending_scale;
                self.step * numerator as i32 / denominator as i32
            }
        };

        let mut counters = self.counters.lock();
        let slot = &mut counters[Self::index(family)];
        *slot = slot.saturating_add(step);
        Self::to_raw(*slot)
    }

    fn resolution(&self, _family: ClockFamily) -> RawTime {
        Self::to_raw(self.resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn families_advance_independently() {
        let source = FixedStepTimeSource::new(Duration::milliseconds(10))
            .with_suspending_scale(1, 2);

        let continuous = source.current(ClockFamily::Continuous).to_duration();
        let suspending = source.current(ClockFamily::Suspending).to_duration();
        assert_eq!(continuous, Duration::milliseconds(10));
        assert_eq!(suspending, Duration::milliseconds(5));
    }
}
