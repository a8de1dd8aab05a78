// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The raw time-source collaborator boundary.
//!
//! Clocks never talk to the operating system directly. They delegate every
//! reading to a [`TimeSource`], selecting a [`ClockFamily`] per call, and
//! interpret the returned [`RawTime`] into the instant/duration model.
//! Injecting a source makes every clock deterministic under test: a fake
//! source that steps on demand replaces real wall time without touching
//! the clock code.

use chronon_core::Duration;
use std::sync::OnceLock;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

/// Selector for the OS time source backing a reading.
///
/// A closed, two-variant family: readings of the two families are kept
/// apart at the type level (see `ContinuousInstant` / `SuspendingInstant`)
/// and this selector only surfaces at the [`TimeSource`] boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClockFamily {
    /// Monotonic time that keeps advancing while the system is suspended.
    Continuous,
    /// Monotonic time that pauses while the system is suspended.
    Suspending,
}

/// A raw reading: whole seconds plus a sub-second fraction in
/// nanoseconds.
///
/// The core interprets this pair into [`Duration`]; sources never build
/// instants themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawTime {
    /// Whole seconds since the source's fixed origin.
    pub seconds: i64,
    /// Sub-second fraction, always below one billion.
    pub nanoseconds: u32,
}

impl RawTime {
    /// A raw reading of `seconds` and `nanoseconds`.
    ///
    /// `nanoseconds` must stay below one billion; the excess is not
    /// carried into `seconds`.
    #[must_use]
    pub const fn new(seconds: i64, nanoseconds: u32) -> Self {
        debug_assert!(nanoseconds < NANOS_PER_SECOND);
        Self {
            seconds,
            nanoseconds,
        }
    }

    /// Interprets the reading as a [`Duration`] offset from the source's
    /// origin.
    #[must_use]
    pub const fn to_duration(self) -> Duration {
        Duration::seconds(self.seconds)
            .saturating_add(Duration::nanoseconds(self.nanoseconds as i64))
    }
}

/// External collaborator producing raw readings for both clock families.
///
/// # Contract
///
/// - Successive `current` readings for one family are non-decreasing;
///   they may be equal when taken closer together than the source's
///   resolution.
/// - `resolution` is a near-constant lower bound on the granularity of
///   `current` for that family.
/// - Implementations are called concurrently from many suspended tasks
///   and from the timer thread.
pub trait TimeSource: Send + Sync + 'static {
    /// The current reading of `family`'s clock.
    fn current(&self, family: ClockFamily) -> RawTime;

    /// The minimum meaningful resolution of `family`'s clock.
    fn resolution(&self, family: ClockFamily) -> RawTime;
}

/// Std-backed default source.
///
/// All readings are measured from a single process-wide anchor taken on
/// first use, so every `SystemTimeSource` value agrees on the epoch.
///
/// The standard library exposes one monotonic clock, so both families are
/// served from it. On platforms where that clock halts during system
/// suspend the continuous family inherits the halt; inject a source that
/// reads a boot-time clock where the distinction matters.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTimeSource;

static PROCESS_ANCHOR: OnceLock<std::time::Instant> = OnceLock::new();

impl SystemTimeSource {
    /// A handle to the process-wide source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn anchor() -> std::time::Instant {
        *PROCESS_ANCHOR.get_or_init(std::time::Instant::now)
    }
}

impl TimeSource for SystemTimeSource {
    fn current(&self, _family: ClockFamily) -> RawTime {
        let elapsed = Self::anchor().elapsed();
        RawTime::new(elapsed.as_secs() as i64, elapsed.subsec_nanos())
    }

    fn resolution(&self, _family: ClockFamily) -> RawTime {
        // std::time::Instant carries nanosecond granularity.
        RawTime::new(0, 1)
    }
}
