// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Clocks: measuring time and delaying work until a point in time.
//!
//! This crate defines the [`Clock`] capability - `now`, a minimum
//! resolution, and tolerance-coalesced task sleeping - together with the
//! two concrete variants backing it:
//!
//! - [`ContinuousClock`] - monotonic time that keeps advancing across
//!   system suspend (source permitting)
//! - [`SuspendingClock`] - monotonic time that pauses while the system is
//!   suspended
//!
//! Readings are opaque [`ContinuousInstant`] / [`SuspendingInstant`]
//! values; the two families are distinct types, so readings from
//! different clocks never mix. Raw time comes from an injectable
//! [`TimeSource`], which keeps every clock deterministic under test.
//!
//! # Overview
//!
//! - **[`Clock`] trait** - `now`, `minimum_resolution`,
//!   `sleep_until(deadline, tolerance, token)`, plus `measure` /
//!   `measure_future` combinators
//! - **[`ClockInstant`] trait** - reading contract with deadline
//!   arithmetic
//! - **[`TimeSource`] trait** - raw `(seconds, nanoseconds)` collaborator
//!   selected by [`ClockFamily`]
//! - **Timer driver** - one dedicated thread per source coalescing
//!   wake-ups inside `[deadline, deadline + tolerance]` bands
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
//! let elapsed = clock
//!     .measure_future(async {
//!         // suspends the task, not a thread
//!         let _ = clock
//!             .sleep_for(Duration::milliseconds(50), None, &token)
//!             .await;
//!     })
//!     .await;
//! assert!(elapsed >= Duration::milliseconds(50));
//! # Ok(())
//! # }
//! ```

mod clock;
mod continuous;
mod driver;
mod instant;
mod measure;
mod source;
mod suspending;

pub mod prelude;

pub use clock::{Clock, Sleep};
pub use continuous::ContinuousClock;
pub use instant::{ClockInstant, ContinuousInstant, SuspendingInstant};
pub use measure::{Measure, TryMeasure};
pub use source::{ClockFamily, RawTime, SystemTimeSource, TimeSource};
pub use suspending::SuspendingClock;
