// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Chronon
//!
//! A time abstraction layer: clocks as a capability, with precise
//! durations, suspend-aware variants and tolerance-coalesced sleeping.
//!
//! ## Overview
//!
//! Chronon separates *what* time operations mean from *where* time comes
//! from. The [`Clock`] trait gives callers three things: the current
//! reading, the minimum resolution below which readings stop being
//! meaningful, and task sleeping with a tolerance band the scheduler may
//! use to batch nearby wake-ups. Two concrete variants cover the two
//! monotonic behaviors systems expose:
//!
//! - [`ContinuousClock`] keeps advancing across system suspend (source
//!   permitting) - the right base for measuring elapsed intervals.
//! - [`SuspendingClock`] pauses with the system - the right base for
//!   schedules that should not catch up on time spent asleep.
//!
//! Readings are opaque per-family instants, so a deadline computed
//! against one clock cannot be mixed into another. Raw time enters
//! through the injectable [`TimeSource`] collaborator, which is what
//! makes every clock deterministic under test (see the
//! `chronon-test-utils` crate).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chronon::{Clock, ContinuousClock};
//! use chronon::{CancellationToken, Duration};
//!
//! #[tokio::main]
//! async fn main() -> chronon::Result<()> {
//!     let clock = ContinuousClock::new();
//!     let token = CancellationToken::new();
//!
//!     // Suspend this task for 50ms, allowing 5ms of coalescing leeway.
//!     clock
//!         .sleep_for(Duration::milliseconds(50), Some(Duration::milliseconds(5)), &token)
//!         .await?;
//!
//!     // Measure a span of suspendable work.
//!     let elapsed = clock
//!         .measure_future(async {
//!             // await something
//!         })
//!         .await;
//!     assert!(!elapsed.is_negative());
//!     Ok(())
//! }
//! ```

// Re-export core value types
pub use chronon_core::{CancellationToken, ChrononError, Duration, Result};

// Re-export the clock capability and its concrete variants
pub use chronon_clock::{
    Clock, ClockFamily, ClockInstant, ContinuousClock, ContinuousInstant, RawTime, Sleep,
    SuspendingClock, SuspendingInstant, SystemTimeSource, TimeSource,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use chronon_clock::prelude::*;
    pub use chronon_core::{ChrononError, Result};
}
