// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting all commonly used traits and types.
//!
//! Import this module for convenient access to the clock capability and
//! the concrete clocks:
//!
//! ```ignore
//! use chronon_clock::prelude::*;
//!
//! let clock = ContinuousClock::new();
//! let deadline = clock.now() + Duration::milliseconds(50);
//! ```
//!
//! # Contents
//!
//! - [`Clock`] / [`ClockInstant`] - the capability traits
//! - [`ContinuousClock`] / [`SuspendingClock`] - the concrete variants
//! - [`TimeSource`] - the injectable raw-time collaborator
//! - [`Duration`] / [`CancellationToken`] - core value types

pub use crate::clock::Clock;
pub use crate::continuous::ContinuousClock;
pub use crate::instant::ClockInstant;
pub use crate::source::TimeSource;
pub use crate::suspending::SuspendingClock;

pub use chronon_core::{CancellationToken, Duration};
