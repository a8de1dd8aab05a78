// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Test utilities for the chronon workspace.
//!
//! - [`ManualClock`] - a [`Clock`](chronon_clock::Clock) whose time only
//!   moves when a test calls `advance`, with deterministic wake-ups
//! - [`FixedStepTimeSource`] - a
//!   [`TimeSource`](chronon_clock::TimeSource) stepping a fixed amount
//!   per reading
//! - [`helpers`] - bounded-wait assertions and single-poll helpers

pub mod fixed_step;
pub mod helpers;
pub mod manual_clock;

pub use self::fixed_step::FixedStepTimeSource;
pub use self::manual_clock::{ManualClock, ManualInstant};
