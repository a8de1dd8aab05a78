// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Core value types for the chronon time abstraction.
//!
//! This crate contains the pieces every clock implementation builds on:
//!
//! - [`Duration`] - signed, attosecond-precision elapsed time
//! - [`ChrononError`] / [`Result`] - the library error taxonomy
//! - [`CancellationToken`] - runtime-agnostic cancellation for pending sleeps

pub mod cancellation_token;
pub mod duration;
pub mod error;

pub use self::cancellation_token::{CancellationToken, CancellationWatch, Cancelled};
pub use self::duration::Duration;
pub use self::error::{ChrononError, Result};
