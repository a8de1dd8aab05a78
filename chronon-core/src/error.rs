// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Error types for the chronon time abstraction.
//!
//! The taxonomy is deliberately small. Cancellation is the only
//! first-class failure a sleep can produce: waking late is a
//! quality-of-service concern, never an error, and duration arithmetic
//! saturates at its representation limits rather than failing. Failures
//! raised by user code inside the measurement combinators are generic and
//! propagate untouched, so they never appear here.
//!
//! # Examples
//!
//! ```
//! use chronon_core::{ChrononError, Result};
//!
//! fn interrupted() -> Result<()> {
//!     Err(ChrononError::Cancelled)
//! }
//!
//! assert!(interrupted().unwrap_err().is_cancellation());
//! ```

/// Root error type for clock operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChrononError {
    /// A pending sleep was interrupted by its cancellation token before
    /// the deadline was reached.
    ///
    /// This is a prompt, deliberate wake-up: the sleeper is removed from
    /// the schedule immediately, however far away the deadline was.
    #[error("sleep cancelled before reaching its deadline")]
    Cancelled,
}

impl ChrononError {
    /// Check whether this error reports cancellation.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Specialized Result type for clock operations.
pub type Result<T> = core::result::Result<T, ChrononError>;
