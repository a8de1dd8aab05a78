// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Signed, fixed-point elapsed time.
//!
//! [`Duration`] stores a signed count of attoseconds (10^-18 s) in an
//! `i128`, so arithmetic between durations is exact: repeated addition and
//! subtraction never accumulate floating-point drift. The representable
//! range spans roughly +/- 5.4 * 10^12 years, which comfortably covers any
//! deadline a clock can hand out.
//!
//! Operator arithmetic saturates at the representation limits; the
//! `checked_*` methods return `None` there instead. Whichever style the
//! caller picks, the behavior at the limits is consistent and documented.
//!
//! # Example
//!
//! ```
//! use chronon_core::Duration;
//!
//! let timeout = Duration::milliseconds(50) + Duration::microseconds(500);
//! assert_eq!(timeout.whole_microseconds(), 50_500);
//! assert_eq!(timeout - Duration::microseconds(500), Duration::milliseconds(50));
//! ```

use core::fmt;
use core::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

const ATTOS_PER_SECOND: i128 = 1_000_000_000_000_000_000;
const ATTOS_PER_MILLISECOND: i128 = 1_000_000_000_000_000;
const ATTOS_PER_MICROSECOND: i128 = 1_000_000_000_000;
const ATTOS_PER_NANOSECOND: i128 = 1_000_000_000;

/// A signed span of elapsed time with attosecond precision.
///
/// Values are immutable; every operation produces a new `Duration`.
/// Negative durations arise naturally from instant subtraction and from
/// [`Neg`], and order before positive ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    attoseconds: i128,
}

impl Duration {
    /// The zero-length duration.
    pub const ZERO: Self = Self { attoseconds: 0 };

    /// The longest representable duration.
    pub const MAX: Self = Self {
        attoseconds: i128::MAX,
    };

    /// The most negative representable duration.
    pub const MIN: Self = Self {
        attoseconds: i128::MIN,
    };

    /// A duration of `seconds` whole seconds.
    #[must_use]
    pub const fn seconds(seconds: i64) -> Self {
        Self {
            attoseconds: seconds as i128 * ATTOS_PER_SECOND,
        }
    }

    /// A duration of `milliseconds` whole milliseconds.
    #[must_use]
    pub const fn milliseconds(milliseconds: i64) -> Self {
        Self {
            attoseconds: milliseconds as i128 * ATTOS_PER_MILLISECOND,
        }
    }

    /// A duration of `microseconds` whole microseconds.
    #[must_use]
    pub const fn microseconds(microseconds: i64) -> Self {
        Self {
            attoseconds: microseconds as i128 * ATTOS_PER_MICROSECOND,
        }
    }

    /// A duration of `nanoseconds` whole nanoseconds.
    #[must_use]
    pub const fn nanoseconds(nanoseconds: i64) -> Self {
        Self {
            attoseconds: nanoseconds as i128 * ATTOS_PER_NANOSECOND,
        }
    }

    /// A duration of `attoseconds` attoseconds, the native resolution.
    #[must_use]
    pub const fn attoseconds(attoseconds: i128) -> Self {
        Self { attoseconds }
    }

    /// Converts a `core::time::Duration`. Exact: the full `u64` second
    /// range and nanosecond fraction fit the attosecond representation.
    #[must_use]
    pub const fn from_std(duration: core::time::Duration) -> Self {
        Self {
            attoseconds: duration.as_secs() as i128 * ATTOS_PER_SECOND
                + duration.subsec_nanos() as i128 * ATTOS_PER_NANOSECOND,
        }
    }

    /// Converts to a `core::time::Duration`, truncating the sub-nanosecond
    /// fraction toward zero and saturating at the `u64` second range.
    /// Returns `None` for negative durations.
    #[must_use]
    pub fn to_std(self) -> Option<core::time::Duration> {
        if self.attoseconds < 0 {
            return None;
        }
        let secs = self.attoseconds / ATTOS_PER_SECOND;
        if secs > u64::MAX as i128 {
            return Some(core::time::Duration::new(u64::MAX, 0));
        }
        let nanos = ((self.attoseconds % ATTOS_PER_SECOND) / ATTOS_PER_NANOSECOND) as u32;
        Some(core::time::Duration::new(secs as u64, nanos))
    }

    /// The native attosecond count.
    #[must_use]
    pub const fn as_attoseconds(self) -> i128 {
        self.attoseconds
    }

    /// Whole seconds, truncated toward zero and saturated at the `i64`
    /// range.
    #[must_use]
    pub const fn whole_seconds(self) -> i64 {
        let secs = self.attoseconds / ATTOS_PER_SECOND;
        if secs > i64::MAX as i128 {
            i64::MAX
        } else if secs < i64::MIN as i128 {
            i64::MIN
        } else {
            secs as i64
        }
    }

    /// The attosecond remainder below one whole second. Carries the same
    /// sign as the duration, so `seconds * 10^18 + remainder` reconstructs
    /// the value.
    #[must_use]
    pub const fn subsec_attoseconds(self) -> i64 {
        (self.attoseconds % ATTOS_PER_SECOND) as i64
    }

    /// Whole milliseconds, truncated toward zero.
    #[must_use]
    pub const fn whole_milliseconds(self) -> i128 {
        self.attoseconds / ATTOS_PER_MILLISECOND
    }

    /// Whole microseconds, truncated toward zero.
    #[must_use]
    pub const fn whole_microseconds(self) -> i128 {
        self.attoseconds / ATTOS_PER_MICROSECOND
    }

    /// Whole nanoseconds, truncated toward zero.
    #[must_use]
    pub const fn whole_nanoseconds(self) -> i128 {
        self.attoseconds / ATTOS_PER_NANOSECOND
    }

    /// Approximate length in seconds as a float. Lossy; intended for
    /// display and diagnostics, never for arithmetic.
    #[must_use]
    pub fn as_secs_f64(self) -> f64 {
        self.attoseconds as f64 / ATTOS_PER_SECOND as f64
    }

    /// `true` when the duration is exactly zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.attoseconds == 0
    }

    /// `true` for durations strictly below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.attoseconds < 0
    }

    /// `true` for durations strictly above zero.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.attoseconds > 0
    }

    /// Addition that reports `None` instead of saturating at the
    /// representation limits.
    #[must_use]
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.attoseconds.checked_add(other.attoseconds) {
            Some(attoseconds) => Some(Self { attoseconds }),
            None => None,
        }
    }

    /// Subtraction that reports `None` instead of saturating.
    #[must_use]
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.attoseconds.checked_sub(other.attoseconds) {
            Some(attoseconds) => Some(Self { attoseconds }),
            None => None,
        }
    }

    /// Scalar multiplication that reports `None` instead of saturating.
    #[must_use]
    pub const fn checked_mul(self, factor: i32) -> Option<Self> {
        match self.attoseconds.checked_mul(factor as i128) {
            Some(attoseconds) => Some(Self { attoseconds }),
            None => None,
        }
    }

    /// Negation that reports `None` for [`Duration::MIN`].
    #[must_use]
    pub const fn checked_neg(self) -> Option<Self> {
        match self.attoseconds.checked_neg() {
            Some(attoseconds) => Some(Self { attoseconds }),
            None => None,
        }
    }

    /// Saturating addition.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self {
            attoseconds: self.attoseconds.saturating_add(other.attoseconds),
        }
    }

    /// Saturating subtraction.
    #[must_use]
    pub const fn saturating_sub(self, other: Self) -> Self {
        Self {
            attoseconds: self.attoseconds.saturating_sub(other.attoseconds),
        }
    }

    /// The larger of two durations.
    #[must_use]
    pub const fn max(self, other: Self) -> Self {
        if self.attoseconds >= other.attoseconds {
            self
        } else {
            other
        }
    }

    /// The smaller of two durations.
    #[must_use]
    pub const fn min(self, other: Self) -> Self {
        if self.attoseconds <= other.attoseconds {
            self
        } else {
            other
        }
    }

    /// Clamps into `[floor, ceiling]`.
    #[must_use]
    pub const fn clamp(self, floor: Self, ceiling: Self) -> Self {
        self.max(floor).min(ceiling)
    }
}

impl Add for Duration {
    type Output = Self;

    /// Saturates at the representation limits.
    fn add(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Duration {
    type Output = Self;

    /// Saturates at the representation limits.
    fn sub(self, other: Self) -> Self {
        self.saturating_sub(other)
    }
}

impl SubAssign for Duration {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Duration {
    type Output = Self;

    /// Saturates: `-Duration::MIN` is `Duration::MAX`.
    fn neg(self) -> Self {
        Self {
            attoseconds: self.attoseconds.checked_neg().unwrap_or(i128::MAX),
        }
    }
}

impl Mul<i32> for Duration {
    type Output = Self;

    /// Saturates at the representation limits.
    fn mul(self, factor: i32) -> Self {
        Self {
            attoseconds: self.attoseconds.saturating_mul(factor as i128),
        }
    }
}

impl Div<i32> for Duration {
    type Output = Self;

    /// Truncates toward zero. Panics on division by zero.
    fn div(self, divisor: i32) -> Self {
        Self {
            attoseconds: self.attoseconds / divisor as i128,
        }
    }
}

impl Default for Duration {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Duration {
    /// Renders as decimal seconds with the trailing zeros of the
    /// attosecond fraction trimmed, e.g. `1.5s`, `-0.000000001s`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.attoseconds.unsigned_abs();
        let secs = magnitude / ATTOS_PER_SECOND as u128;
        let frac = magnitude % ATTOS_PER_SECOND as u128;
        let sign = if self.attoseconds < 0 { "-" } else { "" };
        if frac == 0 {
            write!(f, "{sign}{secs}.0s")
        } else {
            let digits = format!("{frac:018}");
            write!(f, "{sign}{secs}.{}s", digits.trim_end_matches('0'))
        }
    }
}
