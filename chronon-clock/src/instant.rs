// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Opaque points in time, one type per clock family.
//!
//! An instant is a reading taken from a specific clock and is only
//! meaningful relative to other readings from the same family:
//! [`ContinuousInstant`] and [`SuspendingInstant`] are distinct types, so
//! subtracting or comparing readings from different clocks is a compile
//! error rather than a silent unit mismatch.
//!
//! Instants carry no public constructor. They are obtained from a clock's
//! `now` or derived from an existing reading via arithmetic with
//! [`Duration`].

use chronon_core::Duration;
use core::fmt::Debug;
use core::ops::{Add, Sub};

/// Contract every clock reading satisfies.
///
/// The operator bounds make generic deadline arithmetic available on any
/// clock: `instant + duration` and `instant - duration` produce instants,
/// `instant - instant` produces the separating [`Duration`].
///
/// # Contract
///
/// - `a.duration_to(b) == -(b.duration_to(a))` for readings of the same
///   family (exact, up to saturation at the representation limits).
/// - Operator arithmetic saturates at the representation limits;
///   [`checked_add`](Self::checked_add) reports `None` there instead.
pub trait ClockInstant:
    Copy
    + Debug
    + Ord
    + Send
    + Sync
    + Add<Duration, Output = Self>
    + Sub<Duration, Output = Self>
    + Sub<Self, Output = Duration>
    + 'static
{
    /// The exact signed distance from `self` to `other`.
    ///
    /// Negative when `other` precedes `self`.
    fn duration_to(&self, other: Self) -> Duration;

    /// Deadline arithmetic that reports `None` at the representation
    /// limits instead of saturating.
    fn checked_add(&self, duration: Duration) -> Option<Self>;
}

macro_rules! define_instant {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name {
            since_epoch: Duration,
        }

        impl $name {
            pub(crate) const fn from_offset(since_epoch: Duration) -> Self {
                Self { since_epoch }
            }

            pub(crate) const fn offset(self) -> Duration {
                self.since_epoch
            }
        }

        impl ClockInstant for $name {
            fn duration_to(&self, other: Self) -> Duration {
                other.since_epoch - self.since_epoch
            }

            fn checked_add(&self, duration: Duration) -> Option<Self> {
                self.since_epoch.checked_add(duration).map(Self::from_offset)
            }
        }

        impl Add<Duration> for $name {
            type Output = Self;

            /// Saturates at the representation limits.
            fn add(self, duration: Duration) -> Self {
                Self::from_offset(self.since_epoch.saturating_add(duration))
            }
        }

        impl Sub<Duration> for $name {
            type Output = Self;

            /// Saturates at the representation limits.
            fn sub(self, duration: Duration) -> Self {
                Self::from_offset(self.since_epoch.saturating_sub(duration))
            }
        }

        impl Sub for $name {
            type Output = Duration;

            /// `a - b` is the duration from `b` to `a`.
            fn sub(self, earlier: Self) -> Duration {
                earlier.duration_to(self)
            }
        }
    };
}

define_instant! {
    /// A reading of the continuous clock family.
    ///
    /// Orders and subtracts only against other continuous readings; the
    /// epoch is an arbitrary fixed origin of the backing time source.
    ContinuousInstant
}

define_instant! {
    /// A reading of the suspending clock family.
    ///
    /// Orders and subtracts only against other suspending readings. Since
    /// this family pauses while the system sleeps, a suspending reading is
    /// never interchangeable with a continuous one, and the types enforce
    /// that.
    SuspendingInstant
}
