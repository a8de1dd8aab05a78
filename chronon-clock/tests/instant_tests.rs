// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chronon_clock::{Clock, ClockInstant, ContinuousClock, SuspendingClock};
use chronon_core::Duration;
use chronon_test_utils::FixedStepTimeSource;
use std::sync::Arc;

fn stepped_continuous(step: Duration) -> ContinuousClock {
    ContinuousClock::with_source(Arc::new(FixedStepTimeSource::new(step)))
}

#[test]
fn test_duration_to_is_antisymmetric() {
    // Arrange: consecutive readings are exactly one step apart
    let clock = stepped_continuous(Duration::milliseconds(1));
    let a = clock.now();
    let b = clock.now();

    // Assert
    assert_eq!(a.duration_to(b), Duration::milliseconds(1));
    assert_eq!(a.duration_to(b), -(b.duration_to(a)));
}

#[test]
fn test_instant_subtraction_matches_duration_to() {
    let clock = stepped_continuous(Duration::microseconds(250));
    let a = clock.now();
    let b = clock.now();

    assert_eq!(b - a, a.duration_to(b));
    assert_eq!(a - b, -(b - a));
}

#[test]
fn test_deadline_arithmetic_round_trips() {
    let clock = stepped_continuous(Duration::milliseconds(1));
    let reading = clock.now();
    let offset = Duration::seconds(2);

    let deadline = reading + offset;
    assert_eq!(deadline - offset, reading);
    assert_eq!(reading.duration_to(deadline), offset);

    // Subtracting a negative duration moves forward.
    assert_eq!(reading - -offset, deadline);
}

#[test]
fn test_readings_order_along_the_timeline() {
    let clock = stepped_continuous(Duration::milliseconds(1));
    let earlier = clock.now();
    let later = clock.now();

    assert!(earlier < later);
    assert!(later > earlier);
    assert_eq!(earlier.max(later), later);
}

#[test]
fn test_checked_add_reports_the_representation_limit() {
    let clock = stepped_continuous(Duration::milliseconds(1));
    let reading = clock.now();

    assert_eq!(reading.checked_add(Duration::MAX), None);
    assert_eq!(
        reading.checked_add(Duration::seconds(5)),
        Some(reading + Duration::seconds(5))
    );
}

#[test]
fn test_suspending_elapsed_lags_continuous_elapsed_under_suspension() {
    // Arrange: one source for both families, with suspending time moving
    // at half rate - the shape of a suspend period
    let source = Arc::new(
        FixedStepTimeSource::new(Duration::milliseconds(10)).with_suspending_scale(1, 2),
    );
    let continuous = ContinuousClock::with_source(source.clone());
    let suspending = SuspendingClock::with_source(source);

    // Act
    let continuous_start = continuous.now();
    let suspending_start = suspending.now();
    let suspending_elapsed = suspending_start.duration_to(suspending.now());
    let continuous_elapsed = continuous_start.duration_to(continuous.now());

    // Assert
    assert_eq!(continuous_elapsed, Duration::milliseconds(10));
    assert_eq!(suspending_elapsed, Duration::milliseconds(5));
    assert!(suspending_elapsed <= continuous_elapsed);
}

#[test]
fn test_suspending_readings_form_their_own_family() {
    // The families are distinct types; this only checks the suspending
    // family honors the same arithmetic contract.
    let clock =
        SuspendingClock::with_source(Arc::new(FixedStepTimeSource::new(Duration::milliseconds(2))));
    let a = clock.now();
    let b = clock.now();

    assert_eq!(a.duration_to(b), Duration::milliseconds(2));
    assert_eq!(a.duration_to(b), -(b.duration_to(a)));
    assert!(a < b);
}
