// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chronon_clock::{Clock, ClockInstant};
use chronon_core::{CancellationToken, Duration};
use chronon_test_utils::helpers::{assert_resolves_within, poll_once};
use chronon_test_utils::ManualClock;
use std::task::Poll;

#[test]
fn test_advance_moves_the_reading_exactly() {
    let clock = ManualClock::new();
    let before = clock.now();

    clock.advance(Duration::milliseconds(5));
    clock.advance(Duration::microseconds(250));

    assert_eq!(
        before.duration_to(clock.now()),
        Duration::microseconds(5_250)
    );
    assert_eq!(clock.elapsed(), Duration::microseconds(5_250));
}

#[test]
fn test_non_positive_advances_are_ignored() {
    let clock = ManualClock::new();
    clock.advance(Duration::ZERO);
    clock.advance(Duration::milliseconds(-5));

    assert_eq!(clock.elapsed(), Duration::ZERO);
}

#[test]
fn test_sleep_wakes_inside_the_tolerance_band() {
    // Arrange: deadline 50ms out, 5ms of tolerance
    let clock = ManualClock::new();
    let token = CancellationToken::new();
    let start = clock.now();
    let mut sleep = clock.sleep_until(
        start + Duration::milliseconds(50),
        Some(Duration::milliseconds(5)),
        &token,
    );

    // Act & Assert: no wake-up before the deadline
    assert!(poll_once(&mut sleep).is_pending());
    clock.advance(Duration::milliseconds(49));
    assert!(poll_once(&mut sleep).is_pending());

    // The advance reaching the deadline resumes the sleeper
    clock.advance(Duration::milliseconds(1));
    assert_eq!(poll_once(&mut sleep), Poll::Ready(Ok(())));

    // Resumption landed inside [deadline, deadline + tolerance]
    let woken_after = start.duration_to(clock.now());
    assert!(woken_after >= Duration::milliseconds(50));
    assert!(woken_after <= Duration::milliseconds(55));
}

#[test]
fn test_overlapping_tolerance_bands_fire_in_one_advance() {
    // Arrange: bands [50, 55] and [52, 57] overlap
    let clock = ManualClock::new();
    let token = CancellationToken::new();
    let start = clock.now();
    let mut first = clock.sleep_until(
        start + Duration::milliseconds(50),
        Some(Duration::milliseconds(5)),
        &token,
    );
    let mut second = clock.sleep_until(
        start + Duration::milliseconds(52),
        Some(Duration::milliseconds(5)),
        &token,
    );
    assert!(poll_once(&mut first).is_pending());
    assert!(poll_once(&mut second).is_pending());
    assert_eq!(clock.pending_sleepers(), 2);

    // Act: one advance covering both deadlines
    clock.advance(Duration::milliseconds(52));

    // Assert: both resumed, nothing left registered
    assert_eq!(poll_once(&mut first), Poll::Ready(Ok(())));
    assert_eq!(poll_once(&mut second), Poll::Ready(Ok(())));
    assert_eq!(clock.pending_sleepers(), 0);
}

#[test]
fn test_a_due_deadline_resumes_without_an_advance() {
    let clock = ManualClock::new();
    let token = CancellationToken::new();
    clock.advance(Duration::milliseconds(10));

    let mut at_now = clock.sleep_until(clock.now(), None, &token);
    let mut in_the_past = clock.sleep_until(clock.now() - Duration::milliseconds(5), None, &token);

    assert_eq!(poll_once(&mut at_now), Poll::Ready(Ok(())));
    assert_eq!(poll_once(&mut in_the_past), Poll::Ready(Ok(())));
}

#[test]
fn test_cancellation_resumes_promptly_and_deregisters() {
    // Arrange: a deadline the test never reaches
    let clock = ManualClock::new();
    let token = CancellationToken::new();
    let mut sleep = clock.sleep_for(Duration::seconds(3_600), None, &token);

    assert!(poll_once(&mut sleep).is_pending());
    assert_eq!(clock.pending_sleepers(), 1);

    // Act
    token.cancel();

    // Assert: no advance needed, no sleeper left behind
    match poll_once(&mut sleep) {
        Poll::Ready(Err(error)) => assert!(error.is_cancellation()),
        other => panic!("expected prompt cancellation, got {other:?}"),
    }
    assert_eq!(clock.pending_sleepers(), 0);
}

#[test]
fn test_dropping_a_sleep_deregisters_it() {
    let clock = ManualClock::new();
    let token = CancellationToken::new();

    let mut sleep = clock.sleep_for(Duration::milliseconds(10), None, &token);
    assert!(poll_once(&mut sleep).is_pending());
    assert_eq!(clock.pending_sleepers(), 1);

    drop(sleep);
    assert_eq!(clock.pending_sleepers(), 0);
}

#[test]
fn test_measure_observes_manual_advances_exactly() {
    let clock = ManualClock::new();

    let elapsed = clock.measure(|| clock.advance(Duration::milliseconds(7)));

    assert_eq!(elapsed, Duration::milliseconds(7));
}

#[tokio::test]
async fn test_advance_wakes_a_suspended_task() -> anyhow::Result<()> {
    // Arrange: a task suspended on the manual clock
    let clock = ManualClock::new();
    let token = CancellationToken::new();
    let sleep = clock.sleep_for(Duration::milliseconds(100), None, &token);
    let waiter = tokio::spawn(async move { sleep.await });

    // Give the task a chance to register its waker.
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    // Act
    clock.advance(Duration::milliseconds(100));

    // Assert
    assert_resolves_within(waiter, 1_000).await??;
    Ok(())
}

#[test]
fn test_with_resolution_reports_the_configured_granularity() {
    let clock = ManualClock::with_resolution(Duration::milliseconds(1));
    assert_eq!(clock.minimum_resolution(), Duration::milliseconds(1));
}
