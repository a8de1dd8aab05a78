// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chronon_test_utils::helpers::{assert_resolves_within, assert_still_pending, poll_once};
use core::future::{pending, ready};
use std::task::Poll;

#[test]
fn test_poll_once_resolves_a_ready_future() {
    let mut future = ready(42);
    assert_eq!(poll_once(&mut future), Poll::Ready(42));
}

#[test]
fn test_poll_once_leaves_a_pending_future_pending() {
    let mut future = pending::<()>();
    assert!(poll_once(&mut future).is_pending());
}

#[tokio::test]
async fn test_assert_resolves_within_returns_the_output() {
    let output = assert_resolves_within(ready("done"), 100).await;
    assert_eq!(output, "done");
}

#[tokio::test]
async fn test_assert_still_pending_accepts_a_stuck_future() {
    let mut future = pending::<()>();
    assert_still_pending(&mut future, 10).await;
}
