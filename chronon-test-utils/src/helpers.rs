// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Assertion helpers for sleep and measurement tests.

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, Waker};
use std::time::Duration;
use tokio::time::sleep;

/// Poll `future` exactly once against a no-op waker.
///
/// Deterministic companion to [`ManualClock`](crate::ManualClock): tests
/// poll, advance the clock, and poll again, with no executor in between.
pub fn poll_once<F>(future: &mut F) -> Poll<F::Output>
where
    F: Future + Unpin,
{
    let mut cx = Context::from_waker(Waker::noop());
    Pin::new(future).poll(&mut cx)
}

/// Await `future`, panicking if it takes longer than `timeout_ms`.
pub async fn assert_resolves_within<F>(future: F, timeout_ms: u64) -> F::Output
where
    F: Future,
{
    tokio::select! {
        output = future => output,
        () = sleep(Duration::from_millis(timeout_ms)) => {
            panic!("future did not resolve within {timeout_ms}ms");
        }
    }
}

/// Assert `future` stays pending for at least `timeout_ms`.
pub async fn assert_still_pending<F>(future: &mut F, timeout_ms: u64)
where
    F: Future + Unpin,
{
    tokio::select! {
        _ = future => {
            panic!("future resolved although it was expected to stay pending");
        }
        () = sleep(Duration::from_millis(timeout_ms)) => {}
    }
}
