// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Futures backing the suspendable measurement combinators.
//!
//! Both futures take exactly two readings from the borrowed clock: one at
//! the first poll, one when the inner future completes. Whatever happens
//! in between - suspension, re-polls, executor migration - is included in
//! the measured span.

use crate::clock::Clock;
use crate::instant::ClockInstant;
use chronon_core::Duration;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};
use pin_project::pin_project;

/// Future returned by [`Clock::measure_future`].
#[pin_project]
#[must_use = "futures do nothing unless polled"]
pub struct Measure<'a, C, F>
where
    C: Clock,
    F: Future<Output = ()>,
{
    clock: &'a C,
    #[pin]
    work: F,
    started: Option<C::Instant>,
}

impl<'a, C, F> Measure<'a, C, F>
where
    C: Clock,
    F: Future<Output = ()>,
{
    pub(crate) fn new(clock: &'a C, work: F) -> Self {
        Self {
            clock,
            work,
            started: None,
        }
    }
}

impl<C, F> Future for Measure<'_, C, F>
where
    C: Clock,
    F: Future<Output = ()>,
{
    type Output = Duration;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let started = *this.started.get_or_insert_with(|| this.clock.now());

        match this.work.poll(cx) {
            Poll::Ready(()) => Poll::Ready(started.duration_to(this.clock.now())),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Future returned by [`Clock::try_measure_future`].
///
/// A failure of the inner future propagates unchanged; no duration is
/// produced on the error path.
#[pin_project]
#[must_use = "futures do nothing unless polled"]
pub struct TryMeasure<'a, C, F>
where
    C: Clock,
{
    clock: &'a C,
    #[pin]
    work: F,
    started: Option<C::Instant>,
}

impl<'a, C, F> TryMeasure<'a, C, F>
where
    C: Clock,
{
    pub(crate) fn new(clock: &'a C, work: F) -> Self {
        Self {
            clock,
            work,
            started: None,
        }
    }
}

impl<C, F, E> Future for TryMeasure<'_, C, F>
where
    C: Clock,
    F: Future<Output = Result<(), E>>,
{
    type Output = Result<Duration, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let started = *this.started.get_or_insert_with(|| this.clock.now());

        match this.work.poll(cx) {
            Poll::Ready(Ok(())) => Poll::Ready(Ok(started.duration_to(this.clock.now()))),
            Poll::Ready(Err(error)) => Poll::Ready(Err(error)),
            Poll::Pending => Poll::Pending,
        }
    }
}
