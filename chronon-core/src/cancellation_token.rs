// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic cancellation token.
//!
//! A [`CancellationToken`] is the handle a caller passes into a clock's
//! sleep operation so a suspended task can be unblocked before its
//! deadline. Firing the token resolves every pending sleep that watches it
//! promptly, regardless of how much time remains.
//!
//! The token is built on [`event_listener::Event`] rather than any
//! particular runtime's primitives, so it behaves identically under any
//! executor.

use core::future::Future;
use core::pin::Pin;
use core::sync::atomic::{AtomicBool, Ordering};
use core::task::{Context, Poll};
use event_listener::{Event, EventListener};
use std::sync::Arc;

/// Clonable handle to a shared cancellation state.
///
/// All clones observe the same state: when `cancel()` is called on any of
/// them, every waiter on [`cancelled`](CancellationToken::cancelled) or
/// [`watch`](CancellationToken::watch) is notified.
///
/// # Example
///
/// ```
/// use chronon_core::CancellationToken;
///
/// # async fn example() {
/// let token = CancellationToken::new();
/// let watch = token.watch();
///
/// token.cancel();
/// watch.await; // resolves immediately once the token has fired
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    cancelled: AtomicBool,
    event: Event,
}

impl CancellationToken {
    /// Create a new token in the not-cancelled state.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                event: Event::new(),
            }),
        }
    }

    /// Fire the token, waking all waiters.
    ///
    /// Idempotent: calling it again has no further effect.
    pub fn cancel(&self) {
        // Set flag first with release ordering so every waiter that wakes
        // observes the cancelled state.
        self.inner.cancelled.store(true, Ordering::Release);
        self.inner.event.notify(usize::MAX);
    }

    /// Check whether the token has fired (non-blocking).
    ///
    /// # Example
    ///
    /// ```
    /// use chronon_core::CancellationToken;
    ///
    /// let token = CancellationToken::new();
    /// assert!(!token.is_cancelled());
    ///
    /// token.cancel();
    /// assert!(token.is_cancelled());
    /// ```
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }

    /// Wait until the token fires, borrowing the token.
    ///
    /// Resolves immediately if the token has already fired.
    pub fn cancelled(&self) -> Cancelled<'_> {
        Cancelled {
            token: self,
            listener: None,
        }
    }

    /// Wait until the token fires, holding the state alive.
    ///
    /// Unlike [`cancelled`](Self::cancelled), the returned future owns a
    /// handle to the shared state and is `'static`, so it can be embedded
    /// in sleep futures that outlive the caller's borrow of the token.
    #[must_use]
    pub fn watch(&self) -> CancellationWatch {
        CancellationWatch {
            inner: Arc::clone(&self.inner),
            listener: None,
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

/// Future returned by [`CancellationToken::cancelled()`].
pub struct Cancelled<'a> {
    token: &'a CancellationToken,
    listener: Option<EventListener>,
}

impl Future for Cancelled<'_> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        poll_fired(&this.token.inner, &mut this.listener, cx)
    }
}

/// Future returned by [`CancellationToken::watch()`].
///
/// Resolves when the originating token fires. Keeps the shared state alive
/// on its own, so it remains valid after every token clone is dropped (a
/// state that can no longer fire simply never resolves).
#[derive(Debug)]
pub struct CancellationWatch {
    inner: Arc<Inner>,
    listener: Option<EventListener>,
}

impl CancellationWatch {
    /// Non-blocking check mirroring [`CancellationToken::is_cancelled`].
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.load(Ordering::Acquire)
    }
}

impl Future for CancellationWatch {
    type Output = ();

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        poll_fired(&this.inner, &mut this.listener, cx)
    }
}

/// Shared poll body for both wait futures.
///
/// Registers a listener before the final state check, closing the race
/// where `cancel()` lands between an initial check and `listen()`.
fn poll_fired(
    inner: &Inner,
    listener: &mut Option<EventListener>,
    cx: &mut Context<'_>,
) -> Poll<()> {
    if inner.cancelled.load(Ordering::Acquire) {
        return Poll::Ready(());
    }

    if listener.is_none() {
        *listener = Some(inner.event.listen());

        if inner.cancelled.load(Ordering::Acquire) {
            return Poll::Ready(());
        }
    }

    match Pin::new(listener.as_mut().expect("listener registered above")).poll(cx) {
        Poll::Ready(()) => Poll::Ready(()),
        Poll::Pending => Poll::Pending,
    }
}
