// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use chronon_core::CancellationToken;

#[test]
fn test_new_token_is_not_cancelled() {
    let token = CancellationToken::new();
    assert!(!token.is_cancelled());
}

#[test]
fn test_cancel_is_idempotent_and_visible_to_clones() {
    // Arrange
    let token = CancellationToken::new();
    let clone = token.clone();

    // Act
    token.cancel();
    token.cancel();

    // Assert
    assert!(token.is_cancelled());
    assert!(clone.is_cancelled());
}

#[tokio::test]
async fn test_cancelled_resolves_immediately_on_a_fired_token() {
    let token = CancellationToken::new();
    token.cancel();

    token.cancelled().await;
    token.watch().await;
}

#[tokio::test]
async fn test_watch_resolves_when_another_clone_fires() -> anyhow::Result<()> {
    // Arrange
    let token = CancellationToken::new();
    let watch = token.watch();
    let firing = token.clone();

    let waiter = tokio::spawn(async move {
        watch.await;
    });

    // Act
    firing.cancel();

    // Assert
    waiter.await?;
    Ok(())
}

#[tokio::test]
async fn test_watch_outlives_every_token_clone() {
    // Arrange
    let token = CancellationToken::new();
    let mut watch = token.watch();

    // Act: the watch holds the shared state on its own
    token.cancel();
    drop(token);

    // Assert
    assert!(watch.is_cancelled());
    (&mut watch).await;
}
