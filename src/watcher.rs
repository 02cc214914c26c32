//! Trigger-chain block watching
//!
//! Subscribes to new heads, resolves each header to a block, and fires
//! the dispatcher when the target window is reached. Any subscription or
//! block-resolution failure is fatal to the watcher; there is no
//! resubscription, restarting requires a new watcher.

use eyre::{eyre, Context, Result};
use futures::StreamExt;

use alloy::providers::Provider;

/// The block heights that fire a dispatch: the target itself and the
/// following block, a one-shot retry window in case the first batch
/// missed or failed.
#[derive(Debug, Clone, Copy)]
pub struct TriggerWindow {
    target: u64,
    fired_at_target: bool,
    fired_at_retry: bool,
}

impl TriggerWindow {
    pub fn new(target: u64) -> Self {
        Self {
            target,
            fired_at_target: false,
            fired_at_retry: false,
        }
    }

    /// Record an observed height, returning it when it should fire a
    /// dispatch. Each matched height fires at most once; duplicate and
    /// out-of-window heights never fire.
    pub fn observe(&mut self, height: u64) -> Option<u64> {
        if height == self.target && !self.fired_at_target {
            self.fired_at_target = true;
            Some(height)
        } else if height == self.target + 1 && !self.fired_at_retry {
            self.fired_at_retry = true;
            Some(height)
        } else {
            None
        }
    }
}

/// Fires one batch of per-wallet submissions for a matched block height.
pub trait Dispatcher: Send + Sync {
    fn dispatch(&self, height: u64) -> impl std::future::Future<Output = ()> + Send;
}

/// Watches new heads on the trigger chain and dispatches when the target
/// window is hit.
pub struct BlockWatcher<D> {
    window: TriggerWindow,
    dispatcher: D,
}

impl<D: Dispatcher> BlockWatcher<D> {
    pub fn new(target_block: u64, dispatcher: D) -> Self {
        Self {
            window: TriggerWindow::new(target_block),
            dispatcher,
        }
    }

    async fn observe(&mut self, height: u64) {
        tracing::info!(height, "new block");
        if let Some(matched) = self.window.observe(height) {
            self.dispatcher.dispatch(matched).await;
        }
    }

    /// Subscribe to new heads and process them until the subscription
    /// fails. Never returns `Ok`: the error is surfaced so an operator
    /// can tell the run has stopped guarding the target block.
    pub async fn watch<P: Provider>(mut self, provider: P) -> Result<()> {
        let subscription = provider
            .subscribe_blocks()
            .await
            .context("failed to subscribe to trigger chain heads")?;
        let mut headers = subscription.into_stream();

        tracing::info!(target_block = self.window.target, "watching for target block");

        while let Some(header) = headers.next().await {
            let block = provider
                .get_block_by_hash(header.hash)
                .await
                .context("failed to resolve block by hash")?
                .ok_or_else(|| eyre!("block {} not found on trigger chain", header.hash))?;
            self.observe(block.header.number).await;
        }

        Err(eyre!("trigger chain header subscription closed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingDispatcher {
        heights: Arc<Mutex<Vec<u64>>>,
    }

    impl RecordingDispatcher {
        fn fired(&self) -> Vec<u64> {
            self.heights.lock().unwrap().clone()
        }
    }

    impl Dispatcher for RecordingDispatcher {
        async fn dispatch(&self, height: u64) {
            self.heights.lock().unwrap().push(height);
        }
    }

    #[tokio::test]
    async fn test_fires_at_target_and_retry_block() {
        let dispatcher = RecordingDispatcher::default();
        let mut watcher = BlockWatcher::new(100, dispatcher.clone());

        for height in [98, 99, 100, 101, 102, 103] {
            watcher.observe(height).await;
        }

        assert_eq!(dispatcher.fired(), vec![100, 101]);
    }

    #[tokio::test]
    async fn test_never_fires_below_target() {
        let dispatcher = RecordingDispatcher::default();
        let mut watcher = BlockWatcher::new(100, dispatcher.clone());

        for height in [97, 98, 99, 99, 98, 97] {
            watcher.observe(height).await;
        }

        assert!(dispatcher.fired().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_heights_fire_once() {
        let dispatcher = RecordingDispatcher::default();
        let mut watcher = BlockWatcher::new(100, dispatcher.clone());

        for height in [100, 100, 101, 101, 100] {
            watcher.observe(height).await;
        }

        assert_eq!(dispatcher.fired(), vec![100, 101]);
    }

    #[test]
    fn test_window_ignores_heights_past_retry() {
        let mut window = TriggerWindow::new(100);
        assert_eq!(window.observe(102), None);
        assert_eq!(window.observe(100), Some(100));
        assert_eq!(window.observe(101), Some(101));
        assert_eq!(window.observe(102), None);
    }
}
