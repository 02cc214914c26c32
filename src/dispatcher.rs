//! Concurrent per-wallet batch dispatch
//!
//! One submission task per wallet, all launched together and supervised:
//! every outcome is collected and logged, so failures are observable
//! instead of vanishing with their task. One wallet's failure never
//! blocks or cancels a sibling's submission.

use crate::submitter::{Operation, Submit, SubmissionOutcome};
use crate::watcher::Dispatcher;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Launches one submission per wallet and collects every outcome.
pub struct BatchDispatcher<S> {
    submitter: Arc<S>,
    wallet_keys: Arc<Vec<String>>,
    operation: Operation,
}

impl<S> Clone for BatchDispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            submitter: Arc::clone(&self.submitter),
            wallet_keys: Arc::clone(&self.wallet_keys),
            operation: self.operation,
        }
    }
}

impl<S: Submit + 'static> BatchDispatcher<S> {
    pub fn new(submitter: S, wallet_keys: Vec<String>, operation: Operation) -> Self {
        Self {
            submitter: Arc::new(submitter),
            wallet_keys: Arc::new(wallet_keys),
            operation,
        }
    }

    /// Number of wallets in each dispatch event.
    pub fn wallet_count(&self) -> usize {
        self.wallet_keys.len()
    }

    /// Run one submission task per wallet and collect every outcome.
    /// Outcomes arrive in completion order, not input order.
    pub async fn submit_all(&self) -> Vec<SubmissionOutcome> {
        let mut tasks = JoinSet::new();
        for key in self.wallet_keys.iter() {
            let submitter = Arc::clone(&self.submitter);
            let key = key.clone();
            let operation = self.operation;
            tasks.spawn(async move { submitter.submit(key, operation).await });
        }

        let mut outcomes = Vec::with_capacity(self.wallet_keys.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => {
                    log_outcome(&outcome);
                    outcomes.push(outcome);
                }
                Err(err) => tracing::error!(error = %err, "submission task failed to complete"),
            }
        }
        outcomes
    }
}

impl<S: Submit + 'static> Dispatcher for BatchDispatcher<S> {
    async fn dispatch(&self, height: u64) {
        tracing::info!(
            height,
            wallets = self.wallet_count(),
            operation = self.operation.kind(),
            "target window hit, dispatching batch"
        );

        // Detached: the retry batch at target+1 may start while this one
        // is still in flight.
        let batch = self.clone();
        tokio::spawn(async move {
            let outcomes = batch.submit_all().await;
            let sent = outcomes.iter().filter(|o| o.result.is_ok()).count();
            tracing::info!(
                height,
                total = outcomes.len(),
                sent,
                failed = outcomes.len() - sent,
                "dispatch complete"
            );
        });
    }
}

fn log_outcome(outcome: &SubmissionOutcome) {
    match &outcome.result {
        Ok(tx) => tracing::info!(
            wallet = %outcome.wallet_label(),
            operation = outcome.operation.kind(),
            tx = %tx,
            "transaction sent"
        ),
        Err(err) => tracing::warn!(
            wallet = %outcome.wallet_label(),
            operation = outcome.operation.kind(),
            error = %err,
            "submission failed"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SubmitError;
    use crate::signer::Wallet;
    use alloy::primitives::TxHash;
    use std::collections::HashSet;

    // Anvil's first three well-known dev keys.
    const KEYS: [&str; 3] = [
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d",
        "5de4111afa1a4b94908f83103eb1f1706367c2e68ca870fc3fb9a804cdab365a",
    ];

    /// Succeeds for every wallet except the one whose key matches
    /// `fail_key`, which is rejected.
    struct StubSubmitter {
        fail_key: Option<String>,
    }

    impl StubSubmitter {
        fn succeeding() -> Self {
            Self { fail_key: None }
        }

        fn failing_for(key: &str) -> Self {
            Self {
                fail_key: Some(key.to_string()),
            }
        }
    }

    impl Submit for StubSubmitter {
        async fn submit(&self, key: String, operation: Operation) -> SubmissionOutcome {
            let wallet = match Wallet::from_hex_key(&key) {
                Ok(wallet) => wallet,
                Err(err) => {
                    return SubmissionOutcome {
                        wallet: None,
                        operation,
                        result: Err(err),
                    }
                }
            };

            let result = if self.fail_key.as_deref() == Some(key.as_str()) {
                Err(SubmitError::Rejected("nonce too low".to_string()))
            } else {
                Ok(TxHash::repeat_byte(0xab))
            };

            SubmissionOutcome {
                wallet: Some(wallet.address()),
                operation,
                result,
            }
        }
    }

    fn keys() -> Vec<String> {
        KEYS.iter().map(|k| k.to_string()).collect()
    }

    #[tokio::test]
    async fn test_one_outcome_per_wallet() {
        let dispatcher = BatchDispatcher::new(StubSubmitter::succeeding(), keys(), Operation::Claim);

        let outcomes = dispatcher.submit_all().await;

        assert_eq!(outcomes.len(), 3);
        let addresses: HashSet<_> = outcomes.iter().filter_map(|o| o.wallet).collect();
        assert_eq!(addresses.len(), 3);
        assert!(outcomes.iter().all(|o| o.result.is_ok()));
    }

    #[tokio::test]
    async fn test_one_failure_leaves_siblings_untouched() {
        let failing = Wallet::from_hex_key(KEYS[1]).unwrap().address();
        let dispatcher =
            BatchDispatcher::new(StubSubmitter::failing_for(KEYS[1]), keys(), Operation::Claim);

        let outcomes = dispatcher.submit_all().await;

        assert_eq!(outcomes.len(), 3);
        let failed: Vec<_> = outcomes.iter().filter(|o| o.result.is_err()).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].wallet, Some(failing));
        assert_eq!(outcomes.iter().filter(|o| o.result.is_ok()).count(), 2);
    }

    #[tokio::test]
    async fn test_invalid_key_still_yields_an_outcome() {
        let mut wallet_keys = keys();
        wallet_keys.push("not-a-key".to_string());
        let dispatcher =
            BatchDispatcher::new(StubSubmitter::succeeding(), wallet_keys, Operation::Claim);

        let outcomes = dispatcher.submit_all().await;

        assert_eq!(outcomes.len(), 4);
        let invalid: Vec<_> = outcomes.iter().filter(|o| o.wallet.is_none()).collect();
        assert_eq!(invalid.len(), 1);
        assert!(matches!(
            invalid[0].result,
            Err(SubmitError::InvalidKey(_))
        ));
    }
}
