//! Transaction confirmation polling.

use std::sync::Arc;
use std::time::Duration;

use crate::client::{ChainClient, TransactionRecord, TxStatus};

/// Default interval between status polls.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Observes a submitted transaction until it reaches a terminal chain
/// state.
pub struct TransactionWatcher {
    chain: Arc<dyn ChainClient>,
    poll_interval: Duration,
}

impl TransactionWatcher {
    #[must_use]
    pub fn new(chain: Arc<dyn ChainClient>) -> Self {
        Self {
            chain,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Poll until the transaction leaves `Pending`.
    ///
    /// There is no implicit timeout: a pending transaction may take an
    /// unbounded time to mine, and the session surfaces "pending" for as
    /// long as it does. The first non-pending status observed is
    /// returned (transitions are monotonic). A transport error on the
    /// status query is logged and polling continues; the query is an
    /// idempotent read.
    pub async fn watch(&self, tx: &TransactionRecord) -> TxStatus {
        loop {
            match self.chain.transaction_status(&tx.id).await {
                Ok(TxStatus::Pending) => {
                    tracing::debug!(tx = %tx.id, "transaction still pending");
                }
                Ok(status) => {
                    tracing::info!(tx = %tx.id, ?status, "transaction reached terminal state");
                    return status;
                }
                Err(err) => {
                    tracing::warn!(tx = %tx.id, %err, "status query failed, retrying");
                }
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ChainError, TxId, TxOptions};
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::Sequence;
    use serde_json::Value;

    mock! {
        pub Chain {}

        #[async_trait]
        impl ChainClient for Chain {
            async fn call(&self, method: &str, args: &[Value]) -> Result<Value, ChainError>;
            async fn send_transaction(
                &self,
                method: &str,
                args: &[Value],
                options: &TxOptions,
            ) -> Result<TxId, ChainError>;
            async fn transaction_status(&self, id: &TxId) -> Result<TxStatus, ChainError>;
        }
    }

    fn pending_record() -> TransactionRecord {
        TransactionRecord {
            id: TxId::new("0xabc"),
            status: TxStatus::Pending,
        }
    }

    fn watcher(chain: MockChain) -> TransactionWatcher {
        TransactionWatcher::new(Arc::new(chain)).with_poll_interval(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn returns_confirmed_after_pending_polls() {
        let mut chain = MockChain::new();
        let mut seq = Sequence::new();
        for _ in 0..2 {
            chain
                .expect_transaction_status()
                .times(1)
                .in_sequence(&mut seq)
                .returning(|_| Ok(TxStatus::Pending));
        }
        chain
            .expect_transaction_status()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(TxStatus::Confirmed));

        assert_eq!(watcher(chain).watch(&pending_record()).await, TxStatus::Confirmed);
    }

    #[tokio::test]
    async fn returns_failed_verdict() {
        let mut chain = MockChain::new();
        chain
            .expect_transaction_status()
            .returning(|_| Ok(TxStatus::Failed));

        assert_eq!(watcher(chain).watch(&pending_record()).await, TxStatus::Failed);
    }

    #[tokio::test]
    async fn keeps_polling_through_query_errors() {
        let mut chain = MockChain::new();
        let mut seq = Sequence::new();
        chain
            .expect_transaction_status()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(ChainError::Transport("connection reset".to_string())));
        chain
            .expect_transaction_status()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(TxStatus::Confirmed));

        assert_eq!(watcher(chain).watch(&pending_record()).await, TxStatus::Confirmed);
    }
}
