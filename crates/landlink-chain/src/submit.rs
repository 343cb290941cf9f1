//! Batched metadata-update submission.

use serde_json::json;
use std::sync::Arc;

use landlink_codec::LandData;
use landlink_coords::SceneParcels;

use crate::client::{ChainClient, ChainError, TransactionRecord, TxOptions, TxStatus};
use crate::contract::METHOD_UPDATE_MANY;

/// Send-time failures.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Wallet declined to sign
    #[error("transaction rejected by wallet")]
    Rejected,
    /// Any other send-time failure (malformed payload, node rejection)
    #[error("transaction submission failed: {0}")]
    Submission(String),
}

/// Builds and sends the metadata-update transaction.
pub struct TransactionSubmitter {
    chain: Arc<dyn ChainClient>,
    options: TxOptions,
}

impl TransactionSubmitter {
    #[must_use]
    pub fn new(chain: Arc<dyn ChainClient>, options: TxOptions) -> Self {
        Self { chain, options }
    }

    /// Submit one batched call updating the metadata of every parcel.
    ///
    /// A single transaction keeps confirmation semantics atomic: either
    /// all parcels' updates land together or none do. Resolves at send
    /// time; waiting for mining is the watcher's job.
    pub async fn submit(
        &self,
        parcels: &SceneParcels,
        data: &LandData,
    ) -> Result<TransactionRecord, SubmitError> {
        let blob = landlink_codec::encode(data);
        let args = [json!(parcels.xs()), json!(parcels.ys()), json!(blob)];

        tracing::info!(parcels = parcels.len(), "submitting metadata update");
        let id = self
            .chain
            .send_transaction(METHOD_UPDATE_MANY, &args, &self.options)
            .await
            .map_err(|err| match err {
                ChainError::SignatureDenied => SubmitError::Rejected,
                other => SubmitError::Submission(other.to_string()),
            })?;

        tracing::info!(tx = %id, "metadata update sent");
        Ok(TransactionRecord {
            id,
            status: TxStatus::Pending,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::TxId;
    use async_trait::async_trait;
    use mockall::mock;
    use pretty_assertions::assert_eq;
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

    fn parcels() -> SceneParcels {
        landlink_coords::parse("1,1; 1,2").unwrap()
    }

    #[tokio::test]
    async fn submit_sends_one_batched_call() {
        let mut chain = MockChain::new();
        chain
            .expect_send_transaction()
            .withf(|method, args, options| {
                method == METHOD_UPDATE_MANY
                    && args[0] == json!([1, 1])
                    && args[1] == json!([1, 2])
                    && args[2]
                        .as_str()
                        .is_some_and(|blob| blob.contains("ipns:QmKey"))
                    && *options == TxOptions::default()
            })
            .times(1)
            .returning(|_, _, _| Ok(TxId::new("0xabc")));

        let submitter = TransactionSubmitter::new(Arc::new(chain), TxOptions::default());
        let record = submitter
            .submit(&parcels(), &LandData::new("plaza", "", "ipns:QmKey"))
            .await
            .unwrap();

        assert_eq!(record.id, TxId::new("0xabc"));
        assert_eq!(record.status, TxStatus::Pending);
    }

    #[tokio::test]
    async fn signature_denial_maps_to_rejected() {
        let mut chain = MockChain::new();
        chain
            .expect_send_transaction()
            .returning(|_, _, _| Err(ChainError::SignatureDenied));

        let submitter = TransactionSubmitter::new(Arc::new(chain), TxOptions::default());
        let err = submitter
            .submit(&parcels(), &LandData::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Rejected));
    }

    #[tokio::test]
    async fn node_rejection_maps_to_submission_error() {
        let mut chain = MockChain::new();
        chain
            .expect_send_transaction()
            .returning(|_, _, _| Err(ChainError::Node("out of gas".to_string())));

        let submitter = TransactionSubmitter::new(Arc::new(chain), TxOptions::default());
        let err = submitter
            .submit(&parcels(), &LandData::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Submission(msg) if msg.contains("out of gas")));
    }
}
