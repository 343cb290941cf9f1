//! Chain client interface and transaction types.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

/// Transaction identifier assigned by the chain at send time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxId(String);

impl TxId {
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Observed transaction state.
///
/// Transitions are monotonic: `Pending` moves to `Confirmed` or
/// `Failed` and never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxStatus {
    Pending,
    Confirmed,
    Failed,
}

impl TxStatus {
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// A submitted transaction as the orchestrator observes it. The chain
/// owns the record; the orchestrator never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub id: TxId,
    pub status: TxStatus,
}

/// Gas parameters for state-changing calls. Fixed defaults, overridable
/// by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOptions {
    /// Gas price in wei
    pub gas_price: u64,
    /// Gas limit for the batched update
    pub gas_limit: u64,
}

impl Default for TxOptions {
    fn default() -> Self {
        Self {
            gas_price: 30_000_000_000,
            gas_limit: 1_200_000,
        }
    }
}

/// Chain-side failures.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// Wallet refused to sign the transaction
    #[error("signature denied by wallet")]
    SignatureDenied,
    /// Node rejected the call or transaction
    #[error("node rejected request: {0}")]
    Node(String),
    /// Transport-level failure reaching the chain
    #[error("chain transport error: {0}")]
    Transport(String),
}

/// Read and write access to the land registry contract.
///
/// Arguments and return values travel as JSON values; the concrete
/// client owns ABI encoding and transport.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Read-only contract query.
    async fn call(&self, method: &str, args: &[Value]) -> Result<Value, ChainError>;

    /// State-changing contract call. Resolves at send time, before the
    /// transaction is mined.
    async fn send_transaction(
        &self,
        method: &str,
        args: &[Value],
        options: &TxOptions,
    ) -> Result<TxId, ChainError>;

    /// Current status of a submitted transaction.
    async fn transaction_status(&self, id: &TxId) -> Result<TxStatus, ChainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_the_only_non_terminal_status() {
        assert!(!TxStatus::Pending.is_terminal());
        assert!(TxStatus::Confirmed.is_terminal());
        assert!(TxStatus::Failed.is_terminal());
    }

    #[test]
    fn default_gas_is_nonzero() {
        let options = TxOptions::default();
        assert!(options.gas_price > 0);
        assert!(options.gas_limit > 0);
    }
}
