//! Terminal failure kinds and machine-stable reason strings.

use landlink_chain::{SubmitError, WalletError};
use landlink_local::LocalServiceError;

/// Failure kinds that terminate a linking session.
///
/// Two kinds deliberately never appear here: a metadata decode failure
/// falls back to empty prior data at the signing stage, and a pin
/// failure degrades the success report instead of failing the session —
/// by then the chain write has already landed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    /// No wallet provider is injected
    #[error("no wallet provider available")]
    WalletUnavailable,
    /// A provider exists but exposes no usable account
    #[error("wallet is locked: no usable account")]
    WalletLocked,
    /// User declined the connection prompt
    #[error("connection request rejected by user")]
    UserRejected,
    /// Companion process fetch failed or answered garbage
    #[error("local service error: {0}")]
    LocalService(String),
    /// Wallet declined to sign the metadata update
    #[error("transaction rejected by wallet")]
    TransactionRejected,
    /// Send-time failure other than a signing refusal
    #[error("transaction submission failed: {0}")]
    Submission(String),
    /// The mined transaction failed on chain
    #[error("transaction failed on chain")]
    TransactionFailed,
}

impl LinkError {
    /// Short stable identifier sent to the companion process with the
    /// terminal notification. For log correlation, not for programmatic
    /// branching.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::WalletUnavailable => "wallet-unavailable",
            Self::WalletLocked => "wallet-locked",
            Self::UserRejected => "user-rejected",
            Self::LocalService(_) => "local-service",
            Self::TransactionRejected => "transaction-rejected",
            Self::Submission(_) => "submission-failed",
            Self::TransactionFailed => "transaction-failed",
        }
    }
}

impl From<WalletError> for LinkError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::Unavailable => Self::WalletUnavailable,
            WalletError::Locked => Self::WalletLocked,
            WalletError::UserRejected => Self::UserRejected,
        }
    }
}

impl From<LocalServiceError> for LinkError {
    fn from(err: LocalServiceError) -> Self {
        Self::LocalService(err.to_string())
    }
}

impl From<SubmitError> for LinkError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Rejected => Self::TransactionRejected,
            SubmitError::Submission(message) => Self::Submission(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_are_stable_slugs() {
        let kinds = [
            LinkError::WalletUnavailable,
            LinkError::WalletLocked,
            LinkError::UserRejected,
            LinkError::LocalService("x".to_string()),
            LinkError::TransactionRejected,
            LinkError::Submission("x".to_string()),
            LinkError::TransactionFailed,
        ];
        for kind in kinds {
            let reason = kind.reason();
            assert!(!reason.is_empty());
            assert!(reason
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '-'));
        }
    }

    #[test]
    fn wallet_errors_map_one_to_one() {
        assert_eq!(
            LinkError::from(WalletError::Unavailable),
            LinkError::WalletUnavailable
        );
        assert_eq!(LinkError::from(WalletError::Locked), LinkError::WalletLocked);
        assert_eq!(
            LinkError::from(WalletError::UserRejected),
            LinkError::UserRejected
        );
    }

    #[test]
    fn submit_rejection_maps_to_transaction_rejected() {
        assert_eq!(
            LinkError::from(SubmitError::Rejected),
            LinkError::TransactionRejected
        );
        assert_eq!(
            LinkError::from(SubmitError::Submission("boom".to_string())),
            LinkError::Submission("boom".to_string())
        );
    }
}
