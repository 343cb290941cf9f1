//! Wallet session: connection with a per-session cached account.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::contract::LAND_REGISTRY;
use crate::provider::{Address, WalletError, WalletProvider};

/// Established wallet connection state for one linking session.
///
/// Owns the provider handle and the cached account, replacing any
/// process-wide shared connector. `connect` is idempotent within the
/// session: the first successful call prompts the provider, registers
/// the land registry interface, and caches the address; later calls
/// return the cached address without re-prompting.
pub struct WalletSession {
    provider: Arc<dyn WalletProvider>,
    cached: Mutex<Option<Address>>,
}

impl WalletSession {
    #[must_use]
    pub fn new(provider: Arc<dyn WalletProvider>) -> Self {
        Self {
            provider,
            cached: Mutex::new(None),
        }
    }

    /// Connect and return the session account.
    ///
    /// # Errors
    /// - [`WalletError::Unavailable`] when no provider is injected
    /// - [`WalletError::Locked`] when the provider exposes no usable
    ///   account
    /// - [`WalletError::UserRejected`] when the user declines the prompt
    pub async fn connect(&self) -> Result<Address, WalletError> {
        if let Some(address) = self.cached.lock().clone() {
            return Ok(address);
        }

        let accounts = self.provider.connect().await?;
        let address = accounts.into_iter().next().ok_or(WalletError::Locked)?;
        self.provider.register_contract(&LAND_REGISTRY).await?;

        tracing::debug!(%address, "wallet connected");
        *self.cached.lock() = Some(address.clone());
        Ok(address)
    }

    /// Cached session account, if connected.
    #[must_use]
    pub fn address(&self) -> Option<Address> {
        self.cached.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ContractSpec;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        accounts: Vec<Address>,
        failure: Option<WalletError>,
        prompts: AtomicUsize,
        registrations: AtomicUsize,
    }

    impl CountingProvider {
        fn with_accounts(accounts: Vec<Address>) -> Self {
            Self {
                accounts,
                failure: None,
                prompts: AtomicUsize::new(0),
                registrations: AtomicUsize::new(0),
            }
        }

        fn failing(failure: WalletError) -> Self {
            let mut provider = Self::with_accounts(Vec::new());
            provider.failure = Some(failure);
            provider
        }
    }

    #[async_trait]
    impl WalletProvider for CountingProvider {
        async fn connect(&self) -> Result<Vec<Address>, WalletError> {
            self.prompts.fetch_add(1, Ordering::SeqCst);
            match &self.failure {
                Some(failure) => Err(failure.clone()),
                None => Ok(self.accounts.clone()),
            }
        }

        async fn register_contract(&self, contract: &ContractSpec) -> Result<(), WalletError> {
            assert_eq!(contract.name, "LANDRegistry");
            self.registrations.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn test_address() -> Address {
        "0x89d24a6b4ccb1b6faa2625fe562bdd9a23260359".parse().unwrap()
    }

    #[tokio::test]
    async fn connect_caches_address_and_registers_once() {
        let provider = Arc::new(CountingProvider::with_accounts(vec![test_address()]));
        let session = WalletSession::new(provider.clone());

        let first = session.connect().await.unwrap();
        let second = session.connect().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.prompts.load(Ordering::SeqCst), 1);
        assert_eq!(provider.registrations.load(Ordering::SeqCst), 1);
        assert_eq!(session.address(), Some(first));
    }

    #[tokio::test]
    async fn connect_fails_locked_without_accounts() {
        let session = WalletSession::new(Arc::new(CountingProvider::with_accounts(Vec::new())));
        assert_eq!(session.connect().await, Err(WalletError::Locked));
        assert_eq!(session.address(), None);
    }

    #[tokio::test]
    async fn connect_propagates_provider_failure() {
        let session =
            WalletSession::new(Arc::new(CountingProvider::failing(WalletError::UserRejected)));
        assert_eq!(session.connect().await, Err(WalletError::UserRejected));
    }
}
