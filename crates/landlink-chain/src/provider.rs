//! Wallet provider interface and account addresses.

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

use crate::contract::ContractSpec;

/// Externally-owned account address: `0x` followed by 40 hex characters.
///
/// Fetched once per session and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Malformed account address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid account address: '{0}'")]
pub struct AddressError(pub String);

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| AddressError(s.to_string()))?;
        let bytes = hex::decode(digits).map_err(|_| AddressError(s.to_string()))?;
        if bytes.len() != 20 {
            return Err(AddressError(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

/// Wallet connection failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalletError {
    /// No wallet provider is injected
    #[error("no wallet provider available")]
    Unavailable,
    /// A provider exists but exposes no usable account
    #[error("wallet is locked: no usable account")]
    Locked,
    /// User declined the connection prompt
    #[error("connection request rejected by user")]
    UserRejected,
}

impl From<AddressError> for WalletError {
    // an account we cannot even parse is not a usable account
    fn from(_: AddressError) -> Self {
        Self::Locked
    }
}

/// Capability interface over the browser-resident wallet.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Request a connection, prompting the user if needed. Returns the
    /// account addresses the provider exposes.
    async fn connect(&self) -> Result<Vec<Address>, WalletError>;

    /// Register a contract interface with the provider so subsequent
    /// transactions against it can be signed.
    async fn register_contract(&self, contract: &ContractSpec) -> Result<(), WalletError>;
}
