//! Chain-facing half of the linking session
//!
//! Narrow capability interfaces over the wallet and the chain, plus the
//! three components built on them:
//!
//! - [`WalletProvider`] / [`ChainClient`]: the external seams
//! - [`WalletSession`]: connection with a per-session cached account
//! - [`TransactionSubmitter`]: one batched metadata-update transaction
//! - [`TransactionWatcher`]: polls a submitted transaction to a terminal
//!   chain state
//!
//! Wallet key management and the chain client's transport are out of
//! scope; both arrive as trait objects.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod client;
mod contract;
mod provider;
mod submit;
mod wallet;
mod watch;

pub use client::{ChainClient, ChainError, TransactionRecord, TxId, TxOptions, TxStatus};
pub use contract::{ContractSpec, LAND_REGISTRY, METHOD_LAND_DATA, METHOD_UPDATE_MANY};
pub use provider::{Address, AddressError, WalletError, WalletProvider};
pub use submit::{SubmitError, TransactionSubmitter};
pub use wallet::WalletSession;
pub use watch::TransactionWatcher;
