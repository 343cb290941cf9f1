//! Testing utilities for the landlink workspace
//!
//! Scripted fakes for the wallet, chain, local-service, and pinning
//! seams, plus a tracing initializer for integration tests.

#![allow(missing_docs)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use landlink_chain::{
    Address, ChainClient, ChainError, ContractSpec, TxId, TxOptions, TxStatus, WalletError,
    WalletProvider,
};
use landlink_coords::Coordinate;
use landlink_local::{LocalApi, LocalServiceError, Pinner, SceneManifest, SceneMetadata};

/// Account every fake wallet answers with.
pub const TEST_ADDRESS: &str = "0x89d24a6b4ccb1b6faa2625fe562bdd9a23260359";

/// Install a fmt subscriber honoring `RUST_LOG`; repeated calls are fine.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn test_address() -> Address {
    TEST_ADDRESS.parse().unwrap()
}

/// Wallet provider with a fixed account list, counting prompts.
pub struct StaticWallet {
    accounts: Vec<Address>,
    failure: Option<WalletError>,
    prompts: AtomicUsize,
    registered: Mutex<Vec<String>>,
}

impl StaticWallet {
    pub fn single() -> Self {
        Self {
            accounts: vec![test_address()],
            failure: None,
            prompts: AtomicUsize::new(0),
            registered: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self {
            accounts: Vec::new(),
            ..Self::single()
        }
    }

    pub fn failing(failure: WalletError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::single()
        }
    }

    pub fn prompts(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }

    pub fn registered_contracts(&self) -> Vec<String> {
        self.registered.lock().clone()
    }
}

#[async_trait]
impl WalletProvider for StaticWallet {
    async fn connect(&self) -> Result<Vec<Address>, WalletError> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(failure) => Err(failure.clone()),
            None => Ok(self.accounts.clone()),
        }
    }

    async fn register_contract(&self, contract: &ContractSpec) -> Result<(), WalletError> {
        self.registered.lock().push(contract.name.to_string());
        Ok(())
    }
}

/// One transaction the fake chain accepted.
#[derive(Debug, Clone)]
pub struct SentTransaction {
    pub method: String,
    pub args: Vec<Value>,
    pub options: TxOptions,
}

/// Chain client with seeded land data and a scripted status sequence.
#[derive(Default)]
pub struct ScriptedChain {
    land_data: Mutex<HashMap<(i64, i64), String>>,
    statuses: Mutex<VecDeque<TxStatus>>,
    sent: Mutex<Vec<SentTransaction>>,
    send_failure: Mutex<Option<ChainError>>,
}

impl ScriptedChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pending once, then confirmed.
    pub fn confirming() -> Self {
        Self::new().with_statuses([TxStatus::Pending, TxStatus::Confirmed])
    }

    /// Pending once, then failed on chain.
    pub fn failing_on_chain() -> Self {
        Self::new().with_statuses([TxStatus::Pending, TxStatus::Failed])
    }

    pub fn with_land_data(self, x: i64, y: i64, blob: impl Into<String>) -> Self {
        self.land_data.lock().insert((x, y), blob.into());
        self
    }

    pub fn with_statuses(self, statuses: impl IntoIterator<Item = TxStatus>) -> Self {
        self.statuses.lock().extend(statuses);
        self
    }

    pub fn with_send_failure(self, failure: ChainError) -> Self {
        *self.send_failure.lock() = Some(failure);
        self
    }

    pub fn sent(&self) -> Vec<SentTransaction> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl ChainClient for ScriptedChain {
    async fn call(&self, _method: &str, args: &[Value]) -> Result<Value, ChainError> {
        let x = args.first().and_then(Value::as_i64).unwrap_or_default();
        let y = args.get(1).and_then(Value::as_i64).unwrap_or_default();
        let blob = self.land_data.lock().get(&(x, y)).cloned().unwrap_or_default();
        Ok(Value::String(blob))
    }

    async fn send_transaction(
        &self,
        method: &str,
        args: &[Value],
        options: &TxOptions,
    ) -> Result<TxId, ChainError> {
        if let Some(failure) = self.send_failure.lock().take() {
            return Err(failure);
        }
        self.sent.lock().push(SentTransaction {
            method: method.to_string(),
            args: args.to_vec(),
            options: *options,
        });
        Ok(TxId::new("0xscripted"))
    }

    async fn transaction_status(&self, _id: &TxId) -> Result<TxStatus, ChainError> {
        Ok(self
            .statuses
            .lock()
            .pop_front()
            .unwrap_or(TxStatus::Confirmed))
    }
}

/// Companion process fake with per-endpoint failure switches.
pub struct FakeLocal {
    parcels: Vec<String>,
    content_key: String,
    peer_id: String,
    fail_metadata: bool,
    fail_content_key: bool,
    fail_peer_id: bool,
    metadata_calls: AtomicUsize,
    closes: Mutex<Vec<(bool, String)>>,
}

impl FakeLocal {
    pub fn with_parcels(parcels: &[&str]) -> Self {
        Self {
            parcels: parcels.iter().map(ToString::to_string).collect(),
            content_key: "QmContentKey".to_string(),
            peer_id: "QmPeer".to_string(),
            fail_metadata: false,
            fail_content_key: false,
            fail_peer_id: false,
            metadata_calls: AtomicUsize::new(0),
            closes: Mutex::new(Vec::new()),
        }
    }

    pub fn with_content_key(mut self, content_key: impl Into<String>) -> Self {
        self.content_key = content_key.into();
        self
    }

    pub fn failing_metadata(mut self) -> Self {
        self.fail_metadata = true;
        self
    }

    pub fn failing_content_key(mut self) -> Self {
        self.fail_content_key = true;
        self
    }

    pub fn failing_peer_id(mut self) -> Self {
        self.fail_peer_id = true;
        self
    }

    pub fn metadata_calls(&self) -> usize {
        self.metadata_calls.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> Vec<(bool, String)> {
        self.closes.lock().clone()
    }
}

#[async_trait]
impl LocalApi for FakeLocal {
    async fn scene_metadata(&self) -> Result<SceneMetadata, LocalServiceError> {
        self.metadata_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_metadata {
            return Err(LocalServiceError::Status(500));
        }
        Ok(SceneMetadata {
            scene: SceneManifest {
                parcels: self.parcels.clone(),
                base: self.parcels.first().cloned(),
            },
        })
    }

    async fn content_key(&self) -> Result<String, LocalServiceError> {
        if self.fail_content_key {
            return Err(LocalServiceError::Status(500));
        }
        Ok(self.content_key.clone())
    }

    async fn peer_id(&self) -> Result<String, LocalServiceError> {
        if self.fail_peer_id {
            return Err(LocalServiceError::Status(500));
        }
        Ok(self.peer_id.clone())
    }

    async fn notify_close(&self, ok: bool, reason: &str) {
        self.closes.lock().push((ok, reason.to_string()));
    }
}

/// Pinner with a fixed verdict, counting requests.
pub struct FakePinner {
    verdict: bool,
    requests: AtomicUsize,
}

impl FakePinner {
    pub fn succeeding() -> Self {
        Self {
            verdict: true,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            verdict: false,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pinner for FakePinner {
    async fn request_pin(&self, _peer_id: &str, _coordinate: Coordinate) -> bool {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.verdict
    }
}
