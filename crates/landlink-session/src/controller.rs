//! The linking session controller.
//!
//! Drives one session through the pipeline: wallet connection, scene
//! metadata and content key retrieval, metadata encode/decode,
//! transaction submission and confirmation, content pinning. State is
//! reported at every step; the remaining pipeline is abandoned on the
//! first unrecoverable failure; the companion process learns the
//! terminal outcome exactly once.

use chrono::{DateTime, Utc};
use serde_json::json;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use ulid::Ulid;

use landlink_chain::{
    Address, ChainClient, TransactionSubmitter, TransactionWatcher, TxId, TxStatus,
    WalletProvider, WalletSession, METHOD_LAND_DATA,
};
use landlink_codec::LandData;
use landlink_coords::Coordinate;
use landlink_local::{LocalApi, Pinner};

use crate::config::SessionConfig;
use crate::error::LinkError;
use crate::guard::{UnloadGuard, UnloadWarning};
use crate::state::{validate_transition, LinkState};

/// Unique session identifier (ULID for sortability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionId(pub Ulid);

impl SessionId {
    /// Generate new session ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Terminal result of a session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// The chain update landed. `pin_ok` is false when pinning
    /// soft-failed afterwards.
    Completed {
        address: Address,
        tx_id: TxId,
        pin_ok: bool,
    },
    /// The session terminated before a confirmed chain update.
    Failed { error: LinkError },
}

/// Final report for one linking session.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub outcome: SessionOutcome,
}

struct Success {
    address: Address,
    tx_id: TxId,
    pin_ok: bool,
}

/// The top-level state machine sequencing the link pipeline.
///
/// One controller is one session: [`run`](Self::run) consumes it, which
/// makes the terminal companion notification structurally single-shot.
pub struct LinkSessionController {
    wallet: WalletSession,
    chain: Arc<dyn ChainClient>,
    local: Arc<dyn LocalApi>,
    pinner: Arc<dyn Pinner>,
    warning: Arc<dyn UnloadWarning>,
    config: SessionConfig,
    session_id: SessionId,
    state_tx: watch::Sender<LinkState>,
}

impl LinkSessionController {
    #[must_use]
    pub fn new(
        provider: Arc<dyn WalletProvider>,
        chain: Arc<dyn ChainClient>,
        local: Arc<dyn LocalApi>,
        pinner: Arc<dyn Pinner>,
        warning: Arc<dyn UnloadWarning>,
        config: SessionConfig,
    ) -> Self {
        let (state_tx, _) = watch::channel(LinkState::Connecting);
        Self {
            wallet: WalletSession::new(provider),
            chain,
            local,
            pinner,
            warning,
            config,
            session_id: SessionId::new(),
            state_tx,
        }
    }

    /// Subscribe to state changes. The view layer renders from this; the
    /// controller never knows who is watching.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LinkState> {
        self.state_tx.subscribe()
    }

    #[inline]
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Run the session to a terminal state.
    pub async fn run(self) -> SessionReport {
        let started_at = Utc::now();
        let timer = Instant::now();
        let mut guard = UnloadGuard::engage(Arc::clone(&self.warning));
        tracing::info!(session = %self.session_id, "link session started");

        let outcome = match self.drive().await {
            Ok(success) => {
                if success.pin_ok {
                    tracing::info!(session = %self.session_id, tx = %success.tx_id, "link session succeeded");
                } else {
                    tracing::warn!(
                        session = %self.session_id,
                        tx = %success.tx_id,
                        "pin failed after confirmed chain update"
                    );
                }
                self.publish(LinkState::Succeeded {
                    pin_ok: success.pin_ok,
                });
                let reason = if success.pin_ok { "ok" } else { "pin-failed" };
                self.local.notify_close(true, reason).await;
                SessionOutcome::Completed {
                    address: success.address,
                    tx_id: success.tx_id,
                    pin_ok: success.pin_ok,
                }
            }
            Err(error) => {
                tracing::error!(session = %self.session_id, %error, "link session failed");
                self.publish(LinkState::Failed {
                    error: error.clone(),
                });
                self.local.notify_close(false, error.reason()).await;
                SessionOutcome::Failed { error }
            }
        };

        guard.release();
        SessionReport {
            session_id: self.session_id,
            started_at,
            duration_ms: timer.elapsed().as_millis() as u64,
            outcome,
        }
    }

    async fn drive(&self) -> Result<Success, LinkError> {
        // Connecting is the channel's initial state; nothing to publish.
        let address = self.wallet.connect().await?;

        self.publish(LinkState::FetchingMetadata);
        let metadata = self.local.scene_metadata().await?;
        let descriptor = metadata.scene.parcels.join(";");
        let parcels = landlink_coords::parse(&descriptor)
            .map_err(|err| LinkError::LocalService(err.to_string()))?;
        let Some(first) = parcels.first() else {
            return Err(LinkError::LocalService(
                "scene metadata lists no parcels".to_string(),
            ));
        };
        tracing::debug!(parcels = parcels.len(), %first, "scene parcels resolved");

        self.publish(LinkState::FetchingContentKey);
        let content_key = self.local.content_key().await?;
        let peer_id = self.local.peer_id().await?;

        self.publish(LinkState::Signing);
        let data = self
            .current_land_data(first)
            .await
            .with_ipns(format!("ipns:{content_key}"));
        let submitter = TransactionSubmitter::new(Arc::clone(&self.chain), self.config.tx_options);
        let tx = submitter.submit(&parcels, &data).await?;

        self.publish(LinkState::Confirming {
            tx_id: tx.id.clone(),
        });
        let watcher = TransactionWatcher::new(Arc::clone(&self.chain))
            .with_poll_interval(self.config.poll_interval);
        if watcher.watch(&tx).await != TxStatus::Confirmed {
            return Err(LinkError::TransactionFailed);
        }

        // Commit point passed: the chain write is in. Pinning can only
        // degrade the outcome, not revert it.
        self.publish(LinkState::Pinning);
        let pin_ok = self.pinner.request_pin(&peer_id, first).await;

        Ok(Success {
            address,
            tx_id: tx.id,
            pin_ok,
        })
    }

    /// Existing on-chain metadata for the representative parcel.
    ///
    /// On-chain slots are frequently uninitialized, so an unreadable or
    /// absent blob falls back to empty metadata instead of failing the
    /// session. The decoded name, description, version, and opaque tail
    /// survive into the new payload; only the ipns reference changes.
    async fn current_land_data(&self, parcel: Coordinate) -> LandData {
        let value = match self
            .chain
            .call(METHOD_LAND_DATA, &[json!(parcel.x), json!(parcel.y)])
            .await
        {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(%err, %parcel, "existing land data unreadable, starting empty");
                return LandData::default();
            }
        };
        match landlink_codec::decode(value.as_str().unwrap_or("")) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(%err, %parcel, "existing land data undecodable, starting empty");
                LandData::default()
            }
        }
    }

    fn publish(&self, next: LinkState) {
        let from = self.state_tx.borrow().stage();
        debug_assert!(
            validate_transition(from, next.stage()).is_ok(),
            "illegal transition {from:?} -> {:?}",
            next.stage()
        );
        tracing::info!(session = %self.session_id, stage = ?next.stage(), "session state");
        self.state_tx.send_replace(next);
    }
}
