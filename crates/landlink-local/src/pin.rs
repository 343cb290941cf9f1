//! Content pinning coordination.

use async_trait::async_trait;
use serde::Deserialize;

use landlink_coords::Coordinate;

/// Capability to request content retention from the pinning network.
#[async_trait]
pub trait Pinner: Send + Sync {
    /// Ask the pinning service to retain content for `peer_id`, keyed by
    /// a representative coordinate.
    ///
    /// Pin failure is soft: by the time a pin is requested the on-chain
    /// update has already landed, so every failure mode answers `false`
    /// instead of raising.
    async fn request_pin(&self, peer_id: &str, coordinate: Coordinate) -> bool;
}

#[derive(Debug, Deserialize)]
struct PinReply {
    ok: bool,
}

/// `reqwest`-backed [`Pinner`] against the pin-files endpoint.
#[derive(Debug, Clone)]
pub struct PinningCoordinator {
    http: reqwest::Client,
    base_url: String,
}

impl PinningCoordinator {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Pinner for PinningCoordinator {
    async fn request_pin(&self, peer_id: &str, coordinate: Coordinate) -> bool {
        let url = format!(
            "{}/pin-files/{peer_id}/{}/{}",
            self.base_url, coordinate.x, coordinate.y
        );
        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%err, "pin request failed");
                return false;
            }
        };
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "pin request refused");
            return false;
        }
        match response.json::<PinReply>().await {
            Ok(reply) => reply.ok,
            Err(err) => {
                tracing::warn!(%err, "malformed pin reply");
                false
            }
        }
    }
}
