//! Companion process interface types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Wire shape of the scene metadata endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneMetadata {
    pub scene: SceneManifest,
}

/// The scene's parcel layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneManifest {
    /// Parcel entries in `"x,y"` form
    pub parcels: Vec<String>,
    /// Base parcel, when the scene declares one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
}

/// Companion process failures. Fatal to the session; never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocalServiceError {
    /// Transport failure reaching the companion process
    #[error("local service unreachable: {0}")]
    Transport(String),
    /// Companion process answered with a non-success status
    #[error("local service returned status {0}")]
    Status(u16),
    /// Companion process answered with a payload we could not parse
    #[error("malformed local service response: {0}")]
    Malformed(String),
}

/// Narrow client surface over the local companion process.
#[async_trait]
pub trait LocalApi: Send + Sync {
    /// Fetch the scene's parcel metadata.
    async fn scene_metadata(&self) -> Result<SceneMetadata, LocalServiceError>;

    /// Fetch the content key the new metadata will point at.
    async fn content_key(&self) -> Result<String, LocalServiceError>;

    /// Fetch the peer id serving the scene's content.
    async fn peer_id(&self) -> Result<String, LocalServiceError>;

    /// Notify the companion process that the session ended.
    ///
    /// Best effort: delivery failures are logged and dropped, never
    /// surfaced to the session.
    async fn notify_close(&self, ok: bool, reason: &str);
}
