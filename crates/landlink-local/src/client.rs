//! HTTP client for the companion process endpoints.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::api::{LocalApi, LocalServiceError, SceneMetadata};

/// `reqwest`-backed [`LocalApi`] against the companion base URL.
#[derive(Debug, Clone)]
pub struct LocalClient {
    http: reqwest::Client,
    base_url: String,
}

impl LocalClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, LocalServiceError> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await
            .map_err(|err| LocalServiceError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(LocalServiceError::Status(status.as_u16()));
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, LocalServiceError> {
        self.get(path)
            .await?
            .json()
            .await
            .map_err(|err| LocalServiceError::Malformed(err.to_string()))
    }

    async fn get_text(&self, path: &str) -> Result<String, LocalServiceError> {
        let body = self
            .get(path)
            .await?
            .text()
            .await
            .map_err(|err| LocalServiceError::Malformed(err.to_string()))?;
        Ok(body.trim().to_string())
    }
}

#[async_trait]
impl LocalApi for LocalClient {
    async fn scene_metadata(&self) -> Result<SceneMetadata, LocalServiceError> {
        self.get_json("scene-metadata").await
    }

    async fn content_key(&self) -> Result<String, LocalServiceError> {
        self.get_text("content-key").await
    }

    async fn peer_id(&self) -> Result<String, LocalServiceError> {
        self.get_text("peer-id").await
    }

    async fn notify_close(&self, ok: bool, reason: &str) {
        let request = self
            .http
            .get(self.url("close"))
            .query(&[("ok", ok.to_string()), ("reason", reason.to_string())]);
        match request.send().await {
            Ok(response) if !response.status().is_success() => {
                tracing::debug!(status = %response.status(), "close notification refused");
            }
            Ok(_) => {}
            Err(err) => {
                tracing::debug!(%err, "close notification not delivered");
            }
        }
    }
}
