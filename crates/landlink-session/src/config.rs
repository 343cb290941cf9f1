//! Session configuration.

use std::time::Duration;

use landlink_chain::TxOptions;

/// Linking session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the local companion process
    pub companion_url: String,
    /// Interval between transaction status polls
    pub poll_interval: Duration,
    /// Gas parameters for the metadata update
    pub tx_options: TxOptions,
}

impl SessionConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn with_companion_url(mut self, url: impl Into<String>) -> Self {
        self.companion_url = url.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_tx_options(mut self, tx_options: TxOptions) -> Self {
        self.tx_options = tx_options;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            companion_url: "http://localhost:4044".to_string(),
            poll_interval: Duration::from_secs(2),
            tx_options: TxOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = SessionConfig::new()
            .with_companion_url("http://localhost:9000")
            .with_poll_interval(Duration::from_millis(250));

        assert_eq!(config.companion_url, "http://localhost:9000");
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.tx_options, TxOptions::default());
    }
}
