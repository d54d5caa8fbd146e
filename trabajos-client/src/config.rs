//! Client configuration

/// Default capacity of the notification channel
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 64;

/// Client configuration for connecting to the item store
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Buffered notifications per subscriber before old ones are dropped
    pub notification_capacity: usize,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            notification_capacity: DEFAULT_NOTIFICATION_CAPACITY,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the notification channel capacity (at least 1)
    pub fn with_notification_capacity(mut self, capacity: usize) -> Self {
        self.notification_capacity = capacity.max(1);
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::HttpClient> {
        crate::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let config = ClientConfig::new("http://store:8080")
            .with_timeout(5)
            .with_notification_capacity(0);
        assert_eq!(config.base_url, "http://store:8080");
        assert_eq!(config.timeout, 5);
        assert_eq!(config.notification_capacity, 1);
        assert_eq!(
            ClientConfig::default().notification_capacity,
            DEFAULT_NOTIFICATION_CAPACITY
        );
    }
}
