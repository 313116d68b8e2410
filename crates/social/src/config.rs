use std::env;
use std::time::Duration;

use url::Url;

use crate::error::SocialError;

pub const DEFAULT_API_URL: &str = "https://travel-social-network-api.onrender.com";
pub const FEED_PAGE_SIZE: u32 = 20;
pub const DEFAULT_COLLECTION: &str = "My Wishlist";
/// Feed owner used when nobody is signed in.
pub const ANONYMOUS_FEED_USER_ID: &str = "0b447f7b-9274-4a47-8ce2-4c113eb3cb6e";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub keepalive_interval: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, SocialError> {
        let parsed = Url::parse(base_url.trim())?;
        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(6),
            keepalive_interval: Duration::from_secs(10 * 60),
        })
    }

    pub fn from_env() -> Result<Self, SocialError> {
        let base_url = env::var("VOYAGE_API_URL")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let mut config = Self::new(&base_url)?;
        config.request_timeout = secs_from_env("VOYAGE_REQUEST_TIMEOUT_SECONDS", 60);
        config.connect_timeout = secs_from_env("VOYAGE_CONNECT_TIMEOUT_SECONDS", 6);
        config.keepalive_interval = secs_from_env("VOYAGE_KEEPALIVE_INTERVAL_SECONDS", 600);
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, SocialError> {
        let parsed = Url::parse(base_url.trim())?;
        self.base_url = parsed.as_str().trim_end_matches('/').to_string();
        Ok(self)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_keepalive_interval(mut self, interval: Duration) -> Self {
        self.keepalive_interval = interval;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn secs_from_env(key: &str, default: u64) -> Duration {
    Duration::from_secs(
        env::var(key)
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(default),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        let config = ClientConfig::new("http://127.0.0.1:8000/").unwrap();
        assert_eq!(config.base_url(), "http://127.0.0.1:8000");
        assert_eq!(
            config.endpoint("/api/ping"),
            "http://127.0.0.1:8000/api/ping"
        );
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn garbage_url_is_rejected() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(SocialError::InvalidUrl(_))
        ));
    }
}
