//! Client configuration.

use std::env;

/// Production service host.
pub const PRODUCTION_HOST: &str = "www.evernote.com";

/// Sandbox service host, used unless sandbox mode is disabled.
pub const SANDBOX_HOST: &str = "sandbox.evernote.com";

/// Configuration for a [`Client`](crate::Client).
///
/// Held immutably by the client; operations read it and never write it, so
/// two clients can never interfere through shared configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Use the sandbox host instead of production.
    pub sandbox: bool,
    /// OAuth consumer key issued for this application.
    pub consumer_key: String,
    /// OAuth consumer secret issued for this application.
    pub consumer_secret: String,
    /// Callback URL the authorization flow redirects to.
    pub callback_url: String,
    /// Overrides the sandbox/production host selection, e.g. to point at a
    /// local test service.
    pub service_url: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            sandbox: true,
            consumer_key: String::new(),
            consumer_secret: String::new(),
            callback_url: String::new(),
            service_url: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads:
    /// - `EVERNOTE_CONSUMER_KEY` / `EVERNOTE_CONSUMER_SECRET`
    /// - `EVERNOTE_CALLBACK_URL`
    /// - `EVERNOTE_SANDBOX` (default: true)
    /// - `EVERNOTE_SERVICE_URL` (optional host override)
    ///
    /// Absent credentials stay empty and fail as preconditions when an
    /// operation that needs them runs.
    pub fn from_env() -> Self {
        let sandbox = env::var("EVERNOTE_SANDBOX")
            .ok()
            .map(|s| s.to_lowercase() != "false" && s != "0")
            .unwrap_or(true);

        Self {
            sandbox,
            consumer_key: env::var("EVERNOTE_CONSUMER_KEY").unwrap_or_default(),
            consumer_secret: env::var("EVERNOTE_CONSUMER_SECRET").unwrap_or_default(),
            callback_url: env::var("EVERNOTE_CALLBACK_URL").unwrap_or_default(),
            service_url: env::var("EVERNOTE_SERVICE_URL").ok(),
        }
    }

    /// Service host for the configured environment.
    pub fn host(&self) -> &'static str {
        if self.sandbox { SANDBOX_HOST } else { PRODUCTION_HOST }
    }

    /// Base URL every operation is dispatched against.
    pub fn base_url(&self) -> String {
        match &self.service_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}", self.host()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_sandbox() {
        let config = ClientConfig::default();
        assert!(config.sandbox);
        assert_eq!(config.host(), SANDBOX_HOST);
        assert_eq!(config.base_url(), "https://sandbox.evernote.com");
    }

    #[test]
    fn test_disabling_sandbox_selects_production() {
        let config = ClientConfig {
            sandbox: false,
            ..ClientConfig::default()
        };
        assert_eq!(config.host(), PRODUCTION_HOST);
        assert_eq!(config.base_url(), "https://www.evernote.com");
    }

    #[test]
    fn test_service_url_overrides_host_selection() {
        let config = ClientConfig {
            service_url: Some("http://127.0.0.1:3000/".to_string()),
            ..ClientConfig::default()
        };
        assert_eq!(config.base_url(), "http://127.0.0.1:3000");
    }

    #[test]
    fn test_from_env_reads_sandbox_flag() {
        // SAFETY: This test is not run in parallel with other tests that read
        // EVERNOTE_SANDBOX.
        unsafe { env::set_var("EVERNOTE_SANDBOX", "false") };

        let config = ClientConfig::from_env();
        assert!(!config.sandbox);

        // SAFETY: This test is not run in parallel with other tests that read
        // EVERNOTE_SANDBOX.
        unsafe { env::remove_var("EVERNOTE_SANDBOX") };
    }
}
