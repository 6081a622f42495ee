use std::time::Duration;

use crate::errors::InvokeError;

/// Configuration for the remote agent runtime client.
#[derive(Clone, Debug)]
pub struct RemoteRuntimeConfig {
    /// API key used for bearer auth against the runtime.
    pub api_key: String,
    /// Runtime domain or base URL. A bare domain gets an `https://` scheme.
    pub base_url: String,
    /// Default invocation timeout, used when a request does not set its own.
    pub timeout: Duration,
}

impl RemoteRuntimeConfig {
    /// Creates a config with the default timeout.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        let base_url = if base_url.starts_with("http://") || base_url.starts_with("https://") {
            base_url
        } else {
            format!("https://{base_url}")
        };
        Self {
            api_key: api_key.into(),
            base_url,
            timeout: Duration::from_secs(300),
        }
    }

    /// Builds a config from `AGENT_RUNTIME_API_KEY` and
    /// `AGENT_RUNTIME_DOMAIN`.
    pub fn from_env() -> Result<Self, InvokeError> {
        let api_key = std::env::var("AGENT_RUNTIME_API_KEY").unwrap_or_default();
        if api_key.trim().is_empty() {
            return Err(InvokeError::config(
                "missing AGENT_RUNTIME_API_KEY for remote runtime",
            ));
        }
        let domain = std::env::var("AGENT_RUNTIME_DOMAIN").unwrap_or_default();
        if domain.trim().is_empty() {
            return Err(InvokeError::config(
                "missing AGENT_RUNTIME_DOMAIN for remote runtime",
            ));
        }
        Ok(Self::new(api_key, domain))
    }

    /// Overrides the default invocation timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub(crate) fn invocation_url(&self, agent_id: &str) -> String {
        format!(
            "{}/v1/agents/{agent_id}/invocations",
            self.base_url.trim_end_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_domain_gets_https_scheme() {
        let config = RemoteRuntimeConfig::new("k", "runtime.example.com");
        assert_eq!(config.base_url, "https://runtime.example.com");
    }

    #[test]
    fn explicit_scheme_is_preserved() {
        let config = RemoteRuntimeConfig::new("k", "http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn invocation_url_trims_trailing_slash() {
        let config = RemoteRuntimeConfig::new("k", "https://runtime.example.com/");
        assert_eq!(
            config.invocation_url("agent-1"),
            "https://runtime.example.com/v1/agents/agent-1/invocations"
        );
    }
}
