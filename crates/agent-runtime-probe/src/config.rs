use std::time::Duration;

use agent_runtime_client::{AgentPayload, InvokeError, InvokeRequest};

/// Single-shot invocation timeout used by both binaries.
pub const INVOKE_TIMEOUT: Duration = Duration::from_secs(300);

/// Loads `.env` (when present) before reading probe configuration.
pub fn init_env() {
    dotenvy::dotenv().ok();
}

/// Target agent settings read from the process environment.
///
/// The runtime credentials (`AGENT_RUNTIME_API_KEY`, `AGENT_RUNTIME_DOMAIN`)
/// are read separately by `RemoteRuntimeConfig::from_env`.
#[derive(Clone, Debug)]
pub struct ProbeConfig {
    /// Agent to invoke, from `AGENT_RUNTIME_AGENT_ID`.
    pub agent_id: String,
    /// Agent-side API key forwarded into the invocation, from
    /// `AGENT_RUNTIME_AGENT_API_KEY`. Optional; forwarded only when set.
    pub agent_api_key: String,
}

impl ProbeConfig {
    /// Reads the probe configuration from the environment.
    pub fn from_env() -> Result<Self, InvokeError> {
        Ok(Self {
            agent_id: required_env("AGENT_RUNTIME_AGENT_ID")?,
            agent_api_key: std::env::var("AGENT_RUNTIME_AGENT_API_KEY").unwrap_or_default(),
        })
    }

    /// Builds the invocation request for this probe target.
    pub fn request(&self, payload: &AgentPayload) -> Result<InvokeRequest, InvokeError> {
        let mut request =
            InvokeRequest::new(&self.agent_id, payload.to_bytes()?).timeout(INVOKE_TIMEOUT);
        if !self.agent_api_key.trim().is_empty() {
            request = request.env_var("AGENT_RUNTIME_AGENT_API_KEY", &self.agent_api_key);
        }
        Ok(request)
    }
}

fn required_env(key: &str) -> Result<String, InvokeError> {
    let value = std::env::var(key).unwrap_or_default();
    if value.trim().is_empty() {
        return Err(InvokeError::config(format!("missing {key}")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_forwards_the_agent_key_only_when_set() {
        let with_key = ProbeConfig {
            agent_id: "agent-1".into(),
            agent_api_key: "k".into(),
        };
        let request = with_key
            .request(&AgentPayload::new("hi"))
            .expect("request");
        assert_eq!(request.timeout, Some(INVOKE_TIMEOUT));
        assert!(request.env_vars.contains_key("AGENT_RUNTIME_AGENT_API_KEY"));

        let without_key = ProbeConfig {
            agent_id: "agent-1".into(),
            agent_api_key: String::new(),
        };
        let request = without_key
            .request(&AgentPayload::new("hi"))
            .expect("request");
        assert!(request.env_vars.is_empty());
    }

    #[test]
    fn required_env_reports_the_missing_key() {
        let err = required_env("AGENT_PROBE_TEST_KEY_THAT_IS_UNSET")
            .expect_err("unset key should fail");
        assert!(matches!(err, InvokeError::Config(message)
            if message.contains("AGENT_PROBE_TEST_KEY_THAT_IS_UNSET")));
    }
}
