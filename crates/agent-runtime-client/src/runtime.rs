use std::collections::HashMap;
use std::time::Duration;

use crate::errors::InvokeError;
use crate::stream::FragmentStream;

/// Payload submitted to the target agent.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AgentPayload {
    /// Prompt text handed to the agent.
    pub prompt: String,
    /// Requests a streamed response. Serialized only when set, so the
    /// non-streaming payload stays a bare `prompt` mapping.
    #[serde(default, skip_serializing_if = "is_false")]
    pub streaming: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl AgentPayload {
    /// Creates a non-streaming payload.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            streaming: false,
        }
    }

    /// Sets the streaming flag.
    pub fn streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    /// Serializes the payload for the invocation call.
    pub fn to_bytes(&self) -> Result<Vec<u8>, InvokeError> {
        serde_json::to_vec(self)
            .map_err(|e| InvokeError::config(format!("payload serialization failed: {e}")))
    }
}

/// One invocation of a named agent.
#[derive(Clone, Debug)]
pub struct InvokeRequest {
    /// Correlates this invocation in logs.
    pub invocation_id: uuid::Uuid,
    /// Target agent identifier.
    pub agent_id: String,
    /// Opaque payload bytes (typically a serialized `AgentPayload`).
    pub payload: Vec<u8>,
    /// Optional per-invocation timeout. This is the only cancellation path;
    /// there is no separate cancel signal.
    pub timeout: Option<Duration>,
    /// Environment variables forwarded to the remote agent.
    pub env_vars: HashMap<String, String>,
}

impl InvokeRequest {
    /// Creates a request for the given agent and payload.
    pub fn new(agent_id: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            invocation_id: uuid::Uuid::new_v4(),
            agent_id: agent_id.into(),
            payload,
            timeout: None,
            env_vars: HashMap::new(),
        }
    }

    /// Sets the invocation timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds one forwarded environment variable.
    pub fn env_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }
}

/// What an invocation returned: a single value, or a lazy single-pass
/// fragment sequence.
pub enum InvokeResponse {
    /// One complete response value.
    Single(serde_json::Value),
    /// Forward-only fragment stream.
    Stream(FragmentStream),
}

/// The invocation seam.
///
/// Implemented by `remote::RemoteAgentRuntime` for real runtimes and by
/// in-memory fakes in tests.
#[async_trait::async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Invokes the named agent and returns its response.
    async fn invoke(&self, request: InvokeRequest) -> Result<InvokeResponse, InvokeError>;
}
