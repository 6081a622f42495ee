use std::collections::VecDeque;
use std::pin::Pin;
use std::time::Duration;

use futures::{Stream, StreamExt as _, stream};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap};
use tracing::debug;

use crate::errors::InvokeError;
use crate::fragment::RawFragment;
use crate::runtime::{AgentRuntime, InvokeRequest, InvokeResponse};
use crate::stream::FragmentStream;

use super::config::RemoteRuntimeConfig;
use super::transport::FrameDecoder;

type ByteStream =
    Pin<Box<dyn Stream<Item = Result<bytes::Bytes, reqwest::Error>> + Send + 'static>>;

/// Reqwest-backed implementation of the `AgentRuntime` seam.
pub struct RemoteAgentRuntime {
    client: reqwest::Client,
    config: RemoteRuntimeConfig,
}

impl RemoteAgentRuntime {
    /// Creates a runtime client from explicit configuration.
    pub fn new(config: RemoteRuntimeConfig) -> Result<Self, InvokeError> {
        if config.api_key.trim().is_empty() {
            return Err(InvokeError::config(
                "remote runtime api_key must not be empty",
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| InvokeError::config(format!("failed to build http client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Creates a runtime client from the process environment.
    pub fn from_env() -> Result<Self, InvokeError> {
        Self::new(RemoteRuntimeConfig::from_env()?)
    }

    fn effective_timeout(&self, request: &InvokeRequest) -> Duration {
        request.timeout.unwrap_or(self.config.timeout)
    }
}

#[async_trait::async_trait]
impl AgentRuntime for RemoteAgentRuntime {
    async fn invoke(&self, request: InvokeRequest) -> Result<InvokeResponse, InvokeError> {
        let url = self.config.invocation_url(&request.agent_id);
        let timeout = self.effective_timeout(&request);
        let body = serde_json::json!({
            "payload": String::from_utf8_lossy(&request.payload),
            "env_vars": request.env_vars,
        });
        debug!(
            invocation_id = %request.invocation_id,
            agent_id = %request.agent_id,
            timeout_s = timeout.as_secs(),
            "starting agent invocation"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .header(ACCEPT, "text/event-stream, application/json")
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| classify_request_error(&e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(error_for_status(status.as_u16(), body));
        }

        if is_event_stream(response.headers()) {
            debug!(invocation_id = %request.invocation_id, "runtime answered with a fragment stream");
            let bytes_stream: ByteStream = Box::pin(response.bytes_stream());
            Ok(InvokeResponse::Stream(fragment_stream(
                bytes_stream,
                timeout,
            )))
        } else {
            let text = response
                .text()
                .await
                .map_err(|e| InvokeError::transport(format!("failed to read response body: {e}")))?;
            let value = serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text));
            Ok(InvokeResponse::Single(value))
        }
    }
}

fn classify_request_error(err: &reqwest::Error, timeout: Duration) -> InvokeError {
    if err.is_timeout() {
        InvokeError::timeout(timeout.as_secs())
    } else {
        InvokeError::transport(format!("agent runtime request failed: {err}"))
    }
}

fn error_for_status(status: u16, body: String) -> InvokeError {
    match status {
        401 | 403 => InvokeError::auth(status, body),
        _ => InvokeError::remote(status, body),
    }
}

fn is_event_stream(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim_start().starts_with("text/event-stream"))
}

fn fragment_stream(bytes_stream: ByteStream, timeout: Duration) -> FragmentStream {
    struct State {
        bytes_stream: ByteStream,
        decoder: FrameDecoder,
        pending: VecDeque<RawFragment>,
        done: bool,
    }

    let stream = stream::try_unfold(
        State {
            bytes_stream,
            decoder: FrameDecoder::default(),
            pending: VecDeque::new(),
            done: false,
        },
        move |mut state| async move {
            loop {
                if let Some(fragment) = state.pending.pop_front() {
                    return Ok(Some((fragment, state)));
                }
                if state.done {
                    return Ok(None);
                }

                match state.bytes_stream.next().await {
                    Some(Ok(chunk)) => {
                        state.pending.extend(state.decoder.push_chunk(&chunk));
                    }
                    Some(Err(e)) => {
                        return Err(if e.is_timeout() {
                            InvokeError::timeout(timeout.as_secs())
                        } else {
                            InvokeError::transport(format!("streaming read failed: {e}"))
                        });
                    }
                    None => {
                        state.done = true;
                        state.pending.extend(state.decoder.finish());
                    }
                }
            }
        },
    );
    Box::pin(stream)
}
