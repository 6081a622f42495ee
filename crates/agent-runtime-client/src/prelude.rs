//! Common imports for typical client usage.
//!
//! Exports the types the diagnostic binaries and most callers touch, so
//! application code needs fewer import lines.
pub use crate::{
    AgentPayload, AgentRuntime, Effect, EffectWriter, FragmentStream, InvokeError, InvokeRequest,
    InvokeResponse, RawFragment, RemoteAgentRuntime, RemoteRuntimeConfig, StreamStats,
    StreamSummary, drain_fragments, interpret,
};
