//! Client for invoking named agents on a remote hosted agent runtime.
//!
//! The crate has two halves. The invocation seam (`AgentRuntime`, with the
//! reqwest-backed [`RemoteAgentRuntime`]) submits a payload to an agent and
//! returns either a single response value or a lazy fragment stream. The
//! chunk interpreter ([`interpret`]) then maps each streamed fragment to
//! exactly one printable effect, never failing on malformed content.
//!
//! # Draining a streamed invocation
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use agent_runtime_client::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), InvokeError> {
//! let runtime = RemoteAgentRuntime::from_env()?;
//! let payload = AgentPayload::new("Say hello").streaming(true);
//! let request = InvokeRequest::new("agent-123", payload.to_bytes()?)
//!     .timeout(Duration::from_secs(300));
//!
//! match runtime.invoke(request).await? {
//!     InvokeResponse::Stream(stream) => {
//!         let mut writer = EffectWriter::stdout();
//!         let stats = drain_fragments(stream, &mut writer).await?;
//!         println!("\n{} fragments", stats.total_fragments());
//!     }
//!     InvokeResponse::Single(value) => println!("{value}"),
//! }
//! # Ok(())
//! # }
//! ```

/// Public error taxonomy for invocations.
pub mod errors;
/// Raw fragment model and structured-record decoding.
pub mod fragment;
/// The chunk interpreter and its per-invocation counters.
pub mod interpret;
/// Common imports for typical usage.
pub mod prelude;
/// HTTP-backed agent runtime implementation.
pub mod remote;
/// Effect rendering with immediate-flush semantics.
pub mod render;
/// Invocation seam: request/response types and the runtime trait.
pub mod runtime;
/// Fragment stream type and the draining loop.
pub mod stream;

pub use errors::InvokeError;
pub use fragment::{RawFragment, StructuredRecord};
pub use interpret::{Effect, StreamStats, StreamSummary, interpret};
pub use remote::{RemoteAgentRuntime, RemoteRuntimeConfig};
pub use render::EffectWriter;
pub use runtime::{AgentPayload, AgentRuntime, InvokeRequest, InvokeResponse};
pub use stream::{FragmentStream, drain_fragments};
