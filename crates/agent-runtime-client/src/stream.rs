use std::io::Write;
use std::pin::Pin;

use futures::{Stream, StreamExt as _};
use tracing::debug;

use crate::errors::InvokeError;
use crate::fragment::RawFragment;
use crate::interpret::{StreamStats, interpret};
use crate::render::EffectWriter;

/// Lazy, single-pass, forward-only fragment sequence.
pub type FragmentStream =
    Pin<Box<dyn Stream<Item = Result<RawFragment, InvokeError>> + Send + 'static>>;

/// Drains a fragment stream through the interpreter in arrival order.
///
/// The loop owns the counters: each fragment is recorded before it is
/// interpreted and its effect after, so an `end` record summarizes everything
/// up to and including itself. Fragments are processed strictly one at a
/// time; the first stream-level error aborts the drain.
pub async fn drain_fragments<W: Write>(
    mut stream: FragmentStream,
    writer: &mut EffectWriter<W>,
) -> Result<StreamStats, InvokeError> {
    let mut stats = StreamStats::new();
    while let Some(item) = stream.next().await {
        let fragment = item?;
        stats.record_fragment();
        if stats.total_fragments() == 1 {
            debug!(latency = ?stats.time_to_first_fragment(), "first fragment arrived");
        }
        let effect = interpret(fragment, &stats);
        stats.record_effect(&effect);
        writer
            .write_effect(&effect)
            .map_err(|e| InvokeError::transport(format!("output write failed: {e}")))?;
    }
    debug!(
        total = stats.total_fragments(),
        content = stats.content_fragments(),
        "fragment stream exhausted"
    );
    Ok(stats)
}
