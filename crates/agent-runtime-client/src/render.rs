use std::io::{self, Write};

use crate::interpret::Effect;

/// Width of the rule lines used by the fixed banners.
pub const RULE_WIDTH: usize = 80;

/// Writes effects to an output sink with the flush semantics streaming
/// requires: partial text must be visible as it arrives, so every text write
/// is flushed immediately instead of waiting for a newline.
pub struct EffectWriter<W: Write> {
    out: W,
}

impl EffectWriter<io::Stdout> {
    /// Writer over standard output, the sole sink for effects.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> EffectWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Writes one effect.
    ///
    /// Text is written verbatim with no trailing newline; summary and error
    /// banners are fixed multi-line blocks. Every variant ends with a flush.
    pub fn write_effect(&mut self, effect: &Effect) -> io::Result<()> {
        match effect {
            Effect::Text(text) => {
                self.out.write_all(text.as_bytes())?;
                self.out.flush()
            }
            Effect::Summary(summary) => {
                writeln!(self.out)?;
                writeln!(self.out, "{}", "-".repeat(RULE_WIDTH))?;
                writeln!(self.out, "streaming completed")?;
                writeln!(self.out, "  total fragments:   {}", summary.total_fragments)?;
                writeln!(self.out, "  content fragments: {}", summary.content_fragments)?;
                writeln!(self.out, "  elapsed:           {:.2}s", summary.elapsed.as_secs_f64())?;
                self.out.flush()
            }
            Effect::Error(message) => {
                writeln!(self.out)?;
                writeln!(self.out, "stream error: {message}")?;
                self.out.flush()
            }
            Effect::Noop => Ok(()),
        }
    }

    /// Consumes the writer and returns the sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}
