//! One-entry memo between a host input port and the decoder.
//!
//! The probe remembers the last word it decoded and the result. Feeding it
//! the same word again returns the cached result without touching the
//! decoder; any other word is decoded and replaces the cache.

use anyhow::Error;

use crate::decoder::{DecodeResult, Decoder};
use crate::disasm::{disassemble_with, FormatConfig};
use crate::isa::rv32im::Rv32Decoder;
use crate::port::WordSource;

#[derive(thiserror::Error, Debug)]
pub enum ProbeError {
    #[error("input source failed after {polled} values: {source}")]
    Source {
        polled: u64,
        #[source]
        source: Error,
    },
}

/// Outcome of pulling one value from a `WordSource`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    Exhausted,
    Unchanged(u32),
    Decoded(u32),
}

#[derive(Debug, Clone)]
pub struct Probe<D: Decoder = Rv32Decoder> {
    dec: D,
    cfg: FormatConfig,
    last: Option<(u32, DecodeResult)>,
    polled: u64,
    decodes: u64,
}

impl Probe<Rv32Decoder> {
    pub fn new(cfg: FormatConfig) -> Self {
        Self::with_decoder(Rv32Decoder::new(), cfg)
    }
}

impl Default for Probe<Rv32Decoder> {
    fn default() -> Self {
        Self::new(FormatConfig::default())
    }
}

impl<D: Decoder> Probe<D> {
    pub fn with_decoder(dec: D, cfg: FormatConfig) -> Self {
        Self { dec, cfg, last: None, polled: 0, decodes: 0 }
    }

    /// Feeds one word. Returns the result and whether it was recomputed.
    pub fn update(&mut self, word: u32) -> (&DecodeResult, bool) {
        let (entry, recomputed) = match self.last.take() {
            Some((w, result)) if w == word => {
                tracing::debug!("unchanged input {word:#010x}, reusing cached result");
                ((w, result), false)
            }
            _ => {
                let result = disassemble_with(&self.dec, word, &self.cfg);
                tracing::trace!(?result, "decoded {word:#010x}");
                self.decodes += 1;
                ((word, result), true)
            }
        };
        let (_, result) = self.last.insert(entry);
        (&*result, recomputed)
    }

    /// Pulls the next value from `src`, masks it to 32 bits and feeds it.
    pub fn poll<S: WordSource>(&mut self, src: &mut S) -> Result<Poll, ProbeError> {
        let value = src
            .next_value()
            .map_err(|source| ProbeError::Source { polled: self.polled, source })?;
        let Some(value) = value else {
            return Ok(Poll::Exhausted);
        };
        self.polled += 1;
        let word = (value & 0xFFFF_FFFF) as u32;
        let (_, recomputed) = self.update(word);
        Ok(if recomputed { Poll::Decoded(word) } else { Poll::Unchanged(word) })
    }

    /// Last word fed, `None` before the first update.
    pub fn last_word(&self) -> Option<u32> {
        self.last.as_ref().map(|(w, _)| *w)
    }

    /// Result for `last_word`, `None` before the first update.
    pub fn result(&self) -> Option<&DecodeResult> {
        self.last.as_ref().map(|(_, r)| r)
    }

    /// Number of times the decoder actually ran.
    pub fn decodes(&self) -> u64 {
        self.decodes
    }

    pub fn config(&self) -> &FormatConfig {
        &self.cfg
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::DecodeError;
    use crate::port::QueueSource;

    #[test]
    fn first_update_decodes_even_for_zero() {
        let mut probe = Probe::new(FormatConfig::default());
        assert!(probe.result().is_none());
        let (result, recomputed) = probe.update(0);
        assert!(recomputed);
        assert_eq!(result, &Err(DecodeError::Unrecognized { word: 0 }));
        assert_eq!(probe.last_word(), Some(0));
    }

    #[test]
    fn repeated_word_hits_cache() {
        let mut probe = Probe::new(FormatConfig::default());
        probe.update(0x13);
        let (result, recomputed) = probe.update(0x13);
        assert!(!recomputed);
        assert_eq!(result.as_deref(), Ok("addi     x0, x0, 0"));
        assert_eq!(probe.decodes(), 1);
    }

    #[test]
    fn poll_masks_wide_values() {
        let mut probe = Probe::new(FormatConfig::default());
        let mut src = QueueSource::new([0x1_0000_0013, 0x13, 0x0010_0073]);
        assert_eq!(probe.poll(&mut src).unwrap(), Poll::Decoded(0x13));
        assert_eq!(probe.poll(&mut src).unwrap(), Poll::Unchanged(0x13));
        assert_eq!(probe.poll(&mut src).unwrap(), Poll::Decoded(0x0010_0073));
        assert_eq!(probe.result().unwrap().as_deref(), Ok("ebreak"));
        assert_eq!(probe.poll(&mut src).unwrap(), Poll::Exhausted);
    }

    #[test]
    fn source_errors_are_wrapped() {
        struct Broken;
        impl WordSource for Broken {
            fn next_value(&mut self) -> anyhow::Result<Option<u64>> {
                anyhow::bail!("port disconnected")
            }
        }
        let mut probe = Probe::new(FormatConfig::default());
        let err = probe.poll(&mut Broken).unwrap_err();
        assert!(err.to_string().contains("port disconnected"));
        assert!(probe.last_word().is_none());
    }
}
