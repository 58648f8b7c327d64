use std::collections::VecDeque;
use std::io::BufRead;

use anyhow::{Context, Result};

/// Host-side supplier of raw input values, one per call.
///
/// Values may be wider than 32 bits; the probe masks them. `Ok(None)` means
/// the source is exhausted.
pub trait WordSource {
    fn next_value(&mut self) -> Result<Option<u64>>;
}

/// In-memory source, mostly for tests and replaying captured traces.
#[derive(Debug, Clone, Default)]
pub struct QueueSource {
    pub values: VecDeque<u64>,
}

impl QueueSource {
    pub fn new<I: IntoIterator<Item = u64>>(values: I) -> Self {
        Self { values: values.into_iter().collect() }
    }
}

impl WordSource for QueueSource {
    fn next_value(&mut self) -> Result<Option<u64>> {
        Ok(self.values.pop_front())
    }
}

/// Reads one value per line: `0x`-prefixed hex or decimal. Blank lines and
/// `#` comments are skipped.
pub struct LineSource<R> {
    reader: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line_no: 0, buf: String::new() }
    }
}

impl<R: BufRead> WordSource for LineSource<R> {
    fn next_value(&mut self) -> Result<Option<u64>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
            let text = self.buf.split('#').next().unwrap_or("").trim();
            if text.is_empty() {
                continue;
            }
            let line_no = self.line_no;
            let value = parse_value(text)
                .with_context(|| format!("line {line_no}: bad value {text:?}"))?;
            return Ok(Some(value));
        }
    }
}

/// Parses `0x`-prefixed hex (underscores allowed) or decimal.
pub fn parse_value(s: &str) -> Result<u64> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u64::from_str_radix(&hex.replace('_', ""), 16)?)
    } else {
        Ok(s.parse::<u64>()?)
    }
}
