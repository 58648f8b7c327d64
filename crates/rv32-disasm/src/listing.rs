use std::fmt::Write as _;

use serde::Serialize;

use rv32_rs::disasm::{disassemble_with, FormatConfig};
use rv32_rs::isa::rv32im::Rv32Decoder;

use crate::model::{read_u32, Image};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Line {
    pub addr: u32,
    pub word: u32,
    /// `None` when the word matches no known encoding.
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct Listing {
    pub lines: Vec<Line>,
    /// First address in range whose word was not fully mapped.
    pub stopped_at: Option<u32>,
}

impl Listing {
    pub fn decoded(&self) -> usize {
        self.lines.iter().filter(|l| l.text.is_some()).count()
    }

    pub fn unknown(&self) -> usize {
        self.lines.len() - self.decoded()
    }
}

/// Linear sweep over `[start, end)` in 4-byte steps. `end` is 64-bit so the
/// last word of the address space can be included.
pub fn sweep(img: &Image, start: u32, end: u64, cfg: &FormatConfig) -> Listing {
    let dec = Rv32Decoder::new();
    let mut out = Listing::default();
    let mut pc = start;
    while u64::from(pc) < end {
        let Some(word) = read_u32(img, pc) else {
            out.stopped_at = Some(pc);
            break;
        };
        let text = disassemble_with(&dec, word, cfg).ok();
        out.lines.push(Line { addr: pc, word, text });
        match pc.checked_add(4) {
            Some(next) => pc = next,
            None => break,
        }
    }
    tracing::debug!(lines = out.lines.len(), unknown = out.unknown(), "sweep done");
    out
}

pub fn render_text(listing: &Listing, show_bytes: bool) -> String {
    let mut buf = String::new();
    for line in &listing.lines {
        let _ = write!(buf, "{:#010x}: ", line.addr);
        if show_bytes {
            for b in line.word.to_le_bytes() {
                let _ = write!(buf, "{b:02x} ");
            }
            buf.push_str("  ");
        }
        match &line.text {
            Some(text) => {
                let _ = writeln!(buf, "{text}");
            }
            None => {
                let _ = writeln!(buf, ".word {:#010x}", line.word);
            }
        }
    }
    if let Some(pc) = listing.stopped_at {
        let _ = writeln!(buf, "{pc:#010x}: <oob>");
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn image(words: &[u32]) -> Image {
        Image::from_bytes(0x100, words.iter().flat_map(|w| w.to_le_bytes()).collect())
    }

    #[test]
    fn sweep_marks_unknown_words() {
        let img = image(&[0x0000_0013, 0xFFFF_FFFF, 0x0000_8067]);
        let listing = sweep(&img, 0x100, 0x10C, &FormatConfig::default());
        assert_eq!(listing.lines.len(), 3);
        assert_eq!(listing.decoded(), 2);
        assert_eq!(listing.lines[1].text, None);
        assert_eq!(listing.stopped_at, None);
        assert_eq!(
            render_text(&listing, false),
            "0x00000100: addi     x0, x0, 0\n\
             0x00000104: .word 0xffffffff\n\
             0x00000108: jalr     x0, 0(x1)\n"
        );
    }

    #[test]
    fn sweep_stops_at_unmapped_bytes() {
        let img = image(&[0x0010_0073]);
        let listing = sweep(&img, 0x100, 0x110, &FormatConfig::default());
        assert_eq!(listing.lines.len(), 1);
        assert_eq!(listing.stopped_at, Some(0x104));
        assert_eq!(
            render_text(&listing, true),
            "0x00000100: 73 00 10 00   ebreak\n0x00000104: <oob>\n"
        );
    }

    #[test]
    fn sweep_reaches_the_last_word_of_memory() {
        let bytes = [0x13u32, 0x73].iter().flat_map(|w| w.to_le_bytes()).collect();
        let img = Image::from_bytes(0xFFFF_FFF8, bytes);
        let end = img.last_end().unwrap();
        assert_eq!(end, 1 << 32);
        let listing = sweep(&img, 0xFFFF_FFF8, end, &FormatConfig::default());
        assert_eq!(listing.lines.len(), 2);
        assert_eq!(listing.lines[1].addr, 0xFFFF_FFFC);
        assert_eq!(listing.lines[1].text.as_deref(), Some("ecall"));
        assert_eq!(listing.stopped_at, None);
    }
}
