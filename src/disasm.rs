use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::csr;
use crate::decoder::{DecodeError, DecodeResult, Decoded, Decoder};
use crate::instructions::Format;
use crate::isa::rv32im::Rv32Decoder;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FormatConfig {
    pub mnemonic_width: usize, // column the first operand starts at
    pub csr_names: bool,       // false renders every CSR as $0x...
    /// Key CSR names by the raw 12-bit field instead of the sign-extended
    /// immediate, so that 0x800..=0xfff (`cycle`, `mhartid`, ...) resolve.
    pub unsigned_csr: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            mnemonic_width: 9,
            csr_names: true,
            unsigned_csr: false,
        }
    }
}

pub fn fmt_decoded(d: &Decoded) -> String {
    fmt_decoded_with(d, &FormatConfig::default())
}

pub fn fmt_decoded_with(d: &Decoded, cfg: &FormatConfig) -> String {
    let mn = d.op.mnemonic();
    let w = cfg.mnemonic_width;
    match d.op.format() {
        Format::Bare => mn.to_string(),
        Format::Upper => format!("{mn:<w$}x{}, {:#010x}", d.rd, d.imm as u32),
        Format::Jump => format!("{mn:<w$}x{}, {}", d.rd, pcrel(d.imm)),
        Format::LoadLike => format!("{mn:<w$}x{}, {}(x{})", d.rd, d.imm, d.rs1),
        Format::Store => format!("{mn:<w$}x{}, {}(x{})", d.rs2, d.imm, d.rs1),
        Format::Branch => format!("{mn:<w$}x{}, x{}, {}", d.rs1, d.rs2, pcrel(d.imm)),
        Format::RegImm => format!("{mn:<w$}x{}, x{}, {}", d.rd, d.rs1, d.imm),
        Format::Shift => format!("{mn:<w$}x{}, x{}, {}", d.rd, d.rs1, d.rs2),
        Format::Reg => format!("{mn:<w$}x{}, x{}, x{}", d.rd, d.rs1, d.rs2),
        Format::Csr => format!("{mn:<w$}x{}, {}, x{}", d.rd, csr_name(d.csr, cfg), d.rs1),
        // The rs1 field is printed as-is, as a 32-bit literal.
        Format::CsrImm => {
            format!("{mn:<w$}x{}, {}, 0x{:08x}", d.rd, csr_name(d.csr, cfg), d.rs1)
        }
    }
}

fn csr_name(addr: i32, cfg: &FormatConfig) -> Cow<'static, str> {
    let addr = if cfg.unsigned_csr { addr & 0xFFF } else { addr };
    if cfg.csr_names {
        csr::resolve(addr)
    } else {
        Cow::Owned(csr::numeric(addr))
    }
}

/// Renders a pc-relative byte offset as `.+0x%08x` or `.-0x%08x`.
pub fn pcrel(rel: i32) -> String {
    if rel >= 0 {
        format!(".+0x{:08x}", rel)
    } else {
        format!(".-0x{:08x}", rel.unsigned_abs())
    }
}

/// Decodes and formats one word with the default decoder and layout.
pub fn disassemble(word: u32) -> DecodeResult {
    disassemble_with(&Rv32Decoder::new(), word, &FormatConfig::default())
}

pub fn disassemble_with<D: Decoder>(dec: &D, word: u32, cfg: &FormatConfig) -> DecodeResult {
    dec.decode(word)
        .map(|d| fmt_decoded_with(&d, cfg))
        .ok_or(DecodeError::Unrecognized { word })
}
