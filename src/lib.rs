pub mod csr;
pub mod decoder;
pub mod disasm;
pub mod fields;
pub mod instructions;
pub mod port;
pub mod probe;

pub mod isa {
    pub mod rv32im; // RV32I + M + privileged subset
}

pub use decoder::{DecodeError, DecodeResult, Decoded, Decoder, Op};
pub use disasm::{disassemble, fmt_decoded, FormatConfig};
pub use fields::Fields;
pub use isa::rv32im::Rv32Decoder;
pub use port::{LineSource, QueueSource, WordSource};
pub use probe::{Poll, Probe, ProbeError};
