use serde::{Deserialize, Serialize};

/// Every mnemonic the RV32I/M decoder can produce.
///
/// The discriminants index `instructions::TABLE`, so new variants go there too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    // U / J
    Lui,
    Auipc,
    Jal,
    Jalr,
    // Branches
    Beq,
    Bne,
    Blt,
    Bge,
    Bltu,
    Bgeu,
    // Loads / stores
    Lb,
    Lh,
    Lw,
    Lbu,
    Lhu,
    Sb,
    Sh,
    Sw,
    // OP-IMM
    Addi,
    Slti,
    Sltiu,
    Xori,
    Ori,
    Andi,
    Slli,
    Srli,
    Srai,
    // OP
    Add,
    Sub,
    Sll,
    Slt,
    Sltu,
    Xor,
    Srl,
    Sra,
    Or,
    And,
    // M extension
    Mul,
    Mulh,
    Mulhsu,
    Mulhu,
    Div,
    Divu,
    Rem,
    Remu,
    // MISC-MEM
    Fence,
    FenceI,
    // SYSTEM
    Ecall,
    Ebreak,
    Uret,
    Sret,
    Mret,
    Wfi,
    Csrrw,
    Csrrs,
    Csrrc,
    Csrrwi,
    Csrrsi,
    Csrrci,
}

/// A recognised instruction with the operand fields its format prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub op: Op,
    pub rd: u8,
    pub rs1: u8,
    pub rs2: u8,
    pub imm: i32, // format-specific immediate, 0 when unused
    pub csr: i32, // CSR address as the sign-extended I immediate, 0 for non-CSR ops
}

pub trait Decoder {
    fn decode(&self, raw32: u32) -> Option<Decoded>;
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid instruction {word:#010x}")]
    Unrecognized { word: u32 },
}

/// Formatted mnemonic text, or the raw word that matched no encoding.
pub type DecodeResult = Result<String, DecodeError>;
