use crate::decoder::{Decoded, Decoder, Op};
use crate::fields::Fields;

/// Instruction family selected by the 7-bit major opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Lui,
    Auipc,
    Jal,
    Jalr,
    Branch,
    Load,
    Store,
    OpImm,
    Op,
    MiscMem,
    System,
}

impl Family {
    pub fn from_opcode(opcode: u32) -> Option<Self> {
        Some(match opcode {
            0b0110111 => Family::Lui,
            0b0010111 => Family::Auipc,
            0b1101111 => Family::Jal,
            0b1100111 => Family::Jalr,
            0b1100011 => Family::Branch,
            0b0000011 => Family::Load,
            0b0100011 => Family::Store,
            0b0010011 => Family::OpImm,
            0b0110011 => Family::Op,
            0b0001111 => Family::MiscMem,
            0b1110011 => Family::System,
            _ => return None,
        })
    }
}

/// RV32I base ISA with the M extension and the machine/supervisor/user
/// privileged instructions.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rv32Decoder;

impl Rv32Decoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for Rv32Decoder {
    fn decode(&self, raw32: u32) -> Option<Decoded> {
        let f = Fields::new(raw32);
        let decoded = match Family::from_opcode(f.opcode()) {
            Some(family) => decode_family(family, &f),
            None => None,
        };
        if decoded.is_none() {
            tracing::trace!("no matching encoding for {raw32:#010x}");
        }
        decoded
    }
}

fn decode_family(family: Family, f: &Fields) -> Option<Decoded> {
    match family {
        Family::Lui => Some(upper(Op::Lui, f)),
        Family::Auipc => Some(upper(Op::Auipc, f)),
        Family::Jal => Some(Decoded {
            op: Op::Jal,
            rd: f.rd(),
            rs1: 0,
            rs2: 0,
            imm: f.imm_j(),
            csr: 0,
        }),
        Family::Jalr => match f.funct3() {
            0b000 => Some(reg_imm(Op::Jalr, f)),
            _ => None,
        },
        Family::Branch => {
            let op = match f.funct3() {
                0b000 => Op::Beq,
                0b001 => Op::Bne,
                0b100 => Op::Blt,
                0b101 => Op::Bge,
                0b110 => Op::Bltu,
                0b111 => Op::Bgeu,
                _ => return None,
            };
            Some(Decoded { op, rd: 0, rs1: f.rs1(), rs2: f.rs2(), imm: f.imm_b(), csr: 0 })
        }
        Family::Load => {
            let op = match f.funct3() {
                0b000 => Op::Lb,
                0b001 => Op::Lh,
                0b010 => Op::Lw,
                0b100 => Op::Lbu,
                0b101 => Op::Lhu,
                _ => return None,
            };
            Some(reg_imm(op, f))
        }
        Family::Store => {
            let op = match f.funct3() {
                0b000 => Op::Sb,
                0b001 => Op::Sh,
                0b010 => Op::Sw,
                _ => return None,
            };
            Some(Decoded { op, rd: 0, rs1: f.rs1(), rs2: f.rs2(), imm: f.imm_s(), csr: 0 })
        }
        Family::OpImm => decode_op_imm(f),
        Family::Op => decode_op(f),
        Family::MiscMem => {
            let op = match f.funct3() {
                0b000 => Op::Fence,
                0b001 => Op::FenceI,
                _ => return None,
            };
            Some(bare(op))
        }
        Family::System => decode_system(f),
    }
}

fn decode_op_imm(f: &Fields) -> Option<Decoded> {
    let op = match f.funct3() {
        0b000 => Op::Addi,
        0b010 => Op::Slti,
        0b011 => Op::Sltiu,
        0b100 => Op::Xori,
        0b110 => Op::Ori,
        0b111 => Op::Andi,
        // slli does not look at funct7
        0b001 => return Some(shift(Op::Slli, f)),
        0b101 => {
            return match f.funct7() {
                0b0000000 => Some(shift(Op::Srli, f)),
                0b0100000 => Some(shift(Op::Srai, f)),
                _ => None,
            }
        }
        _ => return None,
    };
    Some(reg_imm(op, f))
}

fn decode_op(f: &Fields) -> Option<Decoded> {
    let op = match (f.funct7(), f.funct3()) {
        (0b0000000, 0b000) => Op::Add,
        (0b0000000, 0b001) => Op::Sll,
        (0b0000000, 0b010) => Op::Slt,
        (0b0000000, 0b011) => Op::Sltu,
        (0b0000000, 0b100) => Op::Xor,
        (0b0000000, 0b101) => Op::Srl,
        (0b0000000, 0b110) => Op::Or,
        (0b0000000, 0b111) => Op::And,
        (0b0000001, 0b000) => Op::Mul,
        (0b0000001, 0b001) => Op::Mulh,
        (0b0000001, 0b010) => Op::Mulhsu,
        (0b0000001, 0b011) => Op::Mulhu,
        (0b0000001, 0b100) => Op::Div,
        (0b0000001, 0b101) => Op::Divu,
        (0b0000001, 0b110) => Op::Rem,
        (0b0000001, 0b111) => Op::Remu,
        (0b0100000, 0b000) => Op::Sub,
        (0b0100000, 0b101) => Op::Sra,
        _ => return None,
    };
    Some(Decoded { op, rd: f.rd(), rs1: f.rs1(), rs2: f.rs2(), imm: 0, csr: 0 })
}

fn decode_system(f: &Fields) -> Option<Decoded> {
    let op = match f.funct3() {
        0b000 => {
            if f.rd() != 0 || f.rs1() != 0 {
                return None;
            }
            let op = match f.funct7_rs2() {
                0x000 => Op::Ecall,
                0x001 => Op::Ebreak,
                0x002 => Op::Uret,
                0x102 => Op::Sret,
                0x302 => Op::Mret,
                0x105 => Op::Wfi,
                _ => return None,
            };
            return Some(bare(op));
        }
        0b001 => Op::Csrrw,
        0b010 => Op::Csrrs,
        0b011 => Op::Csrrc,
        0b101 => Op::Csrrwi,
        0b110 => Op::Csrrsi,
        0b111 => Op::Csrrci,
        _ => return None,
    };
    Some(Decoded { op, rd: f.rd(), rs1: f.rs1(), rs2: 0, imm: 0, csr: f.imm_i() })
}

fn upper(op: Op, f: &Fields) -> Decoded {
    Decoded { op, rd: f.rd(), rs1: 0, rs2: 0, imm: f.imm_u(), csr: 0 }
}

fn reg_imm(op: Op, f: &Fields) -> Decoded {
    Decoded { op, rd: f.rd(), rs1: f.rs1(), rs2: 0, imm: f.imm_i(), csr: 0 }
}

fn shift(op: Op, f: &Fields) -> Decoded {
    Decoded { op, rd: f.rd(), rs1: f.rs1(), rs2: f.rs2(), imm: f.rs2() as i32, csr: 0 }
}

fn bare(op: Op) -> Decoded {
    Decoded { op, rd: 0, rs1: 0, rs2: 0, imm: 0, csr: 0 }
}
