use crate::decoder::Op;

/// Operand layout of an instruction's text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `rd, 0x%08x`
    Upper,
    /// `rd, <pcrel>`
    Jump,
    /// `rd, imm(rs1)`
    LoadLike,
    /// `rs2, imm(rs1)`
    Store,
    /// `rs1, rs2, <pcrel>`
    Branch,
    /// `rd, rs1, imm`
    RegImm,
    /// `rd, rs1, shamt` where shamt is the rs2 field
    Shift,
    /// `rd, rs1, rs2`
    Reg,
    /// mnemonic only
    Bare,
    /// `rd, csr, rs1`
    Csr,
    /// `rd, csr, 0x%08x` of the rs1 field
    CsrImm,
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Op,
    pub mnemonic: &'static str,
    pub format: Format,
}

const fn d(op: Op, mnemonic: &'static str, format: Format) -> InstrDesc {
    InstrDesc { op, mnemonic, format }
}

/// One entry per `Op`, in declaration order.
pub const TABLE: &[InstrDesc] = &[
    d(Op::Lui, "lui", Format::Upper),
    d(Op::Auipc, "auipc", Format::Upper),
    d(Op::Jal, "jal", Format::Jump),
    d(Op::Jalr, "jalr", Format::LoadLike),
    d(Op::Beq, "beq", Format::Branch),
    d(Op::Bne, "bne", Format::Branch),
    d(Op::Blt, "blt", Format::Branch),
    d(Op::Bge, "bge", Format::Branch),
    d(Op::Bltu, "bltu", Format::Branch),
    d(Op::Bgeu, "bgeu", Format::Branch),
    d(Op::Lb, "lb", Format::LoadLike),
    d(Op::Lh, "lh", Format::LoadLike),
    d(Op::Lw, "lw", Format::LoadLike),
    d(Op::Lbu, "lbu", Format::LoadLike),
    d(Op::Lhu, "lhu", Format::LoadLike),
    d(Op::Sb, "sb", Format::Store),
    d(Op::Sh, "sh", Format::Store),
    d(Op::Sw, "sw", Format::Store),
    d(Op::Addi, "addi", Format::RegImm),
    d(Op::Slti, "slti", Format::RegImm),
    d(Op::Sltiu, "sltiu", Format::RegImm),
    d(Op::Xori, "xori", Format::RegImm),
    d(Op::Ori, "ori", Format::RegImm),
    d(Op::Andi, "andi", Format::RegImm),
    d(Op::Slli, "slli", Format::Shift),
    d(Op::Srli, "srli", Format::Shift),
    d(Op::Srai, "srai", Format::Shift),
    d(Op::Add, "add", Format::Reg),
    d(Op::Sub, "sub", Format::Reg),
    d(Op::Sll, "sll", Format::Reg),
    d(Op::Slt, "slt", Format::Reg),
    d(Op::Sltu, "sltu", Format::Reg),
    d(Op::Xor, "xor", Format::Reg),
    d(Op::Srl, "srl", Format::Reg),
    d(Op::Sra, "sra", Format::Reg),
    d(Op::Or, "or", Format::Reg),
    d(Op::And, "and", Format::Reg),
    d(Op::Mul, "mul", Format::Reg),
    d(Op::Mulh, "mulh", Format::Reg),
    d(Op::Mulhsu, "mulhsu", Format::Reg),
    d(Op::Mulhu, "mulhu", Format::Reg),
    d(Op::Div, "div", Format::Reg),
    d(Op::Divu, "divu", Format::Reg),
    d(Op::Rem, "rem", Format::Reg),
    d(Op::Remu, "remu", Format::Reg),
    d(Op::Fence, "fence", Format::Bare),
    d(Op::FenceI, "fence.i", Format::Bare),
    d(Op::Ecall, "ecall", Format::Bare),
    d(Op::Ebreak, "ebreak", Format::Bare),
    d(Op::Uret, "uret", Format::Bare),
    d(Op::Sret, "sret", Format::Bare),
    d(Op::Mret, "mret", Format::Bare),
    d(Op::Wfi, "wfi", Format::Bare),
    d(Op::Csrrw, "csrrw", Format::Csr),
    d(Op::Csrrs, "csrrs", Format::Csr),
    d(Op::Csrrc, "csrrc", Format::Csr),
    d(Op::Csrrwi, "csrrwi", Format::CsrImm),
    d(Op::Csrrsi, "csrrsi", Format::CsrImm),
    d(Op::Csrrci, "csrrci", Format::CsrImm),
];

impl Op {
    pub fn desc(self) -> &'static InstrDesc {
        &TABLE[self as usize]
    }

    pub fn mnemonic(self) -> &'static str {
        self.desc().mnemonic
    }

    pub fn format(self) -> Format {
        self.desc().format
    }
}
