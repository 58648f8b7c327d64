/// Read-only view over the fields of one 32-bit RV32 instruction word.
///
/// Every bit pattern yields field values; whether they form a known encoding
/// is decided later by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields {
    word: u32,
}

impl Fields {
    pub fn new(word: u32) -> Self {
        Self { word }
    }

    pub fn word(&self) -> u32 {
        self.word
    }

    pub fn opcode(&self) -> u32 {
        self.word & 0x7F
    }

    pub fn rd(&self) -> u8 {
        ((self.word >> 7) & 0x1F) as u8
    }

    pub fn rs1(&self) -> u8 {
        ((self.word >> 15) & 0x1F) as u8
    }

    pub fn rs2(&self) -> u8 {
        ((self.word >> 20) & 0x1F) as u8
    }

    pub fn funct3(&self) -> u32 {
        (self.word >> 12) & 0x7
    }

    pub fn funct7(&self) -> u32 {
        (self.word >> 25) & 0x7F
    }

    /// Bits 31:20 as one unsigned field: the CSR address, or the
    /// funct7/rs2 pair that tells ecall, ebreak and the xRET family apart.
    pub fn funct7_rs2(&self) -> u32 {
        (self.word >> 20) & 0xFFF
    }

    // Raw groups the immediates are assembled from. Bit 31 is never part of
    // them; it only drives the sign fill.
    pub fn bits_30_25(&self) -> u32 {
        (self.word >> 25) & 0x3F
    }

    pub fn bits_24_21(&self) -> u32 {
        (self.word >> 21) & 0xF
    }

    pub fn bit_20(&self) -> u32 {
        (self.word >> 20) & 0x1
    }

    pub fn bits_19_12(&self) -> u32 {
        (self.word >> 12) & 0xFF
    }

    pub fn bits_11_8(&self) -> u32 {
        (self.word >> 8) & 0xF
    }

    pub fn bit_7(&self) -> u32 {
        (self.word >> 7) & 0x1
    }

    /// Forces the top `fill` bits to one when the word's bit 31 is set.
    fn with_sign(&self, fill: u32, raw: u32) -> i32 {
        if self.word & 0x8000_0000 == 0 {
            raw as i32
        } else {
            ((((1u32 << fill) - 1) << (32 - fill)) | raw) as i32
        }
    }

    /// I-type: imm[11:0] = word[31:20].
    pub fn imm_i(&self) -> i32 {
        self.with_sign(21, (self.bits_30_25() << 5) | (self.bits_24_21() << 1) | self.bit_20())
    }

    /// S-type: imm[11:5] = word[31:25], imm[4:0] = word[11:7].
    pub fn imm_s(&self) -> i32 {
        self.with_sign(21, (self.bits_30_25() << 5) | (self.bits_11_8() << 1) | self.bit_7())
    }

    /// B-type: imm[12|10:5|4:1|11], imm[0] = 0.
    pub fn imm_b(&self) -> i32 {
        let raw = (self.bit_7() << 11) | (self.bits_30_25() << 5) | (self.bits_11_8() << 1);
        self.with_sign(20, raw)
    }

    /// U-type: word[31:12] kept in place, low 12 bits zero.
    pub fn imm_u(&self) -> i32 {
        (self.word & 0xFFFF_F000) as i32
    }

    /// J-type: imm[20|10:1|11|19:12], imm[0] = 0.
    pub fn imm_j(&self) -> i32 {
        let raw = (self.bits_19_12() << 12)
            | (self.bit_20() << 11)
            | (self.bits_30_25() << 5)
            | (self.bits_24_21() << 1);
        self.with_sign(12, raw)
    }
}

impl From<u32> for Fields {
    fn from(word: u32) -> Self {
        Self::new(word)
    }
}
