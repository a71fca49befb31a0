use crate::registers::Reg;
use crate::word::sign_extend;

/// A fetched instruction word. Fields are read by bit position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instr(pub u16);

impl Instr {
    /// Bits 15:12
    #[inline]
    pub fn opcode(self) -> u8 {
        (self.0 >> 12) as u8
    }

    /// Bits 11:9. Destination for most ops, source for stores.
    #[inline]
    pub fn dr(self) -> Reg {
        Reg::from_field(self.0 >> 9)
    }

    /// Bits 8:6. First source, or base register.
    #[inline]
    pub fn sr1(self) -> Reg {
        Reg::from_field(self.0 >> 6)
    }

    /// Bits 2:0
    #[inline]
    pub fn sr2(self) -> Reg {
        Reg::from_field(self.0)
    }

    /// Bit 5, selects imm5 over SR2 in ADD/AND.
    #[inline]
    pub fn is_imm(self) -> bool {
        self.0 & 0x0020 != 0
    }

    /// Bit 11, selects PC-relative JSR over JSRR.
    #[inline]
    pub fn is_long_jsr(self) -> bool {
        self.0 & 0x0800 != 0
    }

    /// Bits 11:9 of BR: the n/z/p mask.
    #[inline]
    pub fn cond_bits(self) -> u16 {
        (self.0 >> 9) & 0b111
    }

    #[inline]
    pub fn imm5(self) -> u16 {
        sign_extend(self.0, 5)
    }

    #[inline]
    pub fn offset6(self) -> u16 {
        sign_extend(self.0, 6)
    }

    #[inline]
    pub fn offset9(self) -> u16 {
        sign_extend(self.0, 9)
    }

    #[inline]
    pub fn offset11(self) -> u16 {
        sign_extend(self.0, 11)
    }

    /// Bits 7:0 of TRAP.
    #[inline]
    pub fn trap_vect(self) -> u8 {
        (self.0 & 0xFF) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_immediate_fields() {
        // ADD R3, R0, #1
        let instr = Instr(0x1621);
        assert_eq!(instr.opcode(), 0x1);
        assert_eq!(instr.dr(), Reg::R3);
        assert_eq!(instr.sr1(), Reg::R0);
        assert!(instr.is_imm());
        assert_eq!(instr.imm5(), 1);
    }

    #[test]
    fn add_register_fields() {
        // ADD R3, R0, R1
        let instr = Instr(0x1601);
        assert!(!instr.is_imm());
        assert_eq!(instr.sr2(), Reg::R1);
    }

    #[test]
    fn negative_offsets() {
        // BRnzp #-1
        let instr = Instr(0x0fff);
        assert_eq!(instr.cond_bits(), 0b111);
        assert_eq!(instr.offset9(), 0xffff);
        // LDR R0, R1, #-32
        assert_eq!(Instr(0x6060).offset6(), 0xffe0);
        // JSR #-1024
        let jsr = Instr(0x4c00);
        assert!(jsr.is_long_jsr());
        assert_eq!(jsr.offset11(), 0xfc00);
        // AND R0, R0, #-16
        assert_eq!(Instr(0x5030).imm5(), 0xfff0);
    }

    #[test]
    fn trap_vector() {
        assert_eq!(Instr(0xf025).opcode(), 0xf);
        assert_eq!(Instr(0xf025).trap_vect(), 0x25);
    }
}
