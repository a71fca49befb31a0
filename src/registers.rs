use std::cmp::Ordering;
use std::fmt;
use std::ops::{Index, IndexMut};

/// General purpose register, as encoded in a 3-bit instruction field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reg {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
}

impl Reg {
    pub const ALL: [Reg; 8] = [
        Reg::R0,
        Reg::R1,
        Reg::R2,
        Reg::R3,
        Reg::R4,
        Reg::R5,
        Reg::R6,
        Reg::R7,
    ];

    /// Register named by the low three bits of `field`.
    #[inline]
    pub fn from_field(field: u16) -> Reg {
        Self::ALL[(field & 0b111) as usize]
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", *self as u8)
    }
}

/// Condition code. Exactly one is held at any time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flag {
    N = 0b100,
    Z = 0b010,
    P = 0b001,
}

impl Flag {
    /// Flag describing `val` read as a two's-complement word.
    pub fn of(val: u16) -> Flag {
        match (val as i16).cmp(&0) {
            Ordering::Less => Flag::N,
            Ordering::Equal => Flag::Z,
            Ordering::Greater => Flag::P,
        }
    }

    #[inline]
    pub fn bits(self) -> u16 {
        self as u16
    }
}

/// Register file: R0-R7, program counter and condition code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registers {
    reg: [u16; 8],
    pc: u16,
    cond: Flag,
}

impl Default for Registers {
    fn default() -> Self {
        Registers {
            reg: [0; 8],
            pc: 0,
            cond: Flag::Z,
        }
    }
}

impl Registers {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn pc(&self) -> u16 {
        self.pc
    }

    #[inline]
    pub fn set_pc(&mut self, pc: u16) {
        self.pc = pc;
    }

    #[inline]
    pub fn cond(&self) -> Flag {
        self.cond
    }

    #[inline]
    pub fn set_cond(&mut self, flag: Flag) {
        self.cond = flag;
    }

    /// Write `val` to `reg` and derive the condition code from it.
    #[inline]
    pub fn set_with_flags(&mut self, reg: Reg, val: u16) {
        self[reg] = val;
        self.cond = Flag::of(val);
    }
}

impl Index<Reg> for Registers {
    type Output = u16;
    fn index(&self, reg: Reg) -> &u16 {
        &self.reg[reg as usize]
    }
}

impl IndexMut<Reg> for Registers {
    fn index_mut(&mut self, reg: Reg) -> &mut u16 {
        &mut self.reg[reg as usize]
    }
}
