//! Built-in service routines reached through the TRAP opcode.

use std::fmt;

/// Known trap vectors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrapVect {
    /// Read one character into R0
    Getc = 0x20,
    /// Write the character in R0
    Out = 0x21,
    /// Write a zero-terminated string of one character per word
    Puts = 0x22,
    /// Prompt, read and echo one character into R0
    In = 0x23,
    /// Write a zero-terminated string of two characters per word
    Putsp = 0x24,
    Halt = 0x25,
}

/// Printed by the IN routine before reading.
pub const IN_PROMPT: &str = "Enter a character: ";

impl TryFrom<u8> for TrapVect {
    type Error = u8;
    fn try_from(vect: u8) -> Result<Self, Self::Error> {
        Ok(match vect {
            0x20 => TrapVect::Getc,
            0x21 => TrapVect::Out,
            0x22 => TrapVect::Puts,
            0x23 => TrapVect::In,
            0x24 => TrapVect::Putsp,
            0x25 => TrapVect::Halt,
            _ => return Err(vect),
        })
    }
}

impl fmt::Display for TrapVect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrapVect::Getc => "GETC",
            TrapVect::Out => "OUT",
            TrapVect::Puts => "PUTS",
            TrapVect::In => "IN",
            TrapVect::Putsp => "PUTSP",
            TrapVect::Halt => "HALT",
        };
        f.write_str(name)
    }
}

/// Characters of a one-per-word string, up to the terminating zero word.
///
/// Only the low byte of each word is a character.
pub fn unpacked_chars(words: impl Iterator<Item = u16>) -> impl Iterator<Item = u8> {
    words.take_while(|word| *word != 0).map(|word| word as u8)
}

/// Characters of a two-per-word string, low byte first.
///
/// Ends at the first word with a zero low byte. A zero high byte is
/// skipped.
pub fn packed_chars(words: impl Iterator<Item = u16>) -> impl Iterator<Item = u8> {
    words
        .take_while(|word| word & 0xFF != 0)
        .flat_map(|word| [word as u8, (word >> 8) as u8])
        .filter(|ch| *ch != 0)
}
