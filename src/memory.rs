use std::ops::{Index, IndexMut};

/// LC3 can address 128KB of memory.
pub const MEMORY_MAX: usize = 0x10000;

/// Word-addressed system memory. Every `u16` is a valid address.
#[derive(Clone)]
pub struct Memory {
    mem: Box<[u16]>,
}

impl Default for Memory {
    fn default() -> Self {
        Memory {
            mem: vec![0; MEMORY_MAX].into_boxed_slice(),
        }
    }
}

impl Memory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `words` in starting at `orig`, wrapping past the top of memory.
    pub fn load(&mut self, orig: u16, words: &[u16]) {
        let mut addr = orig;
        for word in words {
            self[addr] = *word;
            addr = addr.wrapping_add(1);
        }
    }

    /// Words from `start` upwards, wrapping, for a full lap of memory.
    pub fn iter_from(&self, start: u16) -> impl Iterator<Item = u16> + '_ {
        (0..MEMORY_MAX).map(move |i| self[start.wrapping_add(i as u16)])
    }
}

impl Index<u16> for Memory {
    type Output = u16;
    #[inline]
    fn index(&self, addr: u16) -> &u16 {
        &self.mem[addr as usize]
    }
}

impl IndexMut<u16> for Memory {
    #[inline]
    fn index_mut(&mut self, addr: u16) -> &mut u16 {
        &mut self.mem[addr as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_places_words() {
        let mut mem = Memory::new();
        mem.load(0x3000, &[0x1621, 0xf025]);
        assert_eq!(mem[0x3000], 0x1621);
        assert_eq!(mem[0x3001], 0xf025);
        assert_eq!(mem[0x3002], 0);
    }

    #[test]
    fn load_wraps_at_top() {
        let mut mem = Memory::new();
        mem.load(0xffff, &[1, 2, 3]);
        assert_eq!(mem[0xffff], 1);
        assert_eq!(mem[0x0000], 2);
        assert_eq!(mem[0x0001], 3);
    }

    #[test]
    fn iter_wraps() {
        let mut mem = Memory::new();
        mem[0xffff] = 7;
        mem[0x0000] = 8;
        let words: Vec<_> = mem.iter_from(0xffff).take(2).collect();
        assert_eq!(words, [7, 8]);
    }
}
