use std::path::Path;

use crate::decode::Instr;
use crate::device::Device;
use crate::error::RunError;
use crate::image::{Image, DEFAULT_ORIG};
use crate::memory::Memory;
use crate::registers::{Reg, Registers};
use crate::trap::{self, TrapVect, IN_PROMPT};

type OpResult = Result<(), RunError>;
type Handler = fn(&mut RunState, Instr, &mut dyn Device) -> OpResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunFlag {
    Running,
    Halted,
}

/// Represents complete machine state during runtime.
pub struct RunState {
    /// System memory, 65 536 words
    mem: Memory,
    /// R0-R7, program counter and condition code
    reg: Registers,
    status: RunFlag,
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

impl RunState {
    pub fn new() -> Self {
        RunState {
            mem: Memory::new(),
            reg: Registers::new(),
            status: RunFlag::Running,
        }
    }

    /// Copy `words` to the default origin and point PC at it.
    pub fn load_bytecode(&mut self, words: &[u16]) -> &mut Self {
        self.load_bytecode_at(words, DEFAULT_ORIG)
    }

    pub fn load_bytecode_at(&mut self, words: &[u16], orig: u16) -> &mut Self {
        self.mem.load(orig, words);
        self.reg.set_pc(orig);
        self
    }

    pub fn load_image(&mut self, image: &Image) -> &mut Self {
        self.load_bytecode_at(image.words(), image.orig())
    }

    pub fn load_image_file(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, RunError> {
        let image = Image::read(path)?;
        Ok(self.load_image(&image))
    }

    /// Opcode handlers by top nibble. `None` entries are not part of the
    /// instruction set.
    const OP_TABLE: [Option<Handler>; 16] = [
        Some(Self::br),   // 0x0
        Some(Self::add),  // 0x1
        Some(Self::ld),   // 0x2
        Some(Self::st),   // 0x3
        Some(Self::jsr),  // 0x4
        Some(Self::and),  // 0x5
        Some(Self::ldr),  // 0x6
        Some(Self::str),  // 0x7
        None,             // 0x8 RTI
        Some(Self::not),  // 0x9
        Some(Self::ldi),  // 0xA
        Some(Self::sti),  // 0xB
        Some(Self::jmp),  // 0xC
        None,             // 0xD reserved
        Some(Self::lea),  // 0xE
        Some(Self::trap), // 0xF
    ];

    /// Run until HALT, or until an instruction fails.
    ///
    /// Calling again after a halt resumes from the current PC.
    pub fn execute(&mut self, device: &mut impl Device) -> Result<&mut Self, RunError> {
        self.status = RunFlag::Running;
        while self.is_running() {
            self.step(device)?;
        }
        Ok(self)
    }

    /// Fetch, decode and execute a single instruction.
    pub fn step(&mut self, device: &mut impl Device) -> OpResult {
        let addr = self.reg.pc();
        let instr = Instr(self.mem[addr]);
        // PC incremented before instruction is performed
        self.reg.set_pc(addr.wrapping_add(1));

        let opcode = instr.opcode();
        let Some(handler) = Self::OP_TABLE[opcode as usize] else {
            self.status = RunFlag::Halted;
            return Err(RunError::UnknownOpcode { opcode, addr });
        };
        let result = handler(self, instr, device);
        if result.is_err() {
            self.status = RunFlag::Halted;
        }
        result
    }

    pub fn is_running(&self) -> bool {
        self.status == RunFlag::Running
    }

    pub fn registers(&self) -> &Registers {
        &self.reg
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.reg
    }

    pub fn memory(&self) -> &Memory {
        &self.mem
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.mem
    }

    #[inline]
    fn pc_offset9(&self, instr: Instr) -> u16 {
        self.reg.pc().wrapping_add(instr.offset9())
    }

    #[inline]
    fn base_offset6(&self, instr: Instr) -> u16 {
        self.reg[instr.sr1()].wrapping_add(instr.offset6())
    }

    /// Second operand of ADD/AND
    #[inline]
    fn operand2(&self, instr: Instr) -> u16 {
        if instr.is_imm() {
            instr.imm5()
        } else {
            self.reg[instr.sr2()]
        }
    }

    fn add(&mut self, instr: Instr, _: &mut dyn Device) -> OpResult {
        let res = self.reg[instr.sr1()].wrapping_add(self.operand2(instr));
        self.reg.set_with_flags(instr.dr(), res);
        Ok(())
    }

    fn and(&mut self, instr: Instr, _: &mut dyn Device) -> OpResult {
        let res = self.reg[instr.sr1()] & self.operand2(instr);
        self.reg.set_with_flags(instr.dr(), res);
        Ok(())
    }

    fn not(&mut self, instr: Instr, _: &mut dyn Device) -> OpResult {
        let res = self.reg[instr.sr1()] ^ 0xFFFF;
        self.reg.set_with_flags(instr.dr(), res);
        Ok(())
    }

    fn br(&mut self, instr: Instr, _: &mut dyn Device) -> OpResult {
        // Any overlapping flag is enough
        if self.reg.cond().bits() & instr.cond_bits() != 0 {
            self.reg.set_pc(self.pc_offset9(instr));
        }
        Ok(())
    }

    fn jmp(&mut self, instr: Instr, _: &mut dyn Device) -> OpResult {
        self.reg.set_pc(self.reg[instr.sr1()]);
        Ok(())
    }

    fn jsr(&mut self, instr: Instr, _: &mut dyn Device) -> OpResult {
        // Link first: JSRR R7 jumps to the return address
        self.reg[Reg::R7] = self.reg.pc();
        let target = if instr.is_long_jsr() {
            self.reg.pc().wrapping_add(instr.offset11())
        } else {
            self.reg[instr.sr1()]
        };
        self.reg.set_pc(target);
        Ok(())
    }

    fn ld(&mut self, instr: Instr, _: &mut dyn Device) -> OpResult {
        let val = self.mem[self.pc_offset9(instr)];
        self.reg.set_with_flags(instr.dr(), val);
        Ok(())
    }

    fn ldi(&mut self, instr: Instr, _: &mut dyn Device) -> OpResult {
        let ptr = self.mem[self.pc_offset9(instr)];
        let val = self.mem[ptr];
        self.reg.set_with_flags(instr.dr(), val);
        Ok(())
    }

    fn ldr(&mut self, instr: Instr, _: &mut dyn Device) -> OpResult {
        let val = self.mem[self.base_offset6(instr)];
        self.reg.set_with_flags(instr.dr(), val);
        Ok(())
    }

    fn lea(&mut self, instr: Instr, _: &mut dyn Device) -> OpResult {
        let val = self.pc_offset9(instr);
        self.reg.set_with_flags(instr.dr(), val);
        Ok(())
    }

    fn st(&mut self, instr: Instr, _: &mut dyn Device) -> OpResult {
        let addr = self.pc_offset9(instr);
        self.mem[addr] = self.reg[instr.dr()];
        Ok(())
    }

    fn sti(&mut self, instr: Instr, _: &mut dyn Device) -> OpResult {
        let ptr = self.mem[self.pc_offset9(instr)];
        self.mem[ptr] = self.reg[instr.dr()];
        Ok(())
    }

    fn str(&mut self, instr: Instr, _: &mut dyn Device) -> OpResult {
        let addr = self.base_offset6(instr);
        self.mem[addr] = self.reg[instr.dr()];
        Ok(())
    }

    fn trap(&mut self, instr: Instr, device: &mut dyn Device) -> OpResult {
        self.reg[Reg::R7] = self.reg.pc();
        let raw = instr.trap_vect();
        let vect = match TrapVect::try_from(raw) {
            Ok(vect) => vect,
            Err(raw) => {
                crate::dprintln!(
                    Detail,
                    "Ignoring trap with unknown vector 0x{:02x} at 0x{:04x}",
                    raw,
                    self.reg.pc().wrapping_sub(1)
                );
                return Ok(());
            }
        };
        self.run_trap(vect, device)
            .map_err(|source| RunError::Device { vect: raw, source })
    }

    fn run_trap(&mut self, vect: TrapVect, device: &mut dyn Device) -> std::io::Result<()> {
        match vect {
            TrapVect::Getc => {
                let ch = match device.read_char()? {
                    b'\r' => b'\n',
                    ch => ch,
                };
                self.reg.set_with_flags(Reg::R0, ch as u16);
            }
            TrapVect::Out => {
                // Only the low byte is a character
                device.write_char(self.reg[Reg::R0] as u8)?;
            }
            TrapVect::Puts => {
                let start = self.reg[Reg::R0];
                for ch in trap::unpacked_chars(self.mem.iter_from(start)) {
                    device.write_char(ch)?;
                }
            }
            TrapVect::In => {
                device.write_str(IN_PROMPT)?;
                device.flush()?;
                let ch = device.read_char()?;
                device.write_char(ch)?;
                self.reg.set_with_flags(Reg::R0, ch as u16);
            }
            TrapVect::Putsp => {
                let start = self.reg[Reg::R0];
                for ch in trap::packed_chars(self.mem.iter_from(start)) {
                    device.write_char(ch)?;
                }
            }
            TrapVect::Halt => {
                self.status = RunFlag::Halted;
            }
        }
        device.flush()
    }
}
