use std::io::{self, stdin, stdout, IsTerminal, Read, Stdout, Write};

use console::Term;

/// Character I/O used by trap routines.
///
/// Characters are single bytes; the machine has no wider encoding.
pub trait Device {
    /// Block until one character is available.
    fn read_char(&mut self) -> io::Result<u8>;

    fn write_char(&mut self, ch: u8) -> io::Result<()>;

    fn write_str(&mut self, string: &str) -> io::Result<()> {
        for ch in string.bytes() {
            self.write_char(ch)?;
        }
        Ok(())
    }

    /// Called once a trap routine has finished writing.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// The process terminal.
///
/// Reads are unbuffered key presses when stdin is interactive, otherwise
/// raw bytes from stdin.
pub struct Console {
    term: Term,
    out: Stdout,
}

impl Console {
    pub fn new() -> Self {
        Console {
            term: Term::stdout(),
            out: stdout(),
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for Console {
    fn read_char(&mut self) -> io::Result<u8> {
        if stdin().is_terminal() {
            let ch = self.term.read_char()?;
            // Non-ASCII keys have no single-byte form
            Ok(if ch.is_ascii() { ch as u8 } else { b'?' })
        } else {
            let mut buf = [0; 1];
            stdin().read_exact(&mut buf)?;
            Ok(buf[0])
        }
    }

    fn write_char(&mut self, ch: u8) -> io::Result<()> {
        self.out.write_all(&[ch])
    }

    fn write_str(&mut self, string: &str) -> io::Result<()> {
        self.out.write_all(string.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Any reader/writer pair. Reads past the end of input fail with
/// [`io::ErrorKind::UnexpectedEof`].
pub struct Pipe<R, W> {
    reader: R,
    writer: W,
}

impl<R: Read, W: Write> Pipe<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Pipe { reader, writer }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.reader, self.writer)
    }
}

impl<R: Read, W: Write> Device for Pipe<R, W> {
    fn read_char(&mut self) -> io::Result<u8> {
        let mut buf = [0; 1];
        self.reader.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn write_char(&mut self, ch: u8) -> io::Result<()> {
        self.writer.write_all(&[ch])
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipe_reads_in_order() {
        let mut pipe = Pipe::new(&b"ab"[..], Vec::new());
        assert_eq!(pipe.read_char().unwrap(), b'a');
        assert_eq!(pipe.read_char().unwrap(), b'b');
        let err = pipe.read_char().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn pipe_collects_output() {
        let mut pipe = Pipe::new(io::empty(), Vec::new());
        pipe.write_char(b'>').unwrap();
        pipe.write_str(" hi").unwrap();
        pipe.flush().unwrap();
        let (_, out) = pipe.into_inner();
        assert_eq!(out, b"> hi");
    }
}
