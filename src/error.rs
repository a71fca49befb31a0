use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

// Image errors

#[derive(Debug, Error, Diagnostic)]
pub enum ImageError {
    #[error("Could not read image file {}", path.display())]
    #[diagnostic(
        code(image::io),
        help("check that the file exists and is readable")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Image contains no origin word")]
    #[diagnostic(
        code(image::empty),
        help("an image starts with a 16-bit big-endian load address")
    )]
    Empty,

    #[error("Image is not aligned to 16 bits ({len} bytes)")]
    #[diagnostic(
        code(image::unaligned),
        help("images are a sequence of big-endian words, so the byte count must be even")
    )]
    Unaligned { len: usize },
}

// Runtime errors

#[derive(Debug, Error, Diagnostic)]
pub enum RunError {
    #[error("Unknown opcode 0x{opcode:x} at address 0x{addr:04x}")]
    #[diagnostic(
        code(run::unknown_opcode),
        help("RTI (0x8) and the reserved opcode (0xD) are not supported")
    )]
    UnknownOpcode { opcode: u8, addr: u16 },

    #[error("Device failed during trap 0x{vect:02x}")]
    #[diagnostic(code(run::device))]
    Device {
        vect: u8,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Image(#[from] ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = RunError::UnknownOpcode {
            opcode: 0xd,
            addr: 0x3004,
        };
        assert_eq!(err.to_string(), "Unknown opcode 0xd at address 0x3004");
        assert_eq!(
            ImageError::Unaligned { len: 3 }.to_string(),
            "Image is not aligned to 16 bits (3 bytes)"
        );
    }

    #[test]
    fn image_errors_pass_through() {
        let err: RunError = ImageError::Empty.into();
        assert_eq!(err.to_string(), "Image contains no origin word");
    }
}
