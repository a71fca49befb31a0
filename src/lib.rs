// Machine
mod word;
pub use word::sign_extend;
mod registers;
pub use registers::{Flag, Reg, Registers};
mod memory;
pub use memory::{Memory, MEMORY_MAX};
mod decode;
pub use decode::Instr;

// Running
mod runtime;
pub use runtime::RunState;
mod trap;
pub use trap::TrapVect;
mod device;
pub use device::{Console, Device, Pipe};
mod image;
pub use image::{Image, DEFAULT_ORIG};

mod error;
pub use error::{ImageError, RunError};

pub mod output;
pub mod env;
