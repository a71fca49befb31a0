//! Host-side output: diagnostics and register dumps. Program output goes
//! through a [`Device`](crate::Device) instead.

use std::cell::Cell;
use std::fmt::{self, Write};

use colored::Colorize;

use crate::registers::{Reg, Registers};

/// Print a diagnostic line to stderr at the given [`Level`].
#[macro_export]
macro_rules! dprintln {
    ( $level:ident, $($arg:tt)+ ) => {{
        $crate::output::diagnostic($crate::output::Level::$level, format_args!($($arg)+));
    }};
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    /// Shown in every mode
    Notice,
    /// Hidden in minimal mode
    Detail,
}

thread_local! {
    static MINIMAL: Cell<bool> = const { Cell::new(false) };
}

/// Minimal mode: no colour, no detail diagnostics, plain register dumps.
pub fn set_minimal(minimal: bool) {
    MINIMAL.with(|value| value.set(minimal));
}

pub fn is_minimal() -> bool {
    MINIMAL.with(Cell::get)
}

pub fn diagnostic(level: Level, message: fmt::Arguments<'_>) {
    match (is_minimal(), level) {
        (false, _) => eprintln!("{}", message.to_string().blue()),
        (true, Level::Notice) => eprintln!("{message}"),
        (true, Level::Detail) => (),
    }
}

/// Render the register file, one register per line.
pub fn registers(regs: &Registers) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = if is_minimal() {
        write_plain(&mut out, regs)
    } else {
        write_table(&mut out, regs)
    };
    out
}

fn write_plain(out: &mut String, regs: &Registers) -> fmt::Result {
    for reg in Reg::ALL {
        writeln!(out, "{} {}", reg, regs[reg])?;
    }
    writeln!(out, "PC {}", regs.pc())?;
    writeln!(out, "CC {:03b}", regs.cond().bits())
}

fn write_table(out: &mut String, regs: &Registers) -> fmt::Result {
    writeln!(out, "{}", "        hex     int    uint".dimmed())?;
    for reg in Reg::ALL {
        let val = regs[reg];
        writeln!(
            out,
            "{}  0x{:04x}  {:>6}  {:>6}",
            reg.to_string().bold(),
            val,
            val as i16,
            val
        )?;
    }
    writeln!(
        out,
        "{}  0x{:04x}  {}  {:?}",
        "PC".bold(),
        regs.pc(),
        "CC".bold(),
        regs.cond()
    )
}
