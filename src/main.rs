use std::fmt::Display;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::{Color, Colorize};
use miette::Result;

use lc3vm::env::Env;
use lc3vm::{dprintln, output, Console, Image, RunState, MEMORY_MAX};

/// Run binary LC3 program images.
#[derive(Parser)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Quickly provide a `.obj` image to run
    path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a binary `.obj` image and output to terminal
    Run {
        /// `.obj` or `.lc3` image to run
        name: PathBuf,
        /// Produce minimal output, suited for blackbox tests
        #[arg(short, long)]
        minimal: bool,
        /// Print the register file after the program halts
        #[arg(short, long)]
        registers: bool,
    },
    /// Check that an image is well-formed without running it
    Check {
        /// Image to check
        name: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let env = Env::load();
    output::set_minimal(env.minimal);

    miette::set_hook(Box::new(|_| {
        Box::new(miette::MietteHandlerOpts::new().context_lines(0).build())
    }))?;

    match args.command {
        Some(Command::Run {
            name,
            minimal,
            registers,
        }) => {
            if minimal {
                output::set_minimal(true);
            }
            run(&name, registers || env.registers)
        }
        Some(Command::Check { name }) => check(&name),
        None => match args.path {
            Some(path) => run(&path, env.registers),
            None => {
                println!("\n~ lc3vm v{VERSION} ~");
                println!("{SHORT_INFO}");
                Ok(())
            }
        },
    }
}

/// Right-aligned coloured label followed by `detail`. Silent when minimal.
fn status(label: &str, color: Color, detail: impl Display) {
    if output::is_minimal() {
        return;
    }
    println!("{:>12} {detail}", label.color(color));
}

fn run(name: &Path, show_registers: bool) -> Result<()> {
    status("Loading", Color::Green, name.display());
    let mut program = RunState::new();
    program.load_image_file(name)?;

    status("Running", Color::Green, "loaded image");
    let result = program.execute(&mut Console::new()).map(|_| ());
    // Dump even when the run failed, the state is still worth seeing
    if show_registers {
        print!("\n{}", output::registers(program.registers()));
    }
    result?;

    if !output::is_minimal() {
        println!();
    }
    status("Halted", Color::Cyan, "");
    status("Completed", Color::Green, name.display());
    Ok(())
}

fn check(name: &Path) -> Result<()> {
    status("Checking", Color::Green, name.display());
    let image = Image::read(name)?;
    let len = image.words().len();
    if image.orig() as usize + len > MEMORY_MAX {
        dprintln!(Notice, "image wraps past 0xffff into low memory");
    }
    status(
        "Success",
        Color::Green,
        format!("{len} words at 0x{:04x}", image.orig()),
    );
    Ok(())
}

const SHORT_INFO: &str = r"
An instruction-set simulator for LC3 program images.
Please use `-h` or `--help` to access the usage instructions and documentation.
";

const VERSION: &str = env!("CARGO_PKG_VERSION");
