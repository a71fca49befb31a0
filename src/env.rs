use std::ffi::OsString;

pub const MINIMAL_VAR: &str = "LC3VM_MINIMAL";
pub const REGISTERS_VAR: &str = "LC3VM_REGISTERS";

/// Switches read from the process environment. A switch is on when its
/// variable is exactly `1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Env {
    /// `LC3VM_MINIMAL`: plain output suited for blackbox tests
    pub minimal: bool,
    /// `LC3VM_REGISTERS`: dump registers after every run
    pub registers: bool,
}

impl Env {
    pub fn load() -> Self {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let enabled = |name: &str| lookup(name).is_some_and(|value| value == "1");
        Env {
            minimal: enabled(MINIMAL_VAR),
            registers: enabled(REGISTERS_VAR),
        }
    }
}
