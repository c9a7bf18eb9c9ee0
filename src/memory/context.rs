//! Register context of the crashed thread
//!
//! The context is loaded from a small TOML file written alongside the RAM
//! dump:
//!
//! ```toml
//! thread_id = 5
//! pc = 0x80246D10
//! cause = 0x00000010
//! badvaddr = 0x00000004
//! sr = 0x2000FF03
//!
//! [registers]
//! a0 = 0x8033B170
//! ra = 0x80246CD8
//! ```

use super::Address;
use crate::error::LoadError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// MIPS general purpose register names, in register-number order
pub const GPR_NAMES: [&str; 32] = [
    "zr", "at", "v0", "v1", "a0", "a1", "a2", "a3", "t0", "t1", "t2", "t3", "t4", "t5", "t6",
    "t7", "s0", "s1", "s2", "s3", "s4", "s5", "s6", "s7", "t8", "t9", "k0", "k1", "gp", "sp",
    "s8", "ra",
];

/// Snapshot of the crashed thread's registers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadContext {
    pub thread_id: u32,
    /// Exception program counter
    pub pc: Address,
    pub cause: u32,
    pub badvaddr: Address,
    pub sr: u32,
    /// Low words of the general purpose registers
    pub gpr: [u32; 32],
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ContextFile {
    #[serde(default)]
    thread_id: u32,
    pc: u32,
    #[serde(default)]
    cause: u32,
    #[serde(default)]
    badvaddr: u32,
    #[serde(default)]
    sr: u32,
    #[serde(default)]
    registers: BTreeMap<String, u32>,
}

impl ThreadContext {
    pub fn from_toml_str(text: &str) -> Result<Self, LoadError> {
        let file: ContextFile = toml::from_str(text)?;

        let mut gpr = [0u32; 32];
        for (name, value) in file.registers {
            let index = GPR_NAMES
                .iter()
                .position(|&n| n == name)
                .ok_or_else(|| LoadError::UnknownRegister(name.clone()))?;
            gpr[index] = value;
        }
        // $zero is hardwired
        gpr[0] = 0;

        Ok(ThreadContext {
            thread_id: file.thread_id,
            pc: file.pc,
            cause: file.cause,
            badvaddr: file.badvaddr,
            sr: file.sr,
            gpr,
        })
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path)?;
        let context = Self::from_toml_str(&text)?;
        log::info!(
            "loaded context for thread {} (pc {:08X}) from {}",
            context.thread_id,
            context.pc,
            path.display()
        );
        Ok(context)
    }

    /// Look up a general purpose register by name
    pub fn register(&self, name: &str) -> Option<u32> {
        GPR_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|index| self.gpr[index])
    }

    /// ExcCode field of the Cause register
    pub fn exception_code(&self) -> u32 {
        (self.cause >> 2) & 0x1F
    }

    pub fn cause_description(&self) -> &'static str {
        match self.exception_code() {
            0 => "Interrupt",
            1 => "TLB modification",
            2 => "TLB exception on load or inst.",
            3 => "TLB exception on store",
            4 => "Address error on load or inst.",
            5 => "Address error on store",
            6 => "Bus error on inst.",
            7 => "Bus error on data",
            8 => "Syscall exception",
            9 => "Breakpoint exception",
            10 => "Reserved instruction",
            11 => "Coprocessor unusable",
            12 => "Arithmetic overflow",
            13 => "Trap exception",
            15 => "Floating point exception",
            23 => "Watchpoint exception",
            31 => "Virtual coherency on data",
            _ => "Unknown exception",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_context_file() {
        let context = ThreadContext::from_toml_str(
            r#"
            thread_id = 5
            pc = 0x80246D10
            cause = 0x00000010
            badvaddr = 0x00000004

            [registers]
            a0 = 0x8033B170
            ra = 0x80246CD8
            "#,
        )
        .unwrap();

        assert_eq!(context.thread_id, 5);
        assert_eq!(context.pc, 0x8024_6D10);
        assert_eq!(context.register("a0"), Some(0x8033_B170));
        assert_eq!(context.register("ra"), Some(0x8024_6CD8));
        assert_eq!(context.register("sp"), Some(0));
        assert_eq!(context.register("pc"), None);
        assert_eq!(context.exception_code(), 4);
        assert_eq!(context.cause_description(), "Address error on load or inst.");
    }

    #[test]
    fn test_unknown_register_is_rejected() {
        let err = ThreadContext::from_toml_str("pc = 0x80000000\n[registers]\nx9 = 1\n")
            .unwrap_err();
        assert!(matches!(err, LoadError::UnknownRegister(ref name) if name == "x9"));
    }

    #[test]
    fn test_missing_pc_is_a_parse_error() {
        let err = ThreadContext::from_toml_str("thread_id = 1\n").unwrap_err();
        assert!(matches!(err, LoadError::Toml(_)));
    }
}
