//! Load-time error types
//!
//! [`LoadError`] covers everything that can go wrong while assembling an
//! inspection session: reading the RAM dump, parsing the thread context,
//! symbol map and settings files, and resolving the initial cursor target.
//!
//! Once the crash screen is running there is only one failure mode, an
//! unreadable address, and it never surfaces as an error value to the user.
//! See [`crate::memory::MemoryError`].

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("RAM dump is empty")]
    EmptyDump,

    #[error("RAM dump too large ({0} bytes, at most 8 MiB supported)")]
    DumpTooLarge(usize),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("setting `{key}`: {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("unknown register `{0}`")]
    UnknownRegister(String),

    #[error("symbol map line {line}: {reason}")]
    BadSymbolLine { line: usize, reason: String },

    #[error("unknown address or symbol `{0}`")]
    UnknownTarget(String),

    #[error("address {0:#010x} is outside RAM")]
    TargetOutOfRange(u32),
}
