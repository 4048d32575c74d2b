use thiserror::Error;

pub type Result<T> = std::result::Result<T, Chip8Error>;

/// Failures surfaced by the interpreter.
///
/// Apart from `UnknownOpcode` (which is only an error under
/// `Config::strict_opcodes`) every variant aborts the cycle that raised it and
/// leaves the machine exactly as it was before that cycle began.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Chip8Error {
    #[error("unknown opcode {opcode:#06X} at {address:#05X}")]
    UnknownOpcode { opcode: u16, address: u16 },

    #[error("memory access out of bounds at {address:#06X}")]
    OutOfBounds { address: usize },

    #[error("stack overflow calling from {address:#05X}")]
    StackOverflow { address: u16 },

    #[error("stack underflow returning from {address:#05X}")]
    StackUnderflow { address: u16 },

    #[error("program is {size} bytes but only {max} fit in memory")]
    ProgramTooLarge { size: usize, max: usize },

    #[error("key {key:#04X} is not on the keypad")]
    InvalidKey { key: u8 },
}
