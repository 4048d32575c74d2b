pub use chip8::{Chip8, Cycle};
pub use config::{Config, TimerMode};
pub use error::{Chip8Error, Result};
pub use frame_buffer::FrameBuffer;
pub use handoff::{link, FrontendLink, KeyEvent, MachineLink, Snapshot};
pub use keypad::Keypad;
pub use memory::Memory;
pub use stack::Stack;
pub use state::State;
pub use timers::Timers;

mod chip8;
mod config;
pub mod constants;
mod error;
mod frame_buffer;
pub mod handoff;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod operations;
mod stack;
pub mod state;
mod timers;
