use crate::constants::{PROGRAM_START, REGISTER_COUNT};
use crate::frame_buffer::FrameBuffer;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::stack::Stack;
use crate::timers::Timers;

/// The complete machine state
///
/// ## CPU
/// Registers
/// - (v) 16 8-bit registers (V0..VF)
///     - V0..VE are general purpose
///     - VF is overwritten as the carry/borrow/shift/collision flag
/// - (i) a 16-bit address register
///
/// Counter
/// - (pc) a 16-bit program counter, always addressing the next instruction
///
/// Stack
/// - 16 return addresses, see `Stack`
///
/// Timers
/// - 8-bit delay and sound countdowns, see `Timers`
///
/// ## Memory
/// - 4096 bytes with the font at 0x050 and programs at 0x200, see `Memory`
/// - a 64x32 frame buffer, see `FrameBuffer`
///
/// ## Input
/// - the held status of keys 0..F
/// - emulation pauses while `register_needing_key` names a register awaiting a key
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub stack: Stack,
    pub memory: Memory,
    pub frame_buffer: FrameBuffer,
    pub keypad: Keypad,
    pub timers: Timers,
    pub register_needing_key: Option<usize>,
    /// set whenever the frame buffer changes, cleared when a frame is taken
    pub draw_flag: bool,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            stack: Stack::new(),
            memory: Memory::new(),
            frame_buffer: FrameBuffer::new(),
            keypad: Keypad::new(),
            timers: Timers::new(),
            register_needing_key: None,
            draw_flag: false,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
