use crate::constants::STACK_DEPTH;
use crate::error::{Chip8Error, Result};

/// # Stack
/// Return addresses for up to `STACK_DEPTH` nested calls.
///
/// `sp` counts the active frames and always indexes the next free slot:
/// a push writes `slots[sp]` then increments, a pop decrements then reads.
/// Overflow and underflow are refused and leave the stack untouched.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Stack {
    slots: [u16; STACK_DEPTH],
    sp: usize,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a return address; `caller` is only used to describe a failure
    pub fn push(&mut self, address: u16, caller: u16) -> Result<()> {
        let slot = self
            .slots
            .get_mut(self.sp)
            .ok_or(Chip8Error::StackOverflow { address: caller })?;
        *slot = address;
        self.sp += 1;
        Ok(())
    }

    /// Pop the most recent return address; `caller` is only used to describe a failure
    pub fn pop(&mut self, caller: u16) -> Result<u16> {
        let sp = self
            .sp
            .checked_sub(1)
            .ok_or(Chip8Error::StackUnderflow { address: caller })?;
        self.sp = sp;
        Ok(self.slots[sp])
    }

    /// Number of active frames
    pub fn depth(&self) -> usize {
        self.sp
    }

    pub fn slots(&self) -> &[u16; STACK_DEPTH] {
        &self.slots
    }
}
