use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{Config, TimerMode};
use crate::error::{Chip8Error, Result};
use crate::frame_buffer::FrameBuffer;
use crate::instruction::DispatchTable;
use crate::state::State;

/// What a single call to `Chip8::cycle` did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cycle {
    /// The instruction at `address` ran
    Executed {
        address: u16,
        opcode: u16,
        mnemonic: &'static str,
    },
    /// The instruction at `address` is not recognised and was skipped
    UnknownOpcode { address: u16, opcode: u16 },
    /// Still waiting for a key to store in `register`
    WaitingForKey { register: usize },
    /// The pending `LD Vx, K` finished with `key`
    KeyReceived { register: usize, key: u8 },
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Owns:
///  - the complete machine `state`
///  - the opcode dispatch `table`
///  - the generator behind `RND`
///
/// Supplies interfaces for:
/// - loading programs
/// - pressing and releasing keys
/// - advancing the CPU one instruction at a time
/// - advancing its timers when they are driven externally
/// - inspecting its frame buffer and sound timer for some display and speaker
///
/// It never loops or sleeps on its own; the host decides how often to call `cycle`.
/// Frontends on other threads should go through `handoff` rather than share it.
pub struct Chip8 {
    state: State,
    table: DispatchTable,
    config: Config,
    rng: StdRng,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Chip8 {
            state: State::new(),
            table: DispatchTable::new(),
            config,
            rng,
        }
    }

    /// Copy a program into memory at 0x200
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        self.state.memory.load_program(program)?;
        tracing::debug!(bytes = program.len(), "loaded program");
        Ok(())
    }

    /// Return to the power-on state, discarding any loaded program
    pub fn reset(&mut self) {
        self.state = State::new();
        tracing::debug!("reset");
    }

    /// Advances the CPU by a single cycle
    /// - while awaiting a keypress, samples the keypad instead of fetching
    /// - otherwise fetches, decodes and executes the instruction at pc
    /// - then advances the timers if they are tied to cycles
    ///
    /// A failed cycle changes nothing: pc stays on the offending instruction
    /// and the timers do not move.
    pub fn cycle(&mut self) -> Result<Cycle> {
        if let Some(register) = self.state.register_needing_key {
            let outcome = self.poll_key(register);
            self.complete_cycle();
            return Ok(outcome);
        }

        let address = self.state.pc;
        let opcode = self
            .state
            .memory
            .fetch(address)
            .map_err(|err| failed(address, err))?;

        let operation = match self.table.lookup(opcode) {
            Some(operation) => operation,
            None => return self.unknown(address, opcode),
        };

        self.state.pc = address.wrapping_add(2);
        if let Err(err) = (operation.execute)(opcode, &mut self.state, &mut self.rng) {
            self.state.pc = address;
            return Err(failed(address, err));
        }
        tracing::trace!(
            "{:03X} {:04X} {:<14} v{:02X?} i{:04X} pc{:04X}",
            address,
            opcode,
            operation.mnemonic,
            self.state.v,
            self.state.i,
            self.state.pc
        );

        self.complete_cycle();
        Ok(Cycle::Executed {
            address,
            opcode,
            mnemonic: operation.mnemonic,
        })
    }

    /// Decrements both timers once.
    /// Intended for `TimerMode::External`, where the host calls it at its own rate.
    pub fn tick_timers(&mut self) {
        self.state.timers.tick();
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the keypad index 0x0..=0xF
    pub fn key_press(&mut self, key: u8) -> Result<()> {
        self.set_key(key, true)
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the keypad index 0x0..=0xF
    pub fn key_release(&mut self, key: u8) -> Result<()> {
        self.set_key(key, false)
    }

    pub fn set_key(&mut self, key: u8, pressed: bool) -> Result<()> {
        self.state.keypad.set(key, pressed)
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Returns a copy of the FrameBuffer if it changed since the last call
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(self.state.frame_buffer)
        } else {
            None
        }
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.timers.sound
    }

    /// Whether a tone should currently be playing
    pub fn sound_active(&self) -> bool {
        self.state.timers.sound_active()
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.timers.delay
    }

    /// The register a pending `LD Vx, K` will write, if any
    pub fn waiting_for_key(&self) -> Option<usize> {
        self.state.register_needing_key
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn poll_key(&mut self, register: usize) -> Cycle {
        match self.state.keypad.first_pressed() {
            Some(key) => {
                self.state.v[register] = key;
                self.state.register_needing_key = None;
                tracing::debug!(register, key, "key received");
                Cycle::KeyReceived { register, key }
            }
            None => Cycle::WaitingForKey { register },
        }
    }

    fn unknown(&mut self, address: u16, opcode: u16) -> Result<Cycle> {
        if self.config.strict_opcodes {
            return Err(failed(
                address,
                Chip8Error::UnknownOpcode { opcode, address },
            ));
        }
        tracing::warn!(
            "{:04X} at {:03X} is not a Chip-8 instruction, skipping",
            opcode,
            address
        );
        self.state.pc = address.wrapping_add(2);
        self.complete_cycle();
        Ok(Cycle::UnknownOpcode { address, opcode })
    }

    fn complete_cycle(&mut self) {
        match self.config.timer_mode {
            TimerMode::PerCycle { divider } => self.state.timers.cycle(divider),
            TimerMode::External => {}
        }
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

fn failed(address: u16, err: Chip8Error) -> Chip8Error {
    tracing::error!(pc = address, "cycle failed: {}", err);
    err
}
