//! Moving input and output between the thread that drives a `Chip8` and the
//! frontends that render, play sound and poll keys on threads of their own.
//!
//! The machine is never shared. Key events travel to it over one channel and
//! owned `Snapshot`s travel back over another, so neither side ever sees the
//! other half-way through a cycle.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};

use crate::chip8::Chip8;
use crate::error::Result;
use crate::frame_buffer::FrameBuffer;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(u8),
    Released(u8),
}

/// Everything a renderer and speaker need, copied out between cycles
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub frame: FrameBuffer,
    pub sound_active: bool,
    pub delay_timer: u8,
}

/// The half of a link held by the thread calling `Chip8::cycle`
pub struct MachineLink {
    keys: Receiver<KeyEvent>,
    snapshots: Sender<Snapshot>,
    sound_active: bool,
    /// a change has been seen but not yet delivered
    dirty: bool,
}

/// The half of a link held by a frontend
#[derive(Clone)]
pub struct FrontendLink {
    keys: Sender<KeyEvent>,
    snapshots: Receiver<Snapshot>,
}

/// Create a connected pair of links.
/// At most `capacity` snapshots are buffered; further ones are held back until
/// the frontend catches up.
pub fn link(capacity: usize) -> (MachineLink, FrontendLink) {
    let (key_tx, key_rx) = unbounded();
    let (snapshot_tx, snapshot_rx) = bounded(capacity.max(1));
    (
        MachineLink {
            keys: key_rx,
            snapshots: snapshot_tx,
            sound_active: false,
            dirty: false,
        },
        FrontendLink {
            keys: key_tx,
            snapshots: snapshot_rx,
        },
    )
}

impl MachineLink {
    /// Apply every key event received so far, returning how many there were
    pub fn apply_input(&self, chip8: &mut Chip8) -> Result<usize> {
        let mut applied = 0;
        for event in self.keys.try_iter() {
            match event {
                KeyEvent::Pressed(key) => chip8.key_press(key)?,
                KeyEvent::Released(key) => chip8.key_release(key)?,
            }
            applied += 1;
        }
        Ok(applied)
    }

    /// Send a snapshot if the frame or the sound state changed since the last
    /// one delivered. Never blocks; returns whether a snapshot was sent.
    pub fn publish(&mut self, chip8: &mut Chip8) -> bool {
        let redrawn = chip8.take_frame().is_some();
        let sound_active = chip8.sound_active();
        self.dirty |= redrawn || sound_active != self.sound_active;
        if !self.dirty {
            return false;
        }

        let snapshot = Snapshot {
            frame: *chip8.frame_buffer(),
            sound_active,
            delay_timer: chip8.delay_timer(),
        };
        match self.snapshots.try_send(snapshot) {
            Ok(()) => {
                self.sound_active = sound_active;
                self.dirty = false;
                true
            }
            Err(TrySendError::Full(_)) => {
                tracing::trace!("frontend is behind, holding snapshot back");
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("frontend disconnected");
                false
            }
        }
    }
}

impl FrontendLink {
    /// Returns false once the machine side has gone away
    pub fn press(&self, key: u8) -> bool {
        self.keys.send(KeyEvent::Pressed(key)).is_ok()
    }

    /// Returns false once the machine side has gone away
    pub fn release(&self, key: u8) -> bool {
        self.keys.send(KeyEvent::Released(key)).is_ok()
    }

    /// The newest snapshot waiting, discarding any older ones
    pub fn latest(&self) -> Option<Snapshot> {
        self.snapshots.try_iter().last()
    }
}
