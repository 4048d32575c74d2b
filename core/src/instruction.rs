use std::fmt;

use rand::rngs::StdRng;

use crate::error::Result;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// Signature shared by every operation
pub type Execute = fn(op: u16, state: &mut State, rng: &mut StdRng) -> Result<()>;

/// An operation together with its assembly mnemonic
#[derive(Clone, Copy)]
pub struct Operation {
    pub mnemonic: &'static str,
    pub execute: Execute,
}

impl fmt::Debug for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Operation").field(&self.mnemonic).finish()
    }
}

/// Which opcode field selects the operation within a family
#[derive(Clone, Copy, Debug)]
enum SubKey {
    /// `[___n]`
    N,
    /// `[__kk]`
    Kk,
}

impl SubKey {
    fn of(self, op: u16) -> usize {
        match self {
            SubKey::N => usize::from(op.n()),
            SubKey::Kk => usize::from(op.kk()),
        }
    }
}

enum Family {
    /// The family nibble alone identifies the operation
    Direct(Operation),
    /// The family is shared; `key` picks the operation from `ops`
    Group {
        key: SubKey,
        ops: Box<[Option<Operation>; 256]>,
    },
}

/// # Dispatch Table
/// Resolves opcodes to operations with at most two array lookups.
///
/// ```text
/// 0___  by kk   E0 CLS, EE RET
/// 1-7   direct
/// 8___  by n    0-7, E   register ALU
/// 9-D   direct
/// E___  by kk   9E SKP, A1 SKNP
/// F___  by kk   07 0A 15 18 1E 29 33 55 65
/// ```
///
/// Built once and never modified.
pub struct DispatchTable {
    families: [Family; 16],
}

impl DispatchTable {
    pub fn new() -> Self {
        let families = [
            group(SubKey::Kk, &[(0xE0, "CLS", clr), (0xEE, "RET", rts)]),
            direct("JP addr", jump),
            direct("CALL addr", call),
            direct("SE Vx, byte", ske),
            direct("SNE Vx, byte", skne),
            direct("SE Vx, Vy", skre),
            direct("LD Vx, byte", load),
            direct("ADD Vx, byte", add),
            group(
                SubKey::N,
                &[
                    (0x0, "LD Vx, Vy", mv),
                    (0x1, "OR Vx, Vy", or),
                    (0x2, "AND Vx, Vy", and),
                    (0x3, "XOR Vx, Vy", xor),
                    (0x4, "ADD Vx, Vy", addr),
                    (0x5, "SUB Vx, Vy", sub),
                    (0x6, "SHR Vx", shr),
                    (0x7, "SUBN Vx, Vy", subn),
                    (0xE, "SHL Vx", shl),
                ],
            ),
            direct("SNE Vx, Vy", skrne),
            direct("LD I, addr", loadi),
            direct("JP V0, addr", jumpi),
            direct("RND Vx, byte", rand),
            direct("DRW Vx, Vy, n", draw),
            group(SubKey::Kk, &[(0x9E, "SKP Vx", skpr), (0xA1, "SKNP Vx", skup)]),
            group(
                SubKey::Kk,
                &[
                    (0x07, "LD Vx, DT", moved),
                    (0x0A, "LD Vx, K", keyd),
                    (0x15, "LD DT, Vx", loaddt),
                    (0x18, "LD ST, Vx", loadst),
                    (0x1E, "ADD I, Vx", addi),
                    (0x29, "LD F, Vx", ldspr),
                    (0x33, "LD B, Vx", bcd),
                    (0x55, "LD [I], Vx", stor),
                    (0x65, "LD Vx, [I]", read),
                ],
            ),
        ];
        DispatchTable { families }
    }

    /// The operation for `op`, or `None` if no operation is assigned to it
    pub fn lookup(&self, op: u16) -> Option<Operation> {
        match &self.families[usize::from(op.family())] {
            Family::Direct(operation) => Some(*operation),
            Family::Group { key, ops } => ops[key.of(op)],
        }
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

fn direct(mnemonic: &'static str, execute: Execute) -> Family {
    Family::Direct(Operation { mnemonic, execute })
}

fn group(key: SubKey, entries: &[(u8, &'static str, Execute)]) -> Family {
    let mut ops = Box::new([None; 256]);
    for &(sub, mnemonic, execute) in entries {
        ops[usize::from(sub)] = Some(Operation { mnemonic, execute });
    }
    Family::Group { key, ops }
}
