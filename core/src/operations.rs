use rand::rngs::StdRng;
use rand::Rng;

use crate::constants::{FLAG, FONT_GLYPH_SIZE, FONT_START};
use crate::error::Result;
use crate::opcode::Opcode;
use crate::state::State;

// Every operation runs after the cycle driver has moved pc past the
// instruction, so pc - 2 is the address the instruction was fetched from.
// Operations validate everything that can fail before mutating anything.

/// Address the current instruction was fetched from
fn origin(state: &State) -> u16 {
    state.pc.wrapping_sub(2)
}

fn skip_if(condition: bool, state: &mut State) {
    if condition {
        state.pc = state.pc.wrapping_add(2);
    }
}

/// clear
pub fn clr(_op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    state.frame_buffer.clear();
    state.draw_flag = true;
    Ok(())
}

/// PC = STACK.pop()
pub fn rts(_op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    let caller = origin(state);
    state.pc = state.stack.pop(caller)?;
    Ok(())
}

/// PC = addr
pub fn jump(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    state.pc = op.nnn();
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    let caller = origin(state);
    state.stack.push(state.pc, caller)?;
    state.pc = op.nnn();
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    skip_if(state.v[op.x()] == op.kk(), state);
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skne(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    skip_if(state.v[op.x()] != op.kk(), state);
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    skip_if(state.v[op.x()] == state.v[op.y()], state);
    Ok(())
}

/// Vx = kk
pub fn load(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    state.v[op.x()] = op.kk();
    Ok(())
}

/// Vx += kk
/// Wraps without touching VF
pub fn add(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    state.v[op.x()] = state.v[op.x()].wrapping_add(op.kk());
    Ok(())
}

/// Vx = Vy
pub fn mv(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    state.v[op.x()] = state.v[op.y()];
    Ok(())
}

/// Vx |= Vy
pub fn or(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    state.v[op.x()] |= state.v[op.y()];
    Ok(())
}

/// Vx &= Vy
pub fn and(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    state.v[op.x()] &= state.v[op.y()];
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    state.v[op.x()] ^= state.v[op.y()];
    Ok(())
}

// The flag is written after the result for the whole ALU family, so VF
// holds the flag even when it is also the destination register.

/// Vx += Vy; VF = carry
pub fn addr(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    let sum = u16::from(state.v[op.x()]) + u16::from(state.v[op.y()]);
    state.v[op.x()] = (sum & 0xFF) as u8;
    state.v[FLAG] = u8::from(sum > 0xFF);
    Ok(())
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vx.wrapping_sub(vy);
    state.v[FLAG] = u8::from(vx > vy);
    Ok(())
}

/// Vx >>= 1; VF = shifted out bit
pub fn shr(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    let vx = state.v[op.x()];
    state.v[op.x()] = vx >> 1;
    state.v[FLAG] = vx & 0x1;
    Ok(())
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vy.wrapping_sub(vx);
    state.v[FLAG] = u8::from(vy > vx);
    Ok(())
}

/// Vx <<= 1; VF = shifted out bit
pub fn shl(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    let vx = state.v[op.x()];
    state.v[op.x()] = vx << 1;
    state.v[FLAG] = vx >> 7;
    Ok(())
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    skip_if(state.v[op.x()] != state.v[op.y()], state);
    Ok(())
}

/// I = addr
pub fn loadi(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    state.i = op.nnn();
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    state.pc = u16::from(state.v[0x0]).wrapping_add(op.nnn());
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rand(op: u16, state: &mut State, rng: &mut StdRng) -> Result<()> {
    let byte: u8 = rng.gen();
    state.v[op.x()] = byte & op.kk();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the sprite at mem[I..I+n] onto the FrameBuffer at (Vx, Vy) with wrapping.
/// VF = any lit pixel was erased
pub fn draw(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    let (x, y) = (state.v[op.x()], state.v[op.y()]);
    let sprite = state
        .memory
        .slice(usize::from(state.i), usize::from(op.n()))?;
    let collision = state.frame_buffer.draw_sprite(x, y, sprite);
    state.v[FLAG] = u8::from(collision);
    state.draw_flag = true;
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    skip_if(state.keypad.is_pressed(state.v[op.x()]), state);
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    skip_if(!state.keypad.is_pressed(state.v[op.x()]), state);
    Ok(())
}

/// Vx = DT
pub fn moved(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    state.v[op.x()] = state.timers.delay;
    Ok(())
}

/// Vx = next keypress
/// Resolves at once if a key is already held, otherwise parks the machine
/// until the cycle driver sees one.
pub fn keyd(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    match state.keypad.first_pressed() {
        Some(key) => state.v[op.x()] = key,
        None => {
            tracing::debug!(register = op.x(), "waiting for key");
            state.register_needing_key = Some(op.x());
        }
    }
    Ok(())
}

/// DT = Vx
pub fn loaddt(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    state.timers.delay = state.v[op.x()];
    Ok(())
}

/// ST = Vx
pub fn loadst(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    state.timers.sound = state.v[op.x()];
    Ok(())
}

/// I += Vx
pub fn addi(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    state.i = state.i.wrapping_add(u16::from(state.v[op.x()]));
    Ok(())
}

/// I = FONT_START + Vx * 5
/// Points I at the font glyph for the digit in Vx
pub fn ldspr(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    state.i = FONT_START + FONT_GLYPH_SIZE * u16::from(state.v[op.x()]);
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Hundreds, tens and ones digits of Vx
pub fn bcd(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    let value = state.v[op.x()];
    state
        .memory
        .slice_mut(usize::from(state.i), 3)?
        .copy_from_slice(&[value / 100, value / 10 % 10, value % 10]);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    let count = op.x() + 1;
    state
        .memory
        .slice_mut(usize::from(state.i), count)?
        .copy_from_slice(&state.v[..count]);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: u16, state: &mut State, _rng: &mut StdRng) -> Result<()> {
    let count = op.x() + 1;
    let bytes = state.memory.slice(usize::from(state.i), count)?;
    state.v[..count].copy_from_slice(bytes);
    Ok(())
}
